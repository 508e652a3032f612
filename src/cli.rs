use clap::{Args, Parser, Subcommand};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT: u64 = 30;
pub const DEFAULT_OUTPUT: &str = "text";

#[derive(Parser, Debug)]
#[command(name = "onpage")]
#[command(about = "On-page SEO analysis service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve(ServeArgs),
    /// Analyze a single URL and print the report
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Timeout in seconds for fetching the analyzed page
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT)]
    pub timeout: u64,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct CheckArgs {
    /// The page to analyze
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output format: text or json
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Save the JSON report to a file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Timeout in seconds for fetching the page
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT)]
    pub timeout: u64,
}
