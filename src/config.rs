use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{CheckArgs, DEFAULT_HOST, DEFAULT_OUTPUT, DEFAULT_PORT, DEFAULT_TIMEOUT, ServeArgs};

/// Configuration file structure. All fields are optional so a file can set
/// only what it cares about; CLI flags that differ from their defaults win.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Address the service binds to
    pub host: Option<String>,

    /// Port the service listens on
    pub port: Option<u16>,

    /// Fetch timeout in seconds
    pub timeout: Option<u64>,

    /// Output format for `check`: text or json
    pub output: Option<String>,

    /// Debug logging
    pub verbose: Option<bool>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

const ALL_FORMATS: [ConfigFormat; 3] = [ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml];

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Candidate config files in priority order: `onpage.*` in the current
    /// directory, then `config.*` under `$XDG_CONFIG_HOME/onpage` (or
    /// `~/.config/onpage`).
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        for format in &ALL_FORMATS {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("onpage.{}", ext)));
            }
        }

        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let config_dir = config_home.join("onpage");
            for format in &ALL_FORMATS {
                for ext in format.extensions() {
                    paths.push(config_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// First config file found on the default paths, if any.
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// An explicit path must exist; otherwise fall back to the default paths.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::from_default_paths()?.unwrap_or_default()),
        }
    }

    pub fn merge_with_serve(&self, args: &ServeArgs) -> ServeArgs {
        ServeArgs {
            host: if args.host != DEFAULT_HOST {
                args.host.clone()
            } else {
                self.host.clone().unwrap_or_else(|| args.host.clone())
            },
            port: if args.port != DEFAULT_PORT {
                args.port
            } else {
                self.port.unwrap_or(args.port)
            },
            timeout: if args.timeout != DEFAULT_TIMEOUT {
                args.timeout
            } else {
                self.timeout.unwrap_or(args.timeout)
            },
        }
    }

    pub fn merge_with_check(&self, args: &CheckArgs) -> CheckArgs {
        CheckArgs {
            url: args.url.clone(),
            output: if args.output != DEFAULT_OUTPUT {
                args.output.clone()
            } else {
                self.output.clone().unwrap_or_else(|| args.output.clone())
            },
            save: args.save.clone(),
            timeout: if args.timeout != DEFAULT_TIMEOUT {
                args.timeout
            } else {
                self.timeout.unwrap_or(args.timeout)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::{NamedTempFile, tempdir};

    fn write_temp(extension: &str, contents: &str) -> PathBuf {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension(extension);
        fs::write(&temp_path, contents).unwrap();
        temp_path
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.TOML")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("config.txt")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
    }

    #[test]
    fn test_load_each_format() {
        let cases = [
            (
                "json",
                r#"{"host": "0.0.0.0", "port": 9000, "timeout": 5, "output": "json", "verbose": true}"#,
            ),
            (
                "toml",
                "host = \"0.0.0.0\"\nport = 9000\ntimeout = 5\noutput = \"json\"\nverbose = true\n",
            ),
            (
                "yaml",
                "host: 0.0.0.0\nport: 9000\ntimeout: 5\noutput: json\nverbose: true\n",
            ),
        ];

        for (ext, contents) in cases {
            let path = write_temp(ext, contents);
            let config = Config::from_file(&path).unwrap();

            assert_eq!(config.host.as_deref(), Some("0.0.0.0"), "{}", ext);
            assert_eq!(config.port, Some(9000), "{}", ext);
            assert_eq!(config.timeout, Some(5), "{}", ext);
            assert_eq!(config.output.as_deref(), Some("json"), "{}", ext);
            assert_eq!(config.verbose, Some(true), "{}", ext);

            fs::remove_file(path).ok();
        }
    }

    #[test]
    fn test_partial_config() {
        let path = write_temp("yml", "port: 3001\n");
        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.port, Some(3001));
        assert_eq!(config.host, None);
        assert_eq!(config.timeout, None);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_configs_are_errors() {
        for (ext, contents) in [
            ("json", "{ invalid json }"),
            ("toml", "[[[ invalid toml"),
            ("yaml", "port: \"unterminated\n  host: x"),
            ("txt", "port = 1"),
        ] {
            let path = write_temp(ext, contents);
            assert!(Config::from_file(&path).is_err(), "{} should fail", ext);
            fs::remove_file(path).ok();
        }
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        assert!(Config::load(Some("/definitely/not/here/onpage.toml")).is_err());
    }

    #[test]
    fn test_merge_with_serve_defaults() {
        let config = Config {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            timeout: Some(10),
            ..Default::default()
        };

        let merged = config.merge_with_serve(&ServeArgs::default());
        assert_eq!(merged.host, "0.0.0.0");
        assert_eq!(merged.port, 9000);
        assert_eq!(merged.timeout, 10);
    }

    #[test]
    fn test_merge_with_serve_overrides() {
        let config = Config {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            timeout: Some(10),
            ..Default::default()
        };
        let args = ServeArgs {
            host: "::1".to_string(),
            port: 7000,
            timeout: 3,
        };

        assert_eq!(config.merge_with_serve(&args), args);
    }

    #[test]
    fn test_merge_with_check() {
        let config = Config {
            output: Some("json".to_string()),
            timeout: Some(12),
            ..Default::default()
        };
        let args = CheckArgs {
            url: "https://example.com".to_string(),
            output: "text".to_string(),
            save: Some("report.json".to_string()),
            timeout: 30,
        };

        let merged = config.merge_with_check(&args);
        assert_eq!(merged.url, "https://example.com");
        assert_eq!(merged.output, "json");
        assert_eq!(merged.timeout, 12);
        assert_eq!(merged.save, Some("report.json".to_string()));
    }

    #[test]
    fn test_default_paths_include_current_dir() {
        let paths = Config::default_paths();
        for name in ["onpage.json", "onpage.toml", "onpage.yaml", "onpage.yml"] {
            assert!(paths.iter().any(|p| p == Path::new(name)), "{}", name);
        }
    }

    #[test]
    #[serial]
    fn test_default_paths_with_xdg_config_home() {
        unsafe {
            env::set_var("XDG_CONFIG_HOME", "/custom/config/path");
        }

        let paths = Config::default_paths();
        assert!(
            paths
                .iter()
                .any(|p| p == Path::new("/custom/config/path/onpage/config.toml"))
        );

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_default_paths_with_empty_xdg_config_home() {
        unsafe {
            env::set_var("XDG_CONFIG_HOME", "");
        }

        let paths = Config::default_paths();
        assert!(!paths.iter().any(|p| p.starts_with("onpage/")));

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_from_default_paths_priority_order() {
        let temp_dir = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        let temp_config_dir = tempdir().unwrap();
        let onpage_dir = temp_config_dir.path().join("onpage");
        fs::create_dir_all(&onpage_dir).unwrap();
        unsafe {
            env::set_var("XDG_CONFIG_HOME", temp_config_dir.path());
        }

        fs::write(onpage_dir.join("config.json"), r#"{"port": 2000}"#).unwrap();
        let config = Config::from_default_paths().unwrap().unwrap();
        assert_eq!(config.port, Some(2000));

        // Current directory wins over the config directory
        fs::write(temp_dir.path().join("onpage.yaml"), "port: 1000\n").unwrap();
        let config = Config::from_default_paths().unwrap().unwrap();
        assert_eq!(config.port, Some(1000));

        env::set_current_dir(&original_dir).ok();
        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_from_default_paths_returns_none_when_no_config_exists() {
        let temp_dir = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        let temp_config_dir = tempdir().unwrap();
        unsafe {
            env::set_var("XDG_CONFIG_HOME", temp_config_dir.path());
        }

        assert!(Config::from_default_paths().unwrap().is_none());
        assert_eq!(Config::load(None).unwrap(), Config::default());

        env::set_current_dir(&original_dir).ok();
        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_from_default_paths_returns_error_on_invalid_config() {
        let temp_dir = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        fs::write(temp_dir.path().join("onpage.json"), "{ invalid json syntax }").unwrap();
        assert!(Config::from_default_paths().is_err());

        env::set_current_dir(&original_dir).ok();
    }
}
