use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub url: String,
    pub ranking: RankingInfo,
    pub issues: Vec<SeoIssue>,
    pub recommendations: Vec<String>,
    pub analyzed_at: String,
}

/// Placeholder ranking data; no provider is queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingInfo {
    pub google_ranking: String,
    pub alexa_ranking: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoIssue {
    pub severity: IssueSeverity,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub description: String,
}

impl SeoIssue {
    pub fn error(issue_type: IssueType, description: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            issue_type,
            description: description.into(),
        }
    }

    pub fn warning(issue_type: IssueType, description: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            issue_type,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueSeverity {
    Error,
    Warning,
    // Reserved, no check emits it yet
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueType {
    #[serde(rename = "Missing Title")]
    MissingTitle,
    #[serde(rename = "Title Length")]
    TitleLength,
    #[serde(rename = "Missing Meta Description")]
    MissingMetaDescription,
    #[serde(rename = "Meta Description Length")]
    MetaDescriptionLength,
    #[serde(rename = "Missing H1")]
    MissingH1,
    #[serde(rename = "Multiple H1")]
    MultipleH1,
    #[serde(rename = "Missing Image Alt")]
    MissingImageAlt,
    #[serde(rename = "Broken Link")]
    BrokenLink,
    #[serde(rename = "Crawl Error")]
    CrawlError,
}

impl IssueType {
    /// The category tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::MissingTitle => "Missing Title",
            IssueType::TitleLength => "Title Length",
            IssueType::MissingMetaDescription => "Missing Meta Description",
            IssueType::MetaDescriptionLength => "Meta Description Length",
            IssueType::MissingH1 => "Missing H1",
            IssueType::MultipleH1 => "Multiple H1",
            IssueType::MissingImageAlt => "Missing Image Alt",
            IssueType::BrokenLink => "Broken Link",
            IssueType::CrawlError => "Crawl Error",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-severity counts, used by the text report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}
