use crate::models::{IssueType, SeoIssue};

/// Advice for the categories that have one. Length and fetch issues have none.
pub fn recommendation_for(issue_type: IssueType) -> Option<&'static str> {
    match issue_type {
        IssueType::MissingTitle => Some("Add a <title> tag to your page."),
        IssueType::MissingMetaDescription => {
            Some("Add a meta description to improve click-through rates.")
        }
        IssueType::MissingH1 => Some("Add an <h1> tag for the main heading."),
        IssueType::MissingImageAlt => {
            Some("Ensure all images have alt attributes for accessibility and SEO.")
        }
        _ => None,
    }
}

/// One entry per matching issue, in issue order. Repeats are kept: three
/// images without alt text produce the same sentence three times.
pub fn recommend(issues: &[SeoIssue]) -> Vec<String> {
    issues
        .iter()
        .filter_map(|issue| recommendation_for(issue.issue_type))
        .map(str::to_string)
        .collect()
}
