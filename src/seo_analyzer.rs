use crate::document::Document;
use crate::fetcher::{FetchedPage, PageFetcher};
use crate::models::{IssueType, SeoIssue};
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use scraper::Selector;
use url::Url;

pub const MAX_TITLE_LENGTH: usize = 60;
pub const MAX_META_DESCRIPTION_LENGTH: usize = 160;

// Cached selectors to avoid repeated parsing and eliminate unwrap() calls
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_DESC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("meta description selector should be valid")
});
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("h1 selector should be valid"));
static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("img selector should be valid"));

pub struct SeoAnalyzer<F> {
    fetcher: F,
}

impl<F: PageFetcher> SeoAnalyzer<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetches `url` and runs every check against it.
    ///
    /// A failed fetch or a non-success status short-circuits into exactly one
    /// issue; the document checks only run on a usable response.
    pub async fn analyze(&self, url: &Url) -> Vec<SeoIssue> {
        match self.fetcher.fetch(url).await {
            Ok(page) if !page.is_success() => {
                tracing::info!(url = %url, status = page.status_code, "Page returned non-success status");
                vec![broken_link(&page)]
            }
            Ok(page) => check_document(&page.body),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to fetch page");
                vec![SeoIssue::error(
                    IssueType::CrawlError,
                    format!("Failed to crawl URL: {}", e),
                )]
            }
        }
    }
}

/// Runs the document checks in their fixed order: title, meta description,
/// headings, images.
pub fn check_document(html: &str) -> Vec<SeoIssue> {
    let document = Document::parse(html);
    let mut issues = Vec::new();

    check_title(&document, &mut issues);
    check_meta_description(&document, &mut issues);
    check_h1(&document, &mut issues);
    check_image_alt(&document, &mut issues);

    issues
}

fn broken_link(page: &FetchedPage) -> SeoIssue {
    let reason = StatusCode::from_u16(page.status_code)
        .ok()
        .and_then(|status| status.canonical_reason());

    let description = match reason {
        Some(reason) => format!("URL returned status code: {} ({})", page.status_code, reason),
        None => format!("URL returned status code: {}", page.status_code),
    };

    SeoIssue::error(IssueType::BrokenLink, description)
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn check_title(document: &Document, issues: &mut Vec<SeoIssue>) {
    let title = document.select_first(&TITLE_SELECTOR).map(|node| node.text());

    if is_blank(title.as_deref()) {
        issues.push(SeoIssue::error(
            IssueType::MissingTitle,
            "The page does not have a <title> tag.",
        ));
    } else if let Some(title) = title {
        let len = title.chars().count();
        if len > MAX_TITLE_LENGTH {
            issues.push(SeoIssue::warning(
                IssueType::TitleLength,
                format!(
                    "Title is too long ({} chars). Recommended max is {}.",
                    len, MAX_TITLE_LENGTH
                ),
            ));
        }
    }
}

fn check_meta_description(document: &Document, issues: &mut Vec<SeoIssue>) {
    let content = document
        .select_first(&META_DESC_SELECTOR)
        .and_then(|node| node.attribute("content"));

    if is_blank(content) {
        issues.push(SeoIssue::error(
            IssueType::MissingMetaDescription,
            "The page does not have a meta description.",
        ));
    } else if let Some(content) = content {
        let len = content.chars().count();
        if len > MAX_META_DESCRIPTION_LENGTH {
            issues.push(SeoIssue::warning(
                IssueType::MetaDescriptionLength,
                format!(
                    "Meta description is too long ({} chars). Recommended max is {}.",
                    len, MAX_META_DESCRIPTION_LENGTH
                ),
            ));
        }
    }
}

fn check_h1(document: &Document, issues: &mut Vec<SeoIssue>) {
    let count = document.select_all(&H1_SELECTOR).len();

    if count == 0 {
        issues.push(SeoIssue::error(
            IssueType::MissingH1,
            "The page does not have an <h1> tag.",
        ));
    } else if count > 1 {
        issues.push(SeoIssue::warning(
            IssueType::MultipleH1,
            format!(
                "The page has {} <h1> tags. It is recommended to have only one.",
                count
            ),
        ));
    }
}

fn check_image_alt(document: &Document, issues: &mut Vec<SeoIssue>) {
    let missing = document
        .select_all(&IMG_SELECTOR)
        .into_iter()
        .filter(|img| is_blank(img.attribute("alt")));

    for img in missing {
        let src = img.attribute("src").unwrap_or("unknown");
        issues.push(SeoIssue::warning(
            IssueType::MissingImageAlt,
            format!("Image with src '{}' is missing an alt attribute.", src),
        ));
    }
}
