use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::models::AnalysisReport;
use crate::ranking::{RankingProvider, SimulatedRanking};
use crate::reporter::Reporter;
use crate::seo_analyzer::SeoAnalyzer;
use anyhow::Result;
use std::sync::Arc;
use url::Url;

pub type SharedState<F = HttpFetcher> = Arc<AppState<F>>;

/// Collaborators for one analysis. Holds no per-request data, so it is shared
/// read-only across requests.
pub struct AppState<F = HttpFetcher> {
    pub analyzer: SeoAnalyzer<F>,
    pub ranking: Arc<dyn RankingProvider>,
}

impl AppState<HttpFetcher> {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new(timeout_secs)?))
    }
}

impl<F: PageFetcher> AppState<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            analyzer: SeoAnalyzer::new(fetcher),
            ranking: Arc::new(SimulatedRanking),
        }
    }

    /// `requested` is echoed back in the report as the caller sent it.
    pub async fn analyze(&self, requested: &str, url: &Url) -> AnalysisReport {
        let ranking = self.ranking.ranking(url);
        let issues = self.analyzer.analyze(url).await;

        tracing::info!(url = %url, issues = issues.len(), "Analysis complete");

        Reporter::assemble(requested, ranking, issues)
    }
}
