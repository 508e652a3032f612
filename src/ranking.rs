use crate::models::RankingInfo;
use url::Url;

pub const SIMULATED_GOOGLE_RANKING: &str = "Simulated: Top 10";
pub const RETIRED_ALEXA_RANKING: &str = "Retired (Service Discontinued May 2022)";

pub trait RankingProvider: Send + Sync {
    fn ranking(&self, url: &Url) -> RankingInfo;
}

/// Stand-in for a real ranking source. Alexa has been shut down and search
/// position data needs a paid SERP API, so both values are fixed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedRanking;

impl RankingProvider for SimulatedRanking {
    fn ranking(&self, _url: &Url) -> RankingInfo {
        RankingInfo {
            google_ranking: SIMULATED_GOOGLE_RANKING.to_string(),
            alexa_ranking: RETIRED_ALEXA_RANKING.to_string(),
        }
    }
}
