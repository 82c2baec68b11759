use std::time::Duration;

use strum_macros::{Display, EnumIter, EnumString};

use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.the-odds-api.com";
pub const DEFAULT_MARKET: &str = "h2h";

/// Bookmaker region, determining which books quote in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Region {
    Us,
    Us2,
    Uk,
    Eu,
    Au,
}

/// Price format requested from the API. American prices are converted to decimal on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OddsFormat {
    #[default]
    Decimal,
    American,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub api_key: String,
    pub base_url: String,
    pub regions: Vec<Region>,
    pub odds_format: OddsFormat,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub retry: RetryPolicy,
}
impl FeedConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            regions: vec![Region::Us],
            odds_format: OddsFormat::default(),
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(3_600),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_odds_format(mut self, odds_format: OddsFormat) -> Self {
        self.odds_format = odds_format;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Regions as the comma-separated list expected by the `regions` query parameter.
    pub fn regions_param(&self) -> String {
        self.regions
            .iter()
            .map(Region::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}
