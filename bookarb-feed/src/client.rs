//! HTTP client for The Odds API, with retries and a time-to-live cache.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheKey, CacheStats, TtlCache};
use crate::config::{FeedConfig, DEFAULT_MARKET};
use crate::error::FetchError;
use crate::model::{ApiMessage, Event};
use crate::retry::retry;

const REQUESTS_REMAINING: &str = "x-requests-remaining";

/// Cache key market under which discovery results are held.
const ANY_MARKET: &str = "*";

#[derive(Debug, Clone)]
pub struct OddsApiClient {
    http: reqwest::Client,
    config: Arc<FeedConfig>,
    cache: Arc<Mutex<TtlCache<CacheKey, Vec<Event>>>>,
}
impl OddsApiClient {
    pub fn new(config: FeedConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        let cache = TtlCache::new(config.cache_ttl);
        Ok(Self {
            http,
            config: Arc::new(config),
            cache: Arc::new(Mutex::new(cache)),
        })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Odds for every upcoming event of a sport in a single market.
    pub async fn odds(&self, sport: &str, market: &str) -> Result<Vec<Event>, FetchError> {
        let key = CacheKey::new(sport, market);
        if let Some(events) = self.cache.lock().await.get(&key) {
            debug!("cached odds for {sport}/{market}");
            return Ok(events);
        }

        let url = format!("{}/v4/sports/{sport}/odds", self.base_url());
        let events: Vec<Event> = retry(&self.config.retry, &format!("odds {sport}/{market}"), || {
            self.get_json(&url, Some(market))
        })
        .await?;
        info!("fetched {} {sport} events for {market}", events.len());
        self.cache.lock().await.insert(key, events.clone());
        Ok(events)
    }

    /// Odds for a single event in a single market.
    pub async fn event_odds(&self, sport: &str, event_id: &str, market: &str) -> Result<Event, FetchError> {
        let key = CacheKey::new(event_id, market);
        if let Some(event) = self
            .cache
            .lock()
            .await
            .get(&key)
            .and_then(|events| events.into_iter().next())
        {
            debug!("cached odds for event {event_id}/{market}");
            return Ok(event);
        }

        let url = format!("{}/v4/sports/{sport}/events/{event_id}/odds", self.base_url());
        let event: Event = retry(&self.config.retry, &format!("event odds {event_id}/{market}"), || {
            self.get_json(&url, Some(market))
        })
        .await?;
        self.cache.lock().await.insert(key, vec![event.clone()]);
        Ok(event)
    }

    /// The market keys offered for the first upcoming event of a sport, falling back to
    /// head-to-head when the sport has no priced events. Discovery is cached per sport.
    pub async fn discover_markets(&self, sport: &str) -> Result<Vec<String>, FetchError> {
        let key = CacheKey::new(sport, ANY_MARKET);
        let cached = self.cache.lock().await.get(&key);
        let events = match cached {
            Some(events) => {
                debug!("cached market discovery for {sport}");
                events
            }
            None => {
                let url = format!("{}/v4/sports/{sport}/odds", self.base_url());
                let events: Vec<Event> = retry(&self.config.retry, &format!("discover {sport}"), || {
                    self.get_json(&url, None)
                })
                .await?;
                // only the first event is consulted
                let first: Vec<Event> = events.into_iter().take(1).collect();
                self.cache.lock().await.insert(key, first.clone());
                first
            }
        };

        let markets: BTreeSet<_> = events
            .iter()
            .flat_map(|event| &event.bookmakers)
            .flat_map(|bookmaker| &bookmaker.markets)
            .map(|market| market.key.clone())
            .collect();
        if markets.is_empty() {
            debug!("no markets discovered for {sport}; defaulting to {DEFAULT_MARKET}");
            Ok(vec![DEFAULT_MARKET.to_owned()])
        } else {
            Ok(markets.into_iter().collect())
        }
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats().clone()
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, market: Option<&str>) -> Result<T, FetchError> {
        let mut query = vec![
            ("apiKey", self.config.api_key.clone()),
            ("regions", self.config.regions_param()),
            ("oddsFormat", self.config.odds_format.to_string()),
        ];
        if let Some(market) = market {
            query.push(("markets", market.to_owned()));
        }

        let response = self.http.get(url).query(&query).send().await?;
        let status = response.status();
        if let Some(remaining) = response
            .headers()
            .get(REQUESTS_REMAINING)
            .and_then(|value| value.to_str().ok())
        {
            debug!("{url}: {remaining} requests remaining");
        }
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map(|api_message| api_message.message)
                .unwrap_or(body);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
                retry_after,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
