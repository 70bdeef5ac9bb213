//! Discogs API client
//!
//! Raw entity-name resolver backed by the Discogs REST API, with client-side
//! rate limiting.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

use cratenote_common::config::ApiConfig;
use cratenote_markup::{EntityKind, EntityResolver, ResolveError};

// Discogs allows 60 requests/minute with a token, 25/minute anonymous.
const RATE_LIMIT_AUTH_MS: u64 = 1000;
const RATE_LIMIT_ANON_MS: u64 = 2400;

/// Discogs client errors
#[derive(Debug, Error)]
pub enum DiscogsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{0} {1} not found")]
    NotFound(EntityKind, u64),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<DiscogsError> for ResolveError {
    fn from(err: DiscogsError) -> Self {
        match err {
            DiscogsError::NotFound(..) => ResolveError::NotFound,
            DiscogsError::Parse(msg) => ResolveError::Decode(msg),
            other => ResolveError::Transport(other.to_string()),
        }
    }
}

/// Minimal artist record; the API returns far more fields.
#[derive(Debug, Deserialize)]
struct ArtistRecord {
    #[allow(dead_code)]
    id: u64,
    name: String,
}

/// Minimal release/master record.
#[derive(Debug, Deserialize)]
struct TitledRecord {
    #[allow(dead_code)]
    id: u64,
    title: String,
}

/// Minimum-interval rate limiter for Discogs requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait if necessary to comply with the rate limit
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Discogs rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Discogs REST API client
pub struct DiscogsClient {
    http_client: reqwest::Client,
    rate_limiter: Arc<RateLimiter>,
    base_url: String,
    token: Option<String>,
}

impl DiscogsClient {
    /// Build a client from API settings. Anonymous clients get the stricter
    /// rate limit.
    pub fn new(config: &ApiConfig) -> Result<Self, DiscogsError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DiscogsError::Network(e.to_string()))?;

        let min_interval = if config.token.is_some() {
            Duration::from_millis(RATE_LIMIT_AUTH_MS)
        } else {
            Duration::from_millis(RATE_LIMIT_ANON_MS)
        };

        Ok(Self {
            http_client,
            rate_limiter: Arc::new(RateLimiter::new(min_interval)),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn entity_url(&self, kind: EntityKind, id: u64) -> String {
        let path = match kind {
            EntityKind::Artist => "artists",
            EntityKind::Release => "releases",
            EntityKind::Master => "masters",
        };
        format!("{}/{}/{}", self.base_url, path, id)
    }

    async fn get_json<T>(&self, kind: EntityKind, id: u64) -> Result<T, DiscogsError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.rate_limiter.wait().await;

        let url = self.entity_url(kind, id);
        tracing::debug!(kind = %kind, id, url = %url, "Querying Discogs API");

        let mut request = self.http_client.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Discogs token={token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| DiscogsError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DiscogsError::NotFound(kind, id));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DiscogsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DiscogsError::Api(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| DiscogsError::Parse(e.to_string()))
    }

    /// Fetch an artist's name by ID
    pub async fn artist_name(&self, id: u64) -> Result<String, DiscogsError> {
        let record: ArtistRecord = self.get_json(EntityKind::Artist, id).await?;
        tracing::debug!(id, name = %record.name, "Retrieved artist from Discogs");
        Ok(record.name)
    }

    /// Fetch a release title by ID
    pub async fn release_title(&self, id: u64) -> Result<String, DiscogsError> {
        let record: TitledRecord = self.get_json(EntityKind::Release, id).await?;
        Ok(record.title)
    }

    /// Fetch a master title by ID
    pub async fn master_title(&self, id: u64) -> Result<String, DiscogsError> {
        let record: TitledRecord = self.get_json(EntityKind::Master, id).await?;
        Ok(record.title)
    }
}

#[async_trait]
impl EntityResolver for DiscogsClient {
    async fn resolve_artist(&self, id: u64) -> Result<String, ResolveError> {
        Ok(self.artist_name(id).await?)
    }

    async fn resolve_release(&self, id: u64) -> Result<String, ResolveError> {
        Ok(self.release_title(id).await?)
    }

    async fn resolve_master(&self, id: u64) -> Result<String, ResolveError> {
        Ok(self.master_title(id).await?)
    }
}
