//! Typed accessors for the records the service keeps in the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vibeboard_core::InfluencerProfile;

use crate::keys::{content_analysis_key, influencer_key, scrape_status_key};
use crate::{DbError, KvStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeState {
    Completed,
    Failed,
}

/// Outcome of the most recent scrape of a handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeStatus {
    pub status: ScrapeState,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts_scraped: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reels_scraped: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeStatus {
    #[must_use]
    pub fn completed(aggregate: &InfluencerProfile, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: ScrapeState::Completed,
            timestamp,
            posts_scraped: Some(aggregate.posts.len()),
            reels_scraped: Some(aggregate.reels.len()),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: ScrapeState::Failed,
            timestamp,
            posts_scraped: None,
            reels_scraped: None,
            error: Some(error.into()),
        }
    }
}

/// Load the cached aggregate for `handle`, if any.
///
/// # Errors
///
/// Returns [`DbError`] if the store fails or the cached JSON is malformed.
pub async fn get_influencer(
    store: &KvStore,
    handle: &str,
) -> Result<Option<InfluencerProfile>, DbError> {
    store.get(&influencer_key(handle)).await
}

/// Load the cached aggregate for `handle`, failing when absent.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when nothing is cached for `handle`.
pub async fn require_influencer(
    store: &KvStore,
    handle: &str,
) -> Result<InfluencerProfile, DbError> {
    store.require(&influencer_key(handle)).await
}

/// Cache `aggregate` under `handle`, replacing any previous entry.
///
/// # Errors
///
/// Returns [`DbError`] if the store write fails.
pub async fn put_influencer(
    store: &KvStore,
    handle: &str,
    aggregate: &InfluencerProfile,
) -> Result<(), DbError> {
    store.set(&influencer_key(handle), aggregate).await
}

/// # Errors
///
/// Returns [`DbError`] if the store fails or the status JSON is malformed.
pub async fn get_scrape_status(
    store: &KvStore,
    handle: &str,
) -> Result<Option<ScrapeStatus>, DbError> {
    store.get(&scrape_status_key(handle)).await
}

/// # Errors
///
/// Returns [`DbError`] if the store write fails.
pub async fn put_scrape_status(
    store: &KvStore,
    handle: &str,
    status: &ScrapeStatus,
) -> Result<(), DbError> {
    store.set(&scrape_status_key(handle), status).await
}

/// Record a content-analysis report. Reports are never overwritten; each
/// lands under its own timestamped key.
///
/// # Errors
///
/// Returns [`DbError`] if the report cannot be encoded or written.
pub async fn put_content_analysis<T: Serialize + ?Sized>(
    store: &KvStore,
    handle: &str,
    epoch_millis: i64,
    report: &T,
) -> Result<String, DbError> {
    let key = content_analysis_key(handle, epoch_millis);
    store.set(&key, report).await?;
    Ok(key)
}
