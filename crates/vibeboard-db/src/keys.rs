//! Key layout of the cache. Every key is `{namespace}:{handle}[:{suffix}]`.

#[must_use]
pub fn influencer_key(handle: &str) -> String {
    format!("influencer:{handle}")
}

#[must_use]
pub fn scrape_status_key(handle: &str) -> String {
    format!("scrape_status:{handle}")
}

#[must_use]
pub fn content_analysis_key(handle: &str, epoch_millis: i64) -> String {
    format!("content_analysis:{handle}:{epoch_millis}")
}
