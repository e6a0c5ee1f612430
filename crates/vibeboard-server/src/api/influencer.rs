use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;
use vibeboard_core::{DerivedAnalytics, InfluencerProfile};
use vibeboard_db::ScrapeStatus;
use vibeboard_profiler::{ProfilerError, RngSource};

use crate::middleware::RequestId;

use super::{map_db_error, map_profiler_error, ApiError, ApiResponse, AppState};

const SCRAPE_COMPLETED: &str = "Scraping completed successfully";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ScrapeOutcome {
    message: &'static str,
    status: ScrapeStatus,
    profile: InfluencerProfile,
}

pub(super) fn validated_handle<'a>(
    req_id: &RequestId,
    handle: &'a str,
) -> Result<&'a str, ApiError> {
    vibeboard_core::validate_handle(handle)
        .map_err(|e| map_profiler_error(req_id.0.clone(), &ProfilerError::from(e)))
}

/// Cached aggregate for `handle`, generating and caching one on a miss.
/// Concurrent misses for the same handle generate once.
async fn load_or_generate(
    state: &AppState,
    req_id: &RequestId,
    handle: &str,
) -> Result<InfluencerProfile, ApiError> {
    let cached = vibeboard_db::get_influencer(&state.store, handle)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    if let Some(aggregate) = cached {
        return Ok(aggregate);
    }

    let _guard = state.population_locks.acquire(handle).await;

    // Another request may have populated the entry while we waited.
    let cached = vibeboard_db::get_influencer(&state.store, handle)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    if let Some(aggregate) = cached {
        return Ok(aggregate);
    }

    let aggregate = vibeboard_profiler::generate(handle, &mut RngSource::from_entropy())
        .map_err(|e| map_profiler_error(req_id.0.clone(), &e))?;
    vibeboard_db::put_influencer(&state.store, handle, &aggregate)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    tracing::info!(handle, "generated and cached influencer profile");

    Ok(aggregate)
}

pub(super) async fn get_influencer(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<InfluencerProfile>>, ApiError> {
    let handle = validated_handle(&req_id, &handle)?;
    let aggregate = load_or_generate(&state, &req_id, handle).await?;
    Ok(Json(ApiResponse::new(req_id.0, aggregate)))
}

pub(super) async fn scrape_influencer(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<ScrapeOutcome>>, ApiError> {
    let handle = validated_handle(&req_id, &handle)?;
    let _guard = state.population_locks.acquire(handle).await;
    tracing::info!(handle, "starting scrape");

    let scraped = vibeboard_profiler::simulate_scrape(
        handle,
        state.settings.scrape_delay,
        &mut RngSource::from_entropy(),
    )
    .await;

    let aggregate = match scraped {
        Ok(aggregate) => aggregate,
        Err(e) => {
            record_failure(&state, handle, &e.to_string()).await;
            return Err(map_profiler_error(req_id.0, &e));
        }
    };

    if let Err(e) = vibeboard_db::put_influencer(&state.store, handle, &aggregate).await {
        record_failure(&state, handle, &e.to_string()).await;
        return Err(map_db_error(req_id.0, &e));
    }

    let status = ScrapeStatus::completed(&aggregate, Utc::now());
    vibeboard_db::put_scrape_status(&state.store, handle, &status)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    tracing::info!(
        handle,
        posts = aggregate.posts.len(),
        reels = aggregate.reels.len(),
        "scrape completed"
    );

    Ok(Json(ApiResponse::new(
        req_id.0,
        ScrapeOutcome {
            message: SCRAPE_COMPLETED,
            status,
            profile: aggregate,
        },
    )))
}

async fn record_failure(state: &AppState, handle: &str, reason: &str) {
    tracing::error!(handle, reason, "scrape failed");
    let status = ScrapeStatus::failed(reason, Utc::now());
    if let Err(e) = vibeboard_db::put_scrape_status(&state.store, handle, &status).await {
        tracing::error!(handle, error = %e, "failed to record scrape failure");
    }
}

pub(super) async fn get_scrape_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<ScrapeStatus>>, ApiError> {
    let handle = validated_handle(&req_id, &handle)?;
    let status = vibeboard_db::get_scrape_status(&state.store, handle)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "no scrape recorded"))?;

    Ok(Json(ApiResponse::new(req_id.0, status)))
}

pub(super) async fn get_analytics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<DerivedAnalytics>>, ApiError> {
    let handle = validated_handle(&req_id, &handle)?;
    let aggregate = vibeboard_db::require_influencer(&state.store, handle)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let analytics = vibeboard_profiler::compute_analytics(&aggregate)
        .map_err(|e| map_profiler_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(req_id.0, analytics)))
}
