use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vibeboard_core::{Post, Reel, Vibe};
use vibeboard_profiler::{
    filter_posts, filter_reels, format_count, reel_totals, unique_tags, unique_vibes,
    ContentAnalysisReport, ContentFilter, QualityBadge, ReelTotals, RngSource,
};

use crate::middleware::RequestId;

use super::influencer::validated_handle;
use super::{map_db_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeContentRequest {
    #[serde(default)]
    content_urls: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeContentResponse {
    key: String,
    analysis: ContentAnalysisReport,
}

#[derive(Debug, Deserialize)]
pub(super) struct FilterQuery {
    pub filter: Option<String>,
}

/// A post as the grid renders it: the raw record plus display strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostCard {
    #[serde(flatten)]
    post: Post,
    likes_display: String,
    comments_display: String,
    quality_badge: QualityBadge,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostsView {
    filter: Option<String>,
    available_tags: Vec<String>,
    available_vibes: Vec<Vibe>,
    items: Vec<PostCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReelsView {
    filter: Option<String>,
    available_tags: Vec<String>,
    available_vibes: Vec<Vibe>,
    /// Always over every reel, whatever the filter.
    totals: ReelTotals,
    items: Vec<Reel>,
}

fn parse_request(req_id: &RequestId, body: &Bytes) -> Result<AnalyzeContentRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AnalyzeContentRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            format!("invalid request body: {e}"),
        )
    })
}

pub(super) async fn analyze_content(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
    body: Bytes,
) -> Result<Json<ApiResponse<AnalyzeContentResponse>>, ApiError> {
    let handle = validated_handle(&req_id, &handle)?;
    let request = parse_request(&req_id, &body)?;

    let analysis = vibeboard_profiler::analyze_content(
        &request.content_urls,
        state.settings.analysis_delay,
        &mut RngSource::from_entropy(),
    )
    .await;

    let key = vibeboard_db::put_content_analysis(
        &state.store,
        handle,
        Utc::now().timestamp_millis(),
        &analysis,
    )
    .await
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    tracing::info!(
        handle,
        key = %key,
        items = analysis.processed_items,
        "content analysis stored"
    );

    Ok(Json(ApiResponse::new(
        req_id.0,
        AnalyzeContentResponse { key, analysis },
    )))
}

pub(super) async fn list_posts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ApiResponse<PostsView>>, ApiError> {
    let handle = validated_handle(&req_id, &handle)?;
    let aggregate = vibeboard_db::require_influencer(&state.store, handle)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let filter = ContentFilter::parse(query.filter.as_deref());
    let items = filter_posts(&aggregate.posts, &filter)
        .into_iter()
        .map(|post| PostCard {
            likes_display: format_count(post.likes),
            comments_display: format_count(post.comments),
            quality_badge: QualityBadge::for_score(post.quality_score),
            post: post.clone(),
        })
        .collect();

    Ok(Json(ApiResponse::new(
        req_id.0,
        PostsView {
            filter: filter_term(&filter),
            available_tags: owned_tags(aggregate.posts.iter().map(|p| p.tags.as_slice())),
            available_vibes: unique_vibes(aggregate.posts.iter().map(|p| p.vibe)),
            items,
        },
    )))
}

pub(super) async fn list_reels(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ApiResponse<ReelsView>>, ApiError> {
    let handle = validated_handle(&req_id, &handle)?;
    let aggregate = vibeboard_db::require_influencer(&state.store, handle)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let filter = ContentFilter::parse(query.filter.as_deref());
    let items: Vec<Reel> = filter_reels(&aggregate.reels, &filter)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ApiResponse::new(
        req_id.0,
        ReelsView {
            filter: filter_term(&filter),
            available_tags: owned_tags(aggregate.reels.iter().map(|r| r.tags.as_slice())),
            available_vibes: unique_vibes(aggregate.reels.iter().map(|r| r.vibe)),
            totals: reel_totals(&aggregate.reels),
            items,
        },
    )))
}

fn owned_tags<'a>(tag_lists: impl IntoIterator<Item = &'a [String]>) -> Vec<String> {
    unique_tags(tag_lists)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn filter_term(filter: &ContentFilter) -> Option<String> {
    match filter {
        ContentFilter::All => None,
        ContentFilter::Term(term) => Some(term.clone()),
    }
}
