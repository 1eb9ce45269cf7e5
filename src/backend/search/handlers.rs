/**
 * Search Handler
 *
 * GET /api/search?q= (public)
 *
 * Case-insensitive substring search over receipt titles and creator
 * display names, newest first, capped at 50 rows. The route is public;
 * when the caller presents a valid bearer token anyway, `likedByMe` is
 * personalized, otherwise it is false throughout.
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::OptionalAuthUser;
use crate::backend::receipts::handlers::image_url;
use crate::backend::server::state::AppState;

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search term; blank or missing yields an empty result list
    pub q: Option<String>,
}

/// One search result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub user_name: String,
    pub likes_count: i64,
    /// Whether the requesting user likes this receipt (false for anonymous)
    pub liked_by_me: bool,
    /// Relative URL of the image endpoint
    pub image_url: String,
}

/// Search handler
pub async fn search_receipts(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let query = params.q.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let viewer = caller.map(|c| c.user_id);
    let rows = state.store.search_receipts(query, viewer).await?;

    let results = rows
        .into_iter()
        .map(|row| SearchResult {
            image_url: image_url(row.id),
            id: row.id,
            title: row.title,
            created_at: row.created_at,
            user_id: row.user_id,
            user_name: row.username,
            likes_count: row.likes_count,
            liked_by_me: row.liked_by_viewer,
        })
        .collect();

    Ok(Json(results))
}
