use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use zenith_core::post::{self, PostInput};

use super::parse_json;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/posts: published posts with the source they were served from.
pub async fn list_published(State(app): State<AppState>) -> Json<serde_json::Value> {
    let (posts, source) = post::published(app.optional_store()).await;
    let data: Vec<serde_json::Value> = posts
        .iter()
        .map(|p| {
            serde_json::json!({
                "slug": p.slug,
                "title": p.title,
                "date": p.date,
                "excerpt": p.summary(),
            })
        })
        .collect();
    Json(serde_json::json!({ "data": data, "source": source }))
}

/// GET /api/posts/:slug
pub async fn get_published(
    State(app): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let found = post::find_published(app.optional_store(), &slug)
        .await
        .ok_or_else(|| AppError::not_found(format!("post '{slug}' not found")))?;
    Ok(Json(serde_json::json!({ "data": found })))
}

/// GET /api/admin/posts
pub async fn list_posts(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let rows = post::list(app.store()?).await?;
    Ok(Json(serde_json::json!({ "data": rows })))
}

/// POST /api/admin/posts
pub async fn create_post(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let store = app.store()?;
    let input: PostInput = parse_json(&body)?;
    let row = post::create(store, &input).await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "data": row }))))
}

/// DELETE /api/admin/posts/:id
pub async fn delete_post(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    post::delete(app.store()?, &id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
