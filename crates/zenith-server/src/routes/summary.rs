use axum::extract::State;
use axum::Json;
use serde::Serialize;
use zenith_core::{application, lead, post};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub leads: usize,
    pub applications: usize,
    pub posts: usize,
    pub backend: &'static str,
}

/// GET /api/admin/summary: record counts for the back-office header.
pub async fn get_summary(State(app): State<AppState>) -> Result<Json<Summary>, AppError> {
    let store = app.store()?;
    let (leads, applications, posts) = tokio::try_join!(
        lead::count(store),
        application::count(store),
        post::count(store),
    )?;
    Ok(Json(Summary {
        leads,
        applications,
        posts,
        backend: app.backend_kind(),
    }))
}
