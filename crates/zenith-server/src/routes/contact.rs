use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use zenith_core::lead::{self, LeadInput};

use super::parse_json;
use crate::error::AppError;
use crate::state::AppState;

async fn capture(app: &AppState, body: &[u8]) -> Result<(), AppError> {
    let input: LeadInput = parse_json(body)?;
    input.validate()?;
    lead::create(app.store()?, &input).await?;
    Ok(())
}

/// POST /api/contact: store a lead from the contact form.
///
/// Replies `{ok: true}` on success and `{ok: false, error}` otherwise, with
/// the status chosen the same way as every other route.
pub async fn submit_contact(State(app): State<AppState>, body: Bytes) -> Response {
    match capture(&app, &body).await {
        Ok(()) => Json(serde_json::json!({ "ok": true })).into_response(),
        Err(e) => {
            let status = e.status();
            if status.is_server_error() {
                tracing::error!("POST /api/contact: {:#}", e.0);
            } else {
                tracing::warn!("POST /api/contact rejected: {}", e.message());
            }
            (
                status,
                Json(serde_json::json!({ "ok": false, "error": e.message() })),
            )
                .into_response()
        }
    }
}

/// POST /api/demo-request: hand back the booking link. The body is ignored.
pub async fn demo_request(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "calendlyUrl": app.config.calendly_url }))
}
