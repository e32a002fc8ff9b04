use axum::extract::State;
use axum::Json;
use zenith_core::consultation;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/admin/consultations: booked calls, latest slot first.
pub async fn list_consultations(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let rows = consultation::list(app.store()?).await?;
    Ok(Json(serde_json::json!({ "data": rows })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{memory_state, unconfigured_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn lists_in_scheduled_order() {
        let (state, memory) = memory_state();
        for at in ["2025-01-02T10:00:00Z", "2025-03-04T09:30:00Z"] {
            zenith_core::Store::insert(
                &memory,
                consultation::TABLE,
                serde_json::json!({ "name": "Client", "scheduled_at": at }),
            )
            .await
            .unwrap();
        }
        let Json(body) = list_consultations(State(state)).await.unwrap();
        assert_eq!(body["data"][0]["scheduled_at"], "2025-03-04T09:30:00Z");
    }

    #[tokio::test]
    async fn without_credentials_is_500() {
        let err = list_consultations(State(unconfigured_state()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
