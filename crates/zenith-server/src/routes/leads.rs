use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use zenith_core::lead;

use super::{parse_json, IdsBody, StatusBody};
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/admin/leads
pub async fn list_leads(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let rows = lead::list(app.store()?).await?;
    Ok(Json(serde_json::json!({ "data": rows })))
}

/// PATCH /api/admin/leads/:id/status: 204 on success.
pub async fn set_lead_status(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let store = app.store()?;
    let StatusBody { status } = parse_json(&body)?;
    lead::set_status(store, &id, &status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/leads: body `{ids: [...]}`.
pub async fn delete_leads(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store()?;
    let IdsBody { ids } = IdsBody::from_bytes(&body);
    lead::delete_many(store, &ids).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{failing_state, memory_state, unconfigured_state};
    use zenith_core::lead::LeadInput;

    async fn seeded(state: &AppState, email: &str) -> String {
        let input = LeadInput {
            name: "Linus".into(),
            email: email.into(),
            message: "Looking for an automation partner.".into(),
            service: "ai-automation".into(),
            budget: "$15k - $50k".into(),
            ..LeadInput::default()
        };
        let row = lead::create(state.store().unwrap(), &input).await.unwrap();
        row["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn list_returns_data_envelope() {
        let (state, _) = memory_state();
        seeded(&state, "a@example.com").await;
        let Json(body) = list_leads(State(state)).await.unwrap();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_without_credentials_is_500() {
        let err = list_leads(State(unconfigured_state())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Missing SUPABASE credentials");
    }

    #[tokio::test]
    async fn status_update_is_204() {
        let (state, _) = memory_state();
        let id = seeded(&state, "a@example.com").await;
        let status = set_lead_status(
            State(state.clone()),
            Path(id),
            Bytes::from(r#"{"status":"contacted"}"#),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        let Json(body) = list_leads(State(state)).await.unwrap();
        assert_eq!(body["data"][0]["status"], "contacted");
    }

    #[tokio::test]
    async fn status_update_rejects_unknown_status() {
        let (state, _) = memory_state();
        let id = seeded(&state, "a@example.com").await;
        let err = set_lead_status(State(state), Path(id), Bytes::from(r#"{"status":"won"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid status: won");
    }

    #[tokio::test]
    async fn status_update_unknown_lead_is_404() {
        let (state, _) = memory_state();
        let err = set_lead_status(
            State(state),
            Path("nope".into()),
            Bytes::from(r#"{"status":"ongoing"}"#),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bulk_delete_removes_rows() {
        let (state, _) = memory_state();
        let a = seeded(&state, "a@example.com").await;
        let b = seeded(&state, "b@example.com").await;
        let body = serde_json::json!({ "ids": [a, b] }).to_string();
        let Json(resp) = delete_leads(State(state.clone()), Bytes::from(body))
            .await
            .unwrap();
        assert_eq!(resp["success"], true);
        let Json(list) = list_leads(State(state)).await.unwrap();
        assert!(list["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreadable_delete_body_is_no_ids() {
        let (state, _) = memory_state();
        let err = delete_leads(State(state), Bytes::from("garbage"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No ids supplied");
    }

    #[tokio::test]
    async fn store_failure_on_delete_is_500() {
        let err = delete_leads(
            State(failing_state("delete blocked")),
            Bytes::from(r#"{"ids":["x"]}"#),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
