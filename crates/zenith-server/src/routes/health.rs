use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /api/health: liveness plus which backend is wired in.
pub async fn health(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "backend": app.backend_kind(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{memory_state, unconfigured_state};

    #[tokio::test]
    async fn reports_no_backend_when_unconfigured() {
        let Json(body) = health(State(unconfigured_state())).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backend"], "none");
    }

    #[tokio::test]
    async fn reports_memory_backend() {
        let (state, _) = memory_state();
        let Json(body) = health(State(state)).await;
        assert_eq!(body["backend"], "memory");
    }
}
