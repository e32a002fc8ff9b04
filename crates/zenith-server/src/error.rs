use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use zenith_core::error::ZenithError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses. The body is always
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(ZenithError::Validation(msg.into()).into())
    }

    /// Construct a 404 Not Found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(ZenithError::NotFound(msg.into()).into())
    }

    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<ZenithError>() {
            Some(e) => match e {
                ZenithError::Validation(_)
                | ZenithError::InvalidStatus(_)
                | ZenithError::NoIds => StatusCode::BAD_REQUEST,
                ZenithError::NotFound(_) => StatusCode::NOT_FOUND,
                ZenithError::ObjectExists(_) => StatusCode::CONFLICT,
                ZenithError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                ZenithError::MissingCredentials
                | ZenithError::InvalidFilter(..)
                | ZenithError::BucketNotFound(_)
                | ZenithError::Store(_)
                | ZenithError::Catalog(_)
                | ZenithError::Config(_)
                | ZenithError::Io(_)
                | ZenithError::Yaml(_)
                | ZenithError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        self.0.to_string()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:#}", self.0);
        }
        let body = serde_json::json!({ "error": self.message() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError(ZenithError::Validation("name too short".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_status_maps_to_400() {
        let err = AppError(ZenithError::InvalidStatus("archived".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn no_ids_maps_to_400() {
        let err = AppError(ZenithError::NoIds.into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_constructor_maps_to_404() {
        let err = AppError::not_found("Application not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_credentials_maps_to_500() {
        let err = AppError(ZenithError::MissingCredentials.into());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bucket_not_found_maps_to_500() {
        let err = AppError(ZenithError::BucketNotFound("resumes".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn object_exists_maps_to_409() {
        let err = AppError(ZenithError::ObjectExists("resumes/a.pdf".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn too_large_maps_to_413() {
        let err = AppError(ZenithError::TooLarge("Form too large".into()).into());
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn non_zenith_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn store_error_body_carries_store_message() {
        let err = AppError(ZenithError::Store("duplicate key value".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "duplicate key value");
    }

    #[test]
    fn response_is_json() {
        let err = AppError::bad_request("Invalid JSON");
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
