use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use zenith_core::application::{self, ApplicationInput, ResumeUpload};
use zenith_core::ZenithError;

use super::{parse_json, IdsBody, StatusBody};
use crate::error::AppError;
use crate::state::AppState;

/// Largest accepted application form, resume included.
pub const MAX_FORM_BYTES: usize = 10 * 1024 * 1024;

fn bad_form(e: impl std::fmt::Display) -> AppError {
    AppError::bad_request(format!("Invalid form data: {e}"))
}

/// A body cut off at the size limit is 413; any other read failure is a bad form.
fn form_read_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let limit_mib = MAX_FORM_BYTES / (1024 * 1024);
        return ZenithError::TooLarge(format!("Form exceeds {limit_mib} MiB")).into();
    }
    bad_form(e)
}

/// Collect the known form fields. Unknown fields are skipped, and a `resume`
/// part without a file name does not count as a file.
async fn read_form(mut multipart: Multipart) -> Result<ApplicationInput, AppError> {
    let mut input = ApplicationInput::default();
    while let Some(field) = multipart.next_field().await.map_err(form_read_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "resume" => {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(form_read_error)?;
                input.resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "name" | "email" | "cover_letter" | "job_slug" => {
                let value = field.text().await.map_err(form_read_error)?;
                let slot = match name.as_str() {
                    "name" => &mut input.name,
                    "email" => &mut input.email,
                    "cover_letter" => &mut input.cover_letter,
                    _ => &mut input.job_slug,
                };
                *slot = Some(value);
            }
            _ => {}
        }
    }
    Ok(input)
}

async fn store_application(
    app: &AppState,
    input: &ApplicationInput,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    input.validate()?;
    let row = application::submit(app.backend()?, app.resume_bucket(), input).await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "data": row }))))
}

/// POST /api/applications: multipart form with a `resume` file.
pub async fn submit_application(
    State(app): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let multipart = multipart.map_err(bad_form)?;
    let input = read_form(multipart).await?;
    store_application(&app, &input).await
}

/// GET /api/admin/applications
pub async fn list_applications(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let rows = application::list(app.store()?).await?;
    Ok(Json(serde_json::json!({ "data": rows })))
}

/// PATCH /api/admin/applications/:id/status: returns the updated row.
pub async fn set_application_status(
    State(app): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store()?;
    let StatusBody { status } = parse_json(&body)?;
    let row = application::set_status(store, &id, &status).await?;
    Ok(Json(serde_json::json!({ "data": row })))
}

/// DELETE /api/admin/applications: body `{ids: [...]}`.
pub async fn delete_applications(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store()?;
    let IdsBody { ids } = IdsBody::from_bytes(&body);
    application::delete_many(store, &ids).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{failing_state, memory_state, unconfigured_state};
    use zenith_core::config::SiteConfig;
    use zenith_core::memory::MemoryBackend;

    fn input() -> ApplicationInput {
        ApplicationInput {
            name: Some("Grace Hopper".into()),
            email: Some("grace@example.com".into()),
            cover_letter: None,
            job_slug: Some("frontend-developer".into()),
            resume: Some(ResumeUpload {
                file_name: "cv.pdf".into(),
                content_type: Some("application/pdf".into()),
                bytes: b"%PDF-1.4".to_vec(),
            }),
        }
    }

    async fn seeded(state: &AppState) -> String {
        let (_, Json(body)) = store_application(state, &input()).await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn submit_uploads_resume_and_returns_201() {
        let (state, memory) = memory_state();
        let (status, Json(body)) = store_application(&state, &input()).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["status"], "new");
        let url = body["data"]["resume_url"].as_str().unwrap();
        assert!(url.starts_with("memory://resumes/frontend-developer/"));
        assert!(url.ends_with(".pdf"));
        assert_eq!(memory.object_count(), 1);
    }

    #[tokio::test]
    async fn missing_resume_is_400_even_without_credentials() {
        let mut incomplete = input();
        incomplete.resume = None;
        let err = store_application(&unconfigured_state(), &incomplete)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Missing required fields");
    }

    #[tokio::test]
    async fn missing_bucket_is_500_naming_the_bucket() {
        let state = AppState::with_backend(
            SiteConfig::default(),
            Some(MemoryBackend::new().into_backend()),
        );
        let err = store_application(&state, &input()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("\"resumes\""));
        assert!(err.message().contains("SUPABASE_RESUME_BUCKET"));
    }

    #[tokio::test]
    async fn set_status_returns_updated_row() {
        let (state, _) = memory_state();
        let id = seeded(&state).await;
        let Json(body) = set_application_status(
            State(state),
            Path(id),
            Bytes::from(r#"{"status":"interview"}"#),
        )
        .await
        .unwrap();
        assert_eq!(body["data"]["status"], "interview");
        assert!(body["data"]["updated_at"].is_string());
    }

    #[tokio::test]
    async fn set_status_unknown_id_is_404() {
        let (state, _) = memory_state();
        let err = set_application_status(
            State(state),
            Path("missing".into()),
            Bytes::from(r#"{"status":"hired"}"#),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Application not found");
    }

    #[tokio::test]
    async fn set_status_unknown_status_is_400() {
        let (state, _) = memory_state();
        let id = seeded(&state).await;
        let err = set_application_status(
            State(state),
            Path(id),
            Bytes::from(r#"{"status":"archived"}"#),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_without_ids_is_400() {
        let (state, _) = memory_state();
        let err = delete_applications(State(state), Bytes::from(r#"{"ids":[]}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_removes_listed_rows() {
        let (state, _) = memory_state();
        let id = seeded(&state).await;
        let keep = seeded(&state).await;
        let body = serde_json::json!({ "ids": [id] }).to_string();
        delete_applications(State(state.clone()), Bytes::from(body))
            .await
            .unwrap();
        let Json(list) = list_applications(State(state)).await.unwrap();
        let rows = list["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], keep.as_str());
    }

    #[tokio::test]
    async fn list_store_failure_is_500() {
        let err = list_applications(State(failing_state("timeout")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "timeout");
    }
}
