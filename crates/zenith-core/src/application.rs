//! Job applications (`applications` table) and their resume uploads.

use crate::error::{Result, ZenithError};
use crate::status::ApplicationStatus;
use crate::store::{Backend, Filter, Order, Query, Row, Store};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const TABLE: &str = "applications";

const MISSING_FIELDS: &str = "Missing required fields";
const INVALID_JOB_SLUG: &str = "Invalid job slug";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    /// Text after the last `.`; the whole name when there is no dot, `pdf`
    /// when that is empty.
    pub fn extension(&self) -> &str {
        let ext = self.file_name.rsplit('.').next().unwrap_or_default();
        if ext.is_empty() {
            "pdf"
        } else {
            ext
        }
    }

    pub fn content_type(&self) -> &str {
        validate::present(self.content_type.as_deref()).unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}

/// Fields collected from the multipart application form. Every field is
/// optional here so that absence can be reported uniformly.
#[derive(Debug, Clone, Default)]
pub struct ApplicationInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cover_letter: Option<String>,
    pub job_slug: Option<String>,
    pub resume: Option<ResumeUpload>,
}

struct CheckedInput<'a> {
    name: &'a str,
    email: &'a str,
    cover_letter: Option<&'a str>,
    job_slug: &'a str,
    resume: &'a ResumeUpload,
}

impl ApplicationInput {
    /// Report missing required fields without touching the backend.
    pub fn validate(&self) -> Result<()> {
        self.check().map(|_| ())
    }

    fn check(&self) -> Result<CheckedInput<'_>> {
        let missing = || ZenithError::Validation(MISSING_FIELDS.to_string());
        let resume = self
            .resume
            .as_ref()
            .filter(|r| !r.file_name.is_empty())
            .ok_or_else(missing)?;
        let checked = CheckedInput {
            name: validate::present(self.name.as_deref()).ok_or_else(missing)?,
            email: validate::present(self.email.as_deref()).ok_or_else(missing)?,
            cover_letter: validate::present(self.cover_letter.as_deref()),
            job_slug: validate::present(self.job_slug.as_deref()).ok_or_else(missing)?,
            resume,
        };
        // The slug becomes the first segment of the object path.
        if !validate::is_valid_slug(checked.job_slug) {
            return Err(ZenithError::Validation(INVALID_JOB_SLUG.to_string()));
        }
        Ok(checked)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    pub job_slug: String,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Object path for a resume: `{job_slug}/{uuid}.{ext}`.
pub fn resume_path(job_slug: &str, resume: &ResumeUpload) -> String {
    format!("{job_slug}/{}.{}", uuid::Uuid::new_v4(), resume.extension())
}

/// Upload the resume to `bucket`, then insert the application row pointing
/// at its public URL. Returns the inserted row.
pub async fn submit(backend: &Backend, bucket: &str, input: &ApplicationInput) -> Result<Row> {
    let checked = input.check()?;
    let path = resume_path(checked.job_slug, checked.resume);

    backend
        .storage
        .upload(
            bucket,
            &path,
            checked.resume.bytes.clone(),
            checked.resume.content_type(),
        )
        .await
        .inspect_err(|e| tracing::error!(%bucket, %path, "resume upload failed: {e}"))?;

    let resume_url = backend.storage.public_url(bucket, &path);
    let row = backend
        .store
        .insert(
            TABLE,
            json!({
                "name": checked.name,
                "email": checked.email,
                "cover_letter": checked.cover_letter,
                "job_slug": checked.job_slug,
                "resume_url": resume_url,
                "status": ApplicationStatus::New,
            }),
        )
        .await?;
    tracing::info!(job = %checked.job_slug, "application received");
    Ok(row)
}

/// All applications, newest first.
pub async fn list(store: &dyn Store) -> Result<Vec<Row>> {
    store
        .select(TABLE, &Query::new().order(Order::desc("created_at")))
        .await
}

pub async fn list_typed(store: &dyn Store) -> Result<Vec<Application>> {
    list(store)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(ZenithError::from))
        .collect()
}

/// Set the status and stamp `updated_at`; returns the updated row.
pub async fn set_status(store: &dyn Store, id: &str, status: &str) -> Result<Row> {
    let status: ApplicationStatus = status.parse()?;
    let rows = store
        .update(
            TABLE,
            &[Filter::eq("id", id)],
            json!({
                "status": status,
                "updated_at": chrono::Utc::now().to_rfc3339(),
            }),
        )
        .await?;
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| ZenithError::NotFound("Application not found".to_string()))?;
    tracing::info!(%id, %status, "application status updated");
    Ok(row)
}

pub async fn delete_many(store: &dyn Store, ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(ZenithError::NoIds);
    }
    store
        .delete(TABLE, &[Filter::is_in("id", ids.iter().map(String::as_str))])
        .await?;
    tracing::info!(count = ids.len(), "applications deleted");
    Ok(())
}

pub async fn count(store: &dyn Store) -> Result<usize> {
    Ok(store.select(TABLE, &Query::new()).await?.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
