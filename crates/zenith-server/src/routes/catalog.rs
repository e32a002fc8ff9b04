//! Read-only catalog routes backed by the embedded content.

use axum::extract::Path;
use axum::Json;
use zenith_core::catalog;

use crate::error::AppError;

/// GET /api/services
pub async fn list_services() -> Json<&'static [catalog::Service]> {
    Json(catalog::services())
}

/// GET /api/services/:slug: the service with its related case studies.
pub async fn get_service(
    Path(slug): Path<String>,
) -> Result<Json<catalog::ServiceDetail>, AppError> {
    catalog::service_detail(&slug)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("service '{slug}' not found")))
}

/// GET /api/jobs
pub async fn list_jobs() -> Json<&'static [catalog::Job]> {
    Json(catalog::jobs())
}

/// GET /api/jobs/:slug
pub async fn get_job(Path(slug): Path<String>) -> Result<Json<&'static catalog::Job>, AppError> {
    catalog::job(&slug)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("job '{slug}' not found")))
}

/// GET /api/case-studies
pub async fn list_case_studies() -> Json<&'static [catalog::CaseStudy]> {
    Json(catalog::case_studies())
}

/// GET /api/case-studies/:slug
pub async fn get_case_study(
    Path(slug): Path<String>,
) -> Result<Json<&'static catalog::CaseStudy>, AppError> {
    catalog::case_study(&slug)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("case study '{slug}' not found")))
}

/// GET /api/pricing
pub async fn list_pricing() -> Json<&'static [catalog::PricingPackage]> {
    Json(catalog::pricing())
}
