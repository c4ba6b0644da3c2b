use axum::Json;

use crate::errors::{ApiJson, AppError};
use crate::models::resume::Resume;
use crate::models::sample::sample_resume;
use crate::review::completeness::{compute_completeness_report, CompletenessReport};

/// GET /api/v1/resume/sample
pub async fn handle_sample_resume() -> Json<Resume> {
    Json(sample_resume())
}

/// POST /api/v1/resume/completeness
pub async fn handle_completeness(
    ApiJson(resume): ApiJson<Resume>,
) -> Result<Json<CompletenessReport>, AppError> {
    let report = compute_completeness_report(&resume);
    tracing::debug!(
        overall_score = report.overall_score,
        missing = report.missing_sections.len(),
        "completeness report computed"
    );
    Ok(Json(report))
}
