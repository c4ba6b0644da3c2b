use axum::{
    extract::State,
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{ApiJson, AppError};
use crate::export::{estimate, export_pdf, BreakMode, ExportOptions, PaginationEstimate, RenderInput};
use crate::layout::units::PaperSize;
use crate::render::handlers::RenderRequest;
use crate::state::AppState;

/// Page setup as sent by the client; unset fields take configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptionsInput {
    pub paper: Option<PaperSize>,
    pub margin_mm: Option<f32>,
    pub break_mode: Option<BreakMode>,
}

impl ExportOptionsInput {
    fn resolve(&self, config: &Config) -> ExportOptions {
        let defaults = ExportOptions::default();
        ExportOptions {
            paper: self.paper.unwrap_or(config.default_paper_size),
            margin_mm: self.margin_mm.unwrap_or(defaults.margin_mm),
            break_mode: self.break_mode.unwrap_or(defaults.break_mode),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(flatten)]
    pub render: RenderRequest,
    #[serde(default)]
    pub options: ExportOptionsInput,
}

impl ExportRequest {
    fn input(&self, config: &Config) -> RenderInput<'_> {
        RenderInput {
            resume: &self.render.resume,
            template: self.render.template_or(config.default_template),
            theme: &self.render.theme,
            sections: &self.render.sections,
        }
    }
}

/// POST /api/v1/export/estimate
pub async fn handle_export_estimate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ExportRequest>,
) -> Result<Json<PaginationEstimate>, AppError> {
    let config = state.config.clone();
    let result = tokio::task::spawn_blocking(move || {
        let options = req.options.resolve(&config);
        estimate(&req.input(&config), &options)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in estimate: {e}")))??;

    Ok(Json(result))
}

/// POST /api/v1/export/pdf
///
/// Responds with the PDF as an attachment; the page count is echoed in
/// `X-Page-Count`.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ExportRequest>,
) -> Result<Response, AppError> {
    let export_id = Uuid::new_v4();
    let config = state.config.clone();
    let exported = tokio::task::spawn_blocking(move || {
        let options = req.options.resolve(&config);
        export_pdf(&req.input(&config), &options, config.max_export_pages)
    })
    .await
    .map_err(|e| AppError::Export(format!("export {export_id} did not complete: {e}")))?
    .inspect_err(|e| tracing::warn!(%export_id, "export rejected: {e}"))?;

    tracing::info!(
        %export_id,
        template = %exported.template,
        paper = %exported.paper,
        pages = exported.page_count,
        bytes = exported.bytes.len(),
        "pdf exported"
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", exported.filename),
        ),
        (HeaderName::from_static("x-page-count"), exported.page_count.to_string()),
    ];
    Ok((headers, Bytes::from(exported.bytes)).into_response())
}
