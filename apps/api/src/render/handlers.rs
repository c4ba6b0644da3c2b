use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;

use crate::errors::{ApiJson, AppError};
use crate::export::ExportOptions;
use crate::layout::units::PaperSize;
use crate::models::resume::Resume;
use crate::render::html::to_html;
use crate::render::templates::{render_resume, template_catalog, SectionSettings, TemplateId, TemplateInfo};
use crate::render::theme::Theme;
use crate::render::tree::Document;
use crate::state::AppState;

/// Body shared by the render and export endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub resume: Resume,
    /// Falls back to the configured default template.
    #[serde(default)]
    pub template: Option<TemplateId>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub sections: SectionSettings,
}

impl RenderRequest {
    pub fn template_or(&self, default: TemplateId) -> TemplateId {
        self.template.unwrap_or(default)
    }

    pub fn render(&self, default: TemplateId) -> Document {
        render_resume(&self.resume, self.template_or(default), &self.theme, &self.sections)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewQuery {
    pub paper: Option<PaperSize>,
    #[serde(default)]
    pub margin_mm: f32,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(template_catalog())
}

/// POST /api/v1/render/preview
///
/// Returns a standalone HTML page at the width the export lays content out
/// at: the paper width less both margins, in CSS px.
pub async fn handle_render_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
    ApiJson(req): ApiJson<RenderRequest>,
) -> Result<Html<String>, AppError> {
    let options = ExportOptions {
        paper: query.paper.unwrap_or(state.config.default_paper_size),
        margin_mm: query.margin_mm,
        ..Default::default()
    };
    let geometry = options.geometry()?;
    let doc = req.render(state.config.default_template);
    tracing::debug!(template = %doc.template, paper = %geometry.paper, "rendering preview");
    Ok(Html(to_html(&doc, geometry.content_width_px())))
}

/// POST /api/v1/render/tree
pub async fn handle_render_tree(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RenderRequest>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(req.render(state.config.default_template)))
}
