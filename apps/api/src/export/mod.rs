// Export pipeline: render → layout → paginate → PDF.
// Everything here is synchronous and CPU-bound; handlers call it from
// tokio::task::spawn_blocking.

pub mod encoding;
pub mod handlers;
pub mod paginate;
pub mod pdf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::flow::{layout_document, LaidOutDocument};
use crate::layout::page_fill::{analyze_page_fill, recommend_fill_action, FillAction, PageFillAnalysis};
use crate::layout::units::PaperSize;
use crate::models::resume::Resume;
use crate::render::templates::{render_resume, SectionSettings, TemplateId};
use crate::render::theme::Theme;

pub use paginate::{page_count, paginate, BreakMode, PageGeometry, PageSlice};
use pdf::{write_pdf, PdfMetadata};

/// Widest margin accepted, per side.
pub const MAX_MARGIN_MM: f32 = 50.0;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("margin must be between 0 and 50 mm, got {0}")]
    InvalidMargin(f32),

    #[error("export would produce {pages} pages, the limit is {max}")]
    TooManyPages { pages: usize, max: usize },
}

/// Resolved page setup for one export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub paper: PaperSize,
    pub margin_mm: f32,
    pub break_mode: BreakMode,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::default(),
            margin_mm: 0.0,
            break_mode: BreakMode::default(),
        }
    }
}

impl ExportOptions {
    pub fn geometry(&self) -> Result<PageGeometry, ExportError> {
        if !self.margin_mm.is_finite() || !(0.0..=MAX_MARGIN_MM).contains(&self.margin_mm) {
            return Err(ExportError::InvalidMargin(self.margin_mm));
        }
        Ok(PageGeometry::new(self.paper, self.margin_mm))
    }
}

/// Everything needed to render one resume.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub resume: &'a Resume,
    pub template: TemplateId,
    pub theme: &'a Theme,
    pub sections: &'a SectionSettings,
}

#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub filename: String,
    pub template: TemplateId,
    pub paper: PaperSize,
}

/// Pagination figures without writing the PDF.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationEstimate {
    pub template: TemplateId,
    pub paper: PaperSize,
    pub break_mode: BreakMode,
    pub page_width_px: f32,
    pub page_height_px: f32,
    pub content_height_px: f32,
    /// Pages from content height alone.
    pub raw_page_count: usize,
    /// Pages after break placement; what the PDF will contain.
    pub page_count: usize,
    pub page_breaks: Vec<f32>,
    pub fill: PageFillAnalysis,
    pub recommendation: FillAction,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

struct Paginated {
    geometry: PageGeometry,
    laid: LaidOutDocument,
    slices: Vec<PageSlice>,
}

fn paginate_input(input: &RenderInput<'_>, options: &ExportOptions) -> Result<Paginated, ExportError> {
    let geometry = options.geometry()?;
    let doc = render_resume(input.resume, input.template, input.theme, input.sections);
    let laid = layout_document(&doc, geometry.content_width_px());
    let slices = paginate(&laid, geometry.content_height_px(), options.break_mode);
    Ok(Paginated {
        geometry,
        laid,
        slices,
    })
}

/// Computes page count, break positions and fill analysis.
pub fn estimate(input: &RenderInput<'_>, options: &ExportOptions) -> Result<PaginationEstimate, ExportError> {
    let Paginated {
        geometry,
        laid,
        slices,
    } = paginate_input(input, options)?;
    let page_height = geometry.content_height_px();

    let last_used = slices
        .last()
        .map_or(0.0, |s| (laid.height.min(s.bottom) - s.top).max(0.0));
    let fill = analyze_page_fill(slices.len(), last_used, page_height);
    let recommendation = recommend_fill_action(&fill, input.template);

    Ok(PaginationEstimate {
        template: input.template,
        paper: geometry.paper,
        break_mode: options.break_mode,
        page_width_px: geometry.content_width_px(),
        page_height_px: page_height,
        content_height_px: laid.height,
        raw_page_count: page_count(laid.height, page_height),
        page_count: slices.len(),
        page_breaks: slices.iter().skip(1).map(|s| s.top).collect(),
        fill,
        recommendation,
    })
}

/// Renders, paginates and writes the resume as PDF.
///
/// Fails with `TooManyPages` before writing anything when the page count
/// exceeds `max_pages`.
pub fn export_pdf(
    input: &RenderInput<'_>,
    options: &ExportOptions,
    max_pages: usize,
) -> Result<ExportedPdf, ExportError> {
    let Paginated {
        geometry,
        laid,
        slices,
    } = paginate_input(input, options)?;
    if slices.len() > max_pages {
        return Err(ExportError::TooManyPages {
            pages: slices.len(),
            max: max_pages,
        });
    }

    let name = input.resume.personal_info.full_name.trim();
    let meta = PdfMetadata {
        title: if name.is_empty() {
            "Resume".to_string()
        } else {
            format!("{name} Resume")
        },
        author: name.to_string(),
    };
    let bytes = write_pdf(&laid, &slices, &geometry, &meta);

    Ok(ExportedPdf {
        bytes,
        page_count: slices.len(),
        filename: input.resume.export_filename(),
        template: input.template,
        paper: geometry.paper,
    })
}
