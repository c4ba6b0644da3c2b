//! Page Fill Analysis — checks how well the last exported page is used.
//!
//! After pagination, a resume may leave most of a single page empty, or spill
//! a few lines onto an otherwise blank trailing page. This module classifies
//! the fill and recommends a remediation the client can offer the user.
//!
//! # Page fill rules
//! - Single page, whitespace > 40%      → informational, nothing to change
//! - Trailing page filled < 15%         → overflow the layout can absorb
//!   - overflow ≤ 5% of a page          → tighten spacing
//!   - overflow > 5% of a page          → switch to the compact template

use serde::{Deserialize, Serialize};

use crate::render::templates::TemplateId;

const MAX_SINGLE_PAGE_WHITESPACE: f32 = 0.40;
const NEARLY_EMPTY_LAST_PAGE: f32 = 0.15;
const MINOR_OVERFLOW: f32 = 0.05;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Overall page fill verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    Acceptable,
    /// One page with more than 40% of it empty.
    TooMuchWhitespace,
    /// Several pages, the last one less than 15% used.
    NearlyEmptyLastPage,
}

/// Full page fill analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFillAnalysis {
    pub page_count: usize,
    /// Fraction of the last page's height occupied by content.
    pub last_page_fill: f32,
    pub whitespace_fraction: f32,
    pub verdict: PageFillVerdict,
}

/// Recommended remediation for a non-acceptable fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FillAction {
    NoAction,
    /// Reduce section spacing or font scale to pull the overflow back.
    TightenSpacing,
    SwitchTemplate { template: TemplateId },
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Analyzes the fill of the final page.
///
/// `last_page_used` is the content height on the last page in px; `page_height`
/// is the usable page height in px.
pub fn analyze_page_fill(page_count: usize, last_page_used: f32, page_height: f32) -> PageFillAnalysis {
    let last_page_fill = if page_height > 0.0 {
        (last_page_used / page_height).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let whitespace_fraction = 1.0 - last_page_fill;

    let verdict = if page_count > 1 && last_page_fill < NEARLY_EMPTY_LAST_PAGE {
        PageFillVerdict::NearlyEmptyLastPage
    } else if page_count <= 1 && whitespace_fraction > MAX_SINGLE_PAGE_WHITESPACE {
        PageFillVerdict::TooMuchWhitespace
    } else {
        PageFillVerdict::Acceptable
    };

    PageFillAnalysis {
        page_count,
        last_page_fill,
        whitespace_fraction,
        verdict,
    }
}

/// Recommends a single remediation action for `template`.
pub fn recommend_fill_action(analysis: &PageFillAnalysis, template: TemplateId) -> FillAction {
    match analysis.verdict {
        PageFillVerdict::Acceptable | PageFillVerdict::TooMuchWhitespace => FillAction::NoAction,
        PageFillVerdict::NearlyEmptyLastPage => {
            if analysis.last_page_fill <= MINOR_OVERFLOW || template == TemplateId::Compact {
                FillAction::TightenSpacing
            } else {
                FillAction::SwitchTemplate {
                    template: TemplateId::Compact,
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
