//! Unit conversion between CSS pixels, PDF points and millimetres, and the
//! supported physical paper sizes.
//!
//! Layout happens in CSS px (96 per inch); PDF user space is in points (72 per
//! inch). One CSS px is therefore exactly 0.75 pt on paper.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CSS_PX_PER_INCH: f32 = 96.0;
pub const PT_PER_INCH: f32 = 72.0;
pub const MM_PER_INCH: f32 = 25.4;

pub fn px_to_pt(px: f32) -> f32 {
    px * PT_PER_INCH / CSS_PX_PER_INCH
}

pub fn mm_to_px(mm: f32) -> f32 {
    mm / MM_PER_INCH * CSS_PX_PER_INCH
}

pub fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_INCH * PT_PER_INCH
}

/// Physical page sizes offered for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Legal,
}

#[derive(Debug, Error)]
#[error("unknown paper size '{0}' (expected a4, letter or legal)")]
pub struct ParsePaperError(String);

impl PaperSize {
    /// (width, height) in millimetres, portrait.
    pub fn size_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
        }
    }

    pub fn size_pt(self) -> (f32, f32) {
        let (w, h) = self.size_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn size_px(self) -> (f32, f32) {
        let (w, h) = self.size_mm();
        (mm_to_px(w), mm_to_px(h))
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaperSize::A4 => "a4",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
        };
        f.write_str(name)
    }
}

impl FromStr for PaperSize {
    type Err = ParsePaperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperSize::A4),
            "letter" | "us-letter" => Ok(PaperSize::Letter),
            "legal" | "us-legal" => Ok(PaperSize::Legal),
            _ => Err(ParsePaperError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_px_to_pt_ratio() {
        assert!(close(px_to_pt(96.0), 72.0, 1e-4));
    }

    #[test]
    fn test_a4_dimensions() {
        let (w_pt, h_pt) = PaperSize::A4.size_pt();
        assert!(close(w_pt, 595.28, 0.05), "A4 width {w_pt}");
        assert!(close(h_pt, 841.89, 0.05), "A4 height {h_pt}");
        let (w_px, h_px) = PaperSize::A4.size_px();
        assert!(close(w_px, 793.7, 0.1), "A4 px width {w_px}");
        assert!(close(h_px, 1122.5, 0.1), "A4 px height {h_px}");
    }

    #[test]
    fn test_letter_and_legal_share_width() {
        let (letter_w, letter_h) = PaperSize::Letter.size_pt();
        let (legal_w, legal_h) = PaperSize::Legal.size_pt();
        assert!(close(letter_w, 612.0, 0.05));
        assert!(close(letter_h, 792.0, 0.05));
        assert!(close(legal_w, letter_w, 1e-3));
        assert!(close(legal_h, 1008.0, 0.05));
    }

    #[test]
    fn test_parse_paper_size() {
        assert_eq!("A4".parse::<PaperSize>().unwrap(), PaperSize::A4);
        assert_eq!(" letter ".parse::<PaperSize>().unwrap(), PaperSize::Letter);
        assert!("tabloid".parse::<PaperSize>().is_err());
    }

    #[test]
    fn test_paper_size_serde_lowercase() {
        let json = serde_json::to_string(&PaperSize::Legal).unwrap();
        assert_eq!(json, "\"legal\"");
    }
}
