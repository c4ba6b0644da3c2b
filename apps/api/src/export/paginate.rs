//! Page geometry and page-break placement.
//!
//! Content coordinates are CSS px from the top of the laid-out document. A page
//! shows the slice `[top, bottom)` of that content inside its margin box.

use serde::{Deserialize, Serialize};

use crate::layout::flow::LaidOutDocument;
use crate::layout::units::{mm_to_pt, mm_to_px, PaperSize};

/// Overrun below which content is not considered to need another page.
pub const BREAK_TOLERANCE_PX: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakMode {
    /// Cut at fixed page-height offsets, like slicing a rasterized canvas.
    Slice,
    /// Move each break up so no text line or rule is cut in half.
    #[default]
    AvoidSplits,
}

/// Physical page and margin box for one export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub paper: PaperSize,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub fn new(paper: PaperSize, margin_mm: f32) -> Self {
        Self { paper, margin_mm }
    }

    pub fn margin_px(&self) -> f32 {
        mm_to_px(self.margin_mm)
    }

    pub fn margin_pt(&self) -> f32 {
        mm_to_pt(self.margin_mm)
    }

    /// Width content is laid out at.
    pub fn content_width_px(&self) -> f32 {
        (self.paper.size_px().0 - 2.0 * self.margin_px()).max(0.0)
    }

    /// Content height that fits on one page.
    pub fn content_height_px(&self) -> f32 {
        (self.paper.size_px().1 - 2.0 * self.margin_px()).max(0.0)
    }
}

/// One page's window onto the content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice {
    pub index: usize,
    pub top: f32,
    pub bottom: f32,
}

impl PageSlice {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn intersects(&self, y: f32, height: f32) -> bool {
        y < self.bottom && y + height > self.top
    }
}

/// Pages needed for `content_height` at `page_height` per page; never zero.
pub fn page_count(content_height: f32, page_height: f32) -> usize {
    if page_height <= 0.0 || !content_height.is_finite() {
        return 1;
    }
    let pages = ((content_height - BREAK_TOLERANCE_PX) / page_height).ceil();
    if pages.is_finite() && pages > 1.0 {
        pages as usize
    } else {
        1
    }
}

/// Splits the laid-out content into page slices of at most `page_height`.
pub fn paginate(doc: &LaidOutDocument, page_height: f32, mode: BreakMode) -> Vec<PageSlice> {
    match mode {
        BreakMode::Slice => fixed_slices(doc.height, page_height),
        BreakMode::AvoidSplits if page_height > 0.0 => avoid_split_slices(doc, page_height),
        BreakMode::AvoidSplits => fixed_slices(doc.height, page_height),
    }
}

fn fixed_slices(content_height: f32, page_height: f32) -> Vec<PageSlice> {
    (0..page_count(content_height, page_height))
        .map(|index| PageSlice {
            index,
            top: index as f32 * page_height,
            bottom: (index + 1) as f32 * page_height,
        })
        .collect()
}

fn avoid_split_slices(doc: &LaidOutDocument, page_height: f32) -> Vec<PageSlice> {
    let atomic: Vec<(f32, f32)> = doc
        .fragments
        .iter()
        .filter(|f| f.is_atomic() && f.rect.height <= page_height)
        .map(|f| (f.rect.y, f.rect.bottom()))
        .collect();

    let mut slices = Vec::new();
    let mut top = 0.0_f32;
    loop {
        let index = slices.len();
        if doc.height - top <= page_height + BREAK_TOLERANCE_PX {
            slices.push(PageSlice {
                index,
                top,
                bottom: top + page_height,
            });
            return slices;
        }

        let cut = break_before_straddlers(&atomic, top, top + page_height);
        slices.push(PageSlice {
            index,
            top,
            bottom: cut,
        });
        top = cut;
    }
}

/// Moves `cut` up past every atomic fragment that straddles it. A fragment
/// that starts at the top of the page cannot move, so it is left to be cut.
fn break_before_straddlers(atomic: &[(f32, f32)], top: f32, mut cut: f32) -> f32 {
    loop {
        let earliest = atomic
            .iter()
            .filter(|(y, bottom)| {
                *y < cut - BREAK_TOLERANCE_PX
                    && *bottom > cut + BREAK_TOLERANCE_PX
                    && *y > top + BREAK_TOLERANCE_PX
            })
            .map(|(y, _)| *y)
            .fold(f32::INFINITY, f32::min);
        if !earliest.is_finite() {
            return cut;
        }
        cut = earliest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::flow::{Fragment, FragmentKind, Rect, TextRun};
    use crate::layout::font_metrics::{FontFamily, FontWeight};
    use crate::render::theme::Color;

    fn line(y: f32, height: f32) -> Fragment {
        Fragment {
            rect: Rect {
                x: 0.0,
                y,
                width: 50.0,
                height,
            },
            kind: FragmentKind::Text(TextRun {
                text: "line".to_string(),
                font: FontFamily::Sans,
                weight: FontWeight::Regular,
                size: 10.0,
                color: Color::TEXT,
                baseline: y + height * 0.7,
            }),
        }
    }

    fn doc(height: f32, fragments: Vec<Fragment>) -> LaidOutDocument {
        LaidOutDocument {
            width: 100.0,
            height,
            background: Color::WHITE,
            fragments,
            bands: vec![],
        }
    }

    #[test]
    fn test_page_count_basics() {
        assert_eq!(page_count(0.0, 100.0), 1);
        assert_eq!(page_count(100.0, 100.0), 1);
        assert_eq!(page_count(100.4, 100.0), 1);
        assert_eq!(page_count(101.0, 100.0), 2);
        assert_eq!(page_count(250.0, 100.0), 3);
    }

    #[test]
    fn test_page_count_degenerate_page_height() {
        assert_eq!(page_count(500.0, 0.0), 1);
        assert_eq!(page_count(f32::NAN, 100.0), 1);
    }

    #[test]
    fn test_slice_mode_uses_fixed_offsets() {
        let slices = paginate(&doc(250.0, vec![line(95.0, 10.0)]), 100.0, BreakMode::Slice);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[1].top, 100.0);
        assert_eq!(slices[1].bottom, 200.0);
    }

    #[test]
    fn test_avoid_splits_moves_break_above_straddling_line() {
        let fragments = vec![line(0.0, 10.0), line(85.0, 10.0), line(95.0, 10.0)];
        let slices = paginate(&doc(150.0, fragments), 100.0, BreakMode::AvoidSplits);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].bottom, 95.0);
        assert_eq!(slices[1].top, 95.0);
    }

    #[test]
    fn test_avoid_splits_cascades_across_columns() {
        // A line in another column straddles the first adjusted break.
        let fragments = vec![line(95.0, 10.0), line(88.0, 12.0)];
        let slices = paginate(&doc(150.0, fragments), 100.0, BreakMode::AvoidSplits);
        assert_eq!(slices[0].bottom, 88.0);
    }

    #[test]
    fn test_avoid_splits_ignores_lines_touching_the_break() {
        let fragments = vec![line(90.0, 10.0), line(100.0, 10.0)];
        let slices = paginate(&doc(150.0, fragments), 100.0, BreakMode::AvoidSplits);
        assert_eq!(slices[0].bottom, 100.0);
    }

    #[test]
    fn test_avoid_splits_always_makes_progress() {
        // Taller than a page: cannot be kept whole, so it is cut.
        let slices = paginate(&doc(300.0, vec![line(0.0, 300.0)]), 100.0, BreakMode::AvoidSplits);
        assert_eq!(slices.len(), 3);
        // Starts exactly on the break: kept whole at the top of the next page.
        let slices = paginate(&doc(150.0, vec![line(100.0, 60.0)]), 100.0, BreakMode::AvoidSplits);
        assert_eq!(slices[1].top, 100.0);
        assert!(slices.windows(2).all(|w| w[1].top > w[0].top));
    }

    #[test]
    fn test_single_page_content_is_one_slice() {
        let slices = paginate(&doc(80.0, vec![line(75.0, 10.0)]), 100.0, BreakMode::AvoidSplits);
        assert_eq!(slices, vec![PageSlice { index: 0, top: 0.0, bottom: 100.0 }]);
    }

    #[test]
    fn test_geometry_margins_shrink_content_box() {
        let full = PageGeometry::new(PaperSize::A4, 0.0);
        let inset = PageGeometry::new(PaperSize::A4, 10.0);
        assert!((full.content_width_px() - 793.7).abs() < 0.1);
        assert!((full.content_width_px() - inset.content_width_px() - 2.0 * mm_to_px(10.0)).abs() < 1e-3);
        assert!((inset.margin_pt() - 28.35).abs() < 0.01);
    }

    #[test]
    fn test_slice_intersects() {
        let slice = PageSlice {
            index: 0,
            top: 100.0,
            bottom: 200.0,
        };
        assert!(slice.intersects(190.0, 20.0));
        assert!(!slice.intersects(200.0, 5.0));
        assert!(!slice.intersects(80.0, 20.0));
    }
}
