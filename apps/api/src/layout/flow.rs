//! Flow layout: places a `Document` at a fixed px width.
//!
//! The result is a flat list of absolutely positioned fragments in content
//! coordinates (origin top-left, y down) plus the full-page column bands.
//! Painting order is list order, so backgrounds are pushed before children and
//! their height patched once the children are measured.

use crate::layout::font_metrics::{get_metrics, FontFamily, FontWeight};
use crate::layout::text::{natural_width, wrap_text};
use crate::render::theme::Color;
use crate::render::tree::{Block, BoxStyle, Column, ColumnWidth, Document, Node, Row, Rule, Text, TextAlign};

/// Hanging indent for bulleted text, in em.
const BULLET_INDENT_EM: f32 = 1.1;
const BULLET_GLYPH: &str = "\u{2022}";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRole {
    /// Box backgrounds and borders; page breaks may cut through them.
    Background,
    /// Horizontal rules; kept whole when breaks avoid splits.
    Rule,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: FontFamily,
    pub weight: FontWeight,
    pub size: f32,
    pub color: Color,
    /// Absolute y of the baseline.
    pub baseline: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentKind {
    Fill { color: Color, role: FillRole },
    Text(TextRun),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub rect: Rect,
    pub kind: FragmentKind,
}

impl Fragment {
    /// Text lines and rules must not be cut by a page break.
    pub fn is_atomic(&self) -> bool {
        matches!(
            self.kind,
            FragmentKind::Text(_)
                | FragmentKind::Fill {
                    role: FillRole::Rule,
                    ..
                }
        )
    }
}

/// A column background painted top to bottom on every page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub x: f32,
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub fragments: Vec<Fragment>,
    pub bands: Vec<Band>,
}


// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `doc` at `width` px.
pub fn layout_document(doc: &Document, width: f32) -> LaidOutDocument {
    let mut flow = Flow::default();
    let height = flow.nodes(&doc.nodes, 0.0, 0.0, width.max(0.0));
    LaidOutDocument {
        width,
        height,
        background: doc.background,
        fragments: flow.fragments,
        bands: flow.bands,
    }
}

#[derive(Default)]
struct Flow {
    fragments: Vec<Fragment>,
    bands: Vec<Band>,
}

impl Flow {
    fn fill(&mut self, rect: Rect, color: Color, role: FillRole) {
        if rect.width > 0.0 && rect.height > 0.0 {
            self.fragments.push(Fragment {
                rect,
                kind: FragmentKind::Fill { color, role },
            });
        }
    }

    /// Reserves a background slot; returns its index for `patch_height`.
    fn placeholder(&mut self, x: f32, y: f32, width: f32, color: Color) -> usize {
        self.fragments.push(Fragment {
            rect: Rect {
                x,
                y,
                width,
                height: 0.0,
            },
            kind: FragmentKind::Fill {
                color,
                role: FillRole::Background,
            },
        });
        self.fragments.len() - 1
    }

    fn patch_height(&mut self, index: usize, height: f32) {
        if let Some(fragment) = self.fragments.get_mut(index) {
            fragment.rect.height = height;
        }
    }

    /// Stacks `nodes` from `y` downward; returns the y below the last one.
    fn nodes(&mut self, nodes: &[Node], x: f32, mut y: f32, width: f32) -> f32 {
        for node in nodes {
            y = match node {
                Node::Block(block) => self.block(block, x, y, width),
                Node::Row(row) => self.row(row, x, y, width),
                Node::Text(text) => self.text(text, x, y, width),
                Node::Rule(rule) => self.rule(rule, x, y, width),
                Node::Spacer { height } => y + height.max(0.0),
            };
        }
        y
    }

    /// Lays out a padded box without its bottom margin; returns its height.
    fn boxed(
        &mut self,
        style: &BoxStyle,
        children: &[Node],
        x: f32,
        y: f32,
        width: f32,
        paint_background: bool,
    ) -> f32 {
        let background = style
            .background
            .filter(|_| paint_background)
            .map(|color| self.placeholder(x, y, width, color));
        let border_left = style.border_left.map_or(0.0, |b| b.width);
        let pad = style.padding;

        let inner_x = x + border_left + pad.left;
        let inner_w = (width - border_left - pad.horizontal()).max(0.0);
        let mut bottom = self.nodes(children, inner_x, y + pad.top, inner_w) + pad.bottom;

        if let Some(border) = style.border_bottom {
            self.fill(
                Rect {
                    x,
                    y: bottom,
                    width,
                    height: border.width,
                },
                border.color,
                FillRole::Background,
            );
            bottom += border.width;
        }
        let height = bottom - y;
        if let Some(border) = style.border_left {
            self.fill(
                Rect {
                    x,
                    y,
                    width: border.width,
                    height,
                },
                border.color,
                FillRole::Background,
            );
        }
        if let Some(index) = background {
            self.patch_height(index, height);
        }
        height
    }

    fn block(&mut self, block: &Block, x: f32, y: f32, width: f32) -> f32 {
        let height = self.boxed(&block.style, &block.children, x, y, width, true);
        y + height + block.style.margin_bottom
    }

    fn row(&mut self, row: &Row, x: f32, y: f32, width: f32) -> f32 {
        let widths = column_widths(row, width);

        let mut col_x = x;
        let mut slots = Vec::with_capacity(row.columns.len());
        let mut row_height: f32 = 0.0;
        for (column, &col_w) in row.columns.iter().zip(&widths) {
            // Column backgrounds span the whole row, so reserve them here.
            let slot = match column.style.background {
                Some(color) if column.extend_to_page => {
                    self.bands.push(Band {
                        x: col_x,
                        width: col_w,
                        color,
                    });
                    None
                }
                Some(color) => Some(self.placeholder(col_x, y, col_w, color)),
                None => None,
            };
            slots.push(slot);
            let height = self.boxed(&column.style, &column.children, col_x, y, col_w, false);
            row_height = row_height.max(height);
            col_x += col_w + row.gap;
        }
        for slot in slots.into_iter().flatten() {
            self.patch_height(slot, row_height);
        }
        y + row_height + row.margin_bottom
    }

    fn text(&mut self, text: &Text, x: f32, y: f32, width: f32) -> f32 {
        let style = &text.style;
        let metrics = get_metrics(style.font, style.weight);
        let line_box = style.line_box();
        let indent = if text.bullet {
            style.size * BULLET_INDENT_EM
        } else {
            0.0
        };
        let avail = (width - indent).max(0.0);
        let baseline_offset = (line_box - style.size) / 2.0 + metrics.ascent * style.size;

        let lines = wrap_text(&text.display_text(), metrics, style.size, avail);
        let run = |text: String, baseline: f32| TextRun {
            text,
            font: style.font,
            weight: style.weight,
            size: style.size,
            color: style.color,
            baseline,
        };

        if text.bullet && !lines.is_empty() {
            let glyph_w = metrics.measure_px(BULLET_GLYPH, style.size);
            self.fragments.push(Fragment {
                rect: Rect {
                    x: x + style.size * 0.2,
                    y,
                    width: glyph_w,
                    height: line_box,
                },
                kind: FragmentKind::Text(run(BULLET_GLYPH.to_string(), y + baseline_offset)),
            });
        }

        let mut line_top = y;
        for line in &lines {
            let offset = match style.align {
                TextAlign::Left => 0.0,
                TextAlign::Center => ((avail - line.width) / 2.0).max(0.0),
                TextAlign::Right => (avail - line.width).max(0.0),
            };
            self.fragments.push(Fragment {
                rect: Rect {
                    x: x + indent + offset,
                    y: line_top,
                    width: line.width,
                    height: line_box,
                },
                kind: FragmentKind::Text(run(line.text.clone(), line_top + baseline_offset)),
            });
            line_top += line_box;
        }
        line_top + text.margin_bottom
    }

    fn rule(&mut self, rule: &Rule, x: f32, y: f32, width: f32) -> f32 {
        let top = y + rule.margin_top;
        let rule_w = width * rule.width_fraction.clamp(0.0, 1.0);
        self.fill(
            Rect {
                x: x + (width - rule_w) / 2.0,
                y: top,
                width: rule_w,
                height: rule.thickness,
            },
            rule.color,
            FillRole::Rule,
        );
        top + rule.thickness + rule.margin_bottom
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Column sizing
// ────────────────────────────────────────────────────────────────────────────

/// Resolves column widths: fractions of the width after gaps first, then auto
/// columns at their natural width, then fill columns share the rest.
fn column_widths(row: &Row, width: f32) -> Vec<f32> {
    let gaps = row.gap * row.columns.len().saturating_sub(1) as f32;
    let avail = (width - gaps).max(0.0);

    let mut widths = vec![0.0_f32; row.columns.len()];
    let mut remaining = avail;
    for (i, column) in row.columns.iter().enumerate() {
        if let ColumnWidth::Fraction(f) = column.width {
            widths[i] = (avail * f.clamp(0.0, 1.0)).min(remaining);
            remaining -= widths[i];
        }
    }
    for (i, column) in row.columns.iter().enumerate() {
        if column.width == ColumnWidth::Auto {
            widths[i] = column_natural_width(column).min(remaining);
            remaining -= widths[i];
        }
    }
    let fills = row
        .columns
        .iter()
        .filter(|c| c.width == ColumnWidth::Fill)
        .count();
    if fills > 0 {
        let share = remaining.max(0.0) / fills as f32;
        for (i, column) in row.columns.iter().enumerate() {
            if column.width == ColumnWidth::Fill {
                widths[i] = share;
            }
        }
    }
    widths
}

fn column_natural_width(column: &Column) -> f32 {
    let style = &column.style;
    let border = style.border_left.map_or(0.0, |b| b.width);
    nodes_natural_width(&column.children) + style.padding.horizontal() + border
}

/// Widest unwrapped line among `nodes`.
fn nodes_natural_width(nodes: &[Node]) -> f32 {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) => {
                let metrics = get_metrics(text.style.font, text.style.weight);
                let indent = if text.bullet {
                    text.style.size * BULLET_INDENT_EM
                } else {
                    0.0
                };
                // Round up so the line never wraps at its own natural width.
                (natural_width(&text.display_text(), metrics, text.style.size) + indent).ceil()
            }
            Node::Block(block) => {
                let border = block.style.border_left.map_or(0.0, |b| b.width);
                nodes_natural_width(&block.children) + block.style.padding.horizontal() + border
            }
            Node::Row(row) => {
                let gaps = row.gap * row.columns.len().saturating_sub(1) as f32;
                row.columns.iter().map(column_natural_width).sum::<f32>() + gaps
            }
            Node::Rule(_) | Node::Spacer { .. } => 0.0,
        })
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::sample_resume;
    use crate::render::templates::{render_resume, SectionSettings, TemplateId};
    use crate::render::theme::Theme;
    use crate::render::tree::{Border, Edges, TextStyle};

    fn text_runs(laid: &LaidOutDocument) -> impl Iterator<Item = (&Rect, &TextRun)> {
        laid.fragments.iter().filter_map(|f| match &f.kind {
            FragmentKind::Text(run) => Some((&f.rect, run)),
            FragmentKind::Fill { .. } => None,
        })
    }

    fn style() -> TextStyle {
        TextStyle::new(FontFamily::Sans, 10.0, Color::TEXT)
    }

    fn doc(nodes: Vec<Node>) -> Document {
        Document {
            template: TemplateId::Modern,
            background: Color::WHITE,
            nodes,
        }
    }

    #[test]
    fn test_text_lines_stack_by_line_box() {
        let laid = layout_document(
            &doc(vec![Node::text_spaced("one two three four five six", style(), 5.0)]),
            60.0,
        );
        let lines: Vec<_> = text_runs(&laid).collect();
        assert!(lines.len() > 1);
        assert_eq!(lines[0].0.y, 0.0);
        assert!((lines[1].0.y - 14.0).abs() < 1e-4);
        assert!((laid.height - (lines.len() as f32 * 14.0 + 5.0)).abs() < 1e-3);
    }

    #[test]
    fn test_baseline_sits_inside_line_box() {
        let laid = layout_document(&doc(vec![Node::text("Hello", style())]), 200.0);
        let (rect, run) = text_runs(&laid).next().unwrap();
        assert!(run.baseline > rect.y && run.baseline < rect.bottom());
    }

    #[test]
    fn test_block_background_covers_children_and_padding() {
        let block = Node::block(
            BoxStyle {
                padding: Edges::symmetric(10.0, 10.0),
                background: Some(Color::TINT),
                margin_bottom: 4.0,
                ..Default::default()
            },
            vec![Node::text("Hi", style())],
        );
        let laid = layout_document(&doc(vec![block]), 100.0);
        let FragmentKind::Fill { color, role } = &laid.fragments[0].kind else {
            panic!("background should paint first");
        };
        assert_eq!(*color, Color::TINT);
        assert_eq!(*role, FillRole::Background);
        assert!((laid.fragments[0].rect.height - 34.0).abs() < 1e-4);
        assert!((laid.height - 38.0).abs() < 1e-4);
        // text is inset by the padding
        let (rect, _) = text_runs(&laid).next().unwrap();
        assert_eq!(rect.x, 10.0);
    }

    #[test]
    fn test_left_border_and_rule_fragments() {
        let block = Node::block(
            BoxStyle {
                border_left: Some(Border {
                    width: 4.0,
                    color: Color::MUTED,
                }),
                ..Default::default()
            },
            vec![Node::text("Title", style()), Node::rule(1.0, Color::RULE, 2.0, 3.0)],
        );
        let laid = layout_document(&doc(vec![block]), 100.0);
        let rule = laid
            .fragments
            .iter()
            .find(|f| matches!(f.kind, FragmentKind::Fill { role: FillRole::Rule, .. }))
            .unwrap();
        assert!(rule.is_atomic());
        assert_eq!(rule.rect.x, 4.0);
        assert!((rule.rect.y - 16.0).abs() < 1e-4);
        assert!((laid.height - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_row_height_is_tallest_column() {
        let row = Node::split_line(
            Node::text("a long title that wraps onto more lines", style()),
            "2020",
            style(),
            0.0,
        );
        let laid = layout_document(&doc(vec![row]), 120.0);
        let title_lines = text_runs(&laid).filter(|(_, r)| r.text != "2020").count();
        assert!(title_lines > 1);
        assert!((laid.height - title_lines as f32 * 14.0).abs() < 1e-3);
        let (date_rect, _) = text_runs(&laid).find(|(_, r)| r.text == "2020").unwrap();
        // right aligned against the row edge
        assert!((date_rect.x + date_rect.width - 120.0).abs() < 1.0);
    }

    #[test]
    fn test_column_widths_resolve_fraction_auto_and_fill() {
        let col = |width, text: &str| Column {
            width,
            style: BoxStyle::default(),
            extend_to_page: false,
            children: vec![Node::text(text, style())],
        };
        let row = Row {
            columns: vec![
                col(ColumnWidth::Fraction(0.25), "a"),
                col(ColumnWidth::Fill, "b"),
                col(ColumnWidth::Auto, "Sep 2020"),
            ],
            gap: 10.0,
            margin_bottom: 0.0,
        };
        let widths = column_widths(&row, 420.0);
        assert!((widths[0] - 100.0).abs() < 1e-3);
        let auto = widths[2];
        assert!(auto > 0.0 && auto < 100.0);
        assert!((widths.iter().sum::<f32>() + 20.0 - 420.0).abs() < 1e-3);
    }

    #[test]
    fn test_extend_to_page_column_becomes_band() {
        let laid = layout_document(
            &render_resume(
                &sample_resume(),
                TemplateId::Creative,
                &Theme::default(),
                &SectionSettings::default(),
            ),
            794.0,
        );
        assert_eq!(laid.bands.len(), 1);
        assert_eq!(laid.bands[0].x, 0.0);
        assert!((laid.bands[0].width - 794.0 * 0.34).abs() < 1e-2);
    }

    #[test]
    fn test_every_template_lays_out_within_width() {
        let resume = sample_resume();
        for id in TemplateId::ALL {
            let d = render_resume(&resume, id, &Theme::default(), &SectionSettings::default());
            let laid = layout_document(&d, 794.0);
            assert!(laid.height > 200.0, "{id:?} laid out suspiciously short");
            for (rect, run) in text_runs(&laid) {
                assert!(
                    rect.x + rect.width <= 794.0 + 0.5,
                    "{id:?}: '{}' overflows the page",
                    run.text
                );
            }
        }
    }

    #[test]
    fn test_bullet_is_hang_indented() {
        let laid = layout_document(
            &doc(vec![Node::bullet("shipped the thing and then some more words", style(), 0.0)]),
            120.0,
        );
        let runs: Vec<_> = text_runs(&laid).collect();
        assert_eq!(runs[0].1.text, BULLET_GLYPH);
        assert!((runs[1].0.x - 11.0).abs() < 1e-4);
        assert!((runs[2].0.x - 11.0).abs() < 1e-4);
    }
}
