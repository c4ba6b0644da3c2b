//! The visual document tree produced by templates.
//!
//! This is the boundary between the templates and everything downstream: the
//! HTML preview serializes it, the flow layout measures it, and the PDF writer
//! draws the measured result. All lengths are CSS px.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{FontFamily, FontWeight};
use crate::render::templates::TemplateId;
use crate::render::theme::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub template: TemplateId,
    pub background: Color,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Block(Block),
    Row(Row),
    Text(Text),
    Rule(Rule),
    Spacer { height: f32 },
}

// ────────────────────────────────────────────────────────────────────────────
// Boxes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    pub padding: Edges,
    pub margin_bottom: f32,
    pub background: Option<Color>,
    pub border_left: Option<Border>,
    pub border_bottom: Option<Border>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub style: BoxStyle,
    pub children: Vec<Node>,
}

/// Side-by-side columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub columns: Vec<Column>,
    pub gap: f32,
    pub margin_bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Fraction of the row's width after gaps.
    Fraction(f32),
    /// Natural width of the column's text, capped at what is left.
    Auto,
    /// Shares the remaining width equally with other fill columns.
    Fill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub width: ColumnWidth,
    pub style: BoxStyle,
    /// Paint the column background down the full height of every page.
    pub extend_to_page: bool,
    pub children: Vec<Node>,
}

// ────────────────────────────────────────────────────────────────────────────
// Leaves
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontFamily,
    pub weight: FontWeight,
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Line box height as a multiple of `size`.
    pub line_height: f32,
    pub uppercase: bool,
}

impl TextStyle {
    pub fn new(font: FontFamily, size: f32, color: Color) -> Self {
        Self {
            font,
            weight: FontWeight::Regular,
            size,
            color,
            align: TextAlign::Left,
            line_height: 1.4,
            uppercase: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn line_box(&self) -> f32 {
        self.size * self.line_height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    pub style: TextStyle,
    /// Prefix the first line with a bullet and hang-indent the rest.
    pub bullet: bool,
    pub margin_bottom: f32,
}

impl Text {
    /// The string as it is drawn (uppercased when the style says so).
    pub fn display_text(&self) -> String {
        if self.style.uppercase {
            self.content.to_uppercase()
        } else {
            self.content.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub thickness: f32,
    pub color: Color,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Fraction of the available width, centred. 1.0 spans the full width.
    pub width_fraction: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Constructors
// ────────────────────────────────────────────────────────────────────────────

impl Node {
    pub fn text(content: impl Into<String>, style: TextStyle) -> Node {
        Node::Text(Text {
            content: content.into(),
            style,
            bullet: false,
            margin_bottom: 0.0,
        })
    }

    pub fn text_spaced(content: impl Into<String>, style: TextStyle, margin_bottom: f32) -> Node {
        Node::Text(Text {
            content: content.into(),
            style,
            bullet: false,
            margin_bottom,
        })
    }

    pub fn bullet(content: impl Into<String>, style: TextStyle, margin_bottom: f32) -> Node {
        Node::Text(Text {
            content: content.into(),
            style,
            bullet: true,
            margin_bottom,
        })
    }

    pub fn block(style: BoxStyle, children: Vec<Node>) -> Node {
        Node::Block(Block { style, children })
    }

    pub fn rule(thickness: f32, color: Color, margin_top: f32, margin_bottom: f32) -> Node {
        Node::Rule(Rule {
            thickness,
            color,
            margin_top,
            margin_bottom,
            width_fraction: 1.0,
        })
    }

    pub fn spacer(height: f32) -> Node {
        Node::Spacer { height }
    }

    /// Left-aligned text in the remaining width with right-aligned text beside it,
    /// the usual "title ........ dates" line. Omits the right side when empty.
    pub fn split_line(
        left: Node,
        right: impl Into<String>,
        right_style: TextStyle,
        margin_bottom: f32,
    ) -> Node {
        let right = right.into();
        if right.trim().is_empty() {
            return Node::block(
                BoxStyle {
                    margin_bottom,
                    ..Default::default()
                },
                vec![left],
            );
        }
        Node::Row(Row {
            columns: vec![
                Column {
                    width: ColumnWidth::Fill,
                    style: BoxStyle::default(),
                    extend_to_page: false,
                    children: vec![left],
                },
                Column {
                    width: ColumnWidth::Auto,
                    style: BoxStyle::default(),
                    extend_to_page: false,
                    children: vec![Node::text(right, right_style.align(TextAlign::Right))],
                },
            ],
            gap: 12.0,
            margin_bottom,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_uppercases() {
        let style = TextStyle::new(FontFamily::Sans, 12.0, Color::TEXT).uppercase();
        let Node::Text(text) = Node::text("Experience", style) else {
            panic!("expected text node");
        };
        assert_eq!(text.display_text(), "EXPERIENCE");
    }

    #[test]
    fn test_split_line_without_right_side_is_block() {
        let style = TextStyle::new(FontFamily::Sans, 12.0, Color::TEXT);
        let node = Node::split_line(Node::text("Engineer", style), "  ", style, 4.0);
        assert!(matches!(node, Node::Block(_)));
    }

    #[test]
    fn test_split_line_right_column_is_auto_and_right_aligned() {
        let style = TextStyle::new(FontFamily::Sans, 12.0, Color::TEXT);
        let node = Node::split_line(Node::text("Engineer", style), "2020", style, 4.0);
        let Node::Row(row) = node else {
            panic!("expected row");
        };
        assert_eq!(row.columns[1].width, ColumnWidth::Auto);
        let Node::Text(date) = &row.columns[1].children[0] else {
            panic!("expected text");
        };
        assert_eq!(date.style.align, TextAlign::Right);
    }

    #[test]
    fn test_node_serializes_with_type_tag() {
        let json = serde_json::to_value(Node::spacer(8.0)).unwrap();
        assert_eq!(json["type"], "spacer");
        assert_eq!(json["height"], 8.0);
    }

    #[test]
    fn test_edges_helpers() {
        let e = Edges::symmetric(4.0, 10.0);
        assert_eq!(e.horizontal(), 20.0);
        assert_eq!(e.vertical(), 8.0);
    }
}
