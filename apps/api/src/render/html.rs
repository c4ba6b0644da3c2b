//! Serializes a `Document` into a self-contained HTML preview.
//!
//! Layout mirrors `layout::flow`: blocks are column flex boxes so margins never
//! collapse, rows are flex containers, fraction columns take a share of the
//! width after gaps and fill columns split what remains.

use std::fmt::Write;

use crate::layout::font_metrics::FontWeight;
use crate::render::tree::{Block, BoxStyle, Column, ColumnWidth, Document, Node, Row, Rule, Text, TextAlign};

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn to_html(doc: &Document, width_px: f32) -> String {
    let mut body = String::new();
    for node in &doc.nodes {
        write_node(&mut body, node);
    }
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Resume preview ({template})</title>\n\
         <style>*{{box-sizing:border-box;margin:0;padding:0}}\
         body{{background:#e5e7eb}}\
         .page,.b{{display:flex;flex-direction:column}}\
         .page{{margin:0 auto;overflow-wrap:anywhere}}</style>\n</head>\n<body>\n\
         <div class=\"page\" data-template=\"{template}\" style=\"width:{width}px;background:{bg}\">\
         {body}</div>\n</body>\n</html>\n",
        template = doc.template,
        width = fmt_px(width_px),
        bg = doc.background,
    )
}

fn fmt_px(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    format!("{rounded}")
}

fn box_css(style: &BoxStyle) -> String {
    let mut css = String::new();
    let p = style.padding;
    if p.vertical() + p.horizontal() > 0.0 {
        let _ = write!(
            css,
            "padding:{}px {}px {}px {}px;",
            fmt_px(p.top),
            fmt_px(p.right),
            fmt_px(p.bottom),
            fmt_px(p.left)
        );
    }
    if style.margin_bottom > 0.0 {
        let _ = write!(css, "margin-bottom:{}px;", fmt_px(style.margin_bottom));
    }
    if let Some(bg) = style.background {
        let _ = write!(css, "background:{bg};");
    }
    if let Some(border) = style.border_left {
        let _ = write!(css, "border-left:{}px solid {};", fmt_px(border.width), border.color);
    }
    if let Some(border) = style.border_bottom {
        let _ = write!(css, "border-bottom:{}px solid {};", fmt_px(border.width), border.color);
    }
    css
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Block(block) => write_block(out, block),
        Node::Row(row) => write_row(out, row),
        Node::Text(text) => write_text(out, text),
        Node::Rule(rule) => write_rule(out, rule),
        Node::Spacer { height } => {
            let _ = write!(out, "<div style=\"height:{}px\"></div>", fmt_px(*height));
        }
    }
}

fn write_block(out: &mut String, block: &Block) {
    let _ = write!(out, "<div class=\"b\" style=\"{}\">", box_css(&block.style));
    for child in &block.children {
        write_node(out, child);
    }
    out.push_str("</div>");
}

fn column_flex(width: ColumnWidth, gaps: f32) -> String {
    match width {
        ColumnWidth::Fraction(f) => format!(
            "flex:0 0 calc((100% - {}px) * {});",
            fmt_px(gaps),
            f.clamp(0.0, 1.0)
        ),
        ColumnWidth::Auto => "flex:0 0 auto;".to_string(),
        ColumnWidth::Fill => "flex:1 1 0;".to_string(),
    }
}

fn write_row(out: &mut String, row: &Row) {
    let gaps = row.gap * row.columns.len().saturating_sub(1) as f32;
    let _ = write!(out, "<div style=\"display:flex;align-items:stretch;");
    if row.gap > 0.0 {
        let _ = write!(out, "gap:{}px;", fmt_px(row.gap));
    }
    if row.margin_bottom > 0.0 {
        let _ = write!(out, "margin-bottom:{}px;", fmt_px(row.margin_bottom));
    }
    out.push_str("\">");
    for column in &row.columns {
        write_column(out, column, gaps);
    }
    out.push_str("</div>");
}

fn write_column(out: &mut String, column: &Column, gaps: f32) {
    let _ = write!(
        out,
        "<div class=\"b\" style=\"min-width:0;{}{}\">",
        column_flex(column.width, gaps),
        box_css(&column.style)
    );
    for child in &column.children {
        write_node(out, child);
    }
    out.push_str("</div>");
}

fn write_text(out: &mut String, text: &Text) {
    let s = &text.style;
    let align = match s.align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    };
    let weight = match s.weight {
        FontWeight::Regular => 400,
        FontWeight::Bold => 700,
    };
    let _ = write!(
        out,
        "<p style=\"font-family:{};font-size:{}px;font-weight:{weight};color:{};\
         line-height:{};text-align:{align};",
        s.font.css_stack(),
        fmt_px(s.size),
        s.color,
        s.line_height,
    );
    if s.uppercase {
        out.push_str("text-transform:uppercase;");
    }
    if text.margin_bottom > 0.0 {
        let _ = write!(out, "margin-bottom:{}px;", fmt_px(text.margin_bottom));
    }
    if text.bullet {
        out.push_str("padding-left:1em;text-indent:-0.7em;\">&bull;&nbsp;");
    } else {
        out.push_str("\">");
    }
    out.push_str(&escape_html(&text.content));
    out.push_str("</p>");
}

fn write_rule(out: &mut String, rule: &Rule) {
    let fraction = rule.width_fraction.clamp(0.0, 1.0);
    let _ = write!(
        out,
        "<div style=\"height:{}px;background:{};margin:{}px auto {}px;width:{}%\"></div>",
        fmt_px(rule.thickness),
        rule.color,
        fmt_px(rule.margin_top),
        fmt_px(rule.margin_bottom),
        fmt_px(fraction * 100.0),
    );
}
