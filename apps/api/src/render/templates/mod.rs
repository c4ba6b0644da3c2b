//! Template renderer: `(resume, template, theme) -> Document`.
//!
//! Every template lays out the same data model; they differ only in the static
//! descriptor from `catalog.rs`. Section presence is decided by
//! `Resume::has_section`, identically for all of them.

pub mod catalog;
mod header;
mod sections;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::font_metrics::FontFamily;
use crate::models::resume::{Resume, SectionKind};
use crate::render::theme::{Color, Theme};
use crate::render::tree::{BoxStyle, Column, ColumnWidth, Document, Edges, Node, Row};

use catalog::{template_style, ColumnLayout, HeaderStyle, SidebarFill, SidebarSide, TemplateStyle};
use sections::{build_section, Palette, RenderCtx};

// ────────────────────────────────────────────────────────────────────────────
// Template ids
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Minimal,
    Professional,
    Creative,
    Executive,
    Technical,
    Elegant,
    Compact,
    Academic,
    Sidebar,
    Bold,
}

#[derive(Debug, Error)]
#[error("unknown template '{0}'")]
pub struct ParseTemplateError(String);

impl TemplateId {
    pub const ALL: [TemplateId; 12] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Minimal,
        TemplateId::Professional,
        TemplateId::Creative,
        TemplateId::Executive,
        TemplateId::Technical,
        TemplateId::Elegant,
        TemplateId::Compact,
        TemplateId::Academic,
        TemplateId::Sidebar,
        TemplateId::Bold,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Minimal => "minimal",
            TemplateId::Professional => "professional",
            TemplateId::Creative => "creative",
            TemplateId::Executive => "executive",
            TemplateId::Technical => "technical",
            TemplateId::Elegant => "elegant",
            TemplateId::Compact => "compact",
            TemplateId::Academic => "academic",
            TemplateId::Sidebar => "sidebar",
            TemplateId::Bold => "bold",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = ParseTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| ParseTemplateError(s.to_string()))
    }
}

/// Gallery metadata for one template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub columns: u8,
    pub default_accent: Color,
    pub default_font: FontFamily,
}

pub fn template_catalog() -> Vec<TemplateInfo> {
    TemplateId::ALL
        .into_iter()
        .map(|id| {
            let style = template_style(id);
            TemplateInfo {
                id,
                name: style.name,
                description: style.description,
                columns: match style.columns {
                    ColumnLayout::Single => 1,
                    ColumnLayout::Sidebar { .. } => 2,
                },
                default_accent: style.accent,
                default_font: style.body_font,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Section settings
// ────────────────────────────────────────────────────────────────────────────

/// Per-request section ordering and visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionSettings {
    /// Preferred order. Sections not listed follow in template order.
    pub order: Option<Vec<SectionKind>>,
    pub hidden: Vec<SectionKind>,
}

impl SectionSettings {
    /// Applies ordering and visibility to one column's template section list.
    pub fn arrange(&self, template_order: &[SectionKind]) -> Vec<SectionKind> {
        let mut sections: Vec<SectionKind> = template_order
            .iter()
            .copied()
            .filter(|k| !self.hidden.contains(k))
            .collect();
        if let Some(order) = &self.order {
            // Stable sort keeps template order among unlisted sections.
            sections.sort_by_key(|k| order.iter().position(|o| o == k).unwrap_or(usize::MAX));
        }
        sections
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders a resume into the visual tree for `template`.
pub fn render_resume(
    resume: &Resume,
    template: TemplateId,
    theme: &Theme,
    settings: &SectionSettings,
) -> Document {
    let style = template_style(template);
    let ctx = RenderCtx::new(resume, style, theme);

    let nodes = match style.columns {
        ColumnLayout::Single => render_single(&ctx, style, settings),
        ColumnLayout::Sidebar {
            side,
            fraction,
            fill,
        } => render_with_sidebar(&ctx, style, settings, side, fraction, fill),
    };

    Document {
        template,
        background: Color::WHITE,
        nodes,
    }
}

fn section_nodes(ctx: &RenderCtx<'_>, kinds: &[SectionKind]) -> Vec<Node> {
    kinds
        .iter()
        .filter(|k| ctx.resume.has_section(**k))
        .flat_map(|k| build_section(ctx, *k))
        .collect()
}

fn render_single(
    ctx: &RenderCtx<'_>,
    style: &TemplateStyle,
    settings: &SectionSettings,
) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut body = Vec::new();

    if style.header == HeaderStyle::Banner {
        nodes.push(header::banner(ctx, style));
    } else {
        body.extend(header::header(ctx, style));
    }
    body.extend(section_nodes(ctx, &settings.arrange(style.main_sections)));

    nodes.push(Node::block(
        BoxStyle {
            padding: style.page_padding,
            ..Default::default()
        },
        body,
    ));
    nodes
}

fn render_with_sidebar(
    ctx: &RenderCtx<'_>,
    style: &TemplateStyle,
    settings: &SectionSettings,
    side: SidebarSide,
    fraction: f32,
    fill: SidebarFill,
) -> Vec<Node> {
    let (background, palette) = match fill {
        SidebarFill::Accent => (ctx.accent, Palette::on_accent(ctx.accent)),
        SidebarFill::Tint => (Color::TINT, ctx.palette),
    };
    let aside_ctx = ctx.with_palette(palette);

    let mut aside = Vec::new();
    let mut main = Vec::new();
    if style.header == HeaderStyle::InSidebar {
        aside.extend(header::sidebar_header(&aside_ctx, style));
    } else {
        main.extend(header::header(ctx, style));
    }
    aside.extend(section_nodes(&aside_ctx, &settings.arrange(style.sidebar_sections)));
    main.extend(section_nodes(ctx, &settings.arrange(style.main_sections)));

    let pad = style.page_padding;
    let aside_col = Column {
        width: ColumnWidth::Fraction(fraction),
        style: BoxStyle {
            padding: Edges::symmetric(pad.top, pad.left.min(24.0)),
            background: Some(background),
            ..Default::default()
        },
        extend_to_page: true,
        children: aside,
    };
    let main_col = Column {
        width: ColumnWidth::Fill,
        style: BoxStyle {
            padding: pad,
            ..Default::default()
        },
        extend_to_page: false,
        children: main,
    };

    let columns = match side {
        SidebarSide::Left => vec![aside_col, main_col],
        SidebarSide::Right => vec![main_col, aside_col],
    };
    vec![Node::Row(Row {
        columns,
        gap: 0.0,
        margin_bottom: 0.0,
    })]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::sample_resume;
    use crate::render::tree::Text;

    fn collect_text(nodes: &[Node], out: &mut Vec<String>) {
        for node in nodes {
            match node {
                Node::Text(Text { content, .. }) => out.push(content.clone()),
                Node::Block(b) => collect_text(&b.children, out),
                Node::Row(r) => {
                    for c in &r.columns {
                        collect_text(&c.children, out);
                    }
                }
                Node::Rule(_) | Node::Spacer { .. } => {}
            }
        }
    }

    fn texts(doc: &Document) -> Vec<String> {
        let mut out = Vec::new();
        collect_text(&doc.nodes, &mut out);
        out
    }

    fn position_of(texts: &[String], needle: &str) -> usize {
        texts
            .iter()
            .position(|t| t.eq_ignore_ascii_case(needle))
            .unwrap_or_else(|| panic!("{needle} not rendered"))
    }

    #[test]
    fn test_parse_template_id_case_insensitive() {
        assert_eq!("Creative".parse::<TemplateId>().unwrap(), TemplateId::Creative);
        assert_eq!(" bold ".parse::<TemplateId>().unwrap(), TemplateId::Bold);
        assert!("fancy".parse::<TemplateId>().is_err());
    }

    #[test]
    fn test_catalog_lists_twelve_templates() {
        let catalog = template_catalog();
        assert_eq!(catalog.len(), 12);
        let two_column: Vec<_> = catalog.iter().filter(|t| t.columns == 2).collect();
        assert_eq!(two_column.len(), 2);
    }

    #[test]
    fn test_every_template_renders_name_and_sections() {
        let resume = sample_resume();
        for id in TemplateId::ALL {
            let doc = render_resume(&resume, id, &Theme::default(), &SectionSettings::default());
            let t = texts(&doc);
            assert!(t.iter().any(|s| s == "Jordan Rivera"), "{id:?} lost the name");
            assert!(t.iter().any(|s| s == "Northwind Payments" || s.contains("Northwind")));
            assert!(t.iter().any(|s| s.contains("University of Washington")));
        }
    }

    #[test]
    fn test_absent_sections_render_no_title() {
        let mut resume = sample_resume();
        resume.projects[0].name = String::new();
        for id in TemplateId::ALL {
            let doc = render_resume(&resume, id, &Theme::default(), &SectionSettings::default());
            let t = texts(&doc);
            assert!(
                !t.iter().any(|s| s.eq_ignore_ascii_case("Projects")),
                "{id:?} rendered an empty projects section"
            );
        }
    }

    #[test]
    fn test_template_ordering_differs() {
        let resume = sample_resume();
        let settings = SectionSettings::default();
        let academic = texts(&render_resume(&resume, TemplateId::Academic, &Theme::default(), &settings));
        assert!(position_of(&academic, "Education") < position_of(&academic, "Experience"));
        let modern = texts(&render_resume(&resume, TemplateId::Modern, &Theme::default(), &settings));
        assert!(position_of(&modern, "Experience") < position_of(&modern, "Education"));
    }

    #[test]
    fn test_section_settings_reorder_and_hide() {
        let settings = SectionSettings {
            order: Some(vec![SectionKind::Skills, SectionKind::Education]),
            hidden: vec![SectionKind::Summary],
        };
        let arranged = settings.arrange(&[
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
            SectionKind::Projects,
        ]);
        assert_eq!(
            arranged,
            vec![
                SectionKind::Skills,
                SectionKind::Education,
                SectionKind::Experience,
                SectionKind::Projects,
            ]
        );
    }

    #[test]
    fn test_sidebar_template_builds_extending_column() {
        let doc = render_resume(
            &sample_resume(),
            TemplateId::Creative,
            &Theme::default(),
            &SectionSettings::default(),
        );
        let Node::Row(row) = &doc.nodes[0] else {
            panic!("creative should be a two-column row");
        };
        assert!(row.columns[0].extend_to_page);
        assert_eq!(row.columns[0].width, ColumnWidth::Fraction(0.34));
    }

    #[test]
    fn test_theme_accent_overrides_template_default() {
        let theme = Theme {
            accent_color: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        };
        let doc = render_resume(
            &sample_resume(),
            TemplateId::Creative,
            &theme,
            &SectionSettings::default(),
        );
        let Node::Row(row) = &doc.nodes[0] else {
            panic!("expected row");
        };
        assert_eq!(row.columns[0].style.background, Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn test_empty_resume_renders_without_panicking() {
        for id in TemplateId::ALL {
            let doc = render_resume(&Resume::default(), id, &Theme::default(), &SectionSettings::default());
            assert_eq!(doc.template, id);
        }
    }
}
