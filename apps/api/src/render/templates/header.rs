//! Name, job title and contact line at the top of the resume.

use crate::models::resume::SectionKind;
use crate::render::templates::catalog::{HeaderStyle, TemplateStyle};
use crate::render::templates::sections::RenderCtx;
use crate::render::theme::Color;
use crate::render::tree::{BoxStyle, Edges, Node, TextAlign, TextStyle};

const CONTACT_SEPARATOR: &str = "  |  ";

fn title_size(ctx: &RenderCtx<'_>) -> f32 {
    (ctx.name_size() * 0.5).max(ctx.body_size() * 1.1)
}

/// Contact line unless the template lists contact details in its sidebar.
fn contact_line(ctx: &RenderCtx<'_>, style: &TemplateStyle) -> Option<String> {
    if style.sidebar_sections.contains(&SectionKind::Contact) {
        return None;
    }
    let items = ctx.resume.personal_info.contact_items();
    (!items.is_empty()).then(|| items.join(CONTACT_SEPARATOR))
}

/// Header stacked in the main column, left-aligned or centred.
pub(crate) fn header(ctx: &RenderCtx<'_>, style: &TemplateStyle) -> Vec<Node> {
    let info = &ctx.resume.personal_info;
    let align = match style.header {
        HeaderStyle::Centered => TextAlign::Center,
        _ => TextAlign::Left,
    };
    let name_color = match style.header {
        HeaderStyle::Centered => ctx.palette.text,
        _ => ctx.accent,
    };

    let mut children = Vec::new();
    if !info.full_name.trim().is_empty() {
        children.push(Node::text_spaced(
            info.full_name.trim(),
            TextStyle::new(ctx.heading_font, ctx.name_size(), name_color)
                .bold()
                .align(align)
                .line_height(1.2),
            4.0,
        ));
    }
    if !info.job_title.trim().is_empty() {
        children.push(Node::text_spaced(
            info.job_title.trim(),
            TextStyle::new(ctx.heading_font, title_size(ctx), ctx.palette.muted).align(align),
            4.0,
        ));
    }
    if let Some(line) = contact_line(ctx, style) {
        children.push(Node::text(line, ctx.muted().align(align)));
    }
    if children.is_empty() {
        return children;
    }

    vec![Node::block(
        BoxStyle {
            margin_bottom: style.section_gap,
            ..Default::default()
        },
        children,
    )]
}

/// Full-width accent band. Its horizontal padding matches the page body.
pub(crate) fn banner(ctx: &RenderCtx<'_>, style: &TemplateStyle) -> Node {
    let info = &ctx.resume.personal_info;
    let mut children = Vec::new();
    if !info.full_name.trim().is_empty() {
        children.push(Node::text_spaced(
            info.full_name.trim(),
            TextStyle::new(ctx.heading_font, ctx.name_size(), Color::WHITE)
                .bold()
                .line_height(1.2),
            4.0,
        ));
    }
    if !info.job_title.trim().is_empty() {
        children.push(Node::text_spaced(
            info.job_title.trim(),
            TextStyle::new(ctx.heading_font, title_size(ctx), ctx.accent.lighten(0.75)),
            4.0,
        ));
    }
    if let Some(line) = contact_line(ctx, style) {
        children.push(Node::text(
            line,
            TextStyle::new(ctx.body_font, ctx.small_size(), Color::WHITE),
        ));
    }

    Node::block(
        BoxStyle {
            padding: Edges::symmetric(28.0, style.page_padding.left),
            background: Some(ctx.accent),
            ..Default::default()
        },
        children,
    )
}

/// Name and title at the top of the sidebar; contact follows as a section.
pub(crate) fn sidebar_header(ctx: &RenderCtx<'_>, _style: &TemplateStyle) -> Vec<Node> {
    let info = &ctx.resume.personal_info;
    let mut nodes = Vec::new();
    if !info.full_name.trim().is_empty() {
        nodes.push(Node::text_spaced(
            info.full_name.trim(),
            TextStyle::new(ctx.heading_font, ctx.name_size() * 0.85, ctx.palette.heading)
                .bold()
                .line_height(1.2),
            4.0,
        ));
    }
    if !info.job_title.trim().is_empty() {
        nodes.push(Node::text(
            info.job_title.trim(),
            TextStyle::new(ctx.heading_font, ctx.body_size() * 1.05, ctx.palette.muted),
        ));
    }
    if !nodes.is_empty() {
        nodes.push(Node::spacer(18.0));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Resume;
    use crate::models::sample::sample_resume;
    use crate::render::templates::catalog::template_style;
    use crate::render::templates::TemplateId;
    use crate::render::theme::Theme;

    #[test]
    fn test_centered_header_aligns_every_line() {
        let resume = sample_resume();
        let style = template_style(TemplateId::Classic);
        let ctx = RenderCtx::new(&resume, style, &Theme::default());
        let nodes = header(&ctx, style);
        let Node::Block(block) = &nodes[0] else {
            panic!("expected block");
        };
        for child in &block.children {
            let Node::Text(text) = child else {
                panic!("expected text");
            };
            assert_eq!(text.style.align, TextAlign::Center);
        }
    }

    #[test]
    fn test_sidebar_templates_drop_header_contact_line() {
        let resume = sample_resume();
        let style = template_style(TemplateId::Sidebar);
        let ctx = RenderCtx::new(&resume, style, &Theme::default());
        assert!(contact_line(&ctx, style).is_none());
        let modern = template_style(TemplateId::Modern);
        let line = contact_line(&ctx, modern).unwrap();
        assert!(line.contains(&resume.personal_info.email));
    }

    #[test]
    fn test_empty_personal_info_renders_no_header() {
        let resume = Resume::default();
        let style = template_style(TemplateId::Modern);
        let ctx = RenderCtx::new(&resume, style, &Theme::default());
        assert!(header(&ctx, style).is_empty());
        assert!(sidebar_header(&ctx, style).is_empty());
    }

    #[test]
    fn test_banner_uses_accent_background() {
        let resume = sample_resume();
        let style = template_style(TemplateId::Professional);
        let ctx = RenderCtx::new(&resume, style, &Theme::default());
        let Node::Block(block) = banner(&ctx, style) else {
            panic!("expected block");
        };
        assert_eq!(block.style.background, Some(style.accent));
    }
}
