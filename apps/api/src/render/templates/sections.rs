//! Section builders shared by all templates.
//!
//! Entries whose required field is blank are skipped; whether the section
//! appears at all is decided by the caller via `Resume::has_section`.

use crate::layout::font_metrics::FontFamily;
use crate::models::resume::{format_date, format_date_range, Resume, SectionKind, Skill};
use crate::render::templates::catalog::{SectionTitleStyle, SkillStyle, TemplateStyle};
use crate::render::theme::{Color, Theme};
use crate::render::tree::{
    Border, BoxStyle, Column, ColumnWidth, Edges, Node, Row, Rule, TextAlign, TextStyle,
};

const ENTRY_GAP: f32 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Context
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Palette {
    pub text: Color,
    pub muted: Color,
    pub heading: Color,
    pub rule: Color,
}

impl Palette {
    pub fn standard(accent: Color) -> Self {
        Self {
            text: Color::TEXT,
            muted: Color::MUTED,
            heading: accent,
            rule: Color::RULE,
        }
    }

    /// Light-on-accent colours for accent-filled sidebars.
    pub fn on_accent(accent: Color) -> Self {
        Self {
            text: Color::WHITE,
            muted: accent.lighten(0.7),
            heading: Color::WHITE,
            rule: accent.lighten(0.45),
        }
    }
}

/// Everything a builder needs: the data, the template, and resolved theme values.
#[derive(Clone)]
pub(crate) struct RenderCtx<'a> {
    pub resume: &'a Resume,
    pub style: &'static TemplateStyle,
    pub accent: Color,
    pub heading_font: FontFamily,
    pub body_font: FontFamily,
    pub scale: f32,
    pub palette: Palette,
    pub in_sidebar: bool,
}

impl<'a> RenderCtx<'a> {
    pub fn new(resume: &'a Resume, style: &'static TemplateStyle, theme: &Theme) -> Self {
        let accent = theme.accent_color.unwrap_or(style.accent);
        Self {
            resume,
            style,
            accent,
            heading_font: theme.font_family.unwrap_or(style.heading_font),
            body_font: theme.font_family.unwrap_or(style.body_font),
            scale: theme.effective_scale(),
            palette: Palette::standard(accent),
            in_sidebar: false,
        }
    }

    /// A copy for building the sidebar column.
    pub fn with_palette(&self, palette: Palette) -> Self {
        Self {
            palette,
            in_sidebar: true,
            ..self.clone()
        }
    }

    pub fn body_size(&self) -> f32 {
        self.style.base_size * self.scale
    }

    pub fn small_size(&self) -> f32 {
        self.body_size() * 0.88
    }

    pub fn name_size(&self) -> f32 {
        self.style.name_size * self.scale
    }

    pub fn body(&self) -> TextStyle {
        TextStyle::new(self.body_font, self.body_size(), self.palette.text)
    }

    pub fn muted(&self) -> TextStyle {
        TextStyle::new(self.body_font, self.small_size(), self.palette.muted)
    }

    pub fn strong(&self) -> TextStyle {
        TextStyle::new(self.heading_font, self.body_size() * 1.06, self.palette.text).bold()
    }

    /// Company/institution line colour: accent in the main column.
    fn secondary(&self) -> TextStyle {
        let color = if self.in_sidebar {
            self.palette.muted
        } else {
            self.accent
        };
        TextStyle::new(self.body_font, self.body_size() * 0.95, color)
    }
}

fn join_filled(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Section titles
// ────────────────────────────────────────────────────────────────────────────

fn section_title(ctx: &RenderCtx<'_>, title: &str) -> Node {
    let size = ctx.body_size() * 1.15;
    let base = TextStyle::new(ctx.heading_font, size, ctx.palette.heading).bold();

    if ctx.in_sidebar {
        return Node::block(
            BoxStyle {
                margin_bottom: 8.0,
                ..Default::default()
            },
            vec![
                Node::text(title, base.uppercase()),
                Node::rule(1.0, ctx.palette.rule, 2.0, 0.0),
            ],
        );
    }

    match ctx.style.section_title {
        SectionTitleStyle::Underline => Node::block(
            BoxStyle {
                margin_bottom: 8.0,
                ..Default::default()
            },
            vec![
                Node::text(title, base),
                Node::rule(1.5, ctx.accent, 2.0, 0.0),
            ],
        ),
        SectionTitleStyle::UppercaseRule => Node::block(
            BoxStyle {
                margin_bottom: 8.0,
                ..Default::default()
            },
            vec![
                Node::text(title, TextStyle { color: ctx.palette.text, ..base }.uppercase()),
                Node::rule(1.0, ctx.palette.text, 1.0, 0.0),
            ],
        ),
        SectionTitleStyle::Plain => Node::text_spaced(
            title,
            TextStyle {
                size: ctx.body_size(),
                ..base
            }
            .uppercase(),
            6.0,
        ),
        SectionTitleStyle::AccentBar => Node::block(
            BoxStyle {
                padding: Edges {
                    left: 8.0,
                    ..Edges::symmetric(2.0, 0.0)
                },
                margin_bottom: 8.0,
                border_left: Some(Border {
                    width: 4.0,
                    color: ctx.accent,
                }),
                ..Default::default()
            },
            vec![Node::text(title, TextStyle { color: ctx.palette.text, ..base }.uppercase())],
        ),
        SectionTitleStyle::CenteredRules => {
            let rule = Rule {
                thickness: 0.75,
                color: ctx.accent,
                margin_top: 0.0,
                margin_bottom: 4.0,
                width_fraction: 1.0,
            };
            Node::block(
                BoxStyle {
                    margin_bottom: 8.0,
                    ..Default::default()
                },
                vec![
                    Node::Rule(rule),
                    Node::text(title, base.uppercase().align(TextAlign::Center)),
                    Node::Rule(Rule {
                        margin_top: 4.0,
                        margin_bottom: 0.0,
                        ..rule
                    }),
                ],
            )
        }
    }
}

fn section(ctx: &RenderCtx<'_>, title: &str, mut body: Vec<Node>) -> Node {
    let mut children = vec![section_title(ctx, title)];
    children.append(&mut body);
    Node::block(
        BoxStyle {
            margin_bottom: ctx.style.section_gap,
            ..Default::default()
        },
        children,
    )
}

fn entry(children: Vec<Node>) -> Node {
    Node::block(
        BoxStyle {
            margin_bottom: ENTRY_GAP,
            ..Default::default()
        },
        children,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

/// Builds the nodes for one section. Custom sections yield one node each.
pub(crate) fn build_section(ctx: &RenderCtx<'_>, kind: SectionKind) -> Vec<Node> {
    match kind {
        SectionKind::Contact => vec![contact(ctx)],
        SectionKind::Summary => vec![section(
            ctx,
            kind.title(),
            vec![Node::text(ctx.resume.personal_info.summary.trim(), ctx.body())],
        )],
        SectionKind::Experience => vec![experience(ctx)],
        SectionKind::Education => vec![education(ctx)],
        SectionKind::Skills => vec![skills(ctx)],
        SectionKind::Projects => vec![projects(ctx)],
        SectionKind::Certifications => vec![certifications(ctx)],
        SectionKind::Languages => vec![languages(ctx)],
        SectionKind::Custom => custom_sections(ctx),
    }
}

fn contact(ctx: &RenderCtx<'_>) -> Node {
    let style = TextStyle {
        size: ctx.small_size(),
        ..ctx.body()
    };
    let items = ctx
        .resume
        .personal_info
        .contact_items()
        .into_iter()
        .map(|item| Node::text_spaced(item, style, 3.0))
        .collect();
    section(ctx, SectionKind::Contact.title(), items)
}

fn experience(ctx: &RenderCtx<'_>) -> Node {
    let entries = ctx
        .resume
        .experience
        .iter()
        .filter(|e| filled(&e.company))
        .map(|e| {
            let dates = format_date_range(&e.start_date, &e.end_date, e.current);
            let (title, subtitle) = if filled(&e.position) {
                (e.position.trim(), join_filled(&[&e.company, &e.location], " \u{b7} "))
            } else {
                (e.company.trim(), e.location.trim().to_string())
            };

            let mut children = vec![Node::split_line(
                Node::text(title, ctx.strong()),
                dates,
                ctx.muted(),
                2.0,
            )];
            if !subtitle.is_empty() {
                children.push(Node::text_spaced(subtitle, ctx.secondary(), 3.0));
            }
            if filled(&e.description) {
                children.push(Node::text_spaced(e.description.trim(), ctx.body(), 3.0));
            }
            children.extend(
                e.highlights
                    .iter()
                    .filter(|h| filled(h))
                    .map(|h| Node::bullet(h.trim(), ctx.body(), 2.0)),
            );
            entry(children)
        })
        .collect();
    section(ctx, SectionKind::Experience.title(), entries)
}

fn degree_line(degree: &str, field: &str) -> String {
    match (filled(degree), filled(field)) {
        (true, true) => format!("{} in {}", degree.trim(), field.trim()),
        (true, false) => degree.trim().to_string(),
        (false, true) => field.trim().to_string(),
        (false, false) => String::new(),
    }
}

fn education(ctx: &RenderCtx<'_>) -> Node {
    let entries = ctx
        .resume
        .education
        .iter()
        .filter(|e| filled(&e.institution))
        .map(|e| {
            let dates = format_date_range(&e.start_date, &e.end_date, false);
            let degree = degree_line(&e.degree, &e.field);
            let (title, subtitle) = if degree.is_empty() {
                (e.institution.trim().to_string(), e.location.trim().to_string())
            } else {
                (degree, join_filled(&[&e.institution, &e.location], " \u{b7} "))
            };

            let mut children = vec![Node::split_line(
                Node::text(title, ctx.strong()),
                dates,
                ctx.muted(),
                2.0,
            )];
            if !subtitle.is_empty() {
                children.push(Node::text_spaced(subtitle, ctx.secondary(), 2.0));
            }
            if filled(&e.gpa) {
                children.push(Node::text_spaced(
                    format!("GPA: {}", e.gpa.trim()),
                    ctx.muted(),
                    2.0,
                ));
            }
            if filled(&e.description) {
                children.push(Node::text(e.description.trim(), ctx.body()));
            }
            entry(children)
        })
        .collect();
    section(ctx, SectionKind::Education.title(), entries)
}

/// Skills grouped by category in first-seen order. Blank categories group as "Other".
fn group_skills(skills: &[&Skill]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for skill in skills {
        let category = if filled(&skill.category) {
            skill.category.trim().to_string()
        } else {
            "Other".to_string()
        };
        let name = skill.name.trim().to_string();
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, names)) => names.push(name),
            None => groups.push((category, vec![name])),
        }
    }
    groups
}

fn skills(ctx: &RenderCtx<'_>) -> Node {
    let skills: Vec<&Skill> = ctx.resume.skills.iter().filter(|s| filled(&s.name)).collect();
    let inline = || {
        let names: Vec<&str> = skills.iter().map(|s| s.name.trim()).collect();
        vec![Node::text(names.join(" \u{b7} "), ctx.body())]
    };

    let body = match ctx.style.skills {
        SkillStyle::Inline => inline(),
        SkillStyle::Grouped if skills.iter().all(|s| !filled(&s.category)) => inline(),
        SkillStyle::Grouped => group_skills(&skills)
            .into_iter()
            .map(|(category, names)| {
                Node::text_spaced(format!("{category}: {}", names.join(", ")), ctx.body(), 3.0)
            })
            .collect(),
        SkillStyle::Bars => skills.iter().flat_map(|s| skill_bar(ctx, s)).collect(),
    };
    section(ctx, SectionKind::Skills.title(), body)
}

fn skill_bar(ctx: &RenderCtx<'_>, skill: &Skill) -> Vec<Node> {
    let label = TextStyle {
        size: ctx.small_size(),
        ..ctx.body()
    };
    let Some(level) = skill.level else {
        return vec![Node::text_spaced(skill.name.trim(), label, 6.0)];
    };

    let (bar, track) = if ctx.palette.text == Color::WHITE {
        (Color::WHITE, ctx.accent.lighten(0.35))
    } else {
        (ctx.accent, Color::RULE)
    };
    let segment = |width, color| Column {
        width,
        style: BoxStyle {
            background: Some(color),
            ..Default::default()
        },
        extend_to_page: false,
        children: vec![Node::spacer(4.0)],
    };

    vec![
        Node::text_spaced(skill.name.trim(), label, 2.0),
        Node::Row(Row {
            columns: vec![
                segment(ColumnWidth::Fraction(level.fill_fraction()), bar),
                segment(ColumnWidth::Fill, track),
            ],
            gap: 0.0,
            margin_bottom: 6.0,
        }),
    ]
}

fn projects(ctx: &RenderCtx<'_>) -> Node {
    let entries = ctx
        .resume
        .projects
        .iter()
        .filter(|p| filled(&p.name))
        .map(|p| {
            let dates = format_date_range(&p.start_date, &p.end_date, false);
            let mut children = vec![Node::split_line(
                Node::text(p.name.trim(), ctx.strong()),
                dates,
                ctx.muted(),
                2.0,
            )];
            if filled(&p.description) {
                children.push(Node::text_spaced(p.description.trim(), ctx.body(), 2.0));
            }
            let tech: Vec<&str> = p
                .technologies
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect();
            if !tech.is_empty() {
                children.push(Node::text_spaced(
                    format!("Technologies: {}", tech.join(", ")),
                    ctx.muted(),
                    2.0,
                ));
            }
            if filled(&p.link) {
                children.push(Node::text(p.link.trim(), ctx.secondary()));
            }
            entry(children)
        })
        .collect();
    section(ctx, SectionKind::Projects.title(), entries)
}

fn certifications(ctx: &RenderCtx<'_>) -> Node {
    let entries = ctx
        .resume
        .certifications
        .iter()
        .filter(|c| filled(&c.name))
        .map(|c| {
            let credential = if filled(&c.credential_id) {
                format!("ID {}", c.credential_id.trim())
            } else {
                String::new()
            };
            let details = join_filled(&[&c.issuer, &credential], " \u{b7} ");
            let mut children = if ctx.in_sidebar {
                // Sidebars are too narrow for a date column.
                let mut v = vec![Node::text_spaced(c.name.trim(), ctx.strong(), 2.0)];
                let date = format_date(&c.date);
                if !date.is_empty() {
                    v.push(Node::text_spaced(date, ctx.muted(), 2.0));
                }
                v
            } else {
                vec![Node::split_line(
                    Node::text(c.name.trim(), ctx.strong()),
                    format_date(&c.date),
                    ctx.muted(),
                    2.0,
                )]
            };
            if !details.is_empty() {
                children.push(Node::text(details, ctx.muted()));
            }
            entry(children)
        })
        .collect();
    section(ctx, SectionKind::Certifications.title(), entries)
}

fn languages(ctx: &RenderCtx<'_>) -> Node {
    let lines = ctx
        .resume
        .languages
        .iter()
        .filter(|l| filled(&l.name))
        .map(|l| {
            let line = if filled(&l.proficiency) {
                format!("{} \u{2014} {}", l.name.trim(), l.proficiency.trim())
            } else {
                l.name.trim().to_string()
            };
            Node::text_spaced(line, ctx.body(), 3.0)
        })
        .collect();
    section(ctx, SectionKind::Languages.title(), lines)
}

fn custom_sections(ctx: &RenderCtx<'_>) -> Vec<Node> {
    ctx.resume
        .custom_sections
        .iter()
        .filter(|s| s.is_present())
        .map(|s| {
            let items = s
                .items
                .iter()
                .filter(|i| filled(&i.title))
                .map(|i| {
                    let mut children = vec![Node::split_line(
                        Node::text(i.title.trim(), ctx.strong()),
                        format_date(&i.date),
                        ctx.muted(),
                        2.0,
                    )];
                    if filled(&i.subtitle) {
                        children.push(Node::text_spaced(i.subtitle.trim(), ctx.secondary(), 2.0));
                    }
                    if filled(&i.description) {
                        children.push(Node::text(i.description.trim(), ctx.body()));
                    }
                    entry(children)
                })
                .collect();
            section(ctx, s.title.trim(), items)
        })
        .collect()
}
