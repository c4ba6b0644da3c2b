//! Static layout descriptors for the twelve templates.
//!
//! Each template is data: which columns exist, how the header and section
//! titles look, which fonts and sizes it uses, and the order sections appear in
//! each column. The builders in `sections.rs` and `header.rs` interpret these.

use crate::layout::font_metrics::FontFamily;
use crate::models::resume::SectionKind;
use crate::render::templates::TemplateId;
use crate::render::theme::Color;
use crate::render::tree::Edges;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SidebarSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SidebarFill {
    /// Accent-coloured sidebar with light text.
    Accent,
    /// Light grey sidebar with regular text.
    Tint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnLayout {
    Single,
    Sidebar {
        side: SidebarSide,
        fraction: f32,
        fill: SidebarFill,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderStyle {
    Left,
    Centered,
    /// Full-width accent band across the top of the page.
    Banner,
    /// Name and title at the top of the sidebar column.
    InSidebar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionTitleStyle {
    /// Accent title with an accent rule beneath.
    Underline,
    /// Uppercase dark title over a full-width dark rule.
    UppercaseRule,
    /// Small uppercase accent title, no rule.
    Plain,
    /// Title with a thick accent bar on its left edge.
    AccentBar,
    /// Centred uppercase title between two thin rules.
    CenteredRules,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillStyle {
    /// One paragraph, skills separated by middle dots.
    Inline,
    /// One line per category: `Category: a, b, c`.
    Grouped,
    /// Skill name over a proficiency bar.
    Bars,
}

pub struct TemplateStyle {
    pub name: &'static str,
    pub description: &'static str,
    pub columns: ColumnLayout,
    pub header: HeaderStyle,
    pub section_title: SectionTitleStyle,
    pub heading_font: FontFamily,
    pub body_font: FontFamily,
    /// Body text size in px before theme scaling.
    pub base_size: f32,
    pub name_size: f32,
    /// Vertical space after each section.
    pub section_gap: f32,
    pub page_padding: Edges,
    pub skills: SkillStyle,
    pub accent: Color,
    pub main_sections: &'static [SectionKind],
    pub sidebar_sections: &'static [SectionKind],
}

use SectionKind::*;

const STANDARD_ORDER: &[SectionKind] = &[
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Custom,
];
const SIDEBAR_ASIDE: &[SectionKind] = &[Contact, Skills, Languages, Certifications];
const SIDEBAR_MAIN: &[SectionKind] = &[Summary, Experience, Projects, Education, Custom];

static MODERN: TemplateStyle = TemplateStyle {
    name: "Modern",
    description: "Clean sans-serif layout with accent-coloured section titles.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Left,
    section_title: SectionTitleStyle::Underline,
    heading_font: FontFamily::Sans,
    body_font: FontFamily::Sans,
    base_size: 13.0,
    name_size: 30.0,
    section_gap: 16.0,
    page_padding: Edges::symmetric(40.0, 48.0),
    skills: SkillStyle::Inline,
    accent: Color::rgb(0x25, 0x63, 0xeb),
    main_sections: STANDARD_ORDER,
    sidebar_sections: &[],
};

static CLASSIC: TemplateStyle = TemplateStyle {
    name: "Classic",
    description: "Traditional serif resume with a centred header and ruled sections.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Centered,
    section_title: SectionTitleStyle::UppercaseRule,
    heading_font: FontFamily::Serif,
    body_font: FontFamily::Serif,
    base_size: 13.5,
    name_size: 28.0,
    section_gap: 14.0,
    page_padding: Edges::symmetric(44.0, 52.0),
    skills: SkillStyle::Grouped,
    accent: Color::rgb(0x11, 0x18, 0x27),
    main_sections: STANDARD_ORDER,
    sidebar_sections: &[],
};

static MINIMAL: TemplateStyle = TemplateStyle {
    name: "Minimal",
    description: "Understated typography and generous whitespace, no rules.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Left,
    section_title: SectionTitleStyle::Plain,
    heading_font: FontFamily::Sans,
    body_font: FontFamily::Sans,
    base_size: 12.5,
    name_size: 26.0,
    section_gap: 22.0,
    page_padding: Edges::symmetric(52.0, 60.0),
    skills: SkillStyle::Inline,
    accent: Color::rgb(0x37, 0x41, 0x51),
    main_sections: STANDARD_ORDER,
    sidebar_sections: &[],
};

static PROFESSIONAL: TemplateStyle = TemplateStyle {
    name: "Professional",
    description: "Accent banner header over a single corporate column.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Banner,
    section_title: SectionTitleStyle::Underline,
    heading_font: FontFamily::Sans,
    body_font: FontFamily::Sans,
    base_size: 13.0,
    name_size: 30.0,
    section_gap: 16.0,
    page_padding: Edges::symmetric(32.0, 48.0),
    skills: SkillStyle::Grouped,
    accent: Color::rgb(0x1e, 0x3a, 0x8a),
    main_sections: STANDARD_ORDER,
    sidebar_sections: &[],
};

static CREATIVE: TemplateStyle = TemplateStyle {
    name: "Creative",
    description: "Bold accent sidebar holding contact details, skills and languages.",
    columns: ColumnLayout::Sidebar {
        side: SidebarSide::Left,
        fraction: 0.34,
        fill: SidebarFill::Accent,
    },
    header: HeaderStyle::InSidebar,
    section_title: SectionTitleStyle::AccentBar,
    heading_font: FontFamily::Sans,
    body_font: FontFamily::Sans,
    base_size: 12.5,
    name_size: 26.0,
    section_gap: 16.0,
    page_padding: Edges::symmetric(36.0, 28.0),
    skills: SkillStyle::Bars,
    accent: Color::rgb(0x7c, 0x3a, 0xed),
    main_sections: SIDEBAR_MAIN,
    sidebar_sections: SIDEBAR_ASIDE,
};

static EXECUTIVE: TemplateStyle = TemplateStyle {
    name: "Executive",
    description: "Formal serif layout that leads with summary and experience.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Centered,
    section_title: SectionTitleStyle::CenteredRules,
    heading_font: FontFamily::Serif,
    body_font: FontFamily::Serif,
    base_size: 13.5,
    name_size: 32.0,
    section_gap: 16.0,
    page_padding: Edges::symmetric(44.0, 56.0),
    skills: SkillStyle::Grouped,
    accent: Color::rgb(0x7f, 0x1d, 0x1d),
    main_sections: &[
        Summary,
        Experience,
        Education,
        Certifications,
        Skills,
        Languages,
        Projects,
        Custom,
    ],
    sidebar_sections: &[],
};

static TECHNICAL: TemplateStyle = TemplateStyle {
    name: "Technical",
    description: "Monospace headings; skills and projects come before experience.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Left,
    section_title: SectionTitleStyle::Plain,
    heading_font: FontFamily::Mono,
    body_font: FontFamily::Sans,
    base_size: 12.5,
    name_size: 26.0,
    section_gap: 14.0,
    page_padding: Edges::symmetric(40.0, 44.0),
    skills: SkillStyle::Grouped,
    accent: Color::rgb(0x04, 0x78, 0x57),
    main_sections: &[
        Summary,
        Skills,
        Projects,
        Experience,
        Education,
        Certifications,
        Languages,
        Custom,
    ],
    sidebar_sections: &[],
};

static ELEGANT: TemplateStyle = TemplateStyle {
    name: "Elegant",
    description: "Centred serif design with fine accent rules.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Centered,
    section_title: SectionTitleStyle::CenteredRules,
    heading_font: FontFamily::Serif,
    body_font: FontFamily::Serif,
    base_size: 13.0,
    name_size: 30.0,
    section_gap: 18.0,
    page_padding: Edges::symmetric(48.0, 60.0),
    skills: SkillStyle::Inline,
    accent: Color::rgb(0x92, 0x40, 0x0e),
    main_sections: STANDARD_ORDER,
    sidebar_sections: &[],
};

static COMPACT: TemplateStyle = TemplateStyle {
    name: "Compact",
    description: "Small type and tight spacing to fit long histories on one page.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Left,
    section_title: SectionTitleStyle::UppercaseRule,
    heading_font: FontFamily::Sans,
    body_font: FontFamily::Sans,
    base_size: 11.5,
    name_size: 22.0,
    section_gap: 9.0,
    page_padding: Edges::symmetric(28.0, 36.0),
    skills: SkillStyle::Inline,
    accent: Color::rgb(0x0f, 0x76, 0x6e),
    main_sections: STANDARD_ORDER,
    sidebar_sections: &[],
};

static ACADEMIC: TemplateStyle = TemplateStyle {
    name: "Academic",
    description: "CV-style serif layout that leads with education.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Centered,
    section_title: SectionTitleStyle::UppercaseRule,
    heading_font: FontFamily::Serif,
    body_font: FontFamily::Serif,
    base_size: 13.0,
    name_size: 28.0,
    section_gap: 14.0,
    page_padding: Edges::symmetric(44.0, 52.0),
    skills: SkillStyle::Grouped,
    accent: Color::rgb(0x1f, 0x29, 0x37),
    main_sections: &[
        Summary,
        Education,
        Experience,
        Projects,
        Certifications,
        Custom,
        Skills,
        Languages,
    ],
    sidebar_sections: &[],
};

static SIDEBAR: TemplateStyle = TemplateStyle {
    name: "Sidebar",
    description: "Main column with a light right-hand sidebar for skills and contact.",
    columns: ColumnLayout::Sidebar {
        side: SidebarSide::Right,
        fraction: 0.3,
        fill: SidebarFill::Tint,
    },
    header: HeaderStyle::Left,
    section_title: SectionTitleStyle::Underline,
    heading_font: FontFamily::Sans,
    body_font: FontFamily::Sans,
    base_size: 12.5,
    name_size: 28.0,
    section_gap: 16.0,
    page_padding: Edges::symmetric(36.0, 28.0),
    skills: SkillStyle::Bars,
    accent: Color::rgb(0x03, 0x69, 0xa1),
    main_sections: SIDEBAR_MAIN,
    sidebar_sections: SIDEBAR_ASIDE,
};

static BOLD: TemplateStyle = TemplateStyle {
    name: "Bold",
    description: "Oversized name and heavy accent bars for a confident look.",
    columns: ColumnLayout::Single,
    header: HeaderStyle::Left,
    section_title: SectionTitleStyle::AccentBar,
    heading_font: FontFamily::Sans,
    body_font: FontFamily::Sans,
    base_size: 13.0,
    name_size: 38.0,
    section_gap: 18.0,
    page_padding: Edges::symmetric(40.0, 48.0),
    skills: SkillStyle::Inline,
    accent: Color::rgb(0xdc, 0x26, 0x26),
    main_sections: STANDARD_ORDER,
    sidebar_sections: &[],
};

/// Returns the static descriptor for a template.
pub fn template_style(id: TemplateId) -> &'static TemplateStyle {
    match id {
        TemplateId::Modern => &MODERN,
        TemplateId::Classic => &CLASSIC,
        TemplateId::Minimal => &MINIMAL,
        TemplateId::Professional => &PROFESSIONAL,
        TemplateId::Creative => &CREATIVE,
        TemplateId::Executive => &EXECUTIVE,
        TemplateId::Technical => &TECHNICAL,
        TemplateId::Elegant => &ELEGANT,
        TemplateId::Compact => &COMPACT,
        TemplateId::Academic => &ACADEMIC,
        TemplateId::Sidebar => &SIDEBAR,
        TemplateId::Bold => &BOLD,
    }
}
