//! The resume document: the single data contract between the form UI and the
//! render/export pipeline.
//!
//! Every field is optional on the wire. Browsers send camelCase keys and may
//! omit whole sections; missing values deserialize to empty strings/lists so the
//! templates never have to deal with `null`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<Language>,
    pub custom_sections: Vec<CustomSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Fraction of a proficiency bar to fill.
    pub fn fill_fraction(self) -> f32 {
        match self {
            SkillLevel::Beginner => 0.25,
            SkillLevel::Intermediate => 0.5,
            SkillLevel::Advanced => 0.75,
            SkillLevel::Expert => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: Option<SkillLevel>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub items: Vec<CustomItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub description: String,
}

// Item defaults need a fresh id, so they cannot be derived.
macro_rules! default_with_id {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl Default for $ty {
            fn default() -> Self {
                Self {
                    id: new_item_id(),
                    $($field: Default::default(),)*
                }
            }
        }
    };
}

default_with_id!(Experience { company, position, location, start_date, end_date, current, description, highlights });
default_with_id!(Education { institution, degree, field, location, start_date, end_date, gpa, description });
default_with_id!(Skill { name, level, category });
default_with_id!(Project { name, description, technologies, link, start_date, end_date });
default_with_id!(Certification { name, issuer, date, credential_id, link });
default_with_id!(Language { name, proficiency });
default_with_id!(CustomSection { title, items });
default_with_id!(CustomItem { title, subtitle, date, description });

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// A renderable section of the resume. `Contact` is the block of contact
/// details that sidebar templates move out of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Custom,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Contact => "Contact",
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Certifications => "Certifications",
            SectionKind::Languages => "Languages",
            SectionKind::Custom => "Additional",
        }
    }
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

impl PersonalInfo {
    /// Non-empty contact fields in display order.
    pub fn contact_items(&self) -> Vec<&str> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.website,
            &self.linkedin,
            &self.github,
        ]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
    }
}

impl Resume {
    /// Whether a section renders. A list section is present only when its
    /// first entry has its required field filled in; every template uses this.
    pub fn has_section(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Contact => !self.personal_info.contact_items().is_empty(),
            SectionKind::Summary => filled(&self.personal_info.summary),
            SectionKind::Experience => self.experience.first().is_some_and(|e| filled(&e.company)),
            SectionKind::Education => self
                .education
                .first()
                .is_some_and(|e| filled(&e.institution)),
            SectionKind::Skills => self.skills.first().is_some_and(|s| filled(&s.name)),
            SectionKind::Projects => self.projects.first().is_some_and(|p| filled(&p.name)),
            SectionKind::Certifications => {
                self.certifications.first().is_some_and(|c| filled(&c.name))
            }
            SectionKind::Languages => self.languages.first().is_some_and(|l| filled(&l.name)),
            SectionKind::Custom => self.custom_sections.iter().any(CustomSection::is_present),
        }
    }

    /// `First_Last_Resume.pdf`, or `Resume.pdf` when no usable name is set.
    pub fn export_filename(&self) -> String {
        let name: Vec<String> = self
            .personal_info
            .full_name
            .split_whitespace()
            .map(|part| {
                part.chars()
                    .filter(char::is_ascii_alphanumeric)
                    .collect::<String>()
            })
            .filter(|part| !part.is_empty())
            .collect();

        if name.is_empty() {
            "Resume.pdf".to_string()
        } else {
            format!("{}_Resume.pdf", name.join("_"))
        }
    }
}

impl CustomSection {
    pub fn is_present(&self) -> bool {
        filled(&self.title) && self.items.first().is_some_and(|i| filled(&i.title))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// Formats a month-input date (`2021-03`, `2021-03-15`) as `Mar 2021`.
/// Anything else is returned trimmed and unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `Mar 2021 – Present`, `Mar 2021 – Jun 2023`, or whichever side exists.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start = format_date(start);
    let end = if current {
        "Present".to_string()
    } else {
        format_date(end)
    };
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} \u{2013} {end}"),
        (false, true) => start,
        (true, false) => end,
        (true, true) => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(company: &str) -> Experience {
        Experience {
            company: company.to_string(),
            position: "Engineer".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_deserializes_camel_case_with_missing_sections() {
        let json = serde_json::json!({
            "personalInfo": { "fullName": "Ada Lovelace", "jobTitle": "Analyst" },
            "experience": [{ "company": "Analytical Engines", "startDate": "1842-01" }]
        });
        let resume: Resume = serde_json::from_value(json).unwrap();
        assert_eq!(resume.personal_info.full_name, "Ada Lovelace");
        assert_eq!(resume.experience[0].start_date, "1842-01");
        assert!(resume.education.is_empty());
        assert!(
            !resume.experience[0].id.is_empty(),
            "missing ids should be generated"
        );
    }

    #[test]
    fn test_skill_level_parses_lowercase() {
        let skill: Skill = serde_json::from_str(r#"{"name":"Rust","level":"expert"}"#).unwrap();
        assert_eq!(skill.level, Some(SkillLevel::Expert));
    }

    #[test]
    fn test_section_present_when_first_required_field_filled() {
        let resume = Resume {
            experience: vec![experience("Acme")],
            ..Default::default()
        };
        assert!(resume.has_section(SectionKind::Experience));
    }

    #[test]
    fn test_section_absent_when_first_required_field_blank() {
        // A second filled entry does not rescue a blank first row.
        let resume = Resume {
            experience: vec![experience("   "), experience("Acme")],
            ..Default::default()
        };
        assert!(!resume.has_section(SectionKind::Experience));
    }

    #[test]
    fn test_empty_resume_has_no_sections() {
        let resume = Resume::default();
        for kind in [
            SectionKind::Contact,
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
            SectionKind::Projects,
            SectionKind::Certifications,
            SectionKind::Languages,
            SectionKind::Custom,
        ] {
            assert!(!resume.has_section(kind), "{kind:?} should be absent");
        }
    }

    #[test]
    fn test_custom_section_requires_title_and_item() {
        let mut section = CustomSection {
            title: "Awards".to_string(),
            ..Default::default()
        };
        assert!(!section.is_present());
        section.items.push(CustomItem {
            title: "Best Paper".to_string(),
            ..Default::default()
        });
        assert!(section.is_present());
    }

    #[test]
    fn test_format_date_month_input() {
        assert_eq!(format_date("2021-03"), "Mar 2021");
        assert_eq!(format_date("2019-11-20"), "Nov 2019");
    }

    #[test]
    fn test_format_date_passes_through_free_text() {
        assert_eq!(format_date(" Summer 2020 "), "Summer 2020");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_date_range_current_role() {
        assert_eq!(
            format_date_range("2021-03", "2022-01", true),
            "Mar 2021 \u{2013} Present"
        );
        assert_eq!(format_date_range("", "2022-01", false), "Jan 2022");
        assert_eq!(format_date_range("", "", false), "");
    }

    #[test]
    fn test_export_filename() {
        let mut resume = Resume::default();
        assert_eq!(resume.export_filename(), "Resume.pdf");
        resume.personal_info.full_name = "  Grace  Brewster Hopper ".to_string();
        assert_eq!(resume.export_filename(), "Grace_Brewster_Hopper_Resume.pdf");
        resume.personal_info.full_name = "José O'Neil".to_string();
        assert_eq!(resume.export_filename(), "Jos_ONeil_Resume.pdf");
        resume.personal_info.full_name = "Mary-Jane Watson".to_string();
        assert_eq!(resume.export_filename(), "MaryJane_Watson_Resume.pdf");
        resume.personal_info.full_name = " -- ".to_string();
        assert_eq!(resume.export_filename(), "Resume.pdf");
    }

    #[test]
    fn test_contact_items_skip_blank_fields() {
        let info = PersonalInfo {
            email: "a@b.c".to_string(),
            phone: " ".to_string(),
            github: "github.com/a".to_string(),
            ..Default::default()
        };
        assert_eq!(info.contact_items(), vec!["a@b.c", "github.com/a"]);
    }
}
