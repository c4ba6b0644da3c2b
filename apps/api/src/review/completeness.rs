//! Completeness report: how much of each resume section is filled in and
//! whether experience highlights carry measurable outcomes.

use serde::{Deserialize, Serialize};

use crate::models::resume::{Resume, SectionKind};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Strong,
    Moderate,
    Weak,
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHealth {
    pub section: SectionKind,
    pub score: f64,
    pub entry_count: usize,
    pub unquantified_highlights: usize,
    pub status: SectionStatus,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub overall_score: f64,
    pub sections: Vec<SectionHealth>,
    pub missing_sections: Vec<SectionKind>,
}

const SECTION_WEIGHTS: &[(SectionKind, f64)] = &[
    (SectionKind::Summary, 0.15),
    (SectionKind::Experience, 0.35),
    (SectionKind::Education, 0.15),
    (SectionKind::Skills, 0.15),
    (SectionKind::Projects, 0.10),
    (SectionKind::Certifications, 0.05),
    (SectionKind::Languages, 0.05),
];

/// Whether a highlight states a measurable outcome. Any digit counts, which
/// also covers `Nx` multipliers; so do percent and currency signs.
pub fn is_quantified(text: &str) -> bool {
    text.chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£'))
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Fraction of `fields` that are filled in.
fn field_ratio(fields: &[&str]) -> f64 {
    if fields.is_empty() {
        return 0.0;
    }
    fields.iter().filter(|f| filled(f)).count() as f64 / fields.len() as f64
}

fn mean(scores: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = scores.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Entry count and average per-entry fill for one section.
fn section_fill(resume: &Resume, kind: SectionKind) -> (usize, f64) {
    match kind {
        SectionKind::Summary => {
            let words = resume.personal_info.summary.split_whitespace().count();
            // A summary of 30+ words counts as complete.
            (usize::from(words > 0), (words as f64 / 30.0).min(1.0))
        }
        SectionKind::Experience => {
            let entries: Vec<_> = resume.experience.iter().filter(|e| filled(&e.company)).collect();
            let fill = mean(entries.iter().map(|e| {
                let end = if e.current { "current" } else { e.end_date.as_str() };
                let fields = field_ratio(&[&e.position, &e.start_date, end, &e.description]);
                let highlights = if e.highlights.iter().any(|h| filled(h)) { 1.0 } else { 0.0 };
                0.7 * fields + 0.3 * highlights
            }));
            (entries.len(), fill)
        }
        SectionKind::Education => {
            let entries: Vec<_> = resume.education.iter().filter(|e| filled(&e.institution)).collect();
            let fill = mean(entries.iter().map(|e| field_ratio(&[&e.degree, &e.field, &e.end_date])));
            (entries.len(), fill)
        }
        SectionKind::Skills => {
            let count = resume.skills.iter().filter(|s| filled(&s.name)).count();
            // Eight skills or more is a full section.
            (count, (count as f64 / 8.0).min(1.0))
        }
        SectionKind::Projects => {
            let entries: Vec<_> = resume.projects.iter().filter(|p| filled(&p.name)).collect();
            let fill = mean(entries.iter().map(|p| {
                let tech = if p.technologies.is_empty() { "" } else { "tech" };
                field_ratio(&[&p.description, tech])
            }));
            (entries.len(), fill)
        }
        SectionKind::Certifications => {
            let entries: Vec<_> = resume.certifications.iter().filter(|c| filled(&c.name)).collect();
            let fill = mean(entries.iter().map(|c| field_ratio(&[&c.issuer, &c.date])));
            (entries.len(), fill)
        }
        SectionKind::Languages => {
            let entries: Vec<_> = resume.languages.iter().filter(|l| filled(&l.name)).collect();
            let fill = mean(entries.iter().map(|l| field_ratio(&[&l.proficiency]).max(0.5)));
            (entries.len(), fill)
        }
        SectionKind::Contact | SectionKind::Custom => (0, 0.0),
    }
}

fn unquantified_highlights(resume: &Resume) -> usize {
    resume
        .experience
        .iter()
        .flat_map(|e| e.highlights.iter())
        .filter(|h| filled(h) && !is_quantified(h))
        .count()
}

/// Scores every weighted section and combines them into an overall score in `[0, 1]`.
pub fn compute_completeness_report(resume: &Resume) -> CompletenessReport {
    let mut sections = Vec::new();
    let mut missing_sections = Vec::new();
    let mut weighted_score_sum = 0.0;

    for (kind, weight) in SECTION_WEIGHTS {
        let (entry_count, fill) = section_fill(resume, *kind);
        let name = kind.title().to_lowercase();

        if entry_count == 0 {
            missing_sections.push(*kind);
            sections.push(SectionHealth {
                section: *kind,
                score: 0.0,
                entry_count: 0,
                unquantified_highlights: 0,
                status: SectionStatus::Missing,
                recommendations: vec![format!("Add a {name} section")],
            });
            continue;
        }

        let score = fill.clamp(0.0, 1.0);
        let status = match score {
            s if s >= 0.8 => SectionStatus::Strong,
            s if s >= 0.5 => SectionStatus::Moderate,
            _ => SectionStatus::Weak,
        };

        let mut recommendations = Vec::new();
        let unquantified = if *kind == SectionKind::Experience {
            unquantified_highlights(resume)
        } else {
            0
        };
        if unquantified > 0 {
            recommendations.push(format!(
                "{unquantified} experience highlights lack a measurable outcome: add numbers, percentages or amounts"
            ));
        }
        if *kind == SectionKind::Experience && entry_count < 2 {
            recommendations.push("Add more experience entries to build a complete picture".to_string());
        }
        if status != SectionStatus::Strong {
            recommendations.push(format!("Fill in the remaining {name} details"));
        }

        weighted_score_sum += score * weight;
        sections.push(SectionHealth {
            section: *kind,
            score,
            entry_count,
            unquantified_highlights: unquantified,
            status,
            recommendations,
        });
    }

    let total_weight: f64 = SECTION_WEIGHTS.iter().map(|(_, w)| w).sum();
    let overall_score = if total_weight > 0.0 {
        (weighted_score_sum / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    CompletenessReport {
        overall_score,
        sections,
        missing_sections,
    }
}
