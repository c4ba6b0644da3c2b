//! A filled-in resume used for template gallery previews and tests.

use super::resume::{
    Certification, CustomItem, CustomSection, Education, Experience, Language, PersonalInfo,
    Project, Resume, Skill, SkillLevel,
};

fn s(v: &str) -> String {
    v.to_string()
}

fn skill(name: &str, level: SkillLevel, category: &str) -> Skill {
    Skill {
        name: s(name),
        level: Some(level),
        category: s(category),
        ..Default::default()
    }
}

pub fn sample_resume() -> Resume {
    Resume {
        personal_info: PersonalInfo {
            full_name: s("Jordan Rivera"),
            job_title: s("Senior Software Engineer"),
            email: s("jordan.rivera@example.com"),
            phone: s("+1 (555) 013-2048"),
            location: s("Portland, OR"),
            website: s("jordanrivera.dev"),
            linkedin: s("linkedin.com/in/jordanrivera"),
            github: s("github.com/jrivera"),
            summary: s(
                "Backend engineer with 8 years of experience building payment and \
                 data platforms. Shipped systems handling 40k requests per second and \
                 led teams of up to 6 engineers through two platform migrations.",
            ),
        },
        experience: vec![
            Experience {
                company: s("Northwind Payments"),
                position: s("Senior Software Engineer"),
                location: s("Portland, OR"),
                start_date: s("2021-03"),
                current: true,
                description: s("Own the ledger service and settlement pipeline."),
                highlights: vec![
                    s("Cut settlement latency from 6 hours to 40 minutes by moving batch jobs to a streaming pipeline"),
                    s("Designed an idempotent ledger API now serving 40k requests per second at p99 under 30 ms"),
                    s("Mentored 4 engineers and ran the on-call rotation for the payments group"),
                ],
                ..Default::default()
            },
            Experience {
                company: s("Contoso Analytics"),
                position: s("Software Engineer"),
                location: s("Seattle, WA"),
                start_date: s("2017-06"),
                end_date: s("2021-02"),
                description: s("Built ingestion services for customer event data."),
                highlights: vec![
                    s("Migrated 120 TB of event data to columnar storage, reducing query cost by 55%"),
                    s("Introduced contract tests across 14 services, halving integration incidents"),
                ],
                ..Default::default()
            },
        ],
        education: vec![Education {
            institution: s("University of Washington"),
            degree: s("B.S."),
            field: s("Computer Science"),
            location: s("Seattle, WA"),
            start_date: s("2013-09"),
            end_date: s("2017-06"),
            gpa: s("3.8"),
            ..Default::default()
        }],
        skills: vec![
            skill("Rust", SkillLevel::Expert, "Languages"),
            skill("Go", SkillLevel::Advanced, "Languages"),
            skill("PostgreSQL", SkillLevel::Advanced, "Data"),
            skill("Kafka", SkillLevel::Intermediate, "Data"),
            skill("Kubernetes", SkillLevel::Intermediate, "Infrastructure"),
            skill("Terraform", SkillLevel::Beginner, "Infrastructure"),
        ],
        projects: vec![Project {
            name: s("ledgerline"),
            description: s("Open-source double-entry ledger library with pluggable storage backends."),
            technologies: vec![s("Rust"), s("SQLite"), s("PostgreSQL")],
            link: s("github.com/jrivera/ledgerline"),
            start_date: s("2022-01"),
            ..Default::default()
        }],
        certifications: vec![Certification {
            name: s("Certified Kubernetes Administrator"),
            issuer: s("CNCF"),
            date: s("2022-08"),
            ..Default::default()
        }],
        languages: vec![
            Language {
                name: s("English"),
                proficiency: s("Native"),
                ..Default::default()
            },
            Language {
                name: s("Spanish"),
                proficiency: s("Professional"),
                ..Default::default()
            },
        ],
        custom_sections: vec![CustomSection {
            title: s("Speaking"),
            items: vec![CustomItem {
                title: s("Exactly-once payments without distributed transactions"),
                subtitle: s("RustConf"),
                date: s("2023-09"),
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SectionKind;

    #[test]
    fn test_sample_has_every_section() {
        let resume = sample_resume();
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
            assert!(resume.has_section(kind), "sample should include {kind:?}");
        }
    }
}
