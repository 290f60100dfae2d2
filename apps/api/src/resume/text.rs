//! Plain-text rendering of a structured resume.
//!
//! The analyzer consumes resumes as flat text, so builder-created resumes
//! are rendered to the same sectioned layout the preview shows.

use crate::resume::document::ResumeData;

const RULE: &str = "----------------------------------------";

/// Renders a `ResumeData` tree to the sectioned plain-text layout.
pub fn resume_to_plain_text(data: &ResumeData) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !data.personal_info.full_name.is_empty() {
        lines.push(data.personal_info.full_name.clone());
    }

    let contact: Vec<&str> = [
        data.personal_info.phone.as_deref(),
        data.personal_info.email.as_deref(),
        data.personal_info.linkedin.as_deref(),
        data.personal_info.github.as_deref(),
        data.personal_info.website.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();
    if !contact.is_empty() {
        lines.push(contact.join(" | "));
    }

    lines.push(String::new());

    if !data.education.is_empty() {
        lines.push("EDUCATION".to_string());
        lines.push(RULE.to_string());
        for edu in &data.education {
            let school = edu.school.as_deref().unwrap_or_default();
            match edu.location.as_deref().filter(|l| !l.is_empty()) {
                Some(loc) => lines.push(format!("{school}, {loc}")),
                None => lines.push(school.to_string()),
            }
            let degree = join_nonempty(&[edu.degree.as_deref(), edu.field.as_deref()], " in ");
            let dates = join_nonempty(&[edu.start_date.as_deref(), edu.end_date.as_deref()], " - ");
            match (degree.is_empty(), dates.is_empty()) {
                (false, false) => lines.push(format!("{degree} | {dates}")),
                (false, true) => lines.push(degree),
                (true, false) => lines.push(dates),
                (true, true) => {}
            }
            lines.push(String::new());
        }
    }

    if !data.experience.is_empty() {
        lines.push("EXPERIENCE".to_string());
        lines.push(RULE.to_string());
        for exp in &data.experience {
            let title = exp.title.as_deref().unwrap_or_default();
            let dates = join_nonempty(&[exp.start_date.as_deref(), exp.end_date.as_deref()], " - ");
            if dates.is_empty() {
                lines.push(title.to_string());
            } else {
                lines.push(format!("{title} | {dates}"));
            }
            let company = exp.company.as_deref().unwrap_or_default();
            match exp.location.as_deref().filter(|l| !l.is_empty()) {
                Some(loc) => lines.push(format!("{company}, {loc}")),
                None => lines.push(company.to_string()),
            }
            for bullet in exp.bullets.iter().filter(|b| !b.trim().is_empty()) {
                lines.push(format!("- {bullet}"));
            }
            lines.push(String::new());
        }
    }

    if !data.projects.is_empty() {
        lines.push("PROJECTS".to_string());
        lines.push(RULE.to_string());
        for proj in &data.projects {
            let mut header = proj.name.clone().unwrap_or_default();
            if let Some(tech) = proj.technologies.as_deref().filter(|t| !t.is_empty()) {
                header.push_str(&format!(" | {tech}"));
            }
            let dates =
                join_nonempty(&[proj.start_date.as_deref(), proj.end_date.as_deref()], " - ");
            if !dates.is_empty() {
                header.push_str(&format!(" | {dates}"));
            }
            lines.push(header);
            for bullet in proj.bullets.iter().filter(|b| !b.trim().is_empty()) {
                lines.push(format!("- {bullet}"));
            }
            lines.push(String::new());
        }
    }

    let skills = &data.skills;
    let has_skills = [&skills.languages, &skills.frameworks, &skills.tools, &skills.other]
        .iter()
        .any(|s| s.as_deref().is_some_and(|v| !v.is_empty()));
    if has_skills {
        lines.push("TECHNICAL SKILLS".to_string());
        lines.push(RULE.to_string());
        if let Some(v) = skills.languages.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("Languages: {v}"));
        }
        if let Some(v) = skills.frameworks.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("Frameworks: {v}"));
        }
        if let Some(v) = skills.tools.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("Developer Tools: {v}"));
        }
        if let Some(v) = skills.other.as_deref().filter(|v| !v.is_empty()) {
            lines.push(format!("Other: {v}"));
        }
    }

    lines.join("\n")
}

fn join_nonempty(parts: &[Option<&str>], sep: &str) -> String {
    parts
        .iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::document::{Experience, PersonalInfo, Skills};

    fn sample() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: "Ada Lovelace".to_string(),
                email: Some("ada@example.com".to_string()),
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
            experience: vec![Experience {
                id: "exp-1".to_string(),
                title: Some("Engineer".to_string()),
                company: Some("Analytical Engines".to_string()),
                location: Some("London".to_string()),
                start_date: Some("2020".to_string()),
                end_date: Some("2024".to_string()),
                bullets: vec!["Built stuff".to_string(), "  ".to_string()],
            }],
            skills: Skills {
                languages: Some("Rust, Python".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_header_and_contact_line() {
        let text = resume_to_plain_text(&sample());
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Ada Lovelace"));
        assert_eq!(lines.next(), Some("555-0100 | ada@example.com"));
    }

    #[test]
    fn test_experience_section_with_dates_and_bullets() {
        let text = resume_to_plain_text(&sample());
        assert!(text.contains("EXPERIENCE"));
        assert!(text.contains("Engineer | 2020 - 2024"));
        assert!(text.contains("Analytical Engines, London"));
        assert!(text.contains("- Built stuff"));
    }

    #[test]
    fn test_blank_bullets_are_skipped() {
        let text = resume_to_plain_text(&sample());
        assert_eq!(text.matches("- ").count(), 1);
    }

    #[test]
    fn test_skills_section_only_lists_present_categories() {
        let text = resume_to_plain_text(&sample());
        assert!(text.contains("Languages: Rust, Python"));
        assert!(!text.contains("Frameworks:"));
        assert!(!text.contains("Other:"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let text = resume_to_plain_text(&sample());
        assert!(!text.contains("EDUCATION"));
        assert!(!text.contains("PROJECTS"));
    }
}
