//! Typed resume document tree for builder-created resumes.
//!
//! Field names serialize as camelCase to stay wire-compatible with the
//! builder UI and with the field paths the analyzer emits
//! (e.g. `experience[1].bullets[0]`).

use serde::{Deserialize, Serialize};

/// A resume built field-by-field, as opposed to an uploaded PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Skills,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Entry ids are assigned by the builder at creation time and stay stable
/// across edits; ordered-list field paths address entries by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Never empty for a saved resume; the save endpoint rejects entries
    /// without at least one bullet.
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub technologies: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub frameworks: Option<String>,
    #[serde(default)]
    pub tools: Option<String>,
    #[serde(default)]
    pub other: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_builder_payload() {
        let json = r#"{
            "personalInfo": {
                "fullName": "Ada Lovelace",
                "email": "ada@example.com"
            },
            "education": [],
            "experience": [{
                "id": "exp-1",
                "title": "Engineer",
                "company": "Analytical Engines",
                "startDate": "2020",
                "bullets": ["Built stuff"]
            }],
            "projects": [],
            "skills": { "languages": "Rust" }
        }"#;

        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.personal_info.full_name, "Ada Lovelace");
        assert_eq!(data.experience[0].id, "exp-1");
        assert_eq!(data.experience[0].start_date.as_deref(), Some("2020"));
        assert_eq!(data.experience[0].bullets, vec!["Built stuff"]);
        assert_eq!(data.skills.languages.as_deref(), Some("Rust"));
        assert!(data.skills.other.is_none());
    }

    #[test]
    fn test_serializes_snake_fields_as_camel() {
        let data = ResumeData {
            personal_info: PersonalInfo {
                full_name: "Ada".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let value = serde_json::to_value(&data).unwrap();
        assert!(value["personalInfo"]["fullName"].is_string());
        assert!(value.get("personal_info").is_none());
    }
}
