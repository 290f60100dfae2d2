//! Structured analysis output — the contract the LLM must satisfy.
//!
//! Field names are camelCase on the wire; the whole payload is validated
//! after deserialization and rejected wholesale if it violates the
//! contract, so nothing malformed ever reaches storage or the review
//! engine.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Category of a single improvement suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    AddKeyword,
    ImproveWording,
    AddSection,
    RemoveContent,
    Formatting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Importance tier for a keyword the resume is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Importance {
    Critical,
    Important,
    NiceToHave,
}

/// One proposed edit. `original_text`/`suggested_text` drive literal
/// replacement on flat-text resumes; `path` addresses a scalar in a
/// structured resume. A suggestion carrying neither is informational
/// only — accepting it still counts toward the score but edits nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordFound {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMissing {
    pub keyword: String,
    pub importance: Importance,
    pub suggestion: String,
}

/// Full analyzer output for one resume/job pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub overall_score: u8,
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub keywords_found: Vec<KeywordFound>,
    #[serde(default)]
    pub keywords_missing: Vec<KeywordMissing>,
    pub summary: String,
}

impl AnalysisReport {
    /// Contract checks the type system cannot express: score bounds,
    /// non-empty unique suggestion ids, non-empty keyword strings.
    pub fn validate(&self) -> Result<(), String> {
        if self.overall_score > 100 {
            return Err(format!(
                "overallScore {} out of range 0-100",
                self.overall_score
            ));
        }
        let mut seen = HashSet::new();
        for suggestion in &self.suggestions {
            if suggestion.id.trim().is_empty() {
                return Err("suggestion with empty id".to_string());
            }
            if !seen.insert(suggestion.id.as_str()) {
                return Err(format!("duplicate suggestion id '{}'", suggestion.id));
            }
        }
        if self
            .keywords_found
            .iter()
            .map(|k| k.keyword.as_str())
            .chain(self.keywords_missing.iter().map(|k| k.keyword.as_str()))
            .any(|k| k.trim().is_empty())
        {
            return Err("empty keyword string".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(id: &str) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            kind: SuggestionType::ImproveWording,
            title: "Reword".to_string(),
            description: "Use stronger verbs".to_string(),
            priority: Priority::Medium,
            section: None,
            original_text: None,
            suggested_text: None,
            path: None,
        }
    }

    fn report(suggestions: Vec<Suggestion>) -> AnalysisReport {
        AnalysisReport {
            overall_score: 70,
            suggestions,
            keywords_found: vec![],
            keywords_missing: vec![],
            summary: "Decent fit".to_string(),
        }
    }

    #[test]
    fn test_deserializes_full_payload() {
        let json = r#"{
            "overallScore": 72,
            "suggestions": [{
                "id": "s1",
                "type": "add_keyword",
                "title": "Add Kubernetes",
                "description": "The posting mentions Kubernetes five times",
                "priority": "high",
                "section": "Skills",
                "originalText": "Docker",
                "suggestedText": "Docker, Kubernetes"
            }],
            "keywordsFound": [{"keyword": "Rust", "context": "Skills section"}],
            "keywordsMissing": [{
                "keyword": "Kubernetes",
                "importance": "nice-to-have",
                "suggestion": "Mention cluster operations experience"
            }],
            "summary": "Solid match with a few gaps"
        }"#;

        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.overall_score, 72);
        assert_eq!(report.suggestions[0].kind, SuggestionType::AddKeyword);
        assert_eq!(report.suggestions[0].priority, Priority::High);
        assert_eq!(report.suggestions[0].original_text.as_deref(), Some("Docker"));
        assert!(report.suggestions[0].path.is_none());
        assert_eq!(report.keywords_missing[0].importance, Importance::NiceToHave);
        report.validate().unwrap();
    }

    #[test]
    fn test_suggestion_type_tags_are_snake_case() {
        for (tag, kind) in [
            ("add_keyword", SuggestionType::AddKeyword),
            ("improve_wording", SuggestionType::ImproveWording),
            ("add_section", SuggestionType::AddSection),
            ("remove_content", SuggestionType::RemoveContent),
            ("formatting", SuggestionType::Formatting),
        ] {
            let parsed: SuggestionType =
                serde_json::from_str(&format!("\"{tag}\"")).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_validate_rejects_score_over_100() {
        let mut r = report(vec![]);
        r.overall_score = 120;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let r = report(vec![suggestion("s1"), suggestion("s1")]);
        assert!(r.validate().unwrap_err().contains("duplicate"));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let r = report(vec![suggestion("  ")]);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_keyword() {
        let mut r = report(vec![]);
        r.keywords_found.push(KeywordFound {
            keyword: "".to_string(),
            context: None,
        });
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        report(vec![suggestion("s1"), suggestion("s2")])
            .validate()
            .unwrap();
    }
}
