//! Review engine — the pure state behind the suggestion viewer.
//!
//! A `ReviewState` is a small value: the current resume content plus two
//! disjoint decision sets. Every operation consumes the state and returns
//! a fresh one, so callers can persist, diff, or discard revisions
//! without shared mutable state. Per-suggestion lifecycle:
//! Active -> Accepted (accept), Active -> Dismissed (dismiss),
//! Accepted -> Active (undo). Dismissed is terminal.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::analysis::report::Suggestion;
use crate::resume::document::ResumeData;
use crate::review::field_path::{FieldPath, PatchError};
use crate::review::score::compute_score;

/// The resume under review. Exactly one variant per resume, fixed at
/// creation time: builder resumes are structured, uploads are flat text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResumeContent {
    Structured { data: ResumeData },
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewState {
    pub content: ResumeContent,
    pub accepted: BTreeSet<String>,
    pub dismissed: BTreeSet<String>,
    /// The suggestion currently highlighted in the viewer, cleared by any
    /// decision.
    pub selected: Option<String>,
}

impl ReviewState {
    pub fn new(content: ResumeContent) -> Self {
        Self {
            content,
            accepted: BTreeSet::new(),
            dismissed: BTreeSet::new(),
            selected: None,
        }
    }

    /// Accepts a suggestion: records the id and applies its edit to the
    /// current content.
    ///
    /// Structured resumes take a field-path write of `suggested_text`;
    /// a bad path is a contract violation and fails the whole operation,
    /// leaving the state unchanged at the caller. Flat-text resumes take
    /// a first-occurrence literal replacement; a missing `original_text`
    /// occurrence is a no-op. Re-accepting an already-accepted id is
    /// harmless: the set insert is idempotent and the flat-text
    /// replacement finds nothing left to replace.
    pub fn accept(mut self, suggestion: &Suggestion) -> Result<Self, PatchError> {
        self.accepted.insert(suggestion.id.clone());

        match &mut self.content {
            ResumeContent::Structured { data } => {
                if let (Some(path), Some(new_text)) =
                    (&suggestion.path, &suggestion.suggested_text)
                {
                    FieldPath::parse(path)?.apply(data, new_text)?;
                }
            }
            ResumeContent::Text { text } => {
                if let (Some(original), Some(new_text)) =
                    (&suggestion.original_text, &suggestion.suggested_text)
                {
                    *text = text.replacen(original.as_str(), new_text, 1);
                }
            }
        }

        self.selected = None;
        Ok(self)
    }

    /// Dismisses a suggestion by id. Idempotent; dismissed is terminal
    /// for the session.
    pub fn dismiss(mut self, id: &str) -> Self {
        self.dismissed.insert(id.to_string());
        self.selected = None;
        self
    }

    /// Reverts an accepted suggestion: removes the id and writes the
    /// original text back.
    ///
    /// Flat-text undo replaces the first occurrence of `suggested_text`
    /// with `original_text` — the symmetric inverse of accept. When the
    /// same literal appears elsewhere, or an intervening accept rewrote
    /// the span, this can revert the wrong occurrence or no-op; exact
    /// reversal would need applied-span offset tracking.
    pub fn undo(mut self, suggestion: &Suggestion) -> Result<Self, PatchError> {
        self.accepted.remove(&suggestion.id);

        match &mut self.content {
            ResumeContent::Structured { data } => {
                if let (Some(path), Some(original)) =
                    (&suggestion.path, &suggestion.original_text)
                {
                    FieldPath::parse(path)?.apply(data, original)?;
                }
            }
            ResumeContent::Text { text } => {
                if let (Some(original), Some(new_text)) =
                    (&suggestion.original_text, &suggestion.suggested_text)
                {
                    *text = text.replacen(new_text.as_str(), original, 1);
                }
            }
        }

        Ok(self)
    }

    /// Undecided suggestions, in original list order.
    pub fn active<'a>(&self, all: &'a [Suggestion]) -> Vec<&'a Suggestion> {
        all.iter()
            .filter(|s| !self.accepted.contains(&s.id) && !self.dismissed.contains(&s.id))
            .collect()
    }

    /// Accepted suggestions, in original list order.
    pub fn accepted_suggestions<'a>(&self, all: &'a [Suggestion]) -> Vec<&'a Suggestion> {
        all.iter()
            .filter(|s| self.accepted.contains(&s.id))
            .collect()
    }

    /// Current score given the analysis base score and full suggestion
    /// count.
    pub fn current_score(&self, base_score: u8, total_suggestions: usize) -> u8 {
        compute_score(base_score, total_suggestions, self.accepted.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::report::{Priority, SuggestionType};
    use crate::resume::document::{Experience, PersonalInfo};

    fn text_state(text: &str) -> ReviewState {
        ReviewState::new(ResumeContent::Text {
            text: text.to_string(),
        })
    }

    fn structured_state() -> ReviewState {
        ReviewState::new(ResumeContent::Structured {
            data: ResumeData {
                personal_info: PersonalInfo {
                    full_name: "Ada".to_string(),
                    ..Default::default()
                },
                experience: vec![Experience {
                    id: "exp-1".to_string(),
                    bullets: vec!["Built stuff".to_string()],
                    ..Default::default()
                }],
                ..Default::default()
            },
        })
    }

    fn replacement(id: &str, original: &str, suggested: &str) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            kind: SuggestionType::ImproveWording,
            title: "Reword".to_string(),
            description: "desc".to_string(),
            priority: Priority::High,
            section: None,
            original_text: Some(original.to_string()),
            suggested_text: Some(suggested.to_string()),
            path: None,
        }
    }

    fn path_edit(id: &str, path: &str, original: &str, suggested: &str) -> Suggestion {
        Suggestion {
            path: Some(path.to_string()),
            ..replacement(id, original, suggested)
        }
    }

    fn text_of(state: &ReviewState) -> &str {
        match &state.content {
            ResumeContent::Text { text } => text,
            _ => panic!("expected flat text"),
        }
    }

    fn doc_of(state: &ReviewState) -> &ResumeData {
        match &state.content {
            ResumeContent::Structured { data } => data,
            _ => panic!("expected structured"),
        }
    }

    #[test]
    fn test_flat_accept_then_undo_round_trips() {
        let s1 = replacement("s1", "Java", "Python");
        let state = text_state("Skilled in Java");

        let state = state.accept(&s1).unwrap();
        assert_eq!(text_of(&state), "Skilled in Python");
        assert!(state.accepted.contains("s1"));

        let state = state.undo(&s1).unwrap();
        assert_eq!(text_of(&state), "Skilled in Java");
        assert!(!state.accepted.contains("s1"));
    }

    #[test]
    fn test_flat_accept_replaces_first_occurrence_only() {
        let s1 = replacement("s1", "Java", "Python");
        let state = text_state("Java and Java").accept(&s1).unwrap();
        assert_eq!(text_of(&state), "Python and Java");
    }

    #[test]
    fn test_flat_accept_missing_original_is_noop() {
        let s1 = replacement("s1", "Haskell", "Python");
        let state = text_state("Skilled in Java").accept(&s1).unwrap();
        assert_eq!(text_of(&state), "Skilled in Java");
        // decision still recorded
        assert!(state.accepted.contains("s1"));
    }

    #[test]
    fn test_structured_accept_then_undo_round_trips() {
        let s1 = path_edit(
            "s1",
            "experience[0].bullets[0]",
            "Built stuff",
            "Built a distributed cache",
        );
        let state = structured_state().accept(&s1).unwrap();
        assert_eq!(doc_of(&state).experience[0].bullets[0], "Built a distributed cache");

        let state = state.undo(&s1).unwrap();
        assert_eq!(doc_of(&state).experience[0].bullets[0], "Built stuff");
    }

    #[test]
    fn test_structured_accept_bad_path_fails() {
        let s1 = path_edit("s1", "experience[4].bullets[0]", "a", "b");
        assert!(structured_state().accept(&s1).is_err());
    }

    #[test]
    fn test_accept_is_idempotent() {
        let s1 = replacement("s1", "Java", "Python");
        let state = text_state("Skilled in Java")
            .accept(&s1)
            .unwrap()
            .accept(&s1)
            .unwrap();
        assert_eq!(state.accepted.len(), 1);
        // second replacement finds nothing: original text already gone
        assert_eq!(text_of(&state), "Skilled in Python");
    }

    #[test]
    fn test_informational_suggestion_edits_nothing() {
        let mut s1 = replacement("s1", "", "");
        s1.original_text = None;
        s1.suggested_text = None;
        let state = text_state("Skilled in Java").accept(&s1).unwrap();
        assert_eq!(text_of(&state), "Skilled in Java");
        assert!(state.accepted.contains("s1"));
    }

    #[test]
    fn test_dismiss_removes_from_active_and_never_accepted() {
        let all = vec![replacement("s1", "a", "b"), replacement("s2", "c", "d")];
        let state = text_state("a c").dismiss("s1");

        let active: Vec<_> = state.active(&all).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(active, vec!["s2"]);
        assert!(state.accepted_suggestions(&all).is_empty());

        // idempotent
        let state = state.dismiss("s1");
        assert_eq!(state.dismissed.len(), 1);
    }

    #[test]
    fn test_partitions_are_disjoint_and_ordered() {
        let all = vec![
            replacement("s1", "one", "1"),
            replacement("s2", "two", "2"),
            replacement("s3", "three", "3"),
        ];
        let state = text_state("one two three")
            .accept(&all[2])
            .unwrap()
            .dismiss("s1");

        let active: Vec<_> = state.active(&all).iter().map(|s| s.id.as_str()).collect();
        let accepted: Vec<_> = state
            .accepted_suggestions(&all)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(active, vec!["s2"]);
        assert_eq!(accepted, vec!["s3"]);
        assert!(state.accepted.is_disjoint(&state.dismissed));
    }

    #[test]
    fn test_undo_returns_suggestion_to_active() {
        let all = vec![replacement("s1", "Java", "Python")];
        let state = text_state("Java").accept(&all[0]).unwrap();
        assert!(state.active(&all).is_empty());

        let state = state.undo(&all[0]).unwrap();
        assert_eq!(state.active(&all).len(), 1);
    }

    #[test]
    fn test_decisions_clear_selected_pointer() {
        let s1 = replacement("s1", "a", "b");
        let mut state = text_state("a");
        state.selected = Some("s1".to_string());
        let state = state.accept(&s1).unwrap();
        assert!(state.selected.is_none());

        let mut state = state;
        state.selected = Some("s2".to_string());
        let state = state.dismiss("s2");
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_current_score_tracks_accepted_count() {
        let all = vec![
            replacement("s1", "one", "1"),
            replacement("s2", "two", "2"),
            replacement("s3", "three", "3"),
            replacement("s4", "four", "4"),
        ];
        let state = text_state("one two three four");
        assert_eq!(state.current_score(50, all.len()), 50);

        let state = state.accept(&all[0]).unwrap().accept(&all[1]).unwrap();
        assert_eq!(state.current_score(50, all.len()), 75);
    }
}
