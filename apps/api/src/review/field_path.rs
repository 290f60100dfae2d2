//! Field-path addressing for structured resume edits.
//!
//! The analyzer emits dot/bracket path strings addressing one scalar in
//! the resume tree (e.g. `experience[1].bullets[0]`). The string form is
//! parsed exactly once into a typed segment sequence; writes walk the
//! typed `ResumeData` tree rather than re-interpreting strings, so a
//! malformed path or out-of-range index surfaces as a `PatchError`
//! instead of silently writing nowhere.

use thiserror::Error;

use crate::resume::document::ResumeData;

#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("empty field path")]
    Empty,

    #[error("invalid index in path segment '{0}'")]
    InvalidIndex(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("'{0}' is a list and requires an index")]
    MissingIndex(String),

    #[error("index {index} out of range for '{name}' (len {len})")]
    OutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    #[error("path does not terminate at a scalar field")]
    NotAScalar,
}

/// One parsed segment: a field name plus an optional list index.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub index: Option<usize>,
}

/// A parsed field path, ready to apply against a `ResumeData`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parses the dot/bracket string form. Bracketed indices must be
    /// non-negative integers; anything else is rejected up front.
    pub fn parse(path: &str) -> Result<Self, PatchError> {
        if path.trim().is_empty() {
            return Err(PatchError::Empty);
        }

        let mut segments = Vec::new();
        for raw in path.split('.') {
            if raw.is_empty() {
                return Err(PatchError::Empty);
            }
            match raw.find('[') {
                Some(open) => {
                    let name = &raw[..open];
                    let rest = &raw[open + 1..];
                    let idx = rest
                        .strip_suffix(']')
                        .and_then(|s| s.parse::<usize>().ok())
                        .ok_or_else(|| PatchError::InvalidIndex(raw.to_string()))?;
                    if name.is_empty() {
                        return Err(PatchError::InvalidIndex(raw.to_string()));
                    }
                    segments.push(Segment {
                        name: name.to_string(),
                        index: Some(idx),
                    });
                }
                None => segments.push(Segment {
                    name: raw.to_string(),
                    index: None,
                }),
            }
        }
        Ok(FieldPath { segments })
    }

    /// Writes `value` at the addressed scalar, walking the typed tree.
    pub fn apply(&self, doc: &mut ResumeData, value: &str) -> Result<(), PatchError> {
        let mut segs = self.segments.iter();
        let head = segs.next().ok_or(PatchError::Empty)?;

        match (head.name.as_str(), head.index) {
            ("personalInfo", None) => {
                let field = terminal(&mut segs)?;
                let info = &mut doc.personal_info;
                match field.name.as_str() {
                    "fullName" => info.full_name = value.to_string(),
                    "email" => info.email = Some(value.to_string()),
                    "phone" => info.phone = Some(value.to_string()),
                    "linkedin" => info.linkedin = Some(value.to_string()),
                    "github" => info.github = Some(value.to_string()),
                    "website" => info.website = Some(value.to_string()),
                    other => return Err(PatchError::UnknownField(other.to_string())),
                }
            }
            ("skills", None) => {
                let field = terminal(&mut segs)?;
                let skills = &mut doc.skills;
                match field.name.as_str() {
                    "languages" => skills.languages = Some(value.to_string()),
                    "frameworks" => skills.frameworks = Some(value.to_string()),
                    "tools" => skills.tools = Some(value.to_string()),
                    "other" => skills.other = Some(value.to_string()),
                    other => return Err(PatchError::UnknownField(other.to_string())),
                }
            }
            ("education", Some(i)) => {
                let len = doc.education.len();
                let entry = doc.education.get_mut(i).ok_or(PatchError::OutOfRange {
                    name: "education".to_string(),
                    index: i,
                    len,
                })?;
                let field = terminal(&mut segs)?;
                match field.name.as_str() {
                    "school" => entry.school = Some(value.to_string()),
                    "degree" => entry.degree = Some(value.to_string()),
                    "field" => entry.field = Some(value.to_string()),
                    "location" => entry.location = Some(value.to_string()),
                    "startDate" => entry.start_date = Some(value.to_string()),
                    "endDate" => entry.end_date = Some(value.to_string()),
                    "gpa" => entry.gpa = Some(value.to_string()),
                    other => return Err(PatchError::UnknownField(other.to_string())),
                }
            }
            ("experience", Some(i)) => {
                let len = doc.experience.len();
                let entry = doc.experience.get_mut(i).ok_or(PatchError::OutOfRange {
                    name: "experience".to_string(),
                    index: i,
                    len,
                })?;
                let field = terminal(&mut segs)?;
                match (field.name.as_str(), field.index) {
                    ("title", None) => entry.title = Some(value.to_string()),
                    ("company", None) => entry.company = Some(value.to_string()),
                    ("location", None) => entry.location = Some(value.to_string()),
                    ("startDate", None) => entry.start_date = Some(value.to_string()),
                    ("endDate", None) => entry.end_date = Some(value.to_string()),
                    ("bullets", Some(j)) => {
                        write_bullet(&mut entry.bullets, j, value)?;
                    }
                    ("bullets", None) => {
                        return Err(PatchError::MissingIndex("bullets".to_string()))
                    }
                    (other, _) => return Err(PatchError::UnknownField(other.to_string())),
                }
            }
            ("projects", Some(i)) => {
                let len = doc.projects.len();
                let entry = doc.projects.get_mut(i).ok_or(PatchError::OutOfRange {
                    name: "projects".to_string(),
                    index: i,
                    len,
                })?;
                let field = terminal(&mut segs)?;
                match (field.name.as_str(), field.index) {
                    ("name", None) => entry.name = Some(value.to_string()),
                    ("technologies", None) => entry.technologies = Some(value.to_string()),
                    ("startDate", None) => entry.start_date = Some(value.to_string()),
                    ("endDate", None) => entry.end_date = Some(value.to_string()),
                    ("bullets", Some(j)) => {
                        write_bullet(&mut entry.bullets, j, value)?;
                    }
                    ("bullets", None) => {
                        return Err(PatchError::MissingIndex("bullets".to_string()))
                    }
                    (other, _) => return Err(PatchError::UnknownField(other.to_string())),
                }
            }
            ("education" | "experience" | "projects", None) => {
                return Err(PatchError::MissingIndex(head.name.clone()))
            }
            (other, _) => return Err(PatchError::UnknownField(other.to_string())),
        }

        Ok(())
    }
}

fn write_bullet(bullets: &mut [String], index: usize, value: &str) -> Result<(), PatchError> {
    let len = bullets.len();
    let slot = bullets.get_mut(index).ok_or(PatchError::OutOfRange {
        name: "bullets".to_string(),
        index,
        len,
    })?;
    *slot = value.to_string();
    Ok(())
}

/// Pulls the final segment and rejects anything trailing past it.
fn terminal<'a>(
    segs: &mut std::slice::Iter<'a, Segment>,
) -> Result<&'a Segment, PatchError> {
    let seg = segs.next().ok_or(PatchError::NotAScalar)?;
    if segs.next().is_some() {
        return Err(PatchError::NotAScalar);
    }
    Ok(seg)
}
