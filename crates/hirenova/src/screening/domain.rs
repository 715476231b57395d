use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for screened candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// A file picked in the upload wizard. Only metadata is tracked; contents are
/// never read by the demo pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub content_type: String,
}

impl SelectedFile {
    /// Build a file entry, guessing the content type from the file name.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .to_string();
        Self {
            name,
            size_bytes,
            content_type,
        }
    }

    /// Lowercased extension without the leading dot, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

/// Importance tier attached to each skill a job posting requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillImportance {
    Critical,
    Preferred,
    Bonus,
}

impl SkillImportance {
    pub const fn label(self) -> &'static str {
        match self {
            SkillImportance::Critical => "critical",
            SkillImportance::Preferred => "preferred",
            SkillImportance::Bonus => "bonus",
        }
    }
}

/// A skill the job posting asks for, tagged with its importance tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub name: String,
    pub importance: SkillImportance,
}

impl RequiredSkill {
    pub fn new(name: impl Into<String>, importance: SkillImportance) -> Self {
        Self {
            name: name.into(),
            importance,
        }
    }
}

/// The job description as the analysis pipeline reports it. Immutable once
/// loaded into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    pub summary: String,
    pub required_skills: Vec<RequiredSkill>,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
}

/// One of a candidate's skills, flagged when it matches the job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub name: String,
    pub matched: bool,
}

impl CandidateSkill {
    pub fn new(name: impl Into<String>, matched: bool) -> Self {
        Self {
            name: name.into(),
            matched,
        }
    }
}

/// A screened candidate. The set is fixed per session; records never change
/// after the analysis returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub skills: Vec<CandidateSkill>,
    pub experience: String,
    /// Mocked fit between candidate and posting, 0-100.
    pub match_score: u8,
}

impl Candidate {
    pub fn matched_skills(&self) -> impl Iterator<Item = &CandidateSkill> {
        self.skills.iter().filter(|skill| skill.matched)
    }
}

/// A confirmed interview slot. At most one per candidate; rescheduling
/// overwrites the previous entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInterview {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_file_guesses_content_type() {
        let file = SelectedFile::new("resume.pdf", 1024);
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn extension_is_lowercased() {
        let file = SelectedFile::new("Resume.PDF", 10);
        assert_eq!(file.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn extension_missing_for_bare_names() {
        let file = SelectedFile::new("resume", 10);
        assert_eq!(file.extension(), None);
    }
}
