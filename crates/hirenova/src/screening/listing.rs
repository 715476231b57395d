use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, CandidateSkill};

/// How many skills a collapsed candidate row shows.
pub const COLLAPSED_SKILL_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Emitted by the shortlist toggle so the caller can announce "added" and
/// "removed" differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortlistChange {
    Added,
    Removed,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("no candidates have been shortlisted yet")]
    EmptyShortlist,
    #[error("unknown candidate '{0}'")]
    UnknownCandidate(String),
}

/// One candidate row as the results view renders it. Collapsed rows carry the
/// top skills only; expanded rows add the remainder and the experience text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRowView {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub match_score: u8,
    pub skills: Vec<CandidateSkill>,
    /// Skills held back by the collapsed view; zero when expanded.
    pub hidden_skills: usize,
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    pub shortlisted: bool,
}

/// The filtered, sorted listing plus the explicit empty-state flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingView {
    pub matches: usize,
    pub shortlisted: usize,
    pub empty: bool,
    pub rows: Vec<CandidateRowView>,
}

/// Interactive state over the fixed candidate collection: substring search,
/// score sort, per-row expansion, and the shortlist toggle set.
pub struct CandidateListing {
    candidates: Vec<Candidate>,
    search_term: String,
    order: SortOrder,
    expanded: HashSet<CandidateId>,
    shortlisted: Vec<CandidateId>,
}

impl CandidateListing {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            search_term: String::new(),
            order: SortOrder::Descending,
            expanded: HashSet::new(),
            shortlisted: Vec::new(),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn toggle_order(&mut self) -> SortOrder {
        self.order = self.order.toggled();
        self.order
    }

    /// Flip one row's expansion; no other row is affected. Returns the new
    /// expansion state.
    pub fn toggle_expanded(&mut self, id: &CandidateId) -> Result<bool, ListingError> {
        self.require_known(id)?;
        if self.expanded.remove(id) {
            Ok(false)
        } else {
            self.expanded.insert(id.clone());
            Ok(true)
        }
    }

    /// Idempotent add/remove on the shortlist set.
    pub fn toggle_shortlist(&mut self, id: &CandidateId) -> Result<ShortlistChange, ListingError> {
        self.require_known(id)?;
        if let Some(position) = self.shortlisted.iter().position(|held| held == id) {
            self.shortlisted.remove(position);
            Ok(ShortlistChange::Removed)
        } else {
            self.shortlisted.push(id.clone());
            Ok(ShortlistChange::Added)
        }
    }

    pub fn shortlisted_ids(&self) -> &[CandidateId] {
        &self.shortlisted
    }

    pub fn is_shortlisted(&self, id: &CandidateId) -> bool {
        self.shortlisted.iter().any(|held| held == id)
    }

    /// Guard for the "view shortlist" action: at least one candidate must be
    /// shortlisted.
    pub fn require_shortlisted(&self) -> Result<&[CandidateId], ListingError> {
        if self.shortlisted.is_empty() {
            return Err(ListingError::EmptyShortlist);
        }
        Ok(&self.shortlisted)
    }

    /// Candidates passing the current search, in the current score order.
    /// The sort is stable: ties keep their insertion order.
    pub fn visible(&self) -> Vec<&Candidate> {
        let mut visible: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|candidate| self.matches_search(candidate))
            .collect();

        match self.order {
            SortOrder::Ascending => {
                visible.sort_by(|a, b| a.match_score.cmp(&b.match_score));
            }
            SortOrder::Descending => {
                visible.sort_by(|a, b| b.match_score.cmp(&a.match_score));
            }
        }
        visible
    }

    /// Render the full listing view.
    pub fn view(&self) -> ListingView {
        let rows: Vec<CandidateRowView> = self
            .visible()
            .into_iter()
            .map(|candidate| self.row(candidate))
            .collect();

        ListingView {
            matches: rows.len(),
            shortlisted: self.shortlisted.len(),
            empty: rows.is_empty(),
            rows,
        }
    }

    fn row(&self, candidate: &Candidate) -> CandidateRowView {
        let expanded = self.expanded.contains(&candidate.id);
        let skills: Vec<CandidateSkill> = if expanded {
            candidate.skills.clone()
        } else {
            candidate
                .skills
                .iter()
                .take(COLLAPSED_SKILL_LIMIT)
                .cloned()
                .collect()
        };
        let hidden_skills = candidate.skills.len() - skills.len();

        CandidateRowView {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            match_score: candidate.match_score,
            skills,
            hidden_skills,
            expanded,
            experience: expanded.then(|| candidate.experience.clone()),
            shortlisted: self.is_shortlisted(&candidate.id),
        }
    }

    fn matches_search(&self, candidate: &Candidate) -> bool {
        let term = self.search_term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        candidate.name.to_lowercase().contains(&term)
            || candidate
                .skills
                .iter()
                .any(|skill| skill.name.to_lowercase().contains(&term))
    }

    fn require_known(&self, id: &CandidateId) -> Result<(), ListingError> {
        if self.candidates.iter().any(|candidate| &candidate.id == id) {
            Ok(())
        } else {
            Err(ListingError::UnknownCandidate(id.0.clone()))
        }
    }
}
