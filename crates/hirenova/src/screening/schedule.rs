use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

use super::domain::{Candidate, CandidateId, ScheduledInterview};

/// The board shows the top N candidates by match score.
pub const SHORTLIST_SIZE: usize = 3;

/// Interviews can be booked this many calendar days ahead.
pub const AVAILABILITY_WINDOW_DAYS: i64 = 14;

/// How many matched skills a board card lists before "+more".
const CARD_SKILL_LIMIT: usize = 3;

/// A bookable date with its display label ("Tue, Sep 2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewDate {
    pub value: NaiveDate,
    pub label: String,
}

/// A bookable time of day with its 12-hour display label ("9:30 AM").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewSlot {
    pub value: NaiveTime,
    pub label: String,
}

/// The next 14 calendar days after `today`, weekends excluded. A window
/// starting on a Monday always drops exactly four weekend days.
pub fn available_dates(today: NaiveDate) -> Vec<InterviewDate> {
    (1..=AVAILABILITY_WINDOW_DAYS)
        .filter_map(|offset| {
            let date = today + Duration::days(offset);
            match date.weekday() {
                Weekday::Sat | Weekday::Sun => None,
                _ => Some(InterviewDate {
                    value: date,
                    label: date.format("%a, %b %-d").to_string(),
                }),
            }
        })
        .collect()
}

/// Half-hour interview slots from 09:00 through 17:00 inclusive.
pub fn available_times() -> Vec<InterviewSlot> {
    let mut slots = Vec::with_capacity(17);
    for hour in 9..=17u32 {
        for minute in [0u32, 30] {
            if hour == 17 && minute > 0 {
                continue;
            }
            let Some(value) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                continue;
            };
            slots.push(InterviewSlot {
                value,
                label: value.format("%-I:%M %p").to_string(),
            });
        }
    }
    slots
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("please select a date and time for the interview")]
    MissingDate,
    #[error("please select a date and time for the interview")]
    MissingTime,
    #[error("candidate '{0}' is not on the shortlist")]
    UnknownCandidate(String),
}

/// One shortlist card: identity, score, leading matched skills, and the
/// booked interview when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortlistCardView {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub match_score: u8,
    pub top_matched_skills: Vec<String>,
    pub more_matched_skills: bool,
    pub scheduled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview: Option<ScheduledInterview>,
}

/// The shortlist view with its interview assignments.
///
/// The board is built from the top of the full candidate collection by match
/// score, independent of the listing's shortlist toggles.
pub struct ShortlistBoard {
    candidates: Vec<Candidate>,
    interviews: HashMap<CandidateId, ScheduledInterview>,
}

impl ShortlistBoard {
    /// Rank the full collection by score (descending, stable) and keep the
    /// top [`SHORTLIST_SIZE`].
    pub fn from_candidates(all: &[Candidate]) -> Self {
        let mut ranked = all.to_vec();
        ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        ranked.truncate(SHORTLIST_SIZE);

        Self {
            candidates: ranked,
            interviews: HashMap::new(),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn is_scheduled(&self, id: &CandidateId) -> bool {
        self.interviews.contains_key(id)
    }

    pub fn scheduled(&self, id: &CandidateId) -> Option<&ScheduledInterview> {
        self.interviews.get(id)
    }

    /// Confirm an interview. Both fields are required; a missing one fails
    /// with no state change. Rescheduling overwrites the previous entry.
    pub fn schedule(
        &mut self,
        id: &CandidateId,
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
    ) -> Result<ScheduledInterview, ScheduleError> {
        if !self.candidates.iter().any(|candidate| &candidate.id == id) {
            return Err(ScheduleError::UnknownCandidate(id.0.clone()));
        }
        let date = date.ok_or(ScheduleError::MissingDate)?;
        let time = time.ok_or(ScheduleError::MissingTime)?;

        let interview = ScheduledInterview { date, time };
        self.interviews.insert(id.clone(), interview);
        Ok(interview)
    }

    pub fn cards(&self) -> Vec<ShortlistCardView> {
        self.candidates
            .iter()
            .map(|candidate| {
                let matched: Vec<&str> = candidate
                    .matched_skills()
                    .map(|skill| skill.name.as_str())
                    .collect();

                ShortlistCardView {
                    id: candidate.id.clone(),
                    name: candidate.name.clone(),
                    email: candidate.email.clone(),
                    match_score: candidate.match_score,
                    top_matched_skills: matched
                        .iter()
                        .take(CARD_SKILL_LIMIT)
                        .map(|name| name.to_string())
                        .collect(),
                    more_matched_skills: matched.len() > CARD_SKILL_LIMIT,
                    scheduled: self.is_scheduled(&candidate.id),
                    interview: self.scheduled(&candidate.id).copied(),
                }
            })
            .collect()
    }
}
