//! The screening workflow: upload wizard, mock analysis, candidate listing,
//! and shortlist scheduling.

pub mod analysis;
pub mod domain;
pub mod fixtures;
pub mod listing;
pub mod schedule;
pub mod session;
pub mod upload;

pub use analysis::{AnalysisError, AnalysisOutcome, MockAnalysisService};
pub use domain::{
    Candidate, CandidateId, CandidateSkill, JobPosting, RequiredSkill, ScheduledInterview,
    SelectedFile, SkillImportance,
};
pub use listing::{
    CandidateListing, CandidateRowView, ListingError, ListingView, ShortlistChange, SortOrder,
};
pub use schedule::{
    available_dates, available_times, InterviewDate, InterviewSlot, ScheduleError, ShortlistBoard,
    ShortlistCardView,
};
pub use session::{ScreeningResults, ScreeningSession, SessionError};
pub use upload::{
    FileSelection, SelectionObserver, SlotConfig, UploadError, UploadSlot, UploadStep,
    UploadWizard, WizardError,
};
