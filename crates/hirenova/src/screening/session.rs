use super::analysis::{AnalysisError, AnalysisOutcome, MockAnalysisService};
use super::domain::{JobPosting, SelectedFile};
use super::listing::{CandidateListing, ListingError};
use super::schedule::{ScheduleError, ShortlistBoard};
use super::upload::{UploadError, UploadSlot, UploadStep, UploadWizard, WizardError};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("processing failed: {0}")]
    Processing(#[from] AnalysisError),
    #[error("results are not ready yet")]
    ResultsNotReady,
    #[error("the upload phase is already finished")]
    UploadFinished,
}

/// Everything a session holds once the analysis has returned.
pub struct ScreeningResults {
    job: JobPosting,
    listing: CandidateListing,
    board: ShortlistBoard,
}

impl ScreeningResults {
    fn from_outcome(outcome: AnalysisOutcome) -> Self {
        let board = ShortlistBoard::from_candidates(&outcome.candidates);
        Self {
            job: outcome.job,
            listing: CandidateListing::new(outcome.candidates),
            board,
        }
    }

    pub fn job(&self) -> &JobPosting {
        &self.job
    }

    pub fn listing(&self) -> &CandidateListing {
        &self.listing
    }

    pub fn listing_mut(&mut self) -> &mut CandidateListing {
        &mut self.listing
    }

    pub fn board(&self) -> &ShortlistBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut ShortlistBoard {
        &mut self.board
    }
}

/// One screening run from upload through scheduling. All state lives in
/// memory and dies with the session.
///
/// The analysis call is split into `begin_processing` (takes the busy lock,
/// returns the files) and `complete_processing`/`fail_processing` so callers
/// that keep sessions behind a mutex never hold it across the await.
#[derive(Default)]
pub struct ScreeningSession {
    wizard: UploadWizard,
    results: Option<ScreeningResults>,
}

impl ScreeningSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> UploadStep {
        self.wizard.step()
    }

    pub fn is_busy(&self) -> bool {
        self.wizard.is_busy()
    }

    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    pub fn file_count(&self, slot: UploadSlot) -> usize {
        self.wizard.files(slot).len()
    }

    pub fn files(&self, slot: UploadSlot) -> &[SelectedFile] {
        self.wizard.files(slot).files()
    }

    pub fn add_files(
        &mut self,
        slot: UploadSlot,
        batch: Vec<SelectedFile>,
    ) -> Result<usize, SessionError> {
        self.require_uploading()?;
        Ok(self.wizard.files_mut(slot)?.add(batch)?)
    }

    pub fn remove_file(
        &mut self,
        slot: UploadSlot,
        index: usize,
    ) -> Result<SelectedFile, SessionError> {
        self.require_uploading()?;
        Ok(self.wizard.files_mut(slot)?.remove(index)?)
    }

    pub fn clear_files(&mut self, slot: UploadSlot) -> Result<(), SessionError> {
        self.require_uploading()?;
        self.wizard.files_mut(slot)?.clear();
        Ok(())
    }

    pub fn advance(&mut self) -> Result<UploadStep, SessionError> {
        self.require_uploading()?;
        Ok(self.wizard.advance()?)
    }

    pub fn back(&mut self) -> Result<UploadStep, SessionError> {
        self.require_uploading()?;
        Ok(self.wizard.back()?)
    }

    /// Take the busy lock and return the combined upload for analysis.
    pub fn begin_processing(&mut self) -> Result<Vec<SelectedFile>, SessionError> {
        self.require_uploading()?;
        Ok(self.wizard.begin_processing()?)
    }

    /// Store the analysis outcome and release the busy lock.
    pub fn complete_processing(&mut self, outcome: AnalysisOutcome) {
        self.wizard.finish_processing();
        self.results = Some(ScreeningResults::from_outcome(outcome));
    }

    /// Release the busy lock after a failed analysis call. The session stays
    /// in the upload phase so the user can re-trigger the action.
    pub fn fail_processing(&mut self) {
        self.wizard.finish_processing();
    }

    /// Run the whole terminal action in one call, for callers that own the
    /// session directly (CLI demo, tests).
    pub async fn process(&mut self, service: &MockAnalysisService) -> Result<(), SessionError> {
        let files = self.begin_processing()?;
        match service.analyze(&files).await {
            Ok(outcome) => {
                self.complete_processing(outcome);
                Ok(())
            }
            Err(err) => {
                self.fail_processing();
                Err(SessionError::Processing(err))
            }
        }
    }

    pub fn results(&self) -> Result<&ScreeningResults, SessionError> {
        self.results.as_ref().ok_or(SessionError::ResultsNotReady)
    }

    pub fn results_mut(&mut self) -> Result<&mut ScreeningResults, SessionError> {
        self.results.as_mut().ok_or(SessionError::ResultsNotReady)
    }

    pub fn job(&self) -> Result<&JobPosting, SessionError> {
        Ok(self.results()?.job())
    }

    pub fn listing(&self) -> Result<&CandidateListing, SessionError> {
        Ok(self.results()?.listing())
    }

    pub fn listing_mut(&mut self) -> Result<&mut CandidateListing, SessionError> {
        Ok(self.results_mut()?.listing_mut())
    }

    pub fn board(&self) -> Result<&ShortlistBoard, SessionError> {
        Ok(self.results()?.board())
    }

    pub fn board_mut(&mut self) -> Result<&mut ShortlistBoard, SessionError> {
        Ok(self.results_mut()?.board_mut())
    }

    fn require_uploading(&self) -> Result<(), SessionError> {
        if self.results.is_some() {
            return Err(SessionError::UploadFinished);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::fixtures;

    fn ready_session() -> ScreeningSession {
        let mut session = ScreeningSession::new();
        session
            .add_files(
                UploadSlot::JobDescription,
                vec![SelectedFile::new("jd.pdf", 100)],
            )
            .expect("jd accepted");
        session.advance().expect("to resumes");
        session
            .add_files(UploadSlot::Resumes, vec![SelectedFile::new("cv.pdf", 100)])
            .expect("resume accepted");
        session.advance().expect("to processing");
        session
    }

    fn fixture_outcome() -> AnalysisOutcome {
        AnalysisOutcome {
            job: fixtures::sample_job(),
            candidates: fixtures::sample_candidates(),
        }
    }

    #[test]
    fn results_are_not_available_before_processing() {
        let session = ready_session();
        assert!(matches!(
            session.listing(),
            Err(SessionError::ResultsNotReady)
        ));
        assert!(matches!(session.job(), Err(SessionError::ResultsNotReady)));
    }

    #[test]
    fn busy_lock_held_between_begin_and_complete() {
        let mut session = ready_session();
        let files = session.begin_processing().expect("lock taken");
        assert_eq!(files.len(), 2);
        assert!(session.is_busy());

        assert!(matches!(session.back(), Err(SessionError::Wizard(_))));
        assert!(matches!(
            session.begin_processing(),
            Err(SessionError::Wizard(_))
        ));

        session.complete_processing(fixture_outcome());
        assert!(!session.is_busy());
        assert!(session.has_results());
    }

    #[test]
    fn failed_processing_releases_the_lock_without_results() {
        let mut session = ready_session();
        session.begin_processing().expect("lock taken");
        session.fail_processing();

        assert!(!session.is_busy());
        assert!(!session.has_results());
        // The user can re-trigger the action.
        assert!(session.begin_processing().is_ok());
    }

    #[test]
    fn upload_operations_are_rejected_after_results() {
        let mut session = ready_session();
        session.begin_processing().expect("lock taken");
        session.complete_processing(fixture_outcome());

        assert!(matches!(
            session.add_files(UploadSlot::Resumes, vec![SelectedFile::new("x.pdf", 1)]),
            Err(SessionError::UploadFinished)
        ));
        assert!(matches!(
            session.advance(),
            Err(SessionError::UploadFinished)
        ));
        assert!(matches!(session.back(), Err(SessionError::UploadFinished)));
    }

    #[tokio::test]
    async fn process_runs_end_to_end() {
        let mut session = ready_session();
        session
            .process(&MockAnalysisService::instant())
            .await
            .expect("mock analysis succeeds");

        assert!(session.has_results());
        assert_eq!(session.job().expect("job loaded").title, "Senior Frontend Developer");
        assert_eq!(session.listing().expect("listing").candidates().len(), 5);
        assert_eq!(session.board().expect("board").candidates().len(), 3);
    }
}
