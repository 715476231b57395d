use hirenova::screening::{
    CandidateId, MockAnalysisService, ScreeningSession, SelectedFile, SessionError,
    ShortlistChange, SortOrder, UploadError, UploadSlot, UploadStep, WizardError,
};

fn jd() -> SelectedFile {
    SelectedFile::new("job-description.pdf", 48_120)
}

fn resumes() -> Vec<SelectedFile> {
    vec![
        SelectedFile::new("alex-johnson.pdf", 32_000),
        SelectedFile::new("jamie-smith.docx", 28_500),
        SelectedFile::new("morgan-williams.doc", 30_100),
    ]
}

async fn processed_session() -> ScreeningSession {
    let mut session = ScreeningSession::new();
    session
        .add_files(UploadSlot::JobDescription, vec![jd()])
        .expect("jd accepted");
    session.advance().expect("to resumes");
    session
        .add_files(UploadSlot::Resumes, resumes())
        .expect("resumes accepted");
    session.advance().expect("to processing");
    session
        .process(&MockAnalysisService::instant())
        .await
        .expect("mock analysis succeeds");
    session
}

#[test]
fn wizard_enforces_guards_at_every_step() {
    let mut session = ScreeningSession::new();
    assert_eq!(session.step(), UploadStep::JobDescription);

    // Empty job-description slot blocks the first transition.
    assert_eq!(
        session.advance(),
        Err(SessionError::Wizard(WizardError::MissingJobDescription))
    );

    session
        .add_files(UploadSlot::JobDescription, vec![jd()])
        .expect("jd accepted");
    assert_eq!(session.advance(), Ok(UploadStep::Resumes));

    // Empty resume slot blocks the second transition.
    assert_eq!(
        session.advance(),
        Err(SessionError::Wizard(WizardError::MissingResumes))
    );

    session
        .add_files(UploadSlot::Resumes, resumes())
        .expect("resumes accepted");
    assert_eq!(session.advance(), Ok(UploadStep::Processing));

    // Backward transitions are unguarded.
    assert_eq!(session.back(), Ok(UploadStep::Resumes));
    assert_eq!(session.back(), Ok(UploadStep::JobDescription));
    assert_eq!(session.back(), Ok(UploadStep::JobDescription));
}

#[test]
fn invalid_batches_never_mutate_the_held_set() {
    let mut session = ScreeningSession::new();

    let err = session
        .add_files(
            UploadSlot::JobDescription,
            vec![SelectedFile::new("job.txt", 100)],
        )
        .expect_err("txt rejected");
    assert!(matches!(err, SessionError::Upload(_)));
    assert_eq!(session.file_count(UploadSlot::JobDescription), 0);

    // Eleven resumes exceed the ten-file cap; the whole batch is refused.
    let too_many: Vec<SelectedFile> = (0..11)
        .map(|i| SelectedFile::new(format!("resume-{i}.pdf"), 1_000))
        .collect();
    let err = session
        .add_files(UploadSlot::Resumes, too_many)
        .expect_err("batch over cap rejected");
    assert_eq!(
        err,
        SessionError::Upload(UploadError::TooManyFiles { max: 10 })
    );
    assert_eq!(session.file_count(UploadSlot::Resumes), 0);
}

#[tokio::test]
async fn full_flow_yields_job_listing_and_board() {
    let session = processed_session().await;

    let job = session.job().expect("job loaded");
    assert_eq!(job.title, "Senior Frontend Developer");
    assert_eq!(job.required_skills.len(), 9);

    let listing = session.listing().expect("listing ready");
    let scores: Vec<u8> = listing.visible().iter().map(|c| c.match_score).collect();
    assert_eq!(scores, vec![92, 85, 78, 67, 51]);

    let board = session.board().expect("board ready");
    let names: Vec<&str> = board
        .candidates()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alex Johnson", "Taylor Reynolds", "Jamie Smith"]);
}

#[tokio::test]
async fn listing_filter_and_sort_work_against_live_results() {
    let mut session = processed_session().await;
    let listing = session.listing_mut().expect("listing ready");

    listing.set_search("GraphQL");
    assert_eq!(listing.visible().len(), 2);

    listing.set_order(SortOrder::Ascending);
    let scores: Vec<u8> = listing.visible().iter().map(|c| c.match_score).collect();
    assert_eq!(scores, vec![85, 92]);

    listing.set_search("nobody knows this skill");
    assert!(listing.view().empty);
}

#[tokio::test]
async fn shortlist_toggles_emit_distinct_events() {
    let mut session = processed_session().await;
    let listing = session.listing_mut().expect("listing ready");
    let id = CandidateId("4".to_string());

    assert_eq!(listing.toggle_shortlist(&id), Ok(ShortlistChange::Added));
    assert_eq!(listing.require_shortlisted().expect("one entry").len(), 1);
    assert_eq!(listing.toggle_shortlist(&id), Ok(ShortlistChange::Removed));
    assert!(listing.require_shortlisted().is_err());
}

#[tokio::test(start_paused = true)]
async fn default_latency_is_awaited_before_results_appear() {
    let mut session = ScreeningSession::new();
    session
        .add_files(UploadSlot::JobDescription, vec![jd()])
        .expect("jd accepted");
    session.advance().expect("to resumes");
    session
        .add_files(UploadSlot::Resumes, resumes())
        .expect("resumes accepted");
    session.advance().expect("to processing");

    let started = tokio::time::Instant::now();
    session
        .process(&MockAnalysisService::default())
        .await
        .expect("mock analysis succeeds");

    assert_eq!(started.elapsed(), std::time::Duration::from_secs(2));
    assert!(session.has_results());
    assert!(!session.is_busy());
}
