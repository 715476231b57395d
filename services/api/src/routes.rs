use crate::infra::{deserialize_optional_date, deserialize_optional_time, AppState};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, NaiveDate, NaiveTime};
use hirenova::screening::{
    available_dates, available_times, AnalysisOutcome, CandidateId, InterviewDate, InterviewSlot,
    ListingError, ListingView, ScheduleError, ScheduledInterview, SelectedFile, SessionError,
    ShortlistCardView, ShortlistChange, SortOrder, UploadSlot, UploadStep, WizardError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/screening/sessions", post(create_session))
        .route("/api/v1/screening/sessions/:session_id", get(session_status))
        .route(
            "/api/v1/screening/sessions/:session_id/files",
            post(add_files).delete(remove_files),
        )
        .route(
            "/api/v1/screening/sessions/:session_id/advance",
            post(advance_step),
        )
        .route(
            "/api/v1/screening/sessions/:session_id/back",
            post(back_step),
        )
        .route(
            "/api/v1/screening/sessions/:session_id/process",
            post(process_session),
        )
        .route(
            "/api/v1/screening/sessions/:session_id/candidates",
            get(list_candidates),
        )
        .route(
            "/api/v1/screening/sessions/:session_id/candidates/:candidate_id/expand",
            post(toggle_expanded),
        )
        .route(
            "/api/v1/screening/sessions/:session_id/candidates/:candidate_id/shortlist",
            post(toggle_shortlist),
        )
        .route(
            "/api/v1/screening/sessions/:session_id/shortlist",
            get(shortlist_view),
        )
        .route(
            "/api/v1/screening/sessions/:session_id/shortlist/:candidate_id/interview",
            post(schedule_interview),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionResponse {
    pub(crate) session_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionStatusResponse {
    pub(crate) session_id: String,
    pub(crate) step: UploadStep,
    pub(crate) step_label: &'static str,
    pub(crate) step_index: usize,
    pub(crate) busy: bool,
    pub(crate) job_description_files: usize,
    pub(crate) resume_files: usize,
    pub(crate) results_ready: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileUploadRequest {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) size_bytes: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddFilesRequest {
    pub(crate) slot: UploadSlot,
    pub(crate) files: Vec<FileUploadRequest>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SlotFilesResponse {
    pub(crate) slot: UploadSlot,
    pub(crate) accepted: usize,
    pub(crate) files: Vec<SelectedFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveFilesRequest {
    pub(crate) slot: UploadSlot,
    /// Remove the file at this position; clear the whole slot when absent.
    #[serde(default)]
    pub(crate) index: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingQuery {
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) order: Option<SortOrder>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShortlistToggleResponse {
    pub(crate) candidate_id: CandidateId,
    pub(crate) change: ShortlistChange,
    pub(crate) shortlisted: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExpandToggleResponse {
    pub(crate) candidate_id: CandidateId,
    pub(crate) expanded: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShortlistQuery {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShortlistViewResponse {
    pub(crate) cards: Vec<ShortlistCardView>,
    pub(crate) available_dates: Vec<InterviewDate>,
    pub(crate) available_times: Vec<InterviewSlot>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScheduleRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_time")]
    pub(crate) time: Option<NaiveTime>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScheduleResponse {
    pub(crate) candidate_id: CandidateId,
    pub(crate) interview: ScheduledInterview,
}

fn unknown_session(id: &str) -> Response {
    let payload = json!({ "error": format!("unknown session '{id}'") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn session_error_response(err: SessionError) -> Response {
    let status = match &err {
        SessionError::Upload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Wizard(WizardError::Busy) => StatusCode::CONFLICT,
        SessionError::Wizard(WizardError::AtFinalStep | WizardError::NotReadyToProcess) => {
            StatusCode::CONFLICT
        }
        SessionError::Wizard(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Listing(ListingError::UnknownCandidate(_)) => StatusCode::NOT_FOUND,
        SessionError::Listing(ListingError::EmptyShortlist) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Schedule(ScheduleError::UnknownCandidate(_)) => StatusCode::NOT_FOUND,
        SessionError::Schedule(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SessionError::ResultsNotReady | SessionError::UploadFinished => StatusCode::CONFLICT,
    };

    let body = Json(json!({ "error": err.to_string() }));
    (status, body).into_response()
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn create_session(State(state): State<AppState>) -> Response {
    let session_id = state.sessions.create();
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    )
        .into_response()
}

fn status_body(session_id: &str, session: &hirenova::screening::ScreeningSession) -> SessionStatusResponse {
    SessionStatusResponse {
        session_id: session_id.to_string(),
        step: session.step(),
        step_label: session.step().label(),
        step_index: session.step().index(),
        busy: session.is_busy(),
        job_description_files: session.file_count(UploadSlot::JobDescription),
        resume_files: session.file_count(UploadSlot::Resumes),
        results_ready: session.has_results(),
    }
}

pub(crate) async fn session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state
        .sessions
        .with_session(&session_id, |session| status_body(&session_id, session))
    {
        Some(body) => (StatusCode::OK, Json(body)).into_response(),
        None => unknown_session(&session_id),
    }
}

pub(crate) async fn add_files(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<AddFilesRequest>,
) -> Response {
    let AddFilesRequest { slot, files } = payload;
    let batch: Vec<SelectedFile> = files
        .into_iter()
        .map(|file| SelectedFile::new(file.name, file.size_bytes))
        .collect();

    let outcome = state.sessions.with_session(&session_id, |session| {
        session
            .add_files(slot, batch)
            .map(|accepted| (accepted, session.files(slot).to_vec()))
    });

    match outcome {
        None => unknown_session(&session_id),
        Some(Err(err)) => session_error_response(err),
        Some(Ok((accepted, files))) => (
            StatusCode::OK,
            Json(SlotFilesResponse {
                slot,
                accepted,
                files,
            }),
        )
            .into_response(),
    }
}

pub(crate) async fn remove_files(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<RemoveFilesRequest>,
) -> Response {
    let RemoveFilesRequest { slot, index } = payload;

    let outcome = state.sessions.with_session(&session_id, |session| {
        match index {
            Some(index) => session.remove_file(slot, index).map(|_| ()),
            None => session.clear_files(slot),
        }
        .map(|_| session.files(slot).to_vec())
    });

    match outcome {
        None => unknown_session(&session_id),
        Some(Err(err)) => session_error_response(err),
        Some(Ok(files)) => (
            StatusCode::OK,
            Json(SlotFilesResponse {
                slot,
                accepted: 0,
                files,
            }),
        )
            .into_response(),
    }
}

pub(crate) async fn advance_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    step_transition(&state, &session_id, |session| session.advance())
}

pub(crate) async fn back_step(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    step_transition(&state, &session_id, |session| session.back())
}

fn step_transition(
    state: &AppState,
    session_id: &str,
    transition: impl FnOnce(&mut hirenova::screening::ScreeningSession) -> Result<UploadStep, SessionError>,
) -> Response {
    let outcome = state.sessions.with_session(session_id, |session| {
        transition(session).map(|_| status_body(session_id, session))
    });

    match outcome {
        None => unknown_session(session_id),
        Some(Err(err)) => session_error_response(err),
        Some(Ok(body)) => (StatusCode::OK, Json(body)).into_response(),
    }
}

/// The terminal wizard action: take the busy lock, run the mock analysis,
/// then store the results. The store lock is released while the artificial
/// latency elapses.
pub(crate) async fn process_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let begun = state
        .sessions
        .with_session(&session_id, |session| session.begin_processing());

    let files = match begun {
        None => return unknown_session(&session_id),
        Some(Err(err)) => return session_error_response(err),
        Some(Ok(files)) => files,
    };

    match state.analysis.analyze(&files).await {
        Ok(outcome) => {
            let stored = state.sessions.with_session(&session_id, |session| {
                session.complete_processing(outcome.clone());
            });
            match stored {
                Some(()) => {
                    let AnalysisOutcome { job, candidates } = outcome;
                    (
                        StatusCode::OK,
                        Json(json!({ "job": job, "candidates": candidates })),
                    )
                        .into_response()
                }
                None => unknown_session(&session_id),
            }
        }
        Err(err) => {
            state
                .sessions
                .with_session(&session_id, |session| session.fail_processing());
            session_error_response(SessionError::Processing(err))
        }
    }
}

pub(crate) async fn list_candidates(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let ListingQuery { search, order } = query;

    let outcome: Option<Result<ListingView, SessionError>> =
        state.sessions.with_session(&session_id, |session| {
            let listing = session.listing_mut()?;
            if let Some(term) = search {
                listing.set_search(term);
            }
            if let Some(order) = order {
                listing.set_order(order);
            }
            Ok(listing.view())
        });

    match outcome {
        None => unknown_session(&session_id),
        Some(Err(err)) => session_error_response(err),
        Some(Ok(view)) => (StatusCode::OK, Json(view)).into_response(),
    }
}

pub(crate) async fn toggle_expanded(
    State(state): State<AppState>,
    Path((session_id, candidate_id)): Path<(String, String)>,
) -> Response {
    let id = CandidateId(candidate_id);

    let outcome: Option<Result<bool, SessionError>> =
        state.sessions.with_session(&session_id, |session| {
            Ok(session.listing_mut()?.toggle_expanded(&id)?)
        });

    match outcome {
        None => unknown_session(&session_id),
        Some(Err(err)) => session_error_response(err),
        Some(Ok(expanded)) => (
            StatusCode::OK,
            Json(ExpandToggleResponse {
                candidate_id: id,
                expanded,
            }),
        )
            .into_response(),
    }
}

pub(crate) async fn toggle_shortlist(
    State(state): State<AppState>,
    Path((session_id, candidate_id)): Path<(String, String)>,
) -> Response {
    let id = CandidateId(candidate_id);

    let outcome: Option<Result<(ShortlistChange, usize), SessionError>> =
        state.sessions.with_session(&session_id, |session| {
            let listing = session.listing_mut()?;
            let change = listing.toggle_shortlist(&id)?;
            Ok((change, listing.shortlisted_ids().len()))
        });

    match outcome {
        None => unknown_session(&session_id),
        Some(Err(err)) => session_error_response(err),
        Some(Ok((change, shortlisted))) => (
            StatusCode::OK,
            Json(ShortlistToggleResponse {
                candidate_id: id,
                change,
                shortlisted,
            }),
        )
            .into_response(),
    }
}

pub(crate) async fn shortlist_view(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<ShortlistQuery>,
) -> Response {
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());

    // The guard checks the listing's toggles; the board itself holds the
    // top candidates by score.
    let outcome: Option<Result<Vec<ShortlistCardView>, SessionError>> =
        state.sessions.with_session(&session_id, |session| {
            let results = session.results()?;
            results.listing().require_shortlisted()?;
            Ok(results.board().cards())
        });

    match outcome {
        None => unknown_session(&session_id),
        Some(Err(err)) => session_error_response(err),
        Some(Ok(cards)) => (
            StatusCode::OK,
            Json(ShortlistViewResponse {
                cards,
                available_dates: available_dates(today),
                available_times: available_times(),
            }),
        )
            .into_response(),
    }
}

pub(crate) async fn schedule_interview(
    State(state): State<AppState>,
    Path((session_id, candidate_id)): Path<(String, String)>,
    Json(payload): Json<ScheduleRequest>,
) -> Response {
    let id = CandidateId(candidate_id);
    let ScheduleRequest { date, time } = payload;

    let outcome: Option<Result<ScheduledInterview, SessionError>> =
        state.sessions.with_session(&session_id, |session| {
            Ok(session.board_mut()?.schedule(&id, date, time)?)
        });

    match outcome {
        None => unknown_session(&session_id),
        Some(Err(err)) => session_error_response(err),
        Some(Ok(interview)) => (
            StatusCode::OK,
            Json(ScheduleResponse {
                candidate_id: id,
                interview,
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::SessionStore;
    use hirenova::screening::MockAnalysisService;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(recorder.handle()),
            sessions: SessionStore::default(),
            analysis: MockAnalysisService::instant(),
        }
    }

    fn add_request(slot: UploadSlot, names: &[&str]) -> AddFilesRequest {
        AddFilesRequest {
            slot,
            files: names
                .iter()
                .map(|name| FileUploadRequest {
                    name: name.to_string(),
                    size_bytes: 1_000,
                })
                .collect(),
        }
    }

    async fn session_through_processing(state: &AppState) -> String {
        let session_id = state.sessions.create();
        add_files(
            State(state.clone()),
            Path(session_id.clone()),
            Json(add_request(UploadSlot::JobDescription, &["jd.pdf"])),
        )
        .await;
        advance_step(State(state.clone()), Path(session_id.clone())).await;
        add_files(
            State(state.clone()),
            Path(session_id.clone()),
            Json(add_request(UploadSlot::Resumes, &["a.pdf", "b.docx"])),
        )
        .await;
        advance_step(State(state.clone()), Path(session_id.clone())).await;
        let response =
            process_session(State(state.clone()), Path(session_id.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);
        session_id
    }

    #[tokio::test]
    async fn create_session_returns_created() {
        let state = test_state();
        let response = create_session(State(state.clone())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn unknown_session_yields_not_found() {
        let state = test_state();
        let response =
            session_status(State(state.clone()), Path("scr-000000".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_file_types_are_unprocessable() {
        let state = test_state();
        let session_id = state.sessions.create();

        let response = add_files(
            State(state.clone()),
            Path(session_id.clone()),
            Json(add_request(UploadSlot::JobDescription, &["jd.txt"])),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let held = state
            .sessions
            .with_session(&session_id, |s| s.file_count(UploadSlot::JobDescription))
            .expect("session exists");
        assert_eq!(held, 0);
    }

    #[tokio::test]
    async fn advancing_without_uploads_is_unprocessable() {
        let state = test_state();
        let session_id = state.sessions.create();

        let response = advance_step(State(state.clone()), Path(session_id.clone())).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let step = state
            .sessions
            .with_session(&session_id, |s| s.step())
            .expect("session exists");
        assert_eq!(step, UploadStep::JobDescription);
    }

    #[tokio::test]
    async fn full_flow_reaches_results_and_shortlist() {
        let state = test_state();
        let session_id = session_through_processing(&state).await;

        let response = list_candidates(
            State(state.clone()),
            Path(session_id.clone()),
            Query(ListingQuery {
                search: Some("graphql".to_string()),
                order: Some(SortOrder::Ascending),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        // Viewing the shortlist before any toggle is a validation error.
        let response = shortlist_view(
            State(state.clone()),
            Path(session_id.clone()),
            Query(ShortlistQuery { today: None }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = toggle_shortlist(
            State(state.clone()),
            Path((session_id.clone(), "1".to_string())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = shortlist_view(
            State(state.clone()),
            Path(session_id.clone()),
            Query(ShortlistQuery { today: None }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn listing_before_processing_is_a_conflict() {
        let state = test_state();
        let session_id = state.sessions.create();

        let response = list_candidates(
            State(state.clone()),
            Path(session_id),
            Query(ListingQuery {
                search: None,
                order: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn scheduling_validates_missing_fields() {
        let state = test_state();
        let session_id = session_through_processing(&state).await;

        let response = schedule_interview(
            State(state.clone()),
            Path((session_id.clone(), "1".to_string())),
            Json(ScheduleRequest {
                date: None,
                time: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = schedule_interview(
            State(state.clone()),
            Path((session_id.clone(), "1".to_string())),
            Json(ScheduleRequest {
                date: NaiveDate::from_ymd_opt(2026, 8, 25),
                time: NaiveTime::from_hms_opt(9, 30, 0),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        // Candidates outside the top three are not on the board.
        let response = schedule_interview(
            State(state.clone()),
            Path((session_id, "5".to_string())),
            Json(ScheduleRequest {
                date: NaiveDate::from_ymd_opt(2026, 8, 25),
                time: NaiveTime::from_hms_opt(9, 30, 0),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    mod dispatch {
        use super::*;
        use axum::body::{to_bytes, Body};
        use axum::http::Request;
        use tower::ServiceExt;

        #[tokio::test]
        async fn router_serves_health_and_session_creation() {
            let app = router(test_state());

            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/health")
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("router dispatch");
            assert_eq!(response.status(), StatusCode::OK);

            let response = app
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/screening/sessions")
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("router dispatch");
            assert_eq!(response.status(), StatusCode::CREATED);

            let body = to_bytes(response.into_body(), 1024).await.expect("body");
            let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
            let session_id = payload["session_id"].as_str().expect("session id");
            assert!(session_id.starts_with("scr-"));
        }

        #[tokio::test]
        async fn listing_query_parameters_reach_the_handler() {
            let state = test_state();
            let session_id = session_through_processing(&state).await;
            let app = router(state);

            let uri = format!(
                "/api/v1/screening/sessions/{session_id}/candidates?search=graphql&order=asc"
            );
            let response = app
                .oneshot(
                    Request::builder()
                        .uri(uri)
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("router dispatch");
            assert_eq!(response.status(), StatusCode::OK);

            let body = to_bytes(response.into_body(), 1024 * 1024)
                .await
                .expect("body");
            let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
            assert_eq!(payload["matches"], 2);
            assert_eq!(payload["rows"][0]["name"], "Taylor Reynolds");
            assert_eq!(payload["rows"][1]["name"], "Alex Johnson");
        }
    }
}
