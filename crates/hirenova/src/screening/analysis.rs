use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, JobPosting, SelectedFile};
use super::fixtures;

/// Default artificial latency for a full analysis run.
pub const DEFAULT_ANALYSIS_LATENCY: Duration = Duration::from_secs(2);

/// What the analysis pipeline hands back: the parsed posting and the ranked
/// candidate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub job: JobPosting,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis backend failure: {0}")]
    Backend(String),
}

/// Stand-in for the real document-understanding pipeline.
///
/// The delay simulates processing time; file contents are never inspected and
/// the outcome is always the canned fixture data. The error path exists so
/// callers handle a future real backend the same way they handle this one.
#[derive(Debug, Clone)]
pub struct MockAnalysisService {
    latency: Duration,
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::with_latency(DEFAULT_ANALYSIS_LATENCY)
    }
}

impl MockAnalysisService {
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Zero-latency variant for tests and quick demos.
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// "Analyze" the combined upload. Resolves after the configured delay
    /// with the fixture posting and candidates, regardless of input.
    pub async fn analyze(&self, files: &[SelectedFile]) -> Result<AnalysisOutcome, AnalysisError> {
        let _ = files;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(AnalysisOutcome {
            job: fixtures::sample_job(),
            candidates: fixtures::sample_candidates(),
        })
    }
}
