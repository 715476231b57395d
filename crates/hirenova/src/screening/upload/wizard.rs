use serde::{Deserialize, Serialize};

use super::files::{FileSelection, SlotConfig};
use crate::screening::domain::SelectedFile;

/// The linear upload flow: job description, then resumes, then processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStep {
    JobDescription,
    Resumes,
    Processing,
}

impl UploadStep {
    pub const fn label(self) -> &'static str {
        match self {
            UploadStep::JobDescription => "Job Description",
            UploadStep::Resumes => "Resumes",
            UploadStep::Processing => "Processing",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            UploadStep::JobDescription => 0,
            UploadStep::Resumes => 1,
            UploadStep::Processing => 2,
        }
    }
}

/// Which of the wizard's two file slots an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSlot {
    JobDescription,
    Resumes,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("please upload a job description")]
    MissingJobDescription,
    #[error("please upload at least one resume")]
    MissingResumes,
    #[error("processing is already underway")]
    Busy,
    #[error("the wizard is already at the processing step")]
    AtFinalStep,
    #[error("processing can only start from the processing step")]
    NotReadyToProcess,
}

/// Step sequencer for the upload flow.
///
/// Forward transitions are gated on the current step's file set being
/// non-empty; going back is always allowed (a no-op at the first step).
/// While an analysis call is pending the wizard is locked: every transition
/// and file mutation fails with [`WizardError::Busy`] until the caller
/// releases the lock via [`UploadWizard::finish_processing`].
pub struct UploadWizard {
    step: UploadStep,
    job_description: FileSelection,
    resumes: FileSelection,
    busy: bool,
}

impl Default for UploadWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadWizard {
    pub fn new() -> Self {
        Self {
            step: UploadStep::JobDescription,
            job_description: FileSelection::new(SlotConfig::job_description()),
            resumes: FileSelection::new(SlotConfig::resumes()),
            busy: false,
        }
    }

    pub fn step(&self) -> UploadStep {
        self.step
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn files(&self, slot: UploadSlot) -> &FileSelection {
        match slot {
            UploadSlot::JobDescription => &self.job_description,
            UploadSlot::Resumes => &self.resumes,
        }
    }

    /// Mutable slot access, denied while an analysis call is pending.
    pub fn files_mut(&mut self, slot: UploadSlot) -> Result<&mut FileSelection, WizardError> {
        if self.busy {
            return Err(WizardError::Busy);
        }
        Ok(match slot {
            UploadSlot::JobDescription => &mut self.job_description,
            UploadSlot::Resumes => &mut self.resumes,
        })
    }

    /// Advance one step. The guard for the current step must hold; on
    /// violation nothing changes.
    pub fn advance(&mut self) -> Result<UploadStep, WizardError> {
        if self.busy {
            return Err(WizardError::Busy);
        }

        self.step = match self.step {
            UploadStep::JobDescription => {
                if self.job_description.is_empty() {
                    return Err(WizardError::MissingJobDescription);
                }
                UploadStep::Resumes
            }
            UploadStep::Resumes => {
                if self.resumes.is_empty() {
                    return Err(WizardError::MissingResumes);
                }
                UploadStep::Processing
            }
            UploadStep::Processing => return Err(WizardError::AtFinalStep),
        };
        Ok(self.step)
    }

    /// Go back one step. Unguarded, except that the first step stays put and
    /// a pending analysis call locks the wizard.
    pub fn back(&mut self) -> Result<UploadStep, WizardError> {
        if self.busy {
            return Err(WizardError::Busy);
        }

        self.step = match self.step {
            UploadStep::JobDescription => UploadStep::JobDescription,
            UploadStep::Resumes => UploadStep::JobDescription,
            UploadStep::Processing => UploadStep::Resumes,
        };
        Ok(self.step)
    }

    /// Take the single-flight busy lock for the terminal analysis call and
    /// return the combined file set to analyze. Re-checks both slots so the
    /// sequencer can never hand an empty upload to the analysis service.
    pub fn begin_processing(&mut self) -> Result<Vec<SelectedFile>, WizardError> {
        if self.busy {
            return Err(WizardError::Busy);
        }
        if self.step != UploadStep::Processing {
            return Err(WizardError::NotReadyToProcess);
        }
        if self.job_description.is_empty() {
            return Err(WizardError::MissingJobDescription);
        }
        if self.resumes.is_empty() {
            return Err(WizardError::MissingResumes);
        }

        self.busy = true;

        let mut combined =
            Vec::with_capacity(self.job_description.len() + self.resumes.len());
        combined.extend_from_slice(self.job_description.files());
        combined.extend_from_slice(self.resumes.files());
        Ok(combined)
    }

    /// Release the busy lock, on completion or failure alike.
    pub fn finish_processing(&mut self) {
        self.busy = false;
    }
}
