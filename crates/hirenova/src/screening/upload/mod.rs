//! File selection and the multi-step upload wizard.

pub mod files;
pub mod wizard;

pub use files::{FileSelection, SelectionObserver, SlotConfig, UploadError};
pub use wizard::{UploadSlot, UploadStep, UploadWizard, WizardError};
