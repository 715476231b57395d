use std::sync::Arc;

use crate::screening::domain::SelectedFile;

/// Receives the resulting file set after every successful mutation.
///
/// Drag-and-drop and dialog-based selection both funnel into [`FileSelection::add`],
/// so one observer sees every change regardless of entry point.
pub trait SelectionObserver: Send + Sync {
    fn selection_changed(&self, files: &[SelectedFile]);
}

/// Accepted extensions and capacity for one upload slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConfig {
    pub accepted_extensions: Vec<String>,
    pub max_files: usize,
}

const DOCUMENT_EXTENSIONS: [&str; 3] = ["pdf", "docx", "doc"];

impl SlotConfig {
    pub fn new(accepted_extensions: &[&str], max_files: usize) -> Self {
        Self {
            accepted_extensions: accepted_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_files,
        }
    }

    /// Single job-description document.
    pub fn job_description() -> Self {
        Self::new(&DOCUMENT_EXTENSIONS, 1)
    }

    /// Up to ten candidate resumes.
    pub fn resumes() -> Self {
        Self::new(&DOCUMENT_EXTENSIONS, 10)
    }

    fn accepts(&self, file: &SelectedFile) -> bool {
        file.extension()
            .is_some_and(|ext| self.accepted_extensions.iter().any(|a| a == &ext))
    }

    fn accepted_list(&self) -> String {
        self.accepted_extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("invalid file type for '{name}'; accepted types: {accepted}")]
    UnsupportedFileType { name: String, accepted: String },
    #[error("you can only upload a maximum of {max} files")]
    TooManyFiles { max: usize },
    #[error("no file at position {index}")]
    NoSuchFile { index: usize },
}

/// A bounded, validated set of user-selected files for one upload slot.
///
/// Additions are batch-atomic: a batch containing any rejected file leaves
/// the held set untouched.
pub struct FileSelection {
    config: SlotConfig,
    files: Vec<SelectedFile>,
    observer: Option<Arc<dyn SelectionObserver>>,
}

impl FileSelection {
    pub fn new(config: SlotConfig) -> Self {
        Self {
            config,
            files: Vec::new(),
            observer: None,
        }
    }

    pub fn with_observer(config: SlotConfig, observer: Arc<dyn SelectionObserver>) -> Self {
        Self {
            config,
            files: Vec::new(),
            observer: Some(observer),
        }
    }

    pub fn set_observer(&mut self, observer: Arc<dyn SelectionObserver>) {
        self.observer = Some(observer);
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Validate and append a batch. Returns how many files were accepted.
    pub fn add(&mut self, batch: Vec<SelectedFile>) -> Result<usize, UploadError> {
        if let Some(rejected) = batch.iter().find(|file| !self.config.accepts(file)) {
            return Err(UploadError::UnsupportedFileType {
                name: rejected.name.clone(),
                accepted: self.config.accepted_list(),
            });
        }

        if self.files.len() + batch.len() > self.config.max_files {
            return Err(UploadError::TooManyFiles {
                max: self.config.max_files,
            });
        }

        let accepted = batch.len();
        self.files.extend(batch);
        self.notify();
        Ok(accepted)
    }

    /// Remove the file at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Result<SelectedFile, UploadError> {
        if index >= self.files.len() {
            return Err(UploadError::NoSuchFile { index });
        }

        let removed = self.files.remove(index);
        self.notify();
        Ok(removed)
    }

    /// Drop every held file.
    pub fn clear(&mut self) {
        self.files.clear();
        self.notify();
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer.selection_changed(&self.files);
        }
    }
}
