//! Upload dialog state: file selection, background read, staging and confirm.
//!
//! Reads run on a worker thread and report back over a channel. Every
//! selection (and every close/confirm) bumps a [`SelectionToken`]; a read
//! result is applied only while its token is still the latest one, so a slow
//! read of an earlier file can never overwrite a newer selection.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use funnel_model::FunnelDocument;

use crate::error::UploadError;
use crate::store::FunnelStore;

/// Identifies one file selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionToken(u64);

/// Result of reading a selected file, delivered by the reader thread.
#[derive(Debug)]
pub struct ReadOutcome {
    pub token: SelectionToken,
    pub path: PathBuf,
    pub result: Result<String, UploadError>,
}

#[derive(Debug)]
pub struct UploadDialog {
    open: bool,
    file_name: String,
    staged: String,
    staged_path: Option<PathBuf>,
    latest: SelectionToken,
    error: Option<String>,
    tx: Sender<ReadOutcome>,
    rx: Receiver<ReadOutcome>,
}

impl Default for UploadDialog {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            open: false,
            file_name: String::new(),
            staged: String::new(),
            staged_path: None,
            latest: SelectionToken(0),
            error: None,
            tx,
            rx,
        }
    }
}

impl UploadDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Display name of the selected file, empty when nothing is selected.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn staged_text(&self) -> &str {
        &self.staged
    }

    /// Message of the last read or parse failure.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn latest_token(&self) -> SelectionToken {
        self.latest
    }

    pub fn can_submit(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Record a newly chosen file. Its content is not read yet.
    pub fn select_file(&mut self, path: &Path) -> SelectionToken {
        self.invalidate_staging();
        self.error = None;
        self.file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.latest
    }

    /// The chooser was dismissed without a file.
    pub fn clear_selection(&mut self) {
        self.invalidate_staging();
    }

    /// Read `path` on a worker thread. `notify` runs after the outcome is sent.
    pub fn read_and_stage<F>(&self, token: SelectionToken, path: PathBuf, notify: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = read_text_file(&path);
            let _ = tx.send(ReadOutcome {
                token,
                path,
                result,
            });
            notify();
        });
    }

    pub fn read_and_stage_blocking(&mut self, token: SelectionToken, path: PathBuf) -> bool {
        let result = read_text_file(&path);
        self.apply_read(ReadOutcome {
            token,
            path,
            result,
        })
    }

    /// Apply every outcome delivered since the last poll. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(outcome) => {
                    if self.apply_read(outcome) {
                        applied += 1;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    /// Stage a read outcome if it belongs to the latest selection.
    pub fn apply_read(&mut self, outcome: ReadOutcome) -> bool {
        if outcome.token != self.latest {
            tracing::debug!(path = %outcome.path.display(), "discarding stale file read");
            return false;
        }
        match outcome.result {
            Ok(text) => {
                tracing::debug!(path = %outcome.path.display(), bytes = text.len(), "file staged");
                self.staged = text;
                self.staged_path = Some(outcome.path);
                self.error = None;
            }
            Err(e) => self.record_read_failure(&e),
        }
        true
    }

    /// Parse the staged text and publish it. On failure the store is untouched
    /// and the dialog stays open with the error recorded.
    pub fn confirm(&mut self, store: &mut FunnelStore) -> Result<Arc<FunnelDocument>, UploadError> {
        if self.staged.is_empty() {
            return Err(UploadError::NothingStaged);
        }
        let doc = match parse_funnel(&self.staged) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(file = %self.file_name, error = %e, "rejected funnel upload");
                self.error = Some(e.to_string());
                return Err(e);
            }
        };
        let origin = self.staged_path.take();
        let published = store.publish(doc, origin);
        self.invalidate_staging();
        self.error = None;
        self.open = false;
        Ok(published)
    }

    /// Close without uploading.
    pub fn cancel(&mut self) {
        self.invalidate_staging();
        self.error = None;
        self.open = false;
    }

    /// Select, read and confirm `path` in one go.
    pub fn upload_path_blocking(
        &mut self,
        path: &Path,
        store: &mut FunnelStore,
    ) -> Result<Arc<FunnelDocument>, UploadError> {
        let token = self.select_file(path);
        match read_text_file(path) {
            Ok(text) => {
                self.apply_read(ReadOutcome {
                    token,
                    path: path.to_path_buf(),
                    result: Ok(text),
                });
            }
            Err(e) => {
                self.record_read_failure(&e);
                return Err(e);
            }
        }
        self.confirm(store)
    }

    fn record_read_failure(&mut self, e: &UploadError) {
        tracing::warn!(error = %e, "file read failed");
        self.staged.clear();
        self.staged_path = None;
        self.error = Some(e.to_string());
    }

    // Drops staged content and makes any in-flight read stale.
    fn invalidate_staging(&mut self) {
        self.latest = SelectionToken(self.latest.0 + 1);
        self.file_name.clear();
        self.staged.clear();
        self.staged_path = None;
    }
}

/// Read a file fully as UTF-8 text.
pub fn read_text_file(path: &Path) -> Result<String, UploadError> {
    let bytes = fs::read(path).map_err(|source| UploadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| UploadError::NotUtf8 {
        path: path.to_path_buf(),
    })
}

/// Parse raw upload text and apply the presence checks (name and at least one page).
pub fn parse_funnel(raw: &str) -> Result<FunnelDocument, UploadError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let doc: FunnelDocument = serde_json::from_str(raw)?;
    if doc.name.is_empty() {
        return Err(UploadError::MissingName);
    }
    if doc.pages.is_empty() {
        return Err(UploadError::NoPages);
    }
    Ok(doc)
}
