use std::path::{Path, PathBuf};
use std::sync::Arc;

use funnel_model::FunnelDocument;

/// Holder of the funnel currently being previewed.
///
/// Owned by the application and lent to every view that needs the document.
/// Only [`crate::upload::UploadDialog::confirm`] publishes into it.
#[derive(Debug, Default)]
pub struct FunnelStore {
    current: Option<Arc<FunnelDocument>>,
    origin: Option<PathBuf>,
    revision: u64,
}

impl FunnelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&Arc<FunnelDocument>> {
        self.current.as_ref()
    }

    /// File the current document was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Bumped on every publish, starting from 0 for the empty store.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn publish(
        &mut self,
        doc: FunnelDocument,
        origin: Option<PathBuf>,
    ) -> Arc<FunnelDocument> {
        let doc = Arc::new(doc);
        self.current = Some(Arc::clone(&doc));
        self.origin = origin;
        self.revision += 1;
        tracing::info!(
            name = %doc.name,
            pages = doc.page_count(),
            revision = self.revision,
            "funnel published"
        );
        doc
    }
}
