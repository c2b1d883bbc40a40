use crate::assets::AssetResolver;
use crate::pager::Pager;
use crate::render::{render_page, PageView};
use crate::store::FunnelStore;
use crate::viewport::Viewport;

/// Presentation state of the preview area: page position, device size and
/// the rendered view of the current page.
#[derive(Debug, Default)]
pub struct PreviewController {
    pager: Pager,
    viewport: Viewport,
    seen_revision: u64,
    cached: Option<PageView>,
    cached_key: Option<(u64, usize)>,
}

impl PreviewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Pick up a newly published document. Returns true when the document changed,
    /// in which case the pager is back on the first page.
    pub fn sync(&mut self, store: &FunnelStore) -> bool {
        if store.revision() == self.seen_revision {
            return false;
        }
        self.seen_revision = store.revision();
        let pages = store.get().map(|d| d.page_count()).unwrap_or(0);
        self.pager.reset(pages);
        self.cached = None;
        self.cached_key = None;
        true
    }

    pub fn go_previous(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn go_next(&mut self) -> bool {
        self.pager.next()
    }

    /// Rendered view of the current page, re-rendered only when the page or document changes.
    pub fn page_view(&mut self, store: &FunnelStore) -> Option<&PageView> {
        self.sync(store);
        let doc = store.get()?;
        let key = (self.seen_revision, self.pager.current());
        if self.cached_key != Some(key) {
            let assets = AssetResolver::for_origin(store.origin());
            self.cached = render_page(doc, self.pager.current(), &assets);
            self.cached_key = Some(key);
        }
        self.cached.as_ref()
    }
}
