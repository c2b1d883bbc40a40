//! Funnel preview core: upload staging, the shared document store, block
//! rendering into a view model, and pagination/viewport state.
//!
//! Nothing here depends on a UI toolkit; `tools/funnel-preview-gui` paints
//! the [`render::PageView`] produced by [`preview::PreviewController`].

pub mod assets;
pub mod color;
pub mod config;
pub mod error;
pub mod pager;
pub mod preview;
pub mod render;
pub mod store;
pub mod upload;
pub mod viewport;

pub use error::{ConfigError, UploadError};
pub use preview::PreviewController;
pub use store::FunnelStore;
pub use upload::UploadDialog;
