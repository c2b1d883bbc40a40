use std::path::{Path, PathBuf};

const URI_SCHEMES: [&str; 5] = ["http://", "https://", "file://", "data:", "bytes://"];

/// Turns image `src` values into URIs the image loaders understand.
///
/// Relative paths are resolved against the directory of the uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetResolver {
    base_dir: Option<PathBuf>,
}

impl AssetResolver {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Resolver for a document read from `origin`.
    pub fn for_origin(origin: Option<&Path>) -> Self {
        Self::new(origin.and_then(Path::parent).map(Path::to_path_buf))
    }

    pub fn resolve(&self, src: &str) -> String {
        let src = src.trim();
        if src.is_empty() || URI_SCHEMES.iter().any(|s| src.starts_with(s)) {
            return src.to_string();
        }
        let path = Path::new(src);
        if path.is_absolute() {
            return format!("file://{}", path.display());
        }
        match &self.base_dir {
            Some(dir) => format!("file://{}", dir.join(path).display()),
            None => src.to_string(),
        }
    }
}
