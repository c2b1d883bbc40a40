use std::path::PathBuf;

/// Failures while staging or confirming an uploaded funnel file.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("could not read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid UTF-8 text", .path.display())]
    NotUtf8 { path: PathBuf },
    #[error("invalid funnel JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("funnel data has no name")]
    MissingName,
    #[error("funnel data has no pages")]
    NoPages,
    #[error("no file staged for upload")]
    NothingStaged,
}

impl UploadError {
    /// True for failures of the file read itself, as opposed to its contents.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, UploadError::FileRead { .. } | UploadError::NotUtf8 { .. })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{flag} requires a value")]
    MissingValue { flag: String },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("only one funnel file may be given, got {first} and {second}")]
    ExtraPositional { first: String, second: String },
}
