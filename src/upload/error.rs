use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to open {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read size of {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a regular file", path.display())]
    NotAFile { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("Failed to send request: {0}")]
    Transport(reqwest::Error),

    #[error("Failed to read response: {0}")]
    ResponseBody(reqwest::Error),
}
