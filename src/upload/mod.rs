mod error;
mod multipart;
mod progress;
mod task;
mod types;

#[cfg(test)]
pub(crate) mod test_server;

pub use task::UploadTask;
pub use types::{Notice, UploadEvent, UploadOutcome};
