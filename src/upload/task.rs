use crate::config::UploaderConfig;
use crate::upload::error::UploadError;
use crate::upload::multipart::MultipartBody;
use crate::upload::progress::{ProgressReader, ReadFailure};
use crate::upload::types::{UploadEvent, UploadOutcome};
use log::{error, info, trace};
use reqwest::blocking::{Body, Client};
use reqwest::header::CONTENT_TYPE;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

/// One file upload, run off the UI thread.
#[derive(Debug, Clone)]
pub struct UploadTask {
    file_path: PathBuf,
    config: UploaderConfig,
}

impl UploadTask {
    pub fn new(file_path: PathBuf, config: UploaderConfig) -> Self {
        Self { file_path, config }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn spawn(self, events: Sender<UploadEvent>) -> std::io::Result<JoinHandle<()>> {
        std::thread::Builder::new()
            .name("upload-worker".to_string())
            .spawn(move || self.run(&events))
    }

    /// Performs the upload and always finishes with `Result` then `Finished`,
    /// whatever went wrong on the way.
    pub fn run(&self, events: &Sender<UploadEvent>) {
        let outcome = match self.upload(events) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Upload of {} failed: {}", self.file_path.display(), e);
                UploadOutcome::Failed(e.to_string())
            }
        };

        events.send(UploadEvent::Result(outcome)).unwrap_or_default();
        events.send(UploadEvent::Finished).unwrap_or_default();
    }

    fn upload(&self, events: &Sender<UploadEvent>) -> Result<UploadOutcome, UploadError> {
        let body = MultipartBody::from_path(&self.file_path)?;
        let total = body.len();
        let content_type = body.content_type();

        info!(
            "Uploading {} ({} bytes encoded) to {}",
            self.file_path.display(),
            total,
            self.config.upload_url
        );
        events.send(UploadEvent::Total(total)).unwrap_or_default();

        let client = Client::builder()
            .user_agent(self.config.user_agent.clone())
            .connect_timeout(self.config.connect_timeout)
            .timeout(self.config.request_timeout)
            .build()
            .map_err(UploadError::Client)?;

        let progress_events = events.clone();
        let reader = ProgressReader::new(
            body.into_reader(),
            total,
            Box::new(move |sent| {
                trace!("Sent {}/{} bytes", sent, total);
                progress_events
                    .send(UploadEvent::Progress(sent))
                    .unwrap_or_default();
            }),
        );
        let read_failure = reader.failure();

        let response = client
            .post(&self.config.upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(Body::sized(reader, total))
            .send()
            .map_err(|e| self.send_error(e, &read_failure))?;

        let status = response.status().as_u16();
        let body = response.text().map_err(UploadError::ResponseBody)?;
        info!("Upload answered with status {}", status);

        Ok(UploadOutcome::Response { status, body })
    }

    /// A failed body read surfaces from reqwest as a generic transport
    /// error; report the file problem instead when there was one.
    fn send_error(&self, e: reqwest::Error, read_failure: &ReadFailure) -> UploadError {
        match read_failure.lock().ok().and_then(|mut slot| slot.take()) {
            Some(source) => UploadError::ReadFile {
                path: self.file_path.clone(),
                source,
            },
            None => UploadError::Transport(e),
        }
    }
}
