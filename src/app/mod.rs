mod state;
mod ui;

use crate::config::UploaderConfig;
use crate::upload::{Notice, UploadEvent, UploadOutcome, UploadTask};
use eframe::{egui, App};
use log::{error, info, warn};
pub use state::{UiState, UploadPhase};
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, Receiver, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

/// The one upload allowed at a time.
#[derive(Debug)]
struct ActiveUpload {
    file_path: PathBuf,
    events: Receiver<UploadEvent>,
    worker: Option<JoinHandle<()>>,
    result_seen: bool,
}

pub struct FileUploader {
    config: UploaderConfig,
    state: UiState,
    active: Option<ActiveUpload>,
}

impl FileUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing file uploader");
        Self::with_config(UploaderConfig::default())
    }

    pub fn with_config(config: UploaderConfig) -> Self {
        Self {
            config,
            state: UiState::default(),
            active: None,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn phase(&self) -> UploadPhase {
        if self.active.is_some() {
            UploadPhase::Uploading
        } else {
            UploadPhase::Idle
        }
    }

    /// Starts a background upload of `file_path`. Returns `false` without
    /// touching anything if another upload is still running.
    pub fn start_upload(&mut self, file_path: PathBuf) -> bool {
        if let Some(active) = &self.active {
            warn!(
                "Ignoring upload of {}: {} is still uploading",
                file_path.display(),
                active.file_path.display()
            );
            return false;
        }

        info!("Starting upload of {}", file_path.display());
        self.state.begin(&file_path);

        let (sender, receiver) = std_mpsc::channel();
        let task = UploadTask::new(file_path, self.config.clone());
        let file_path = task.file_path().to_path_buf();

        let worker = match task.spawn(sender.clone()) {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("Failed to start upload worker: {}", e);
                let outcome = UploadOutcome::Failed(format!("Failed to start upload: {}", e));
                sender.send(UploadEvent::Result(outcome)).unwrap_or_default();
                sender.send(UploadEvent::Finished).unwrap_or_default();
                None
            }
        };

        self.active = Some(ActiveUpload {
            file_path,
            events: receiver,
            worker,
            result_seen: false,
        });
        true
    }

    /// Applies every event the worker has sent so far, in order, without
    /// blocking. `on_notice` is called when the upload result arrives.
    pub fn poll_events(&mut self, mut on_notice: impl FnMut(&Notice)) {
        while let Some(event) = self.next_event() {
            match event {
                UploadEvent::Total(total) => self.on_progress_total(total),
                UploadEvent::Progress(sent) => self.on_progress_update(sent),
                UploadEvent::Result(outcome) => self.on_result(&outcome, &mut on_notice),
                UploadEvent::Finished => self.on_task_finished(),
            }
        }
    }

    fn next_event(&mut self) -> Option<UploadEvent> {
        let active = self.active.as_mut()?;
        match active.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // The worker went away without finishing its sequence.
                warn!(
                    "Upload worker for {} stopped without reporting back",
                    active.file_path.display()
                );
                if active.result_seen {
                    Some(UploadEvent::Finished)
                } else {
                    Some(UploadEvent::Result(UploadOutcome::Failed(
                        "Upload stopped unexpectedly".to_string(),
                    )))
                }
            }
        }
    }

    fn on_progress_total(&mut self, total: u64) {
        self.state.set_total(total);
    }

    fn on_progress_update(&mut self, sent: u64) {
        self.state.set_sent(sent);
    }

    fn on_result(&mut self, outcome: &UploadOutcome, on_notice: &mut impl FnMut(&Notice)) {
        if let Some(active) = self.active.as_mut() {
            active.result_seen = true;
        }

        match outcome {
            UploadOutcome::Response { body, .. } if outcome.is_success() => {
                info!("Upload done: {}", body)
            }
            UploadOutcome::Response { status, .. } => warn!("Upload rejected with status {}", status),
            UploadOutcome::Failed(reason) => warn!("Upload failed: {}", reason),
        }
        on_notice(&outcome.to_notice());
    }

    fn on_task_finished(&mut self) {
        self.state.finish();

        if let Some(active) = self.active.take() {
            if let Some(worker) = active.worker {
                if worker.join().is_err() {
                    error!("Upload worker for {} panicked", active.file_path.display());
                }
            }
            info!("Upload of {} finished", active.file_path.display());
        }
    }
}

impl App for FileUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events(ui::show_notice);
        if self.phase() == UploadPhase::Uploading {
            // Worker events don't wake the event loop on their own.
            ctx.request_repaint_after(Duration::from_millis(50));
        }
        self.render(ctx);
    }
}
