use crate::utils::byte_size::ByteSize;
use derivative::Derivative;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressRange {
    pub min: u64,
    pub max: u64,
    pub value: u64,
}

/// Everything the window shows. Only the controller mutates it.
#[derive(Derivative, Debug, Clone, PartialEq, Eq)]
#[derivative(Default)]
pub struct UiState {
    #[derivative(Default(value = "true"))]
    pub button_enabled: bool,
    pub status_text: String,
    pub progress: ProgressRange,
}

impl UiState {
    pub fn begin(&mut self, file_path: &Path) {
        self.button_enabled = false;
        self.status_text = format!("File: {}", file_path.display());
        self.progress = ProgressRange::default();
    }

    pub fn set_total(&mut self, total: u64) {
        self.progress.min = 0;
        self.progress.max = total;
    }

    pub fn set_sent(&mut self, sent: u64) {
        self.progress.value = sent;
    }

    pub fn finish(&mut self) {
        self.status_text.clear();
        self.button_enabled = true;
    }

    pub fn get_progress_fraction(&self) -> f32 {
        let ProgressRange { min, max, value } = self.progress;
        if max <= min {
            return 0.0;
        }
        let done = value.saturating_sub(min) as f64 / (max - min) as f64;
        done.clamp(0.0, 1.0) as f32
    }

    pub fn get_progress_text(&self) -> String {
        if self.progress.max == 0 {
            return String::new();
        }
        format!(
            "{} / {}",
            ByteSize::format(self.progress.value.min(self.progress.max)),
            ByteSize::format(self.progress.max)
        )
    }
}
