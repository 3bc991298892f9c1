use super::FileUploader;
use crate::upload::Notice;
use eframe::egui::{self, Color32};
use log::debug;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

impl FileUploader {
    pub fn pick_file(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title("Select file")
            .set_directory(".")
            .pick_file()
        else {
            debug!("File selection cancelled");
            return;
        };
        self.start_upload(path);
    }

    pub fn render(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.state.status_text);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_enabled_ui(self.state.button_enabled, |ui| {
                    if ui.button("Select file...").clicked() {
                        self.pick_file();
                    }
                });

                ui.add_space(8.0);

                let progress_bar = egui::ProgressBar::new(self.state.get_progress_fraction())
                    .text(self.state.get_progress_text())
                    .animate(false)
                    .fill(Color32::from_rgb(161, 89, 225));
                ui.add(progress_bar);
            });
        });
    }
}

/// Blocks until the user dismisses the dialog.
pub(super) fn show_notice(notice: &Notice) {
    let level = match notice {
        Notice::Info { .. } => MessageLevel::Info,
        Notice::Warning { .. } => MessageLevel::Warning,
    };

    MessageDialog::new()
        .set_level(level)
        .set_title(notice.title())
        .set_description(notice.message())
        .set_buttons(MessageButtons::Ok)
        .show();
}
