#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod upload;
mod utils;

use eframe::egui;
use std::io::Write;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([300.0, 100.0])
            .with_min_inner_size([300.0, 100.0]),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "File uploader",
        options,
        Box::new(|cc| Box::new(app::FileUploader::new(cc))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
