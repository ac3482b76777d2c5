// src/gui/actions/copy.rs
use eframe::egui;

use crate::{config::options::ExportFormat, file, gui::app::App};

/// Table as TSV to the clipboard.
pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let Some(t) = app.transcript.as_ref() else {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    };

    let txt = file::to_export_string(t, ExportFormat::Tsv, app.state.options.export.include_headers);
    logf!("Copy: rows={}, bytes={}", t.table().rows.len(), txt.len());

    ui_ctx.copy_text(txt);
    app.status("Copied to clipboard");
}
