// src/gui/components/export_bar.rs

use eframe::egui;

use crate::config::options::ExportFormat;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    {
        let export = &mut app.state.options.export;

        // --- Format + Include headers ---
        let prev_fmt = export.format;
        ui.horizontal(|ui| {
            ui.label("Format:");
            for f in ExportFormat::ALL {
                ui.selectable_value(&mut export.format, f, f.to_string());
            }
            if export.format != ExportFormat::Html {
                let before = export.include_headers;
                ui.checkbox(&mut export.include_headers, "Include headers");
                if export.include_headers != before {
                    logf!("UI: Include_headers → {}", export.include_headers);
                }
            }
        });

        if export.format != prev_fmt {
            logf!("UI: Export format → {:?}", export.format);
            if !app.out_path_dirty {
                app.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }
    }

    // --- Output field ---
    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }
    });

    // --- Actions (Copy / Export) ---
    ui.horizontal(|ui| {
        let loaded = app.transcript.is_some();
        if ui.add_enabled(loaded, egui::Button::new("Copy")).clicked() {
            actions::copy::copy(app, ui.ctx());
        }
        if ui.add_enabled(loaded, egui::Button::new("Export")).clicked() {
            actions::export::export(app);
        }
    });
}
