// src/gui/app.rs
use std::{error::Error, path::PathBuf};

use eframe::egui;

use crate::config::state::AppState;
use crate::engine::GradeSelection;
use crate::transcript::Transcript;

pub fn run(options: eframe::NativeOptions, initial: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Grade Calculator",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default(), initial)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    pub transcript: Option<Transcript>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    /// Grade picked in the table this frame; applied after drawing.
    pub pending: Option<(usize, GradeSelection)>,
}

impl App {
    pub fn new(mut state: AppState, initial: Option<PathBuf>) -> Self {
        let out_path_text = state.options.export.out_path().to_string_lossy().into();
        if let Some(p) = &initial {
            state.gui.input_text = p.to_string_lossy().into_owned();
        }

        let mut app = Self {
            state,
            transcript: None,
            out_path_text,
            out_path_dirty: false,
            pending: None,
        };
        if initial.is_some() {
            super::actions::load::load(&mut app);
        }
        logf!("Init: input={:?}", initial);
        app
    }

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.state.gui.status = msg.into();
    }

    /// Apply the grade picked in the table, if any. This is the only place a
    /// GUI interaction triggers a recompute.
    fn apply_pending(&mut self) {
        let Some((row, sel)) = self.pending.take() else { return };
        let Some(t) = self.transcript.as_mut() else { return };
        let msg = match t.select_grade(row, sel) {
            Ok(rc) => {
                let n = rc.diagnostics.len();
                if n == 0 {
                    format!("Row {} → {}", row + 1, sel)
                } else {
                    format!("Row {} → {} ({} warnings)", row + 1, sel, n)
                }
            }
            Err(e) => {
                loge!("Select: {}", e);
                format!("Error: {e}")
            }
        };
        self.status(msg);
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.state.gui.status.as_str());
        });

        if self.state.gui.show_summary && self.transcript.is_some() {
            egui::SidePanel::right("summary")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui| {
                    crate::gui::components::summary_panel::draw(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::toolbar::draw(ui, self);

            ui.separator();

            crate::gui::components::export_bar::draw(ui, self);

            ui.separator();

            crate::gui::components::transcript_table::draw(ui, self);
        });

        self.apply_pending();
    }
}
