// src/gui/components/summary_panel.rs

use eframe::egui;

use crate::engine::engine::GPA_DIGITS;
use crate::engine::gpa::{fmt_total, to_fixed};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(t) = app.transcript.as_ref() else { return };

    ui.heading(t.layout().label);
    ui.add_space(4.0);

    let gpa = |v: Option<f64>| v.map(|v| to_fixed(v, GPA_DIGITS)).unwrap_or_else(|| s!("–"));

    egui::Grid::new("summary_grid")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui| {
            ui.strong("Sem");
            ui.strong("Credit");
            ui.strong("Points");
            ui.strong("SGPA");
            ui.strong("CGPA");
            ui.end_row();

            for s in t.semesters() {
                ui.label(s.index.to_string());
                ui.label(fmt_total(s.totals.native_credit, s.totals.carried_credit));
                ui.label(fmt_total(s.totals.native_points, s.totals.carried_points));
                ui.label(gpa(s.sgpa))
                    .on_hover_text(format!("published {}", s.published_sgpa.as_deref().unwrap_or("–")));
                ui.label(gpa(s.cgpa))
                    .on_hover_text(format!("published {}", s.published_cgpa.as_deref().unwrap_or("–")));
                ui.end_row();
            }
        });

    let diags = t.diagnostics();
    if !diags.is_empty() {
        ui.add_space(8.0);
        ui.collapsing(format!("Warnings ({})", diags.len()), |ui| {
            for d in diags {
                ui.small(d.to_string());
            }
        });
    }
}
