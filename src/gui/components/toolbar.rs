// src/gui/components/toolbar.rs
//
// Input path, layout choice, Load.

use eframe::egui;

use crate::config::options::LayoutChoice;
use crate::gui::{actions, app::App};
use crate::specs::CarriedPoints;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Transcript:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.input_text)
                .hint_text("saved result page (.html)")
                .desired_width(380.0)
                .font(egui::TextStyle::Monospace),
        );
        let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let prev = app.state.options.layout;
        egui::ComboBox::from_id_salt("layout_choice")
            .selected_text(prev.label())
            .show_ui(ui, |ui| {
                for choice in LayoutChoice::ALL {
                    ui.selectable_value(&mut app.state.options.layout, choice, choice.label());
                }
            });
        if app.state.options.layout != prev {
            logf!("UI: Layout → {:?}", app.state.options.layout);
        }

        if ui.button("Load").clicked() || enter {
            actions::load::load(app);
        }
    });

    ui.horizontal(|ui| {
        let mut accumulate = app.state.options.carried_points == Some(CarriedPoints::Accumulate);
        if ui
            .checkbox(&mut accumulate, "Add up carried retake points")
            .on_hover_text("Off: each carried retake replaces the previous one's points")
            .changed()
        {
            app.state.options.carried_points = accumulate.then_some(CarriedPoints::Accumulate);
            logf!("UI: carried points → {:?}", app.state.options.carried_points);
            if let Some(t) = app.transcript.take() {
                let policy = app.state.options.carried_points.unwrap_or(t.layout().carried_points);
                app.transcript = Some(t.with_carried_points(policy));
            }
        }
        ui.checkbox(&mut app.state.gui.show_summary, "Summary");
    });
}
