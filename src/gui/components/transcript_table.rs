// src/gui/components/transcript_table.rs
//
// Every table row as parsed, with a grade picker in course rows.
// Purely a view: a picked grade is parked in `app.pending`.

use eframe::egui::{self, RichText};
use egui_extras::{Column, TableBuilder};

use crate::engine::{Grade, GradeSelection};
use crate::gui::app::App;
use crate::transcript::RowKind;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(t) = app.transcript.as_ref() else {
        ui.weak("No transcript loaded.");
        return;
    };
    let pending = &mut app.pending;

    let table = t.table();
    let cols = table.max_cells();
    let layout = t.layout();

    // Ensure scroll bars allocate space (not floating over content)
    ui.style_mut().spacing.scroll.floating = false;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .min_scrolled_height(0.0)
        .column(Column::exact(36.0))
        .column(Column::exact(60.0))
        .columns(Column::auto().at_least(40.0).clip(true), cols)
        .header(22.0, |mut header| {
            header.col(|ui| { ui.strong("#"); });
            header.col(|ui| { ui.strong("Sem"); });
            for c in 0..cols {
                header.col(|ui| { ui.strong(format!("Col {}", c + 1)); });
            }
        })
        .body(|body| {
            body.rows(22.0, table.rows.len(), |mut row| {
                let i = row.index();
                let kind = t.row_kind(i);
                let grade_cell = match kind {
                    RowKind::Course => layout.grade_cell_index(&table.rows[i]),
                    _ => None,
                };
                let cells = &table.rows[i].cells;

                row.col(|ui| { ui.weak(format!("{}", i + 1)); });
                row.col(|ui| {
                    if let Some(s) = t.semester_of_row(i) {
                        ui.label(s.to_string());
                    }
                });

                for c in 0..cols {
                    row.col(|ui| {
                        let Some(cell) = cells.get(c) else { return };
                        if grade_cell == Some(c) {
                            let current = t.grade_at(i).unwrap_or_default();
                            let mut sel = current;
                            egui::ComboBox::from_id_salt(("grade", i))
                                .width(56.0)
                                .selected_text(sel.label())
                                .show_ui(ui, |ui| {
                                    ui.selectable_value(&mut sel, GradeSelection::Unselected, GradeSelection::UNSELECTED_LABEL);
                                    for g in Grade::ALL {
                                        ui.selectable_value(&mut sel, GradeSelection::Selected(g), g.label());
                                    }
                                });
                            if sel != current {
                                *pending = Some((i, sel));
                            }
                            return;
                        }

                        let text = RichText::new(cell.text());
                        let text = match kind {
                            RowKind::Header | RowKind::Gpa => text.strong(),
                            RowKind::Total => text.italics(),
                            _ => text,
                        };
                        let text = if cell.is_dirty() { text.color(ui.visuals().warn_fg_color) } else { text };
                        ui.label(text);
                    });
                }
            });
        });
}
