// src/gui/actions/load.rs
use std::path::PathBuf;

use crate::gui::app::App;
use crate::transcript::Transcript;

pub fn load(app: &mut App) {
    let text = app.state.gui.input_text.trim().to_string();
    if text.is_empty() {
        app.status("Enter the path of a saved transcript page");
        return;
    }
    let path = PathBuf::from(&text);
    let opts = &app.state.options;

    let msg = match Transcript::load(&path, opts.layout) {
        Ok(t) => {
            let t = match opts.carried_points {
                Some(policy) => t.with_carried_points(policy),
                None => t,
            };
            let msg = format!(
                "Loaded {} ({}): {} semesters, {} courses",
                path.display(),
                t.layout().label,
                t.semesters().len(),
                t.model().courses.len()
            );
            logf!("Load: {}", msg);

            app.state.options.export.set_stem_from(&path);
            if !app.out_path_dirty {
                app.out_path_text = app.state.options.export.out_path().to_string_lossy().into_owned();
            }
            app.transcript = Some(t);
            msg
        }
        Err(e) => {
            loge!("Load: {}: {}", path.display(), e);
            format!("Could not load {}: {e}", path.display())
        }
    };
    app.status(msg);
}
