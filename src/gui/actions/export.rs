// src/gui/actions/export.rs
use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        logf!(
            "Export: Out path set → {}",
            app.state.options.export.out_path().display()
        );
        app.out_path_dirty = false;
        app.out_path_text = app.state.options.export.out_path().to_string_lossy().into_owned();
    }

    let Some(t) = app.transcript.as_ref() else {
        logd!("Export: Clicked, but there's nothing to export");
        app.status("Nothing to export");
        return;
    };

    let msg = match file::write_export(t, &app.state.options.export) {
        Ok(path) => {
            logf!("Export: OK {}", path.display());
            format!("Exported {}", path.display())
        }
        Err(e) => {
            loge!("Export: Error: {}", e);
            format!("Export error: {e}")
        }
    };
    app.status(msg);
}
