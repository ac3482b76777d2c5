// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::path::{Path, PathBuf};

use eframe::egui::ViewportBuilder;
use grade_calc::config::consts::{LOG_FILE, STORE_DIR, WINDOW_H, WINDOW_W};
use grade_calc::gui;

fn main() {
    if let Err(e) = grade_calc::log::init_file(&Path::new(STORE_DIR).join(LOG_FILE)) {
        eprintln!("Log init failed: {}", e);
    }

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Grade Calculator")
            .with_inner_size([WINDOW_W as f32, WINDOW_H as f32]),
        ..Default::default()
    };

    // optional transcript path to open right away
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    if let Err(e) = gui::run(options, initial) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
