// src/gui/components/mod.rs
pub mod export_bar;
pub mod summary_panel;
pub mod toolbar;
pub mod transcript_table;
