// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Transcript path as typed in the toolbar
    pub input_text: String,
    pub show_summary: bool,
    pub status: String,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            input_text: s!(),
            show_summary: true,
            status: s!("Open a saved transcript page to start."),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
