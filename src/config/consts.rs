// src/config/consts.rs

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "transcript";

// Extraction
/// Rows walked past a semester header before giving up on finding its end.
pub const MAX_BLOCK_ROWS: usize = 30;

// GUI
pub const WINDOW_W: u32 = 1100;
pub const WINDOW_H: u32 = 700;
