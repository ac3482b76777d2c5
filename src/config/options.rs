// src/config/options.rs
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::consts::*;
use crate::specs::{CarriedPoints, LayoutKind};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub layout: LayoutChoice,
    /// Overrides the layout's own carried-points policy.
    pub carried_points: Option<CarriedPoints>,
    pub export: ExportOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutChoice {
    #[default]
    Auto,
    Forced(LayoutKind),
}

impl LayoutChoice {
    pub const ALL: [LayoutChoice; 3] = [
        LayoutChoice::Auto,
        LayoutChoice::Forced(LayoutKind::SemesterWise),
        LayoutChoice::Forced(LayoutKind::AllPrevious),
    ];

    pub fn label(self) -> &'static str {
        match self {
            LayoutChoice::Auto => "Auto-detect",
            LayoutChoice::Forced(kind) => kind.layout().label,
        }
    }
}

impl FromStr for LayoutChoice {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(LayoutChoice::Auto),
            "semester-wise" | "semester" => Ok(LayoutChoice::Forced(LayoutKind::SemesterWise)),
            "all-previous" | "all" => Ok(LayoutChoice::Forced(LayoutKind::AllPrevious)),
            other => Err(format!("unknown layout '{other}' (auto, semester-wise, all-previous)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// The source document with the table rewritten in place.
    #[default]
    Html,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Html, ExportFormat::Csv, ExportFormat::Tsv];

    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Html => "html", ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    /// Field separator; `None` for HTML.
    pub fn delim(&self) -> Option<char> {
        match self { ExportFormat::Html => None, ExportFormat::Csv => Some(','), ExportFormat::Tsv => Some('\t') }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ext().to_ascii_uppercase())
    }
}

impl FromStr for ExportFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(format!("unknown format '{other}' (html, csv, tsv)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    /// CSV/TSV: emit a `Kind,Semester,Cell 1,…` header line.
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Html,
            out_path: OutputPath::default(),
            include_headers: false,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        path.push(join!(&*stem, ".", self.format.ext()));
        path
    }

    /// Parse GUI/CLI text into dir + stem. Ignores a pasted extension; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }

    /// Default the file stem to the input's (`result.html` → `out/result.<ext>`).
    pub fn set_stem_from(&mut self, input: &Path) {
        if let Some(stem) = input.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}
