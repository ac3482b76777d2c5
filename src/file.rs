// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::config::options::{ExportFormat, ExportOptions};
use crate::core::sanitize::sanitize_filename;
use crate::csv::{parse_rows, rows_to_string, sniff_delim};
use crate::error::GradeResult;
use crate::transcript::{GradeAssignment, Transcript};

/// Render the transcript in `format`. HTML is the whole document with the
/// table rewritten; CSV/TSV are the table's rows.
pub fn to_export_string(t: &Transcript, format: ExportFormat, include_headers: bool) -> String {
    match format.delim() {
        None => t.to_html(),
        Some(sep) => {
            let (headers, rows) = t.export_rows();
            let headers = include_headers.then_some(headers.as_slice());
            rows_to_string(&rows, headers, sep)
        }
    }
}

/// Write one export file based on ExportOptions. Returns the final path written to.
pub fn write_export(t: &Transcript, export: &ExportOptions) -> GradeResult<PathBuf> {
    let path = export.out_path();
    write_export_to(t, export.format, export.include_headers, &path)?;
    Ok(path)
}

pub fn write_export_to(t: &Transcript, format: ExportFormat, include_headers: bool, path: &Path) -> GradeResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, to_export_string(t, format, include_headers))?;
    logf!("[export] wrote {} ({})", path.display(), format);
    Ok(())
}

/// Grade selections from a CSV/TSV file of `code,grade[,semester]` rows.
pub fn read_grade_file(path: &Path) -> GradeResult<Vec<GradeAssignment>> {
    let text = fs::read_to_string(path)?;
    let rows = parse_rows(&text, sniff_delim(&text));
    GradeAssignment::from_rows(&rows)
}

/// Default export file name for an input (`"My Result.html"` → `"My_Result.csv"`).
pub fn default_filename(input: &Path, format: ExportFormat) -> String {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    join!(&sanitize_filename(&stem, "transcript"), ".", format.ext())
}

pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> io::Result<PathBuf> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(user_o) || p.is_dir() {
        ensure_directory(&p)?; Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(s: &str) -> bool {
    s.ends_with('/') || s.ends_with('\\')
}
