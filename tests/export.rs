// tests/export.rs
//
// Export paths, CSV/TSV round trips and files on disk.
//
use std::fs;
use std::path::{Path, PathBuf};

use grade_calc::config::options::{ExportFormat, ExportOptions, LayoutChoice};
use grade_calc::csv::{parse_rows, rows_to_string, sniff_delim};
use grade_calc::file::{self, default_filename, ensure_directory, resolve_single_out_path, to_export_string};
use grade_calc::Transcript;

const SEMESTER_WISE: &str = include_str!("fixtures/semester_wise.html");

fn norm(p: &Path) -> PathBuf { p.components().collect() }

fn loaded() -> Transcript {
    Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto).unwrap()
}

#[test]
fn default_out_path_follows_format() {
    let mut opts = ExportOptions::default();
    assert_eq!(norm(&opts.out_path()), norm(Path::new("out/transcript.html")));

    opts.format = ExportFormat::Csv;
    assert_eq!(norm(&opts.out_path()), norm(Path::new("out/transcript.csv")));
}

#[test]
fn pasted_extension_is_replaced_by_the_format() {
    let mut opts = ExportOptions::default();
    opts.set_path("reports/mine.txt");
    opts.format = ExportFormat::Tsv;
    assert_eq!(norm(&opts.out_path()), norm(Path::new("reports/mine.tsv")));

    opts.set_stem_from(Path::new("downloads/result.html"));
    assert_eq!(norm(&opts.out_path()), norm(Path::new("reports/result.tsv")));
}

#[test]
fn default_filenames_are_sanitized() {
    assert_eq!(default_filename(Path::new("in/My Result.html"), ExportFormat::Csv), "My_Result.csv");
    assert_eq!(default_filename(Path::new(""), ExportFormat::Html), "transcript.html");
}

#[test]
fn single_out_path_resolution() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(resolve_single_out_path("", "a.csv").unwrap(), PathBuf::from("a.csv"));

    let hint = format!("{}/sub/", dir.path().display());
    let p = resolve_single_out_path(&hint, "a.csv").unwrap();
    assert!(p.ends_with("sub/a.csv"));
    assert!(dir.path().join("sub").is_dir());

    let explicit = dir.path().join("b.csv");
    let p = resolve_single_out_path(explicit.to_str().unwrap(), "a.csv").unwrap();
    assert_eq!(norm(&p), norm(&explicit));
}

#[test]
fn ensure_directory_rejects_files() {
    let dir = tempfile::tempdir().unwrap();
    let f = dir.path().join("file");
    fs::write(&f, "x").unwrap();
    assert!(ensure_directory(&f).is_err());
    assert!(ensure_directory(&dir.path().join("a/b")).is_ok());
}

#[test]
fn csv_quoting_round_trip() {
    let rows = vec![vec![
        "a,b".to_string(),
        "say \"hi\"".to_string(),
        "x".to_string(),
    ]];
    let text = rows_to_string(&rows, None, ',');
    assert_eq!(text, "\"a,b\",\"say \"\"hi\"\"\",x\n");
    assert_eq!(parse_rows(&text, ','), rows);
}

#[test]
fn csv_parse_is_tolerant() {
    assert_eq!(
        parse_rows("a,b\r\n\r\nc,\"d\ne\"", ','),
        vec![vec!["a", "b"], vec!["c", "d\ne"]]
    );
    assert_eq!(sniff_delim("code\tgrade\nX\tA\n"), '\t');
    assert_eq!(sniff_delim("code,grade\n"), ',');
}

#[test]
fn csv_export_lists_every_row() {
    let t = loaded();
    let text = to_export_string(&t, ExportFormat::Csv, true);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Kind,Semester,Cell 1,Cell 2,Cell 3,Cell 4"));
    assert_eq!(lines.next(), Some("header,1,Spring 2021 Semester"));
    assert_eq!(lines.next(), Some("gpa,1,SGPA: 3.56 (3.81),CGPA: 3.56 (3.81)"));
    assert!(text.contains("course,1,CSE 101,Structured Programming & Design,3.0,A\n"));
    assert!(text.contains("total,1,Total,8,30.5\n"));
    assert_eq!(text.lines().count(), 17);
}

#[test]
fn tsv_export_without_headers() {
    let t = loaded();
    let text = to_export_string(&t, ExportFormat::Tsv, false);
    assert!(text.starts_with("header\t1\tSpring 2021 Semester\n"));
    assert!(text.contains("total\t3\tTotal\t3 (3)\t11.25 (11.25)\n"));
}

#[test]
fn write_export_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let t = loaded();

    let mut opts = ExportOptions::default();
    opts.format = ExportFormat::Html;
    opts.set_path(dir.path().join("nested/out.html").to_str().unwrap());
    let written = file::write_export(&t, &opts).unwrap();

    assert!(written.ends_with("nested/out.html"));
    assert_eq!(fs::read_to_string(&written).unwrap(), t.to_html());

    let csv = dir.path().join("flat.csv");
    file::write_export_to(&t, ExportFormat::Csv, false, &csv).unwrap();
    let back = parse_rows(&fs::read_to_string(&csv).unwrap(), ',');
    assert_eq!(back.len(), 16);
    assert_eq!(back[5], vec!["total", "1", "Total", "8", "30.5"]);
}

#[test]
fn grade_file_with_tabs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grades.tsv");
    fs::write(&path, "code\tgrade\tsemester\nMAT 101\tB\t3\n").unwrap();

    let grades = file::read_grade_file(&path).unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].code, "MAT 101");
    assert_eq!(grades[0].semester, Some(3));

    assert!(file::read_grade_file(&dir.path().join("missing.csv")).is_err());
}
