// tests/transcript.rs
use std::path::{Path, PathBuf};

use grade_calc::config::options::LayoutChoice;
use grade_calc::engine::{Grade, GradeSelection};
use grade_calc::specs::{self, CarriedPoints, LayoutKind};
use grade_calc::transcript::RowKind;
use grade_calc::{GradeAssignment, GradeError, Transcript};

const SEMESTER_WISE: &str = include_str!("fixtures/semester_wise.html");
const ALL_PREVIOUS: &str = include_str!("fixtures/all_previous.html");

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn row(t: &Transcript, i: usize) -> Vec<String> {
    t.table().rows[i].cells.iter().map(|c| c.text().to_string()).collect()
}

#[test]
fn detects_both_layouts() {
    assert_eq!(specs::detect(SEMESTER_WISE), Some(LayoutKind::SemesterWise));
    assert_eq!(specs::detect(ALL_PREVIOUS), Some(LayoutKind::AllPrevious));
    assert_eq!(specs::detect("<html><body><table></table></body></html>"), None);
}

#[test]
fn no_table_is_an_error() {
    let err = Transcript::parse("<html><body><p>nothing</p></body></html>", LayoutChoice::Auto).err();
    assert!(matches!(err, Some(GradeError::NoTableFound)));

    let forced = LayoutChoice::Forced(LayoutKind::AllPrevious);
    assert!(matches!(Transcript::parse(SEMESTER_WISE, forced), Err(GradeError::NoTableFound)));
}

#[test]
fn semester_wise_load_recomputes_every_semester() {
    let t = Transcript::load(&fixture("semester_wise.html"), LayoutChoice::Auto).unwrap();
    assert_eq!(t.layout().kind, LayoutKind::SemesterWise);
    assert!(t.diagnostics().is_empty(), "{:?}", t.diagnostics());
    assert_eq!(t.table().rows.len(), 16);

    assert_eq!(row(&t, 1), vec!["SGPA: 3.56 (3.81)", "CGPA: 3.56 (3.81)"]);
    assert_eq!(row(&t, 5), vec!["Total", "8", "30.5"]);
    assert_eq!(row(&t, 7), vec!["SGPA: 3.25", "CGPA: 3.41 (3.53)"]);
    assert_eq!(row(&t, 10), vec!["Total", "6", "19.5"]);
    assert_eq!(row(&t, 12), vec!["SGPA: 3.75", "CGPA: 3.52 (3.60)"]);
    assert_eq!(row(&t, 15), vec!["Total", "3 (3)", "11.25 (11.25)"]);

    let html = t.to_html();
    assert!(html.contains("<th><strong>SGPA: 3.56 (3.81)</strong></th>"));
    assert!(html.contains(r#"<tr data-grade-calc="total"><td colspan="2">Total</td><td>8</td><td>30.5</td></tr>"#));
    // untouched markup passes through
    assert!(html.contains("Structured Programming &amp; Design"));
    assert!(html.contains(r#"<script>var tpl = "<table><tr><td>x</td></tr></table>";</script>"#));
}

#[test]
fn row_kinds_and_semesters() {
    let t = Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto).unwrap();
    assert_eq!(t.row_kind(0), RowKind::Header);
    assert_eq!(t.row_kind(1), RowKind::Gpa);
    assert_eq!(t.row_kind(2), RowKind::Course);
    assert_eq!(t.row_kind(5), RowKind::Total);
    assert_eq!(t.semester_of_row(13), Some(3));
    assert_eq!(t.semester_of_row(10), Some(2));
    assert_eq!(t.grade_at(3), Some(GradeSelection::Selected(Grade::BPlus)));
    assert_eq!(t.grade_at(0), None);
}

#[test]
fn selecting_a_grade_recomputes_and_reverting_restores() {
    let mut t = Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto).unwrap();
    let loaded = t.to_html();

    t.select_grade(13, GradeSelection::Selected(Grade::B)).unwrap();
    assert_eq!(row(&t, 1), vec!["SGPA: 3.56 (3.63)", "CGPA: 3.56 (3.63)"]);
    assert_eq!(row(&t, 5), vec!["Total", "8", "29"]);
    assert_eq!(row(&t, 7), vec!["SGPA: 3.25", "CGPA: 3.41 (3.44)"]);
    assert_eq!(row(&t, 12), vec!["SGPA: 3.75", "CGPA: 3.52 (3.54)"]);
    assert_eq!(row(&t, 15), vec!["Total", "3 (3)", "11.25 (9.75)"]);
    assert_eq!(t.grade_at(13), Some(GradeSelection::Selected(Grade::B)));

    t.select_grade(13, GradeSelection::Selected(Grade::A)).unwrap();
    assert_eq!(t.to_html(), loaded);
}

#[test]
fn selecting_outside_course_rows_fails() {
    let mut t = Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto).unwrap();
    assert!(matches!(t.select_grade(0, GradeSelection::Unselected), Err(GradeError::NotACourseRow(0))));
    assert!(matches!(t.select_grade(99, GradeSelection::Unselected), Err(GradeError::NotACourseRow(99))));

    let err = t.select_by_code("MAT 101", Some(2), GradeSelection::Unselected).err();
    assert!(matches!(err, Some(GradeError::UnknownCourse { semester: Some(2), .. })));
    assert!(t.select_by_code("XYZ 999", None, GradeSelection::Unselected).is_err());
}

#[test]
fn assignments_from_the_grade_file() {
    let mut t = Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto).unwrap();
    let grades = grade_calc::file::read_grade_file(&fixture("grades.csv")).unwrap();
    assert_eq!(grades.len(), 2);
    for g in &grades {
        t.apply(g).unwrap();
    }
    assert_eq!(row(&t, 12), vec!["SGPA: 3.75 (4.00)", "CGPA: 3.52 (3.63)"]);
    assert_eq!(row(&t, 1)[0], "SGPA: 3.56 (3.63)");
}

#[test]
fn unselecting_a_grade_drops_the_course() {
    let mut t = Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto).unwrap();
    // ENG 101 (2 credits, A+) out of semester 1: 22.5 / 6
    t.select_by_code("ENG 101", None, GradeSelection::Unselected).unwrap();
    assert_eq!(row(&t, 4)[3], "-");
    assert_eq!(row(&t, 5), vec!["Total", "6", "22.5"]);
    assert_eq!(row(&t, 1)[0], "SGPA: 3.56 (3.75)");
    assert!(t.diagnostics().is_empty());
}

#[test]
fn all_previous_load() {
    let t = Transcript::load(&fixture("all_previous.html"), LayoutChoice::Auto).unwrap();
    assert_eq!(t.layout().kind, LayoutKind::AllPrevious);
    assert!(t.diagnostics().is_empty(), "{:?}", t.diagnostics());
    assert_eq!(t.table().rows.len(), 11);

    assert_eq!(t.row_kind(0), RowKind::Other);
    assert_eq!(row(&t, 4), vec!["", "Total", "6", "", "21.75"]);
    assert_eq!(row(&t, 5), vec!["SGPA: 3.00 (3.63) and CGPA: 3.00 (3.63)"]);
    assert_eq!(row(&t, 9), vec!["", "Total", "3 (3)", "", "9.75 (10.5)"]);
    assert_eq!(row(&t, 10), vec!["SGPA: 3.25 and CGPA: 3.44"]);
    assert!(!t.table().rows[10].cells[0].is_dirty());

    let html = t.to_html();
    assert!(html.contains(r#"<th></th><td colspan="2">Total</td><td>6</td><td></td><td>21.75</td>"#));
    assert!(html.contains("<td colspan=\"6\">SGPA: 3.00 (3.63) and CGPA: 3.00 (3.63)</td>"));
}

#[test]
fn forced_layout_matches_detection() {
    let forced = Transcript::parse(ALL_PREVIOUS, LayoutChoice::Forced(LayoutKind::AllPrevious)).unwrap();
    let auto = Transcript::parse(ALL_PREVIOUS, LayoutChoice::Auto).unwrap();
    assert_eq!(forced.to_html(), auto.to_html());
}

#[test]
fn reloading_the_output_changes_nothing() {
    for doc in [SEMESTER_WISE, ALL_PREVIOUS] {
        let once = Transcript::parse(doc, LayoutChoice::Auto).unwrap().to_html();
        let again = Transcript::parse(once.as_str(), LayoutChoice::Auto).unwrap();
        assert_eq!(again.table().rows.len(), Transcript::parse(doc, LayoutChoice::Auto).unwrap().table().rows.len());
        assert_eq!(again.to_html(), once);
    }
}

#[test]
fn carried_points_policy_is_switchable() {
    let t = Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto).unwrap();
    assert_eq!(t.carried_points(), CarriedPoints::Overwrite);
    // one carried course per semester here, so both policies agree
    let acc = Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto)
        .unwrap()
        .with_carried_points(CarriedPoints::Accumulate);
    assert_eq!(acc.carried_points(), CarriedPoints::Accumulate);
    assert_eq!(row(&acc, 15), row(&t, 15));
}

#[test]
fn export_rows_tag_kind_and_semester() {
    let t = Transcript::parse(SEMESTER_WISE, LayoutChoice::Auto).unwrap();
    let (headers, rows) = t.export_rows();
    assert_eq!(headers, vec!["Kind", "Semester", "Cell 1", "Cell 2", "Cell 3", "Cell 4"]);
    assert_eq!(rows.len(), 16);
    assert_eq!(rows[0], vec!["header", "1", "Spring 2021 Semester"]);
    assert_eq!(rows[2], vec!["course", "1", "CSE 101", "Structured Programming & Design", "3.0", "A"]);
    assert_eq!(rows[15], vec!["total", "3", "Total", "3 (3)", "11.25 (11.25)"]);
}

#[test]
fn parse_assignments() {
    let a: GradeAssignment = "MAT 101@3=B".parse().unwrap();
    assert_eq!(a, GradeAssignment { code: "MAT 101".into(), semester: Some(3), grade: GradeSelection::Selected(Grade::B) });

    let b: GradeAssignment = " CSE 201 = - ".parse().unwrap();
    assert_eq!(b.code, "CSE 201");
    assert_eq!(b.semester, None);
    assert_eq!(b.grade, GradeSelection::Unselected);

    assert!(matches!("bogus".parse::<GradeAssignment>(), Err(GradeError::InvalidSelection(_))));
    assert!(matches!("X@two=A".parse::<GradeAssignment>(), Err(GradeError::InvalidSelection(_))));
    assert!(matches!("=A".parse::<GradeAssignment>(), Err(GradeError::InvalidSelection(_))));
    assert!(matches!("X=Q".parse::<GradeAssignment>(), Err(GradeError::UnknownGrade(_))));
}

#[test]
fn assignment_rows() {
    let rows: Vec<Vec<String>> = [vec!["Code", "Grade"], vec!["", ""], vec!["X", "A", "2"], vec!["Y", "-"]]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect();
    let got = GradeAssignment::from_rows(&rows).unwrap();
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].semester, Some(2));
    assert_eq!(got[1].grade, GradeSelection::Unselected);

    let bad = vec![vec![String::from("only-one-field")]];
    assert!(matches!(GradeAssignment::from_rows(&bad), Err(GradeError::InvalidSelection(_))));
}
