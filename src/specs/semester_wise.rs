// src/specs/semester_wise.rs
//
// `course_result_info` page. Shape per semester:
//
//   <tr><th colspan=4>… Semester …</th></tr>        header
//   <tr><th>SGPA: 3.56</th><th>CGPA: 3.56</th></tr> gpa labels
//   <tr><td>CSE 101</td><td>title</td><td>3.0</td><th>A</th></tr>
//   …
//   <tr><td colspan=2>Total</td><td>8</td><td>30.5</td></tr>   (synthesized)

use super::*;

pub const ANCHOR_ID: &str = "tabseven";

pub static LAYOUT: Layout = Layout {
    kind: LayoutKind::SemesterWise,
    label: "Semester-wise",
    locator: Locator::TableAfterId(ANCHOR_ID),
    header_marker: "Semester",
    course_row: TdCount::AtLeast(3),
    code_col: 0,
    credit_col: 2,
    grade: GradeCell::FirstTh,
    block_end: BlockEnd::NextHeader,
    total: TotalRowShape { tds: 3, credit: 1, points: 2, leading_th: false },
    gpa: GpaLabel::AfterHeader,
    insertion: TotalInsertion::BeforeHeaders,
    carried_points: CarriedPoints::Overwrite,
};
