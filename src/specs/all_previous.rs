// src/specs/all_previous.rs
//
// `tableCrntAcdm` page. Shape per semester:
//
//   <tr><td colspan=7>… SEMESTER …</td></tr>                                  header
//   <tr><th>1</th><td>CSE 101</td><td>title</td><td>3</td><td>…</td><td>A</td></tr>
//   …
//   <tr><th></th><td colspan=2>Total</td><td>6</td><td></td><td>21.75</td></tr> (synthesized)
//   <tr><td colspan=7>SGPA: 3.00 and CGPA: 3.00</td></tr>

use super::*;

pub const TABLE_ID: &str = "tableCrntAcdm";

/// Marker of the per-semester summary row.
pub const SUMMARY_MARKER: &str = "SGPA";

pub static LAYOUT: Layout = Layout {
    kind: LayoutKind::AllPrevious,
    label: "All previous",
    locator: Locator::TableWithId(TABLE_ID),
    header_marker: "SEMESTER",
    course_row: TdCount::Exactly(5),
    code_col: 0,
    credit_col: 2,
    grade: GradeCell::Td(4),
    block_end: BlockEnd::TotalRow,
    total: TotalRowShape { tds: 4, credit: 1, points: 3, leading_th: true },
    gpa: GpaLabel::AfterTotal,
    insertion: TotalInsertion::BeforeRowsWith(SUMMARY_MARKER),
    carried_points: CarriedPoints::Overwrite,
};
