// src/specs/mod.rs
//! # Transcript layout specs
//!
//! One spec per transcript page variant. A spec encodes *where the ground truth
//! lives in the table* (which row is a semester header, which cells carry code,
//! credit and grade, where the totals and the GPA labels sit) as a plain
//! [`Layout`] value. The extractor and the recompute pipeline are written once
//! against `Layout`; nothing outside this module knows which page it is reading.
//!
//! ## What lives here
//! - Layout detection from the raw document ([`detect`]).
//! - Table location ([`locate`]) and row classification predicates.
//! - Layout quirks as explicit configuration (e.g. [`CarriedPoints`]).
//!
//! ## What does **not** live here
//! - Grade arithmetic (`engine`), file I/O (`transcript`, `file`), GUI concerns.
//!
//! ## Current specs
//! - `semester_wise`: the `course_result_info` page, one block per semester.
//! - `all_previous`: the `tableCrntAcdm` page, all previous semesters in one table.
pub mod all_previous;
pub mod semester_wise;

use std::fmt;
use std::ops::Range;

use crate::core::html;
use crate::core::table::{Cell, CellKind, Row};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    SemesterWise,
    AllPrevious,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 2] = [LayoutKind::SemesterWise, LayoutKind::AllPrevious];

    pub fn layout(self) -> &'static Layout {
        match self {
            LayoutKind::SemesterWise => &semester_wise::LAYOUT,
            LayoutKind::AllPrevious => &all_previous::LAYOUT,
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.layout().label)
    }
}

/* Generic layout descriptor */
pub enum Locator {
    /// First `<table>` after the element carrying this id.
    TableAfterId(&'static str),
    TableWithId(&'static str),
}

#[derive(Clone, Copy)]
pub enum TdCount {
    AtLeast(usize),
    Exactly(usize),
}

impl TdCount {
    fn matches(self, n: usize) -> bool {
        match self {
            TdCount::AtLeast(min) => n >= min,
            TdCount::Exactly(k) => n == k,
        }
    }
}

#[derive(Clone, Copy)]
pub enum GradeCell {
    FirstTh,
    Td(usize),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    /// Block runs to the next header; its last row is the total row.
    NextHeader,
    /// Block stops at the first empty or `Total` row.
    TotalRow,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GpaLabel {
    /// Two `<th>` cells (`SGPA: x`, `CGPA: y`) right after the header.
    AfterHeader,
    /// One cell `SGPA: x and CGPA: y` right after the total row.
    AfterTotal,
}

#[derive(Clone, Copy)]
pub enum TotalInsertion {
    /// Before every header but the first, plus one at the end of the table.
    BeforeHeaders,
    /// Before every row whose text contains the marker.
    BeforeRowsWith(&'static str),
}

/// Cell positions of a total row, counted among its `<td>` cells.
#[derive(Clone, Copy)]
pub struct TotalRowShape {
    pub tds: usize,
    pub credit: usize,
    pub points: usize,
    pub leading_th: bool,
}

/// How a retaken course's points are booked into the semester it was retaken in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CarriedPoints {
    /// Each carried row replaces the running value (the published behavior).
    #[default]
    Overwrite,
    Accumulate,
}

pub struct Layout {
    pub kind: LayoutKind,
    pub label: &'static str,
    pub locator: Locator,
    /// Case-sensitive token marking a semester header row.
    pub header_marker: &'static str,
    pub course_row: TdCount,
    pub code_col: usize,
    pub credit_col: usize,
    pub grade: GradeCell,
    pub block_end: BlockEnd,
    pub total: TotalRowShape,
    pub gpa: GpaLabel,
    pub insertion: TotalInsertion,
    pub carried_points: CarriedPoints,
}

pub const TOTAL_LABEL: &str = "Total";

/// Which layout a document uses, judging by the ids the pages carry.
pub fn detect(doc: &str) -> Option<LayoutKind> {
    let mut semester_wise = doc.contains("course_result_info");
    for tag in html::Tags::new(doc).filter(|t| !t.close) {
        match tag.attr("id") {
            Some(all_previous::TABLE_ID) => return Some(LayoutKind::AllPrevious),
            Some(semester_wise::ANCHOR_ID) => semester_wise = true,
            _ => {}
        }
    }
    semester_wise.then_some(LayoutKind::SemesterWise)
}

impl Layout {
    /// Byte span of the transcript table in `doc`.
    pub fn locate(&self, doc: &str) -> Option<Range<usize>> {
        match self.locator {
            Locator::TableAfterId(id) => html::find_table_after_id(doc, id),
            Locator::TableWithId(id) => html::find_table_by_id(doc, id),
        }
    }

    pub fn is_total_row(&self, row: &Row) -> bool {
        row.td_count() == self.total.tds
            && row.td(0).is_some_and(|c| c.text() == TOTAL_LABEL)
    }

    pub fn is_course_row(&self, row: &Row) -> bool {
        self.course_row.matches(row.td_count())
            && !self.is_total_row(row)
            && self.grade_cell_index(row).is_some()
    }

    pub fn is_header(&self, row: &Row) -> bool {
        !self.is_course_row(row) && row.text().contains(self.header_marker)
    }

    /// Index into `row.cells` of the grade cell.
    pub fn grade_cell_index(&self, row: &Row) -> Option<usize> {
        match self.grade {
            GradeCell::FirstTh => row.position_of(CellKind::Th, 0),
            GradeCell::Td(n) => row.position_of(CellKind::Td, n),
        }
    }

    /// Cells of a fresh, empty total row.
    pub fn total_row_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.total.tds + 1);
        if self.total.leading_th {
            cells.push(Cell::th(""));
        }
        // "Total" spans two columns and is td 0
        cells.push(Cell::td(TOTAL_LABEL).with_colspan(2));
        for _ in 1..self.total.tds {
            cells.push(Cell::td(""));
        }
        cells
    }
}
