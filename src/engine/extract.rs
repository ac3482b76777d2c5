// src/engine/extract.rs
//
// Table → TranscriptModel. Rows are classified with the layout predicates:
// a header bumps the semester counter, a course row is tagged with the current
// counter (0 above the first header), everything else is structure.
// Nothing here fails: malformed rows and semesters become diagnostics.

use crate::config::consts::MAX_BLOCK_ROWS;
use crate::core::sanitize::parse_leading_f64;
use crate::core::table::{CellKind, Row, Table};
use crate::engine::types::*;
use crate::error::Diagnostic;
use crate::specs::{BlockEnd, GpaLabel, Layout, TotalInsertion, TOTAL_LABEL};

#[derive(Clone, Debug, Default)]
pub struct Extraction {
    pub model: TranscriptModel,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn extract(table: &Table, layout: &Layout) -> Extraction {
    let mut out = Extraction::default();

    let mut headers: Vec<usize> = Vec::new();
    let mut semester = 0u32;
    for (i, row) in table.rows.iter().enumerate() {
        if layout.is_header(row) {
            semester += 1;
            headers.push(i);
            continue;
        }
        if layout.is_course_row(row) {
            if let Some(course) = read_course(row, i, semester, layout, &mut out.diagnostics) {
                out.model.courses.push(course);
            }
        }
    }

    for (k, &header_row) in headers.iter().enumerate() {
        let index = k as u32 + 1;
        let next = headers.get(k + 1).copied().unwrap_or(table.rows.len());
        let block = match layout.block_end {
            BlockEnd::NextHeader => block_to_next_header(table, layout, &out.model, index, header_row, next, &mut out.diagnostics),
            BlockEnd::TotalRow => block_to_total_row(table, layout, &out.model, index, header_row, next, &mut out.diagnostics),
        };
        out.model.blocks.push(block);
    }

    for d in &out.diagnostics {
        logd!("[extract] {}", d);
    }
    logd!(
        "[extract] {}: {} semesters, {} course rows",
        layout.label,
        out.model.blocks.len(),
        out.model.courses.len()
    );
    out
}

fn read_course(row: &Row, i: usize, semester: u32, layout: &Layout, diags: &mut Vec<Diagnostic>) -> Option<CourseRecord> {
    let code = row.td(layout.code_col).map(|c| c.text().trim()).unwrap_or_default();
    if code.is_empty() {
        diags.push(Diagnostic::StructuralMismatch { semester, row: i, what: "course row without a course code" });
        return None;
    }
    let grade_cell = layout.grade_cell_index(row)?;
    let grade_text = row.cells[grade_cell].text();
    let grade = GradeSelection::from_cell_text(grade_text);
    if grade.is_unselected() && !grade_text.is_empty() && grade_text != GradeSelection::UNSELECTED_LABEL {
        // shown as unselected; the row still counts as an attempt
        diags.push(Diagnostic::ParseFailure { semester, row: i, field: "grade", text: s!(grade_text) });
    }
    let credit_text = row.td(layout.credit_col).map(|c| s!(c.text())).unwrap_or_default();

    Some(CourseRecord {
        code: s!(code),
        semester,
        credit: parse_leading_f64(&credit_text),
        credit_text,
        grade,
        row: i,
        grade_cell,
    })
}

fn courses_in(model: &TranscriptModel, rows: std::ops::Range<usize>) -> Vec<usize> {
    model
        .courses
        .iter()
        .enumerate()
        .filter(|(_, c)| rows.contains(&c.row))
        .map(|(i, _)| i)
        .collect()
}

fn total_cells(row: &Row, at: usize, layout: &Layout) -> Option<TotalCells> {
    Some(TotalCells {
        row: at,
        credit: row.position_of(CellKind::Td, layout.total.credit)?,
        points: row.position_of(CellKind::Td, layout.total.points)?,
    })
}

fn block_to_next_header(
    table: &Table,
    layout: &Layout,
    model: &TranscriptModel,
    index: u32,
    header_row: usize,
    next: usize,
    diags: &mut Vec<Diagnostic>,
) -> SemesterBlock {
    let end = next.min(header_row + 1 + MAX_BLOCK_ROWS);
    if end < next {
        diags.push(Diagnostic::StructuralMismatch { semester: index, row: end, what: "block cut at the row limit" });
    }

    let mut block = SemesterBlock {
        index,
        header_row,
        courses: courses_in(model, header_row + 1..end),
        total: None,
        gpa: None,
    };

    let last = end - 1;
    if last > header_row && layout.is_total_row(&table.rows[last]) {
        block.total = total_cells(&table.rows[last], last, layout);
    }
    if block.total.is_none() {
        diags.push(Diagnostic::StructuralMismatch { semester: index, row: header_row, what: "no total row" });
    }

    if layout.gpa == GpaLabel::AfterHeader {
        block.gpa = table.rows.get(header_row + 1).filter(|_| header_row + 1 < end).and_then(|r| gpa_cells(r, header_row + 1));
    }
    if block.gpa.is_none() {
        diags.push(Diagnostic::StructuralMismatch { semester: index, row: header_row + 1, what: "SGPA/CGPA labels not found" });
    }
    block
}

fn block_to_total_row(
    table: &Table,
    layout: &Layout,
    model: &TranscriptModel,
    index: u32,
    header_row: usize,
    next: usize,
    diags: &mut Vec<Diagnostic>,
) -> SemesterBlock {
    let limit = next.min(header_row + 1 + MAX_BLOCK_ROWS);
    let stop = (header_row + 1..limit).find(|&r| {
        let row = &table.rows[r];
        if layout.is_course_row(row) {
            return false;
        }
        let text = row.text();
        text.is_empty() || text.contains(TOTAL_LABEL)
    });

    let Some(stop) = stop else {
        diags.push(Diagnostic::StructuralMismatch { semester: index, row: header_row, what: "block has no end row" });
        return SemesterBlock {
            index,
            header_row,
            courses: courses_in(model, header_row + 1..limit),
            total: None,
            gpa: None,
        };
    };

    let mut block = SemesterBlock {
        index,
        header_row,
        courses: courses_in(model, header_row + 1..stop),
        total: None,
        gpa: None,
    };

    if layout.is_total_row(&table.rows[stop]) {
        block.total = total_cells(&table.rows[stop], stop, layout);
    }
    if block.total.is_none() {
        diags.push(Diagnostic::StructuralMismatch { semester: index, row: stop, what: "no total row" });
    }

    if layout.gpa == GpaLabel::AfterTotal {
        block.gpa = table.rows.get(stop + 1).and_then(|r| shared_gpa_cell(r, stop + 1));
    }
    if block.gpa.is_none() {
        diags.push(Diagnostic::StructuralMismatch { semester: index, row: stop + 1, what: "SGPA/CGPA labels not found" });
    }
    block
}

/// Two `<th>` cells, `SGPA: …` then `CGPA: …`.
fn gpa_cells(row: &Row, at: usize) -> Option<GpaLabels> {
    if row.th_count() != 2 {
        return None;
    }
    let sgpa_cell = row.position_of(CellKind::Th, 0)?;
    let cgpa_cell = row.position_of(CellKind::Th, 1)?;
    Some(GpaLabels {
        row: at,
        sgpa_cell,
        cgpa_cell,
        sgpa: s!(row.cells[sgpa_cell].text()),
        cgpa: s!(row.cells[cgpa_cell].text()),
    })
}

/// One cell `SGPA: … and CGPA: …`.
fn shared_gpa_cell(row: &Row, at: usize) -> Option<GpaLabels> {
    let cell = row.cells.iter().position(|c| c.text().contains("SGPA"))?;
    let (sgpa, cgpa) = row.cells[cell].text().split_once("and")?;
    Some(GpaLabels {
        row: at,
        sgpa_cell: cell,
        cgpa_cell: cell,
        sgpa: s!(sgpa.trim()),
        cgpa: s!(cgpa.trim()),
    })
}

/// Insert the empty total rows the pages don't render. Returns how many were added.
/// Running it on a table that already has them adds nothing.
pub fn ensure_total_rows(table: &mut Table, layout: &Layout) -> usize {
    let mut targets: Vec<usize> = match layout.insertion {
        TotalInsertion::BeforeHeaders => {
            let headers: Vec<usize> = table
                .rows
                .iter()
                .enumerate()
                .filter(|(_, r)| layout.is_header(r))
                .map(|(i, _)| i)
                .collect();
            if headers.is_empty() {
                return 0;
            }
            let mut at: Vec<usize> = headers[1..].to_vec();
            at.push(table.rows.len());
            at
        }
        TotalInsertion::BeforeRowsWith(marker) => table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| !layout.is_course_row(r) && r.text().contains(marker))
            .map(|(i, _)| i)
            .collect(),
    };
    targets.retain(|&at| at == 0 || !layout.is_total_row(&table.rows[at - 1]));

    // back to front so earlier positions stay valid
    for &at in targets.iter().rev() {
        table.insert_row(at, layout.total_row_cells());
    }
    if !targets.is_empty() {
        logd!("[extract] inserted {} total rows", targets.len());
    }
    targets.len()
}
