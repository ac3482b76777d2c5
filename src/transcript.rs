// src/transcript.rs
//! A loaded transcript page: the source document, its parsed table, and the
//! result of the last recompute.
//!
//! This is the adapter between the engine and its callers (GUI, CLI). A grade
//! selection is the only change event: it rewrites one grade cell and re-runs
//! the whole pipeline. Cells written by the pipeline itself never trigger a run.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::options::LayoutChoice;
use crate::core::table::Table;
use crate::engine::{self, ensure_total_rows, GradeSelection, Recomputation, SemesterSummary, TranscriptModel};
use crate::error::{Diagnostic, GradeError, GradeResult};
use crate::specs::{self, CarriedPoints, Layout};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Gpa,
    Course,
    Total,
    Other,
}

impl RowKind {
    pub fn label(self) -> &'static str {
        match self {
            RowKind::Header => "header",
            RowKind::Gpa => "gpa",
            RowKind::Course => "course",
            RowKind::Total => "total",
            RowKind::Other => "other",
        }
    }
}

pub struct Transcript {
    source: String,
    layout: &'static Layout,
    carried: CarriedPoints,
    table: Table,
    model: TranscriptModel,
    last: Recomputation,
}

impl Transcript {
    pub fn load(path: &Path, choice: LayoutChoice) -> GradeResult<Self> {
        let doc = fs::read_to_string(path)?;
        logf!("[transcript] loaded {} ({} bytes)", path.display(), doc.len());
        Self::parse(doc, choice)
    }

    /// Detect (or force) the layout, locate the table, add the missing total
    /// rows and run the first recompute.
    pub fn parse(doc: impl Into<String>, choice: LayoutChoice) -> GradeResult<Self> {
        let source = doc.into();
        let kind = match choice {
            LayoutChoice::Auto => specs::detect(&source).ok_or(GradeError::NoTableFound)?,
            LayoutChoice::Forced(kind) => kind,
        };
        let layout = kind.layout();
        let span = layout.locate(&source).ok_or(GradeError::NoTableFound)?;

        let mut table = Table::parse(&source, span);
        ensure_total_rows(&mut table, layout);
        logd!("[transcript] {} layout, {} rows", layout.label, table.rows.len());

        let mut t = Self {
            source,
            layout,
            carried: layout.carried_points,
            table,
            model: TranscriptModel::default(),
            last: Recomputation::default(),
        };
        t.recompute();
        Ok(t)
    }

    pub fn with_carried_points(mut self, carried: CarriedPoints) -> Self {
        if carried != self.carried {
            self.carried = carried;
            self.recompute();
        }
        self
    }

    /// Full pass over the current table state.
    pub fn recompute(&mut self) -> &Recomputation {
        let (model, rc) = engine::run(&mut self.table, self.layout, self.carried);
        self.model = model;
        self.last = rc;
        &self.last
    }

    /// Change event: show `sel` in the grade cell of table row `row`, then recompute.
    pub fn select_grade(&mut self, row: usize, sel: GradeSelection) -> GradeResult<&Recomputation> {
        let r = self.table.rows.get(row).ok_or(GradeError::NotACourseRow(row))?;
        if !self.layout.is_course_row(r) {
            return Err(GradeError::NotACourseRow(row));
        }
        let cell = self.layout.grade_cell_index(r).ok_or(GradeError::NotACourseRow(row))?;
        if let Some(c) = self.table.cell_mut(row, cell) {
            c.set_text(sel.label());
        }
        logd!("[transcript] row {} grade -> {}", row, sel);
        Ok(self.recompute())
    }

    /// Select by course code. Without a semester the last attempt in the table is changed.
    pub fn select_by_code(&mut self, code: &str, semester: Option<u32>, sel: GradeSelection) -> GradeResult<&Recomputation> {
        let code = code.trim();
        let row = self
            .model
            .courses
            .iter()
            .filter(|c| c.code == code && semester.is_none_or(|s| c.semester == s))
            .next_back()
            .map(|c| c.row)
            .ok_or_else(|| GradeError::UnknownCourse { code: s!(code), semester })?;
        self.select_grade(row, sel)
    }

    pub fn apply(&mut self, a: &GradeAssignment) -> GradeResult<&Recomputation> {
        self.select_by_code(&a.code, a.semester, a.grade)
    }

    pub fn layout(&self) -> &'static Layout { self.layout }
    pub fn carried_points(&self) -> CarriedPoints { self.carried }
    pub fn source(&self) -> &str { &self.source }
    pub fn table(&self) -> &Table { &self.table }
    pub fn model(&self) -> &TranscriptModel { &self.model }
    pub fn last(&self) -> &Recomputation { &self.last }
    pub fn semesters(&self) -> &[SemesterSummary] { &self.last.semesters }
    pub fn diagnostics(&self) -> &[Diagnostic] { &self.last.diagnostics }

    /// Current selection of a course row.
    pub fn grade_at(&self, row: usize) -> Option<GradeSelection> {
        self.model.course_at_row(row).map(|c| c.grade)
    }

    pub fn row_kind(&self, row: usize) -> RowKind {
        if self.model.course_at_row(row).is_some() {
            return RowKind::Course;
        }
        for b in &self.model.blocks {
            if b.header_row == row {
                return RowKind::Header;
            }
            if b.total.is_some_and(|t| t.row == row) {
                return RowKind::Total;
            }
            if b.gpa.as_ref().is_some_and(|g| g.row == row) {
                return RowKind::Gpa;
            }
        }
        RowKind::Other
    }

    /// Semester a row belongs to (course rows: their own; structure rows: their block's).
    pub fn semester_of_row(&self, row: usize) -> Option<u32> {
        if let Some(c) = self.model.course_at_row(row) {
            return (c.semester != 0).then_some(c.semester);
        }
        self.model
            .blocks
            .iter()
            .find(|b| {
                b.header_row == row
                    || b.total.is_some_and(|t| t.row == row)
                    || b.gpa.as_ref().is_some_and(|g| g.row == row)
            })
            .map(|b| b.index)
    }

    /// Source document with the table rewritten in place.
    pub fn to_html(&self) -> String {
        self.table.render_into(&self.source)
    }

    /// Table rows for CSV/TSV: `kind, semester, cell texts…`.
    pub fn export_rows(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let width = self.table.max_cells();
        let mut headers = vec![s!("Kind"), s!("Semester")];
        headers.extend((1..=width).map(|i| format!("Cell {i}")));

        let rows = self
            .table
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut out = Vec::with_capacity(width + 2);
                out.push(s!(self.row_kind(i).label()));
                out.push(self.semester_of_row(i).map(|s| s.to_string()).unwrap_or_default());
                out.extend(r.cells.iter().map(|c| s!(c.text())));
                out
            })
            .collect();
        (headers, rows)
    }
}

/// `CODE=GRADE` or `CODE@SEM=GRADE`; `-` selects nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeAssignment {
    pub code: String,
    pub semester: Option<u32>,
    pub grade: GradeSelection,
}

impl FromStr for GradeAssignment {
    type Err = GradeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GradeError::InvalidSelection(s!(s));
        let (lhs, grade) = s.split_once('=').ok_or_else(invalid)?;
        let (code, semester) = match lhs.rsplit_once('@') {
            Some((code, sem)) => (code, Some(sem.trim().parse::<u32>().map_err(|_| invalid())?)),
            None => (lhs, None),
        };
        let code = code.trim();
        if code.is_empty() {
            return Err(invalid());
        }
        Ok(Self { code: s!(code), semester, grade: grade.parse()? })
    }
}

impl GradeAssignment {
    /// Rows of `code,grade[,semester]`. A leading `code,…` header row is skipped.
    pub fn from_rows(rows: &[Vec<String>]) -> GradeResult<Vec<Self>> {
        let mut out = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            if i == 0 && row[0].trim().eq_ignore_ascii_case("code") {
                continue;
            }
            let [code, grade, rest @ ..] = row.as_slice() else {
                return Err(GradeError::InvalidSelection(row.join(",")));
            };
            let semester = match rest.first().map(|s| s.trim()).filter(|s| !s.is_empty()) {
                Some(sem) => Some(sem.parse::<u32>().map_err(|_| GradeError::InvalidSelection(row.join(",")))?),
                None => None,
            };
            let code = code.trim();
            if code.is_empty() {
                return Err(GradeError::InvalidSelection(row.join(",")));
            }
            out.push(Self { code: s!(code), semester, grade: grade.parse()? });
        }
        Ok(out)
    }
}
