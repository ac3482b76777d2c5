// src/engine/types.rs
use std::fmt;
use std::str::FromStr;

use crate::error::GradeError;

/// Letter grades with their grade points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Grade { APlus, A, AMinus, BPlus, B, BMinus, CPlus, C, D, F }

impl Grade {
    pub const ALL: [Grade; 10] = [
        Grade::APlus, Grade::A, Grade::AMinus,
        Grade::BPlus, Grade::B, Grade::BMinus,
        Grade::CPlus, Grade::C, Grade::D, Grade::F,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+", Grade::A => "A", Grade::AMinus => "A-",
            Grade::BPlus => "B+", Grade::B => "B", Grade::BMinus => "B-",
            Grade::CPlus => "C+", Grade::C => "C",
            Grade::D => "D", Grade::F => "F",
        }
    }

    pub fn point(self) -> f64 {
        match self {
            Grade::APlus => 4.0, Grade::A => 3.75, Grade::AMinus => 3.5,
            Grade::BPlus => 3.25, Grade::B => 3.0, Grade::BMinus => 2.75,
            Grade::CPlus => 2.5, Grade::C => 2.25,
            Grade::D => 2.0, Grade::F => 0.0,
        }
    }

    pub fn from_label(s: &str) -> Option<Grade> {
        let s = s.trim();
        Grade::ALL.into_iter().find(|g| g.label() == s)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = GradeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::from_label(s).ok_or_else(|| GradeError::UnknownGrade(s!(s.trim())))
    }
}

/// What a grade selector currently shows. `Unselected` is never an F.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GradeSelection {
    #[default]
    Unselected,
    Selected(Grade),
}

impl GradeSelection {
    /// Label of the unselected option.
    pub const UNSELECTED_LABEL: &'static str = "-";

    pub fn point(self) -> Option<f64> {
        match self {
            GradeSelection::Unselected => None,
            GradeSelection::Selected(g) => Some(g.point()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GradeSelection::Unselected => Self::UNSELECTED_LABEL,
            GradeSelection::Selected(g) => g.label(),
        }
    }

    #[inline]
    pub fn is_unselected(self) -> bool { self == GradeSelection::Unselected }

    /// Anything that isn't a known letter reads as unselected.
    pub fn from_cell_text(s: &str) -> Self {
        Grade::from_label(s).map_or(GradeSelection::Unselected, GradeSelection::Selected)
    }
}

impl FromStr for GradeSelection {
    type Err = GradeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == Self::UNSELECTED_LABEL || t.is_empty() {
            return Ok(GradeSelection::Unselected);
        }
        t.parse::<Grade>().map(GradeSelection::Selected)
    }
}

impl fmt::Display for GradeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One course row as read from the table.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseRecord {
    pub code: String,
    /// 0 for rows above the first semester header.
    pub semester: u32,
    /// NaN when the credit cell has no leading number.
    pub credit: f64,
    pub credit_text: String,
    pub grade: GradeSelection,
    /// Table row index.
    pub row: usize,
    /// Index of the grade cell within the row.
    pub grade_cell: usize,
}

/// Where a semester's totals get written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TotalCells {
    pub row: usize,
    pub credit: usize,
    pub points: usize,
}

/// SGPA/CGPA label cells and their current texts. When both labels share one
/// cell (`SGPA: x and CGPA: y`), `sgpa_cell == cgpa_cell`.
#[derive(Clone, Debug, PartialEq)]
pub struct GpaLabels {
    pub row: usize,
    pub sgpa_cell: usize,
    pub cgpa_cell: usize,
    pub sgpa: String,
    pub cgpa: String,
}

impl GpaLabels {
    #[inline]
    pub fn shared_cell(&self) -> bool { self.sgpa_cell == self.cgpa_cell }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SemesterBlock {
    /// 1-based semester number.
    pub index: u32,
    pub header_row: usize,
    /// Indices into `TranscriptModel::courses`, in table order.
    pub courses: Vec<usize>,
    pub total: Option<TotalCells>,
    pub gpa: Option<GpaLabels>,
}

/// Everything the recompute pass needs, extracted from the table in one go.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranscriptModel {
    pub courses: Vec<CourseRecord>,
    pub blocks: Vec<SemesterBlock>,
}

impl TranscriptModel {
    pub fn course_at_row(&self, row: usize) -> Option<&CourseRecord> {
        self.courses.iter().find(|c| c.row == row)
    }

    pub fn block_courses<'a>(&'a self, block: &SemesterBlock) -> impl Iterator<Item = &'a CourseRecord> {
        block.courses.iter().filter_map(move |&i| self.courses.get(i))
    }
}

/// Counted attempt of a course across all its rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedAttempt {
    pub counted_semester: u32,
    pub best_grade_point: f64,
}

impl ResolvedAttempt {
    /// Counted semester of a code with no attempts; never equals a real semester.
    pub const UNCOUNTED: u32 = u32::MAX;

    pub const NONE: ResolvedAttempt = ResolvedAttempt {
        counted_semester: Self::UNCOUNTED,
        best_grade_point: 0.0,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SemesterTotals {
    pub native_credit: f64,
    pub native_points: f64,
    pub carried_credit: f64,
    pub carried_points: f64,
}
