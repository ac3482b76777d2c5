// src/error.rs
use thiserror::Error;

/// Fatal errors at the entry points (load, parse, select, export).
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("no transcript table found")]
    NoTableFound,
    #[error("unknown grade '{0}'")]
    UnknownGrade(String),
    #[error("row {0} is not a course row")]
    NotACourseRow(usize),
    #[error("no course '{code}'{}", in_semester(.semester))]
    UnknownCourse { code: String, semester: Option<u32> },
    #[error("invalid grade selection '{0}' (expected CODE=GRADE or CODE@SEM=GRADE)")]
    InvalidSelection(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GradeResult<T> = Result<T, GradeError>;

fn in_semester(semester: &Option<u32>) -> String {
    semester.map(|s| format!(" in semester {s}")).unwrap_or_default()
}

/// Recoverable per-row / per-semester conditions. The affected row or label is
/// skipped and the pass carries on.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Diagnostic {
    #[error("semester {semester}, row {row}: {what}")]
    StructuralMismatch { semester: u32, row: usize, what: &'static str },
    #[error("semester {semester}, row {row}: cannot read {field} from '{text}'")]
    ParseFailure { semester: u32, row: usize, field: &'static str, text: String },
}

impl Diagnostic {
    pub fn semester(&self) -> u32 {
        match self {
            Diagnostic::StructuralMismatch { semester, .. }
            | Diagnostic::ParseFailure { semester, .. } => *semester,
        }
    }
}
