// src/engine/resolve.rs
use std::collections::HashMap;

use crate::engine::types::{CourseRecord, ResolvedAttempt};

/// Counted attempt for `code`: the earliest semester it appears in and the best
/// grade point over all attempts. Unselected attempts count as 0 for the best
/// grade but still take part in the earliest semester. Rows above the first
/// header (semester 0) are ignored.
pub fn resolve(courses: &[CourseRecord], code: &str) -> ResolvedAttempt {
    courses
        .iter()
        .filter(|c| c.semester != 0 && c.code == code)
        .fold(ResolvedAttempt::NONE, |acc, c| ResolvedAttempt {
            counted_semester: acc.counted_semester.min(c.semester),
            best_grade_point: acc.best_grade_point.max(c.grade.point().unwrap_or(0.0)),
        })
}

/// Per-pass memo over [`resolve`]. Build a fresh one for every recompute.
pub struct Resolver<'a> {
    courses: &'a [CourseRecord],
    cache: HashMap<&'a str, ResolvedAttempt>,
}

impl<'a> Resolver<'a> {
    pub fn new(courses: &'a [CourseRecord]) -> Self {
        Self { courses, cache: HashMap::new() }
    }

    pub fn resolve(&mut self, code: &'a str) -> ResolvedAttempt {
        let courses = self.courses;
        *self.cache.entry(code).or_insert_with(|| resolve(courses, code))
    }
}
