// src/engine/aggregate.rs
use crate::engine::resolve::Resolver;
use crate::engine::types::{SemesterBlock, SemesterTotals, TranscriptModel};
use crate::error::Diagnostic;
use crate::specs::CarriedPoints;

/// Native and carried totals of one semester block.
///
/// A course counts as native when its counted attempt is this semester.
/// Otherwise its credit is carried in, and its points are booked per `carried`.
/// Points always use the row's own credit and the best grade over all attempts.
pub fn aggregate<'a>(
    model: &'a TranscriptModel,
    block: &SemesterBlock,
    resolver: &mut Resolver<'a>,
    carried: CarriedPoints,
    diagnostics: &mut Vec<Diagnostic>,
) -> SemesterTotals {
    let mut totals = SemesterTotals::default();

    for course in model.block_courses(block) {
        if course.grade.is_unselected() {
            continue;
        }
        if !course.credit.is_finite() {
            diagnostics.push(Diagnostic::ParseFailure {
                semester: block.index,
                row: course.row,
                field: "credit",
                text: course.credit_text.clone(),
            });
            continue;
        }

        let attempt = resolver.resolve(&course.code);
        let points = course.credit * attempt.best_grade_point;

        if attempt.counted_semester == block.index {
            totals.native_credit += course.credit;
            totals.native_points += points;
        } else {
            totals.carried_credit += course.credit;
            match carried {
                CarriedPoints::Overwrite => totals.carried_points = points,
                CarriedPoints::Accumulate => totals.carried_points += points,
            }
        }
    }
    totals
}
