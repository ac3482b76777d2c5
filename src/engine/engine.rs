// src/engine/engine.rs
//
// One recompute pass: aggregate every semester, derive SGPA and the running
// CGPA, and produce the cell texts to write. `recompute` is pure over the
// extracted model; `apply` is the only place the table is touched.

use crate::core::table::Table;
use crate::engine::aggregate::aggregate;
use crate::engine::annotate::{annotate, effective_value, label_value, strip_annotation};
use crate::engine::extract::{extract, Extraction};
use crate::engine::gpa::{fmt_total, sgpa, to_fixed, CgpaFold};
use crate::engine::resolve::Resolver;
use crate::engine::types::*;
use crate::error::Diagnostic;
use crate::specs::{CarriedPoints, Layout};

/// Decimals shown for SGPA/CGPA.
pub const GPA_DIGITS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct CellWrite {
    pub row: usize,
    pub cell: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SemesterSummary {
    pub index: u32,
    pub totals: SemesterTotals,
    /// `None` when the semester has no native credit.
    pub sgpa: Option<f64>,
    /// `None` when the semester has no usable GPA labels.
    pub cgpa: Option<f64>,
    pub published_sgpa: Option<String>,
    pub published_cgpa: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recomputation {
    pub writes: Vec<CellWrite>,
    pub semesters: Vec<SemesterSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

fn published(label: &str) -> Option<String> {
    label_value(strip_annotation(label))
        .filter(|v| !v.is_empty())
        .map(|v| s!(v))
}

pub fn recompute(model: &TranscriptModel, carried: CarriedPoints) -> Recomputation {
    let mut rc = Recomputation::default();
    let mut resolver = Resolver::new(&model.courses);
    let mut fold = CgpaFold::new();

    for block in &model.blocks {
        let totals = aggregate(model, block, &mut resolver, carried, &mut rc.diagnostics);
        let sgpa_value = sgpa(&totals);

        if let Some(t) = block.total {
            rc.writes.push(CellWrite {
                row: t.row,
                cell: t.credit,
                text: fmt_total(totals.native_credit, totals.carried_credit),
            });
            rc.writes.push(CellWrite {
                row: t.row,
                cell: t.points,
                text: fmt_total(totals.native_points, totals.carried_points),
            });
        }

        let mut summary = SemesterSummary {
            index: block.index,
            totals,
            sgpa: sgpa_value,
            cgpa: None,
            published_sgpa: None,
            published_cgpa: None,
        };

        match &block.gpa {
            Some(labels) => {
                let sgpa_text = match sgpa_value {
                    Some(v) => annotate(&labels.sgpa, &to_fixed(v, GPA_DIGITS)),
                    None => s!(strip_annotation(&labels.sgpa)),
                };

                // CGPA folds in whatever the SGPA label now shows; a semester
                // without native credit adds nothing but still counts
                let cgpa = fold.push(sgpa_value.and_then(|_| effective_value(&sgpa_text)));
                summary.published_sgpa = published(&labels.sgpa);
                summary.published_cgpa = published(&labels.cgpa);
                let cgpa_text = if summary.published_cgpa.is_some() {
                    annotate(&labels.cgpa, &to_fixed(cgpa, GPA_DIGITS))
                } else {
                    labels.cgpa.clone()
                };
                summary.cgpa = Some(cgpa);

                if labels.shared_cell() {
                    rc.writes.push(CellWrite {
                        row: labels.row,
                        cell: labels.sgpa_cell,
                        text: format!("{sgpa_text} and {cgpa_text}"),
                    });
                } else {
                    rc.writes.push(CellWrite { row: labels.row, cell: labels.sgpa_cell, text: sgpa_text });
                    rc.writes.push(CellWrite { row: labels.row, cell: labels.cgpa_cell, text: cgpa_text });
                }
            }
            None => {
                fold.push(None);
            }
        }

        logd!(
            "[recompute] semester {}: credit {} ({}), points {} ({}), sgpa {:?}, cgpa {:?}",
            summary.index,
            totals.native_credit,
            totals.carried_credit,
            totals.native_points,
            totals.carried_points,
            summary.sgpa,
            summary.cgpa
        );
        rc.semesters.push(summary);
    }

    for d in &rc.diagnostics {
        logw!("[recompute] {}", d);
    }
    rc
}

/// Write the recomputed texts into the table. Returns how many cells changed.
pub fn apply(table: &mut Table, rc: &Recomputation) -> usize {
    let mut changed = 0usize;
    for w in &rc.writes {
        match table.cell_mut(w.row, w.cell) {
            Some(cell) => {
                if cell.set_text(w.text.as_str()) {
                    changed += 1;
                }
            }
            None => logw!("[recompute] no cell at row {}, cell {}", w.row, w.cell),
        }
    }
    changed
}

/// Extract, recompute and apply in one go. Extraction diagnostics come first.
pub fn run(table: &mut Table, layout: &Layout, carried: CarriedPoints) -> (TranscriptModel, Recomputation) {
    let Extraction { model, diagnostics } = extract(table, layout);
    let mut rc = recompute(&model, carried);
    let changed = apply(table, &rc);
    logd!("[recompute] {} cells changed", changed);

    let mut all = diagnostics;
    all.append(&mut rc.diagnostics);
    rc.diagnostics = all;
    (model, rc)
}
