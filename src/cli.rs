// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::options::{ExportFormat, LayoutChoice};
use crate::engine::gpa::{fmt_total, to_fixed};
use crate::engine::engine::GPA_DIGITS;
use crate::file;
use crate::specs::CarriedPoints;
use crate::transcript::{GradeAssignment, Transcript};

#[derive(Parser, Debug)]
#[command(author, version, about = "Recompute SGPA/CGPA on a saved transcript page", long_about = None)]
pub struct Args {
    /// Saved transcript page (.html)
    #[arg(short, long)]
    pub input: PathBuf,

    /// auto | semester-wise | all-previous
    #[arg(short, long, default_value = "auto")]
    pub layout: LayoutChoice,

    /// Change a grade; repeatable. `-` clears the selection.
    #[arg(long = "set", value_name = "CODE[@SEM]=GRADE")]
    pub set: Vec<GradeAssignment>,

    /// CSV/TSV of `code,grade[,semester]` rows, applied before --set
    #[arg(long, value_name = "FILE")]
    pub grades: Option<PathBuf>,

    /// html | csv | tsv
    #[arg(short, long, default_value = "html")]
    pub format: ExportFormat,

    #[arg(long)]
    pub include_headers: bool,

    /// Add up the points of every carried-in retake instead of keeping the last one
    #[arg(long)]
    pub accumulate_carried: bool,

    /// Output file or directory (ending in '/'); stdout if omitted
    #[arg(short, long)]
    pub out: Option<String>,

    /// Print per-semester totals and averages
    #[arg(long)]
    pub summary: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init_stderr(args.verbose);

    let mut t = Transcript::load(&args.input, args.layout)
        .wrap_err_with(|| format!("loading {}", args.input.display()))?;
    if args.accumulate_carried {
        t = t.with_carried_points(CarriedPoints::Accumulate);
    }
    logf!("[cli] {} layout, {} semesters", t.layout().label, t.semesters().len());

    let mut selections = Vec::new();
    if let Some(p) = &args.grades {
        selections.extend(file::read_grade_file(p).wrap_err_with(|| format!("reading {}", p.display()))?);
    }
    selections.extend(args.set.iter().cloned());
    for a in &selections {
        t.apply(a).wrap_err_with(|| format!("setting {} to {}", a.code, a.grade))?;
    }

    if args.summary {
        print_summary(&t);
    }

    match &args.out {
        Some(o) => {
            let default = file::default_filename(&args.input, args.format);
            let path = file::resolve_single_out_path(o, &default)?;
            file::write_export_to(&t, args.format, args.include_headers, &path)?;
            eprintln!("Wrote {}", path.display());
        }
        None if !args.summary => {
            print!("{}", file::to_export_string(&t, args.format, args.include_headers));
        }
        None => {}
    }
    Ok(())
}

fn print_summary(t: &Transcript) {
    let gpa = |v: Option<f64>| v.map(|v| to_fixed(v, GPA_DIGITS)).unwrap_or_else(|| s!("-"));
    println!("{:<4} {:>14} {:>16} {:>14} {:>14}", "Sem", "Credit", "Points", "SGPA", "CGPA");
    for s in t.semesters() {
        println!(
            "{:<4} {:>14} {:>16} {:>14} {:>14}",
            s.index,
            fmt_total(s.totals.native_credit, s.totals.carried_credit),
            fmt_total(s.totals.native_points, s.totals.carried_points),
            join!(&gpa(s.sgpa), " / ", s.published_sgpa.as_deref().unwrap_or("-")),
            join!(&gpa(s.cgpa), " / ", s.published_cgpa.as_deref().unwrap_or("-")),
        );
    }
    for d in t.diagnostics() {
        eprintln!("warning: {d}");
    }
}
