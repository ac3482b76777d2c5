// benches/recompute.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use grade_calc::config::options::LayoutChoice;
use grade_calc::engine::{recompute, GradeSelection, Grade};
use grade_calc::specs::CarriedPoints;
use grade_calc::Transcript;

fn load_sample() -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/semester_wise.html");
    std::fs::read_to_string(path).expect("read tests/fixtures/semester_wise.html")
}

fn bench_recompute(c: &mut Criterion) {
    let doc = load_sample();

    c.bench_function("parse_and_recompute", |b| {
        b.iter(|| {
            let t = Transcript::parse(black_box(doc.as_str()), LayoutChoice::Auto).expect("parse");
            black_box(t.semesters().len())
        })
    });

    let mut t = Transcript::parse(doc.as_str(), LayoutChoice::Auto).expect("parse");

    c.bench_function("recompute_model", |b| {
        b.iter(|| {
            let rc = recompute(black_box(t.model()), CarriedPoints::Overwrite);
            black_box(rc.writes.len())
        })
    });

    c.bench_function("select_grade", |b| {
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let g = if flip { Grade::B } else { Grade::A };
            let rc = t.select_grade(13, GradeSelection::Selected(g)).expect("course row");
            black_box(rc.writes.len())
        })
    });

    c.bench_function("render_html", |b| {
        b.iter(|| black_box(t.to_html().len()))
    });
}

criterion_group!(benches, bench_recompute);
criterion_main!(benches);
