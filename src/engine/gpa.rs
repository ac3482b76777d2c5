// src/engine/gpa.rs
//
// SGPA/CGPA arithmetic and the number formatting used in the table cells.

use crate::engine::types::SemesterTotals;

/// `native_points / native_credit`; `None` when that isn't a finite number
/// (no native credit).
pub fn sgpa(totals: &SemesterTotals) -> Option<f64> {
    let v = totals.native_points / totals.native_credit;
    v.is_finite().then_some(v)
}

/// Fixed-point rendering that rounds exact ties away from zero
/// (`3.625` → `"3.63"`), unlike `format!("{:.2}")` which rounds them to even.
pub fn to_fixed(x: f64, digits: usize) -> String {
    if x.is_nan() {
        return s!("NaN");
    }
    if x.is_infinite() {
        return s!(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }

    // far more digits than an f64 carries, so the first dropped digit decides
    let exact = format!("{:.*}", digits + 30, x.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((&exact, ""));

    let mut buf: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(digits)).collect();
    if frac_part.as_bytes().get(digits).is_some_and(|&d| d >= b'5') {
        let mut i = buf.len();
        loop {
            if i == 0 {
                buf.insert(0, b'1');
                break;
            }
            i -= 1;
            if buf[i] == b'9' {
                buf[i] = b'0';
            } else {
                buf[i] += 1;
                break;
            }
        }
    }

    let int_len = buf.len() - digits;
    let mut out = String::with_capacity(buf.len() + 2);
    if x < 0.0 {
        out.push('-');
    }
    out.extend(buf[..int_len].iter().map(|&b| b as char));
    if digits > 0 {
        out.push('.');
        out.extend(buf[int_len..].iter().map(|&b| b as char));
    }
    out
}

/// Shortest round-trip rendering (`6.0` → `"6"`, `21.75` → `"21.75"`).
pub fn fmt_num(x: f64) -> String {
    format!("{}", x)
}

/// Total cell text: `"native"`, or `"native (carried)"` when something was carried in.
pub fn fmt_total(native: f64, carried: f64) -> String {
    if carried != 0.0 {
        format!("{} ({})", fmt_num(native), fmt_num(carried))
    } else {
        fmt_num(native)
    }
}

/// Running CGPA: the plain mean of semester SGPAs, in semester order.
/// Every semester advances the count; only finite, non-zero SGPAs add to the sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct CgpaFold {
    sum: f64,
    count: u32,
}

impl CgpaFold {
    pub fn new() -> Self { Self::default() }

    /// Fold in the next semester and return the CGPA so far.
    pub fn push(&mut self, sgpa: Option<f64>) -> f64 {
        self.count += 1;
        if let Some(v) = sgpa.filter(|v| v.is_finite() && *v != 0.0) {
            self.sum += v;
        }
        self.sum / self.count as f64
    }

    #[inline]
    pub fn count(&self) -> u32 { self.count }
}
