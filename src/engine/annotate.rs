// src/engine/annotate.rs
//
// Label annotation: `"SGPA: 3.56"` + `"3.81"` → `"SGPA: 3.56 (3.81)"`.
// A label carries at most one parenthesized suffix, so stripping the last
// balanced trailing group always gets back to the published text.

/// Label with its trailing `(...)` group removed, if it has one.
/// Only the last group is stripped; an unbalanced tail is left alone.
pub fn strip_annotation(text: &str) -> &str {
    let t = text.trim_end();
    if !t.ends_with(')') {
        return t;
    }
    let mut depth = 0usize;
    for (i, ch) in t.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return t[..i].trim_end();
                }
            }
            _ => {}
        }
    }
    t
}

/// Value part of a `"LABEL: value"` text, trimmed. `None` without a colon.
pub fn label_value(text: &str) -> Option<&str> {
    text.split(':').nth(1).map(str::trim)
}

/// Parenthesized value of an annotated label.
pub fn annotation(text: &str) -> Option<&str> {
    let canonical = strip_annotation(text);
    let t = text.trim_end();
    if canonical.len() == t.len() {
        return None;
    }
    let group = t[canonical.len()..].trim();
    Some(group.strip_prefix('(')?.strip_suffix(')')?.trim())
}

/// `canonical` when it already shows `value`, `"canonical (value)"` otherwise.
/// Values are compared as text: `"3.5"` and `"3.50"` differ.
/// Idempotent: annotating an annotated label only replaces the suffix.
pub fn annotate(text: &str, value: &str) -> String {
    let canonical = strip_annotation(text);
    let same = label_value(canonical) == Some(value);
    if same {
        s!(canonical)
    } else {
        format!("{canonical} ({value})")
    }
}

/// Value that is currently in effect for a label: the recomputed one in
/// parentheses if present, else the published one.
pub fn effective_value(text: &str) -> Option<f64> {
    let raw = match annotation(text) {
        Some(v) => v,
        None => label_value(strip_annotation(text))?,
    };
    raw.parse::<f64>().ok()
}
