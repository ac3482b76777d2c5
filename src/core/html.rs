// src/core/html.rs
//
// Tolerant tag scanning. No DOM: we walk `<...>` tokens and keep byte offsets
// so edited cells can be spliced back into the original document.
// Tag and attribute names are matched case-insensitively (ASCII).

use std::ops::Range;

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// One tag token. `start` is the `<`, `end` is one past the `>`.
#[derive(Clone, Copy, Debug)]
pub struct Tag<'a> {
    pub start: usize,
    pub end: usize,
    pub name: &'a str,
    pub close: bool,
    pub attrs: &'a str,
}

impl<'a> Tag<'a> {
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr_value(self.attrs, name)
    }
}

/// Iterator over element tags. Skips comments, doctypes and the bodies
/// of `<script>`/`<style>`.
pub struct Tags<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
}

impl<'a> Tags<'a> {
    pub fn new(s: &'a str) -> Self { Self::starting_at(s, 0) }
    pub fn starting_at(s: &'a str, i: usize) -> Self { Self { s, b: s.as_bytes(), i } }

    /// Position of the `>` closing the tag opened at `lt`, quote-aware.
    fn tag_end(&self, lt: usize) -> Option<usize> {
        let mut in_s = false; // '
        let mut in_d = false; // "
        let mut j = lt + 1;
        while j < self.b.len() {
            match self.b[j] {
                b'\'' if !in_d => in_s = !in_s,
                b'"'  if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => return Some(j),
                _ => {}
            }
            j += 1;
        }
        None
    }

    fn skip_raw_text(&mut self, name: &str) {
        let close = format!("</{}", name);
        let rest = to_lower(&self.s[self.i..]);
        self.i = match rest.find(&close) {
            Some(off) => self.i + off,
            None => self.b.len(),
        };
    }
}

impl<'a> Iterator for Tags<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Tag<'a>> {
        loop {
            let lt = self.i + self.b.get(self.i..)?.iter().position(|&c| c == b'<')?;

            if self.b[lt..].starts_with(b"<!--") {
                self.i = match self.s[lt + 4..].find("-->") {
                    Some(off) => lt + 4 + off + 3,
                    None => self.b.len(),
                };
                continue;
            }

            // `a < b` in text is not a tag
            match self.b.get(lt + 1) {
                Some(c) if c.is_ascii_alphabetic() || matches!(c, b'/' | b'!' | b'?') => {}
                _ => { self.i = lt + 1; continue; }
            }

            let Some(gt) = self.tag_end(lt) else {
                self.i = self.b.len();
                return None;
            };
            self.i = gt + 1;

            let inner = &self.s[lt + 1..gt];
            let (close, body) = match inner.strip_prefix('/') {
                Some(rest) => (true, rest),
                None => (false, inner),
            };
            let name_len = body
                .bytes()
                .take_while(|c| c.is_ascii_alphanumeric())
                .count();
            if name_len == 0 {
                // `<!DOCTYPE>`, `<?xml?>`, stray `<`
                continue;
            }
            let name = &body[..name_len];
            let attrs = body[name_len..].trim_end_matches('/').trim();

            if !close && (name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")) {
                let lname = to_lower(name);
                self.skip_raw_text(&lname);
            }

            return Some(Tag { start: lt, end: gt + 1, name, close, attrs });
        }
    }
}

/// Value of attribute `name` inside a tag's attribute text.
/// Handles `a="x"`, `a='x'`, `a=x` and bare `a` (→ "").
pub fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let b = attrs.as_bytes();
    let n = b.len();
    let mut i = 0usize;
    while i < n {
        while i < n && (b[i].is_ascii_whitespace() || b[i] == b'/') { i += 1; }
        let key_start = i;
        while i < n && !b[i].is_ascii_whitespace() && b[i] != b'=' { i += 1; }
        let key = &attrs[key_start..i];
        while i < n && b[i].is_ascii_whitespace() { i += 1; }

        let value = if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            match b.get(i) {
                Some(&q) if q == b'"' || q == b'\'' => {
                    let vs = i + 1;
                    let ve = attrs[vs..].find(q as char).map(|e| vs + e).unwrap_or(n);
                    i = (ve + 1).min(n);
                    &attrs[vs..ve]
                }
                _ => {
                    let vs = i;
                    while i < n && !b[i].is_ascii_whitespace() { i += 1; }
                    &attrs[vs..i]
                }
            }
        } else {
            ""
        };

        if !key.is_empty() && key.eq_ignore_ascii_case(name) {
            return Some(value);
        }
        if key.is_empty() { i += 1; }
    }
    None
}

/// Remove all tags, decode entities, collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut last = 0usize;
    for tag in Tags::new(s) {
        out.push_str(&s[last..tag.start]);
        // block-ish tags separate words
        if tag.is("br") || tag.is("p") || tag.is("div") { out.push(' '); }
        last = tag.end;
    }
    out.push_str(&s[last..]);
    normalize_ws(&normalize_entities(&out))
}

/// Span of the whole `<table …>…</table>` element whose opening tag starts at `open`.
/// Nested tables are balanced; an unterminated table runs to end of input.
pub fn table_span(doc: &str, open: usize) -> Range<usize> {
    let mut depth = 0usize;
    for tag in Tags::starting_at(doc, open) {
        if !tag.is("table") { continue; }
        if tag.close {
            depth = depth.saturating_sub(1);
            if depth == 0 { return open..tag.end; }
        } else {
            depth += 1;
        }
    }
    open..doc.len()
}

/// First `<table>` whose `id` attribute equals `id`.
pub fn find_table_by_id(doc: &str, id: &str) -> Option<Range<usize>> {
    Tags::new(doc)
        .find(|t| !t.close && t.is("table") && t.attr("id") == Some(id))
        .map(|t| table_span(doc, t.start))
}

/// First `<table>` opened after the element carrying `id`.
pub fn find_table_after_id(doc: &str, id: &str) -> Option<Range<usize>> {
    let mut tags = Tags::new(doc);
    tags.find(|t| !t.close && t.attr("id") == Some(id))?;
    tags.find(|t| !t.close && t.is("table"))
        .map(|t| table_span(doc, t.start))
}
