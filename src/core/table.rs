// src/core/table.rs
//! Row/cell view of one `<table>` element.
//!
//! Parsing keeps the byte span of every row and every cell's inner HTML, so the
//! table can be written back into the document it came from: only cells whose
//! text changed are re-encoded, and synthetic rows are spliced in before the
//! row they were inserted in front of. Everything else stays byte-identical.
//!
//! Cell text is the visible text: tags stripped, entities decoded, whitespace
//! collapsed and trimmed. `<th>` and `<td>` are kept apart because the page
//! layouts address them separately (a `<th>` grade cell, "the 3rd `<td>`").

use std::ops::Range;

use super::html::{self, Tag, Tags};
use super::sanitize::escape_text;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Td,
    Th,
}

impl CellKind {
    fn tag(self) -> &'static str {
        match self { CellKind::Td => "td", CellKind::Th => "th" }
    }
}

#[derive(Clone, Debug)]
pub struct Cell {
    pub kind: CellKind,
    pub colspan: u32,
    text: String,
    /// Text as parsed; a cell is rewritten only while its text differs.
    orig: String,
    /// Inner HTML span in the source document (parsed cells only).
    inner: Option<Range<usize>>,
}

impl Cell {
    pub fn new(kind: CellKind, text: impl Into<String>) -> Self {
        let text = text.into();
        Self { kind, colspan: 1, orig: text.clone(), text, inner: None }
    }
    pub fn td(text: impl Into<String>) -> Self { Self::new(CellKind::Td, text) }
    pub fn th(text: impl Into<String>) -> Self { Self::new(CellKind::Th, text) }

    pub fn with_colspan(mut self, colspan: u32) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    #[inline]
    pub fn text(&self) -> &str { &self.text }

    /// Returns `true` when the text actually changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    #[inline]
    pub fn is_dirty(&self) -> bool { self.text != self.orig }

    /// Text the cell had when the table was parsed.
    #[inline]
    pub fn original_text(&self) -> &str { &self.orig }
}

#[derive(Clone, Debug)]
enum RowSource {
    Parsed(Range<usize>),
    Inserted,
}

#[derive(Clone, Debug)]
pub struct Row {
    pub cells: Vec<Cell>,
    source: RowSource,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells, source: RowSource::Inserted }
    }

    #[inline]
    pub fn is_inserted(&self) -> bool { matches!(self.source, RowSource::Inserted) }

    pub fn td_count(&self) -> usize {
        self.cells.iter().filter(|c| c.kind == CellKind::Td).count()
    }

    pub fn th_count(&self) -> usize {
        self.cells.iter().filter(|c| c.kind == CellKind::Th).count()
    }

    /// Index into `cells` of the `n`-th cell of `kind`.
    pub fn position_of(&self, kind: CellKind, n: usize) -> Option<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == kind)
            .nth(n)
            .map(|(i, _)| i)
    }

    pub fn td(&self, n: usize) -> Option<&Cell> {
        self.position_of(CellKind::Td, n).map(|i| &self.cells[i])
    }

    pub fn th(&self, n: usize) -> Option<&Cell> {
        self.position_of(CellKind::Th, n).map(|i| &self.cells[i])
    }

    /// Approximation of the row's `textContent`: cell texts joined by a space.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for c in &self.cells {
            if c.text.is_empty() { continue; }
            if !out.is_empty() { out.push(' '); }
            out.push_str(&c.text);
        }
        out
    }
}

#[derive(Clone, Debug, Default)]
pub struct Table {
    pub rows: Vec<Row>,
    /// Offset of `</table>` (where trailing inserted rows go).
    close_at: Option<usize>,
    span: Option<Range<usize>>,
}

impl Table {
    /// A free-standing table (tests, benches); it can't be written back into HTML.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self {
            rows: rows.into_iter().map(Row::new).collect(),
            close_at: None,
            span: None,
        }
    }

    /// Parse the table element occupying `span` of `doc`.
    /// Implicitly closed `<tr>`/`<td>` are tolerated; nested tables are
    /// treated as opaque cell content.
    pub fn parse(doc: &str, span: Range<usize>) -> Self {
        let region = &doc[..span.end];
        let mut rows: Vec<Row> = Vec::new();
        let mut close_at = None;

        let mut depth = 0usize;
        let mut row: Option<(usize, Vec<Cell>)> = None;
        let mut cell: Option<(CellKind, u32, usize)> = None;

        fn finish_cell(doc: &str, cell: &mut Option<(CellKind, u32, usize)>, row: &mut Option<(usize, Vec<Cell>)>, end: usize) {
            if let Some((kind, colspan, inner_start)) = cell.take() {
                if let Some((_, cells)) = row.as_mut() {
                    let inner = inner_start..end.max(inner_start);
                    let text = html::strip_tags(&doc[inner.clone()]);
                    cells.push(Cell {
                        kind,
                        colspan,
                        orig: text.clone(),
                        text,
                        inner: Some(inner),
                    });
                }
            }
        }

        fn finish_row(rows: &mut Vec<Row>, row: &mut Option<(usize, Vec<Cell>)>, end: usize) {
            if let Some((start, cells)) = row.take() {
                rows.push(Row { cells, source: RowSource::Parsed(start..end) });
            }
        }

        for tag in Tags::starting_at(region, span.start) {
            if tag.is("table") {
                if tag.close {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        finish_cell(doc, &mut cell, &mut row, tag.start);
                        finish_row(&mut rows, &mut row, tag.start);
                        close_at = Some(tag.start);
                        break;
                    }
                } else {
                    depth += 1;
                }
                continue;
            }
            if depth != 1 {
                continue;
            }

            match (tag.close, cell_kind(&tag)) {
                (false, Some(kind)) => {
                    finish_cell(doc, &mut cell, &mut row, tag.start);
                    if row.is_none() {
                        // <th> not necessarily wrapped in <tr>
                        row = Some((tag.start, Vec::new()));
                    }
                    let colspan = tag
                        .attr("colspan")
                        .and_then(|v| v.trim().parse::<u32>().ok())
                        .unwrap_or(1)
                        .max(1);
                    cell = Some((kind, colspan, tag.end));
                }
                (true, Some(_)) => finish_cell(doc, &mut cell, &mut row, tag.start),
                (false, None) if tag.is("tr") => {
                    finish_cell(doc, &mut cell, &mut row, tag.start);
                    finish_row(&mut rows, &mut row, tag.start);
                    row = Some((tag.start, Vec::new()));
                }
                (true, None) if tag.is("tr") => {
                    finish_cell(doc, &mut cell, &mut row, tag.start);
                    finish_row(&mut rows, &mut row, tag.end);
                }
                (_, None) if tag.is("thead") || tag.is("tbody") || tag.is("tfoot") => {
                    finish_cell(doc, &mut cell, &mut row, tag.start);
                    finish_row(&mut rows, &mut row, tag.start);
                }
                _ => {}
            }
        }
        let end = close_at.unwrap_or(span.end);
        finish_cell(doc, &mut cell, &mut row, end);
        finish_row(&mut rows, &mut row, end);

        Self { rows, close_at, span: Some(span) }
    }

    /// Insert a synthetic row so that it ends up at `index`.
    pub fn insert_row(&mut self, index: usize, cells: Vec<Cell>) {
        let index = index.min(self.rows.len());
        self.rows.insert(index, Row::new(cells));
    }

    pub fn cell(&self, row: usize, cell: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.get(cell)
    }

    pub fn cell_mut(&mut self, row: usize, cell: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.cells.get_mut(cell)
    }

    /// Plain cell texts, row by row.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.text.clone()).collect())
            .collect()
    }

    pub fn max_cells(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Write the current state back into `doc` (the document this table was
    /// parsed from). Free-standing tables render as a bare `<table>`.
    pub fn render_into(&self, doc: &str) -> String {
        let Some(span) = self.span.clone() else {
            return self.render_standalone();
        };

        // (at, replace_to, text); inserts have at == replace_to
        let mut edits: Vec<(usize, usize, String)> = Vec::new();
        let mut pending_inserts: Vec<&Row> = Vec::new();

        for row in &self.rows {
            match &row.source {
                RowSource::Inserted => pending_inserts.push(row),
                RowSource::Parsed(range) => {
                    for r in pending_inserts.drain(..) {
                        edits.push((range.start, range.start, render_row(r)));
                    }
                    for c in row.cells.iter().filter(|c| c.is_dirty()) {
                        if let Some(inner) = &c.inner {
                            let html = rewrap(&doc[inner.clone()], &c.text);
                            edits.push((inner.start, inner.end, html));
                        }
                    }
                }
            }
        }
        let tail = self.close_at.unwrap_or(span.end);
        for r in pending_inserts.drain(..) {
            edits.push((tail, tail, render_row(r)));
        }

        // stable: inserts at the same offset keep table order
        edits.sort_by_key(|e| e.0);

        let mut out = String::with_capacity(doc.len() + edits.len() * 64);
        let mut last = 0usize;
        for (at, to, text) in edits {
            out.push_str(&doc[last..at]);
            out.push_str(&text);
            last = to;
        }
        out.push_str(&doc[last..]);
        out
    }

    fn render_standalone(&self) -> String {
        let mut out = s!("<table>\n");
        for r in &self.rows {
            out.push_str(&render_row(r));
        }
        out.push_str("</table>\n");
        out
    }
}

fn cell_kind(tag: &Tag<'_>) -> Option<CellKind> {
    if tag.is("td") {
        Some(CellKind::Td)
    } else if tag.is("th") {
        Some(CellKind::Th)
    } else {
        None
    }
}

fn render_row(row: &Row) -> String {
    let mut out = s!("<tr data-grade-calc=\"total\">");
    for c in &row.cells {
        let tag = c.kind.tag();
        if c.colspan > 1 {
            out.push_str(&format!("<{tag} colspan=\"{}\">", c.colspan));
        } else {
            out.push_str(&format!("<{tag}>"));
        }
        out.push_str(&escape_text(&c.text));
        out.push_str(&format!("</{tag}>"));
    }
    out.push_str("</tr>\n");
    out
}

/// New inner HTML for an edited cell. A wrapper like `<strong>…</strong>`
/// around the old text is kept when it is balanced; otherwise the markup is dropped.
fn rewrap(old_inner: &str, text: &str) -> String {
    let trimmed = old_inner.trim();
    let mut tags = Tags::new(trimmed).peekable();

    let mut prefix_end = 0usize;
    let mut opened = 0usize;
    while let Some(t) = tags.peek() {
        if t.start != prefix_end || t.close {
            break;
        }
        prefix_end = t.end;
        opened += 1;
        tags.next();
    }

    let mut suffix_start = trimmed.len();
    let mut closed = 0usize;
    let closers: Vec<Tag<'_>> = Tags::starting_at(trimmed, prefix_end).collect();
    for t in closers.iter().rev() {
        if t.end != suffix_start || !t.close {
            break;
        }
        suffix_start = t.start;
        closed += 1;
    }

    if opened > 0 && opened == closed && prefix_end <= suffix_start {
        format!("{}{}{}", &trimmed[..prefix_end], escape_text(text), &trimmed[suffix_start..])
    } else {
        escape_text(text)
    }
}
