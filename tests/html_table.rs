// tests/html_table.rs
use grade_calc::core::html::{attr_value, find_table_after_id, find_table_by_id, strip_tags, table_span, Tags};
use grade_calc::core::sanitize::{normalize_entities, parse_leading_f64, sanitize_filename};
use grade_calc::core::table::{Cell, CellKind, Table};

#[test]
fn attributes_quoted_unquoted_and_bare() {
    let attrs = r#"id="a" class=b data-x='c d' hidden"#;
    assert_eq!(attr_value(attrs, "id"), Some("a"));
    assert_eq!(attr_value(attrs, "CLASS"), Some("b"));
    assert_eq!(attr_value(attrs, "data-x"), Some("c d"));
    assert_eq!(attr_value(attrs, "hidden"), Some(""));
    assert_eq!(attr_value(attrs, "title"), None);
}

#[test]
fn tags_skip_comments_and_script_bodies() {
    let doc = "<!-- <td> --><script>if (a<b) { x = '<tr>'; }</script><P class='x'>1 < 2</p>";
    let names: Vec<(String, bool)> = Tags::new(doc).map(|t| (t.name.to_ascii_lowercase(), t.close)).collect();
    assert_eq!(
        names,
        vec![
            ("script".to_string(), false),
            ("script".to_string(), true),
            ("p".to_string(), false),
            ("p".to_string(), true),
        ]
    );
}

#[test]
fn strip_tags_decodes_and_collapses() {
    assert_eq!(strip_tags("  <b>SGPA:</b>&nbsp;3.56\n<br>(x) "), "SGPA: 3.56 (x)");
    assert_eq!(normalize_entities("a&nbsp;b &amp;lt; &#65;&#x42;"), "a b &lt; AB");
    assert_eq!(normalize_entities("R&D; fish & chips"), "R&D; fish & chips");
}

#[test]
fn leading_number_parse_is_lenient() {
    assert_eq!(parse_leading_f64("3.0"), 3.0);
    assert_eq!(parse_leading_f64(" 3 cr"), 3.0);
    assert_eq!(parse_leading_f64(".5"), 0.5);
    assert!(parse_leading_f64("-").is_nan());
    assert!(parse_leading_f64("").is_nan());
    assert!(parse_leading_f64("three").is_nan());
}

#[test]
fn filenames_are_sanitized() {
    assert_eq!(sanitize_filename("Result: Spring 2021", "x"), "Result_Spring_2021");
    assert_eq!(sanitize_filename("***", "transcript"), "transcript");
}

#[test]
fn table_span_balances_nested_tables() {
    let doc = r#"<p>x</p><table id="t"><tr><td>x<table><tr><td>inner</td></tr></table></td><td>y</td></tr></table><table id="u"></table>"#;
    let span = find_table_by_id(doc, "t").expect("table t");
    assert!(doc[span.clone()].starts_with(r#"<table id="t">"#));
    assert!(doc[span.clone()].ends_with("</tr></table>"));
    assert_eq!(table_span(doc, span.start), span);

    let table = Table::parse(doc, span);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].cells.len(), 2);
    assert_eq!(table.rows[0].cells[1].text(), "y");
}

#[test]
fn table_after_anchor_id() {
    let doc = r#"<table id="early"></table><li id="tabseven">x</li><div><table class="r"><tr><td>1</td></tr></table></div>"#;
    let span = find_table_after_id(doc, "tabseven").expect("table after anchor");
    assert!(doc[span].starts_with(r#"<table class="r">"#));
    assert!(find_table_after_id(doc, "missing").is_none());
}

#[test]
fn implicitly_closed_rows_and_cells() {
    let doc = "<table><tr><td>a<td colspan=2>b<tr><th>h<td>c</table>";
    let table = Table::parse(doc, 0..doc.len());
    assert_eq!(table.to_rows(), vec![vec!["a", "b"], vec!["h", "c"]]);
    assert_eq!(table.rows[0].cells[1].colspan, 2);
    assert_eq!(table.rows[1].cells[0].kind, CellKind::Th);
    assert_eq!(table.rows[1].td_count(), 1);
    assert_eq!(table.rows[1].th_count(), 1);
}

#[test]
fn untouched_table_renders_byte_identical() {
    let doc = "<div>\n<table>\n <tr><td> CSE&nbsp;101 </td><th>A</th></tr>\n</table>\n</div>";
    let table = Table::parse(doc, 6..doc.len() - 7);
    assert_eq!(table.rows[0].cells[0].text(), "CSE 101");
    assert_eq!(table.render_into(doc), doc);
}

#[test]
fn edited_cells_keep_their_wrapper_and_inserted_rows_land_in_place() {
    let doc = "<table><tr><th><strong>SGPA: 3.56</strong></th><th>CGPA: 3.56</th></tr><tr><td>x</td></tr></table>";
    let mut table = Table::parse(doc, 0..doc.len());

    assert!(table.cell_mut(0, 0).unwrap().set_text("SGPA: 3.56 (3.81)"));
    assert!(table.cell_mut(0, 1).unwrap().set_text("CGPA: <4 & up>"));
    table.insert_row(1, vec![Cell::td("Total").with_colspan(2), Cell::td("8")]);
    table.insert_row(3, vec![Cell::td("end")]);

    let html = table.render_into(doc);
    assert_eq!(
        html,
        "<table><tr><th><strong>SGPA: 3.56 (3.81)</strong></th><th>CGPA: &lt;4 &amp; up&gt;</th></tr>\
         <tr data-grade-calc=\"total\"><td colspan=\"2\">Total</td><td>8</td></tr>\n\
         <tr><td>x</td></tr>\
         <tr data-grade-calc=\"total\"><td>end</td></tr>\n</table>"
    );
}

#[test]
fn setting_back_the_original_text_restores_the_source() {
    let doc = "<table><tr><td>\n  <b>A</b>\n</td></tr></table>";
    let mut table = Table::parse(doc, 0..doc.len());
    let cell = table.cell_mut(0, 0).unwrap();
    assert!(cell.set_text("B"));
    assert!(cell.is_dirty());
    assert!(cell.set_text("A"));
    assert!(!cell.is_dirty());
    assert!(!cell.set_text("A"));
    assert_eq!(table.render_into(doc), doc);
}
