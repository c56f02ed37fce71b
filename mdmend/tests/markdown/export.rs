//! Export tests (document tree → CommonMark / HTML)

use crate::common::md_to_doc;
use insta::assert_snapshot;
use mdmend::format::Format;
use mdmend::formats::html::{serialize_to_html, HtmlOptions};
use mdmend::formats::markdown::{MarkdownExtensions, MarkdownFormat};

fn to_html(md: &str) -> String {
    let doc = md_to_doc(md);
    serialize_to_html(
        &doc,
        &MarkdownExtensions::default(),
        &HtmlOptions::default(),
    )
    .expect("HTML rendering should succeed")
}

#[test]
fn test_html_paragraph() {
    assert_snapshot!(to_html("Hello world.\n").trim_end(), @"<p>Hello world.</p>");
}

#[test]
fn test_html_heading_and_code_span() {
    let html = to_html("## Usage\n\nRun `ls` first.\n");
    assert!(html.contains("<h2>Usage</h2>"));
    assert!(html.contains("<p>Run <code>ls</code> first.</p>"));
}

#[test]
fn test_html_tight_list() {
    assert_snapshot!(to_html("- one\n- two\n").trim_end(), @r"
    <ul>
    <li>one</li>
    <li>two</li>
    </ul>
    ");
}

#[test]
fn test_markdown_round_trip_preserves_block_count() {
    let source = "# Title\n\nFirst paragraph.\n\n- a\n- b\n\n```sh\nls\n```\n";
    let doc = md_to_doc(source);

    let md = MarkdownFormat::default()
        .serialize(&doc)
        .expect("serialization should succeed");
    let reparsed = md_to_doc(&md);

    assert_eq!(doc.children.len(), reparsed.children.len());
}

#[test]
fn test_markdown_export_emits_fences_and_markers() {
    let doc = md_to_doc("```python\nprint(1)\n```\n\n- item one\n- item two\n");
    let md = MarkdownFormat::default().serialize(&doc).unwrap();

    assert!(md.contains("```"));
    assert!(md.contains("print(1)"));
    assert!(md.contains("- item one"));
}

#[test]
fn test_html_escapes_raw_html_by_default() {
    let html = to_html("before\n\n<div onclick=\"x()\">raw</div>\n\nafter\n");
    assert!(!html.contains("onclick"));
}

#[test]
fn test_table_export_keeps_cells() {
    let doc = md_to_doc("|A|B|\n|-|-|\n|1|2|\n");
    let md = MarkdownFormat::default().serialize(&doc).unwrap();

    assert!(md.contains('|'), "table markup should survive: {md}");
    assert!(md.contains('A'));
    assert!(md.contains('2'));
}
