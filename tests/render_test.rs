//! Integration tests for document rendering.

use layoutdoc::render::{
    self, chunk_texts, to_chunk_records, to_html, to_json, to_markdown, to_text, ChunkRecord,
    DocumentStats, JsonFormat, RenderOptions, TableFallback,
};
use layoutdoc::{Document, LayoutReader};

const FIXTURE: &str = include_str!("fixtures/response.json");

fn fixture() -> Document {
    LayoutReader::new().read_str(FIXTURE).unwrap()
}

#[test]
fn test_text_output() {
    let doc = fixture();
    let text = to_text(&doc, &RenderOptions::default()).unwrap();
    assert!(text.starts_with("Quarterly Report\nThis report covers the third quarter. Figures are unaudited.\nHighlights"));
    assert!(text.contains("| Segment | Q2 | Q3 |\n| --- | --- | --- |"));
    assert!(text.ends_with("Figure 1: Revenue by segment."));

    let no_tables = to_text(&doc, &RenderOptions::new().with_tables(false)).unwrap();
    assert!(!no_tables.contains('|'));
    assert_eq!(no_tables.lines().count(), text.lines().count() - 8);
}

#[test]
fn test_markdown_output() {
    let doc = fixture();
    let md = to_markdown(&doc, &RenderOptions::default()).unwrap();

    assert!(md.starts_with("# Quarterly Report\n\n"));
    assert!(md.contains("## Highlights\n\nKey results:\n\n- Revenue grew 12%.\n  - Services led the increase.\n- Costs were flat.\n\n## Financials"));
    assert!(md.contains("| Team | People |\n| --- | --- |\n| Sales | 14 |"));
    assert!(md.contains("| Amounts in millions. |  |  |"));
}

#[test]
fn test_markdown_html_table_fallback() {
    let doc = fixture();
    let options = RenderOptions::new().with_table_fallback(TableFallback::Html);
    let md = to_markdown(&doc, &options).unwrap();
    assert!(md.contains("<td colspan=\"3\">Amounts in millions.</td>"));
    // Tables without spanning cells stay Markdown.
    assert!(md.contains("| Team | People |"));
}

#[test]
fn test_html_output() {
    let doc = fixture();
    let html = to_html(&doc);
    assert!(html.starts_with("<html><h1>Quarterly Report</h1>"));
    assert!(html.contains("<h2>Highlights</h2><p>Key results:</p><ul><li>Revenue grew 12%.<ul><li>Services led the increase.</li></ul></li><li>Costs were flat.</li></ul>"));
    assert!(html.contains("<tr><th>Segment</th><th>Q2</th><th>Q3</th></tr>"));
    assert!(html.ends_with("<p>Figure 1: Revenue by segment.</p></html>"));
}

#[test]
fn test_json_round_trip() {
    let doc = fixture();
    let json = to_json(&doc, JsonFormat::Pretty).unwrap();
    assert!(json.contains("\"diagnostics\""));
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_chunk_texts_with_context() {
    let doc = fixture();
    let texts = chunk_texts(&doc, true);
    assert_eq!(texts.len(), 9);
    assert_eq!(
        texts[0],
        "Quarterly Report\nThis report covers the third quarter. Figures are unaudited."
    );
    assert_eq!(
        texts[3],
        "Quarterly Report > Highlights\nKey results:\nRevenue grew 12%.\nServices led the increase."
    );
    assert!(texts[5].starts_with("Quarterly Report > Financials\n| Segment"));

    let bare = chunk_texts(&doc, false);
    assert_eq!(bare[2], "Revenue grew 12%.\nServices led the increase.");
    assert_eq!(bare[6], "Outlook remains stable.");
}

#[test]
fn test_chunk_records() {
    let doc = fixture();
    let records = to_chunk_records(&doc);
    assert_eq!(records.len(), 9);

    let outlook = &records[6];
    assert_eq!(outlook.kind, "paragraph");
    assert_eq!(outlook.section_path, vec!["Quarterly Report", "Financials"]);
    assert_eq!(outlook.page_idx, Some(1));
    assert_eq!(outlook.source_index, 9);

    let json = render::serialize(&records, JsonFormat::Compact).unwrap();
    let back: Vec<ChunkRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);
}

#[test]
fn test_stats() {
    let stats = DocumentStats::collect(&fixture());
    assert_eq!(stats.record_count, 14);
    assert_eq!(stats.section_count, 3);
    assert_eq!(stats.paragraph_count, 3);
    assert_eq!(stats.list_item_count, 3);
    assert_eq!(stats.table_count, 2);
    assert_eq!(stats.malformed_table_count, 0);
    assert_eq!(stats.block_count, 1);
    assert_eq!(stats.chunk_count, 9);
    assert_eq!(stats.page_count, 2);
    assert_eq!(stats.max_depth, 5);
    assert_eq!(stats.diagnostic_count, 1);
}

#[test]
fn test_outline() {
    let outline = fixture().outline();
    let lines: Vec<&str> = outline.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "header (4) Quarterly Report");
    assert_eq!(lines[5], "----list_item (0) Services led the increase.");
    assert_eq!(lines[11], "-figure (0) Figure 1: Revenue by segment.");
}

#[test]
fn test_deepest_level_heading_renders() {
    let doc = layoutdoc::read_str(r#"[{"tag": "header", "level": 4294967295, "sentences": ["Deep"]}]"#)
        .unwrap();
    assert_eq!(doc.sections().len(), 1);
    assert_eq!(to_html(&doc), "<html><h6>Deep</h6></html>");
    assert_eq!(to_markdown(&doc, &RenderOptions::default()).unwrap(), "###### Deep");
}
