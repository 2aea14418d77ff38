use docpush_core::block::{Block, BlockKind};
use docpush_core::markup::parse;

/// Rejoin a block sequence into markup using the supported marker subset.
fn render(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|b| match b.kind {
            BlockKind::Heading1 => format!("# {}", b.text),
            BlockKind::Heading2 => format!("## {}", b.text),
            BlockKind::Heading3 => format!("### {}", b.text),
            BlockKind::Divider => "---".to_string(),
            BlockKind::Paragraph => b.text.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn parses_each_supported_marker() {
    assert_eq!(parse("# Title"), vec![Block::heading1("Title")]);
    assert_eq!(parse("## A"), vec![Block::heading2("A")]);
    assert_eq!(parse("### A"), vec![Block::heading3("A")]);
    assert_eq!(parse("plain"), vec![Block::paragraph("plain")]);
    assert_eq!(parse("---"), vec![Block::divider()]);
}

#[test]
fn divider_carries_no_text() {
    let blocks = parse("---");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Divider);
    assert!(blocks[0].text.is_empty(), "Divider must carry no text");
}

#[test]
fn empty_input_yields_empty_sequence() {
    assert!(parse("").is_empty(), "Empty input is valid, not an error");
}

#[test]
fn blank_lines_produce_no_blocks() {
    let text = "\n   \n\t\nfirst\n\n  \nsecond\n";
    let blocks = parse(text);
    assert_eq!(
        blocks.len(),
        2,
        "Block count must equal the number of non-blank lines"
    );
    assert_eq!(blocks[0], Block::paragraph("first"));
    assert_eq!(blocks[1], Block::paragraph("second"));
}

#[test]
fn block_count_matches_non_blank_line_count() {
    let text = "# a\n\n## b\npara\n   \n---\n### c";
    let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
    assert_eq!(parse(text).len(), non_blank);
}

#[test]
fn lone_hash_is_a_paragraph() {
    // The marker requires a trailing space.
    assert_eq!(parse("#"), vec![Block::paragraph("#")]);
    assert_eq!(parse("#Title"), vec![Block::paragraph("#Title")]);
    assert_eq!(parse("##X"), vec![Block::paragraph("##X")]);
}

#[test]
fn heading_marker_wins_over_divider() {
    assert_eq!(parse("# ---"), vec![Block::heading1("---")]);
}

#[test]
fn divider_ignores_rest_of_line() {
    assert_eq!(parse("--- anything after"), vec![Block::divider()]);
    assert_eq!(parse("----"), vec![Block::divider()]);
}

#[test]
fn inline_markup_passes_through_verbatim() {
    let blocks = parse("**bold** and [a link](https://example.com)");
    assert_eq!(
        blocks,
        vec![Block::paragraph("**bold** and [a link](https://example.com)")]
    );

    let heading = parse("## *emphasised* heading");
    assert_eq!(heading, vec![Block::heading2("*emphasised* heading")]);
}

#[test]
fn leading_whitespace_is_trimmed_before_classification() {
    assert_eq!(parse("   # Indented"), vec![Block::heading1("Indented")]);
    assert_eq!(parse("\t---"), vec![Block::divider()]);
}

#[test]
fn end_to_end_scenario_sequence() {
    let blocks = parse("# Daily\nline one\n---\n## Section");
    assert_eq!(
        blocks,
        vec![
            Block::heading1("Daily"),
            Block::paragraph("line one"),
            Block::divider(),
            Block::heading2("Section"),
        ]
    );
}

#[test]
fn reparsing_rendered_output_is_stable() {
    let input = "# Daily\nline one\n---\n## Section\n### Sub\nclosing words";
    let first = parse(input);
    let second = parse(&render(&first));
    assert_eq!(
        first, second,
        "Round-trip through the supported marker subset must be stable"
    );
}
