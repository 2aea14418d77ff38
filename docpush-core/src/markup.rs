//! Line-oriented markup → block conversion.
//!
//! Supported subset: `# `/`## `/`### ` headings, `---` divider rules and
//! plain paragraphs. Heading markers are tested longest first, so `# ---`
//! is a heading, not a divider. Inline formatting (bold, links, lists) is
//! not interpreted and passes through verbatim as plain text. Blank lines
//! produce no block.

use tracing::debug;

use crate::block::Block;

/// Parse raw markup text into an ordered block sequence.
///
/// Empty input yields an empty sequence. A line consisting of `#` with no
/// trailing space is an ordinary paragraph; the heading markers require the
/// marker plus one space.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let block = if let Some(rest) = line.strip_prefix("### ") {
            Block::heading3(rest)
        } else if let Some(rest) = line.strip_prefix("## ") {
            Block::heading2(rest)
        } else if let Some(rest) = line.strip_prefix("# ") {
            Block::heading1(rest)
        } else if line.starts_with("---") {
            // Remainder of a divider line is ignored.
            Block::divider()
        } else {
            Block::paragraph(line)
        };

        blocks.push(block);
    }

    debug!(blocks = blocks.len(), "Parsed markup into blocks");
    blocks
}
