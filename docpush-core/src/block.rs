use serde::{Deserialize, Serialize};

/// The structural kind of one rendered document unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Divider,
}

/// One renderable unit of the target document.
///
/// Built once by the markup parser and immutable afterwards. A `Divider`
/// carries no text; every other kind carries non-empty (post-trim) text,
/// because blank lines never produce a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block {
            kind: BlockKind::Paragraph,
            text: text.into(),
        }
    }

    pub fn heading1(text: impl Into<String>) -> Self {
        Block {
            kind: BlockKind::Heading1,
            text: text.into(),
        }
    }

    pub fn heading2(text: impl Into<String>) -> Self {
        Block {
            kind: BlockKind::Heading2,
            text: text.into(),
        }
    }

    pub fn heading3(text: impl Into<String>) -> Self {
        Block {
            kind: BlockKind::Heading3,
            text: text.into(),
        }
    }

    pub fn divider() -> Self {
        Block {
            kind: BlockKind::Divider,
            text: String::new(),
        }
    }
}
