//! Content block model.
//!
//! # Responsibility
//! - Define the atomic, ordered unit of post content.
//! - Keep text and image payloads apart at the type level while preserving
//!   the flat `{id, type, value}` wire shape.
//!
//! # Invariants
//! - `id` is unique within the owning post or draft.
//! - Values may be empty while editing; emptiness is never a block-level error.
//! - Image references are opaque; the core never decodes them.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Block identifier, unique inside its owning post.
pub type BlockId = String;

/// Variant tag of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
}

/// Opaque image reference: a URL or an inline data URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns whether the reference carries its payload inline.
    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ImageRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Typed payload of a block. One payload member per tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text(String),
    Image(ImageRef),
}

impl BlockContent {
    /// Empty payload for the given tag.
    pub fn empty(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => Self::Text(String::new()),
            BlockKind::Image => Self::Image(ImageRef::default()),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Text(_) => BlockKind::Text,
            Self::Image(_) => BlockKind::Image,
        }
    }

    /// Raw payload string as stored on the wire.
    pub fn value(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Image(image) => image.as_str(),
        }
    }
}

/// One ordered fragment of post content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BlockWire", into = "BlockWire")]
pub struct ContentBlock {
    pub id: BlockId,
    pub content: BlockContent,
}

impl ContentBlock {
    /// Creates an empty block of `kind` with a fresh identifier.
    pub fn empty(kind: BlockKind) -> Self {
        Self::with_id(new_block_id(), BlockContent::empty(kind))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::with_id(new_block_id(), BlockContent::Text(value.into()))
    }

    pub fn image(image: impl Into<ImageRef>) -> Self {
        Self::with_id(new_block_id(), BlockContent::Image(image.into()))
    }

    /// Creates a block with a caller-provided identifier.
    ///
    /// Used by seed data and decoding, where identity already exists.
    pub fn with_id(id: impl Into<BlockId>, content: BlockContent) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    pub fn value(&self) -> &str {
        self.content.value()
    }

    /// Replaces the payload value while keeping the block's tag.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.content = match self.content.kind() {
            BlockKind::Text => BlockContent::Text(value.into()),
            BlockKind::Image => BlockContent::Image(ImageRef::new(value)),
        };
    }

    pub fn is_empty(&self) -> bool {
        self.value().trim().is_empty()
    }
}

fn new_block_id() -> BlockId {
    Uuid::new_v4().to_string()
}

#[derive(Serialize, Deserialize)]
struct BlockWire {
    id: BlockId,
    #[serde(rename = "type")]
    kind: BlockKind,
    value: String,
}

impl From<BlockWire> for ContentBlock {
    fn from(wire: BlockWire) -> Self {
        let content = match wire.kind {
            BlockKind::Text => BlockContent::Text(wire.value),
            BlockKind::Image => BlockContent::Image(ImageRef(wire.value)),
        };
        Self {
            id: wire.id,
            content,
        }
    }
}

impl From<ContentBlock> for BlockWire {
    fn from(block: ContentBlock) -> Self {
        let (kind, value) = match block.content {
            BlockContent::Text(text) => (BlockKind::Text, text),
            BlockContent::Image(image) => (BlockKind::Image, image.0),
        };
        Self {
            id: block.id,
            kind,
            value,
        }
    }
}
