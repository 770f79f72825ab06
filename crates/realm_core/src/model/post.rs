//! Post domain model (block schema).
//!
//! # Responsibility
//! - Define the committed post record and its uncommitted/partial shapes.
//! - Own commit-time validation shared by store writes and editor commits.
//! - Derive card projections (preview text, cover image) from blocks.
//!
//! # Invariants
//! - `id` and `timestamp` are assigned by the store, never by callers.
//! - A committed post has a non-blank title and at least one block.
//! - Block ids are unique within their post.
//! - Stored posts are checked with the looser `validate_stored` rule: an empty
//!   title is rejected, a whitespace-only one is accepted.
//! - `category` always belongs to `section`.

use crate::model::block::{BlockContent, BlockId, ContentBlock, ImageRef};
use crate::model::section::{Category, Section, Sectioned};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Post identifier, unique inside one store.
pub type PostId = String;

const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Reasons a post may not be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Flat-schema body is empty or whitespace-only.
    EmptyContent,
    /// Block sequence is empty.
    NoBlocks,
    /// Two blocks of one post share an id.
    DuplicateBlockId(BlockId),
    /// Category is not part of the section's category set.
    CategoryOutsideSection { category: Category, section: Section },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::NoBlocks => write!(f, "post must contain at least one block"),
            Self::DuplicateBlockId(id) => write!(f, "duplicate block id `{id}`"),
            Self::CategoryOutsideSection { category, section } => {
                write!(f, "category `{category}` is not part of section `{section}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Committed post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub blocks: Vec<ContentBlock>,
    pub category: Category,
    pub section: Section,
    /// Creation time, Unix epoch milliseconds. Never bumped by updates.
    pub timestamp: i64,
}

impl Post {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, &self.blocks, self.category, self.section)
    }

    /// Structural check applied to posts read back from storage.
    pub fn validate_stored(&self) -> Result<(), ValidationError> {
        validate_stored_title(&self.title)?;
        validate_blocks(&self.blocks)?;
        validate_placement(self.category, self.section)
    }

    /// Applies the present fields of `patch`. Identity and timestamp are kept.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(blocks) = patch.blocks {
            self.blocks = blocks;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(section) = patch.section {
            self.section = section;
        }
    }

    /// Whitespace-normalized text of all text blocks, capped for card display.
    pub fn preview_text(&self) -> Option<String> {
        let joined = self
            .blocks
            .iter()
            .filter_map(|block| match &block.content {
                BlockContent::Text(text) => Some(text.as_str()),
                BlockContent::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join(" ");
        preview_of(&joined)
    }

    /// First non-empty image reference, shown as the card cover.
    pub fn cover_image(&self) -> Option<&ImageRef> {
        self.blocks.iter().find_map(|block| match &block.content {
            BlockContent::Image(image) if !image.is_empty() => Some(image),
            _ => None,
        })
    }
}

impl Sectioned for Post {
    fn section(&self) -> Section {
        self.section
    }

    fn category(&self) -> Category {
        self.category
    }
}

/// Uncommitted post as produced by callers. The store assigns identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub blocks: Vec<ContentBlock>,
    pub category: Category,
    pub section: Section,
}

impl NewPost {
    /// Tags the given fields as a new post. No validation happens here.
    pub fn new(
        title: impl Into<String>,
        blocks: Vec<ContentBlock>,
        category: Category,
        section: Section,
    ) -> Self {
        Self {
            title: title.into(),
            blocks,
            category,
            section,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, &self.blocks, self.category, self.section)
    }

    pub fn into_post(self, id: PostId, timestamp: i64) -> Post {
        Post {
            id,
            title: self.title,
            blocks: self.blocks,
            category: self.category,
            section: self.section,
            timestamp,
        }
    }
}

/// Partial update of a post's mutable fields. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub blocks: Option<Vec<ContentBlock>>,
    pub category: Option<Category>,
    pub section: Option<Section>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.blocks.is_none()
            && self.category.is_none()
            && self.section.is_none()
    }
}

pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

pub(crate) fn validate_stored_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

pub(crate) fn validate_placement(
    category: Category,
    section: Section,
) -> Result<(), ValidationError> {
    if !section.allows(category) {
        return Err(ValidationError::CategoryOutsideSection { category, section });
    }
    Ok(())
}

fn validate_fields(
    title: &str,
    blocks: &[ContentBlock],
    category: Category,
    section: Section,
) -> Result<(), ValidationError> {
    validate_title(title)?;
    validate_blocks(blocks)?;
    validate_placement(category, section)
}

fn validate_blocks(blocks: &[ContentBlock]) -> Result<(), ValidationError> {
    if blocks.is_empty() {
        return Err(ValidationError::NoBlocks);
    }
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        if !seen.insert(block.id.as_str()) {
            return Err(ValidationError::DuplicateBlockId(block.id.clone()));
        }
    }
    Ok(())
}

pub(crate) fn preview_of(text: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(text, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
}
