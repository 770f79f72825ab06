//! Legacy flat post model.
//!
//! # Responsibility
//! - Describe the earlier single-body post shape (`content` + `imageUrl`).
//!
//! # Invariants
//! - Flat posts live under their own storage key and are never mixed with
//!   block-schema posts. No migration exists between the two shapes.
//! - A committed flat post has non-blank `title` and `content`.
//! - Stored flat posts only need non-empty `title` and `content`; earlier
//!   writers accepted whitespace-only values.

use crate::model::post::{
    preview_of, validate_placement, validate_stored_title, validate_title, PostId, ValidationError,
};
use crate::model::section::{Category, Section, Sectioned};
use serde::{Deserialize, Serialize};

/// Committed flat-schema post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPost {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Cover image; older writers store an empty string for "none".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category: Category,
    pub section: Section,
    pub timestamp: i64,
}

impl LegacyPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_flat(&self.title, &self.content, self.category, self.section)
    }

    /// Structural check applied to posts read back from storage.
    pub fn validate_stored(&self) -> Result<(), ValidationError> {
        validate_stored_title(&self.title)?;
        if self.content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        validate_placement(self.category, self.section)
    }

    pub fn apply(&mut self, patch: LegacyPostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(section) = patch.section {
            self.section = section;
        }
    }

    pub fn preview_text(&self) -> Option<String> {
        preview_of(&self.content)
    }

    /// Cover image, treating an empty stored value as absent.
    pub fn cover_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

impl Sectioned for LegacyPost {
    fn section(&self) -> Section {
        self.section
    }

    fn category(&self) -> Category {
        self.category
    }
}

/// Uncommitted flat-schema post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLegacyPost {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub section: Section,
}

impl NewLegacyPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_flat(&self.title, &self.content, self.category, self.section)
    }

    pub fn into_post(self, id: PostId, timestamp: i64) -> LegacyPost {
        LegacyPost {
            id,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            category: self.category,
            section: self.section,
            timestamp,
        }
    }
}

/// Partial update of a flat post. `image_url: Some(None)` clears the cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
    pub category: Option<Category>,
    pub section: Option<Section>,
}

fn validate_flat(
    title: &str,
    content: &str,
    category: Category,
    section: Section,
) -> Result<(), ValidationError> {
    validate_title(title)?;
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    validate_placement(category, section)
}
