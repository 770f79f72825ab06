//! Editor session (draft lifecycle).
//!
//! # Responsibility
//! - Hold an in-memory draft of a new or existing post.
//! - Apply block insertion/update/removal and section/category changes.
//! - Commit the draft into a post store as insert (create) or update (edit).
//! - Track pending image reads so late completions can be discarded.
//!
//! # Invariants
//! - A draft always holds at least one block.
//! - `category` always belongs to `section`.
//! - A draft is independent of the store until `commit`; a rejected commit
//!   leaves both draft and store unchanged.

use crate::model::block::{BlockId, BlockKind, ContentBlock, ImageRef};
use crate::model::post::{NewPost, Post, PostId, PostPatch, ValidationError};
use crate::model::section::{Category, Section};
use crate::repo::post_store::{PostStore, StoreError};
use crate::storage::KeyValueStorage;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Whether committing creates a new post or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit { post_id: PostId },
}

/// Failure of `Draft::commit`.
#[derive(Debug)]
pub enum CommitError {
    /// Draft content is not committable; the caller should re-prompt.
    Validation(ValidationError),
    /// The post being edited no longer exists in the store.
    PostNotFound(PostId),
    Store(StoreError),
}

impl Display for CommitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::PostNotFound(id) => write!(f, "post not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::PostNotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for CommitError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CommitError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Handle for one in-flight image read targeting a draft block.
///
/// Only the most recent ticket issued for a block can complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReadTicket {
    block_id: BlockId,
    generation: u64,
}

impl ImageReadTicket {
    pub fn block_id(&self) -> &str {
        &self.block_id
    }
}

/// Transient, uncommitted post being edited.
#[derive(Debug, Clone)]
pub struct Draft {
    mode: DraftMode,
    title: String,
    blocks: Vec<ContentBlock>,
    category: Category,
    section: Section,
    pending_reads: HashMap<BlockId, u64>,
    next_generation: u64,
}

impl Draft {
    /// Opens a draft: edit mode when `existing` is given, create mode otherwise.
    pub fn open(initial_section: Section, existing: Option<&Post>) -> Self {
        match existing {
            Some(post) => Self::edit(post),
            None => Self::create(initial_section),
        }
    }

    /// Empty title, one empty text block, first category of `section`.
    pub fn create(section: Section) -> Self {
        Self::with_parts(
            DraftMode::Create,
            String::new(),
            vec![ContentBlock::empty(BlockKind::Text)],
            section.first_category(),
            section,
        )
    }

    pub fn edit(post: &Post) -> Self {
        let mut blocks = post.blocks.clone();
        if blocks.is_empty() {
            warn!("event=draft_open module=editor status=repaired mode=edit reason=no_blocks");
            blocks.push(ContentBlock::empty(BlockKind::Text));
        }
        Self::with_parts(
            DraftMode::Edit {
                post_id: post.id.clone(),
            },
            post.title.clone(),
            blocks,
            post.category,
            post.section,
        )
    }

    fn with_parts(
        mode: DraftMode,
        title: String,
        blocks: Vec<ContentBlock>,
        category: Category,
        section: Section,
    ) -> Self {
        Self {
            mode,
            title,
            blocks,
            category,
            section,
            pending_reads: HashMap::new(),
            next_generation: 0,
        }
    }

    pub fn mode(&self) -> &DraftMode {
        &self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn block(&self, block_id: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| block.id == block_id)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Appends an empty block of `kind` and returns its id.
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        let mut block = ContentBlock::empty(kind);
        while self.block(&block.id).is_some() {
            block = ContentBlock::empty(kind);
        }
        let id = block.id.clone();
        self.blocks.push(block);
        id
    }

    /// Replaces the value of `block_id`. Returns `false` when no such block exists.
    pub fn update_block_value(&mut self, block_id: &str, value: impl Into<String>) -> bool {
        match self.blocks.iter_mut().find(|block| block.id == block_id) {
            Some(block) => {
                block.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Removes `block_id` unless it is the only block left.
    ///
    /// Any pending image read for the removed block is cancelled.
    pub fn remove_block(&mut self, block_id: &str) -> bool {
        if self.blocks.len() <= 1 {
            return false;
        }
        let Some(index) = self.blocks.iter().position(|block| block.id == block_id) else {
            return false;
        };
        self.blocks.remove(index);
        self.pending_reads.remove(block_id);
        true
    }

    /// Moves the draft to `section` and resets the category to its default.
    pub fn change_section(&mut self, section: Section) {
        self.section = section;
        self.category = section.first_category();
    }

    /// Picks a category of the draft's current section.
    pub fn select_category(&mut self, category: Category) -> Result<(), ValidationError> {
        if !self.section.allows(category) {
            return Err(ValidationError::CategoryOutsideSection {
                category,
                section: self.section,
            });
        }
        self.category = category;
        Ok(())
    }

    /// Starts an image read for an image block.
    ///
    /// Returns `None` when the block is missing or is not an image block.
    /// A newer ticket for the same block supersedes older ones.
    pub fn begin_image_read(&mut self, block_id: &str) -> Option<ImageReadTicket> {
        if self.block(block_id)?.kind() != BlockKind::Image {
            return None;
        }
        self.next_generation += 1;
        let generation = self.next_generation;
        self.pending_reads.insert(block_id.to_string(), generation);
        Some(ImageReadTicket {
            block_id: block_id.to_string(),
            generation,
        })
    }

    /// Applies a finished image read.
    ///
    /// Returns `false` and discards `image` when the ticket was cancelled,
    /// superseded, or its block is gone.
    pub fn complete_image_read(&mut self, ticket: ImageReadTicket, image: ImageRef) -> bool {
        if self.pending_reads.get(&ticket.block_id) != Some(&ticket.generation) {
            debug!("event=image_read module=editor status=discarded reason=stale_ticket");
            return false;
        }
        self.pending_reads.remove(&ticket.block_id);
        if !self.update_block_value(&ticket.block_id, image.into_inner()) {
            debug!("event=image_read module=editor status=discarded reason=block_missing");
            return false;
        }
        true
    }

    /// Cancels the pending read for `block_id`, if any.
    pub fn cancel_image_read(&mut self, block_id: &str) -> bool {
        self.pending_reads.remove(block_id).is_some()
    }

    pub fn has_pending_image_read(&self, block_id: &str) -> bool {
        self.pending_reads.contains_key(block_id)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_new_post().validate()
    }

    pub fn to_new_post(&self) -> NewPost {
        NewPost::new(
            self.title.clone(),
            self.blocks.clone(),
            self.category,
            self.section,
        )
    }

    pub fn to_patch(&self) -> PostPatch {
        PostPatch {
            title: Some(self.title.clone()),
            blocks: Some(self.blocks.clone()),
            category: Some(self.category),
            section: Some(self.section),
        }
    }

    /// Commits the draft into `store`.
    ///
    /// # Contract
    /// - Create mode inserts a new post; edit mode updates the original post
    ///   in place.
    /// - On any error the draft is untouched and can be committed again.
    pub fn commit<S: KeyValueStorage>(
        &self,
        store: &mut PostStore<S, Post>,
    ) -> Result<Post, CommitError> {
        if let Err(err) = self.validate() {
            info!(
                "event=draft_commit module=editor status=rejected mode={} reason={:?}",
                self.mode_label(),
                err
            );
            return Err(err.into());
        }

        let committed = match &self.mode {
            DraftMode::Create => store.insert(self.to_new_post())?,
            DraftMode::Edit { post_id } => match store.update(post_id, self.to_patch())? {
                Some(post) => post,
                None => {
                    warn!("event=draft_commit module=editor status=error mode=edit error_code=post_not_found");
                    return Err(CommitError::PostNotFound(post_id.clone()));
                }
            },
        };

        info!(
            "event=draft_commit module=editor status=ok mode={} block_count={}",
            self.mode_label(),
            committed.blocks.len()
        );
        Ok(committed)
    }

    fn mode_label(&self) -> &'static str {
        match self.mode {
            DraftMode::Create => "create",
            DraftMode::Edit { .. } => "edit",
        }
    }
}
