//! Persisted post collection.
//!
//! # Responsibility
//! - Load the collection once, seeding it when storage holds nothing yet.
//! - Provide insert / update-by-id / delete-by-id over the ordered collection.
//! - Rewrite the whole collection on every mutation.
//!
//! # Invariants
//! - The collection is newest-first: inserts prepend, updates keep position.
//! - `id` and `timestamp` are assigned on insert and never change afterwards.
//! - Write paths validate before persisting; nothing changes in memory unless
//!   the full collection was written successfully.
//! - Read paths reject structurally invalid persisted state instead of
//!   masking it, using the looser stored-post rule rather than the commit rule.

use crate::model::legacy::{LegacyPost, LegacyPostPatch, NewLegacyPost};
use crate::model::post::{NewPost, Post, PostId, PostPatch, ValidationError};
use crate::repo::seed::{block_seed, flat_seed};
use crate::storage::{KeyValueStorage, StorageError};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Storage key of the flat (`content`/`imageUrl`) schema.
pub const FLAT_POSTS_KEY: &str = "unbounded_realm_posts";
/// Storage key of the block schema.
pub const BLOCK_POSTS_KEY: &str = "unbounded_realm_blocks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by post store operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(ValidationError),
    Storage(StorageError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Stored collection is not valid JSON for this schema.
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Stored collection decoded but violates model invariants.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode post collection: {err}"),
            Self::Decode { key, source } => {
                write!(f, "failed to decode post collection `{key}`: {source}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted post data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Persisted schema versions. Each one owns a distinct storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Single `content` body plus optional `imageUrl`.
    Flat,
    /// Ordered text/image blocks.
    Blocks,
}

impl SchemaVersion {
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Flat => FLAT_POSTS_KEY,
            Self::Blocks => BLOCK_POSTS_KEY,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Blocks => "blocks",
        }
    }
}

/// A post shape the store can persist.
pub trait StoredPost: Clone + Serialize + DeserializeOwned {
    /// Uncommitted shape supplied by callers.
    type New;
    /// Partial update of mutable fields.
    type Patch;

    const SCHEMA: SchemaVersion;

    fn id(&self) -> &str;
    /// Commit-time rule applied on every write.
    fn validate(&self) -> Result<(), ValidationError>;
    /// Rule applied to posts decoded from storage.
    fn validate_stored(&self) -> Result<(), ValidationError>;
    fn from_new(new: Self::New, id: PostId, timestamp: i64) -> Self;
    fn apply_patch(&mut self, patch: Self::Patch);
    /// Example collection written when storage holds nothing yet.
    fn seed(now_ms: i64) -> Vec<Self>;
}

impl StoredPost for Post {
    type New = NewPost;
    type Patch = PostPatch;

    const SCHEMA: SchemaVersion = SchemaVersion::Blocks;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Post::validate(self)
    }

    fn validate_stored(&self) -> Result<(), ValidationError> {
        Post::validate_stored(self)
    }

    fn from_new(new: NewPost, id: PostId, timestamp: i64) -> Self {
        new.into_post(id, timestamp)
    }

    fn apply_patch(&mut self, patch: PostPatch) {
        self.apply(patch);
    }

    fn seed(now_ms: i64) -> Vec<Self> {
        block_seed(now_ms)
    }
}

impl StoredPost for LegacyPost {
    type New = NewLegacyPost;
    type Patch = LegacyPostPatch;

    const SCHEMA: SchemaVersion = SchemaVersion::Flat;

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        LegacyPost::validate(self)
    }

    fn validate_stored(&self) -> Result<(), ValidationError> {
        LegacyPost::validate_stored(self)
    }

    fn from_new(new: NewLegacyPost, id: PostId, timestamp: i64) -> Self {
        new.into_post(id, timestamp)
    }

    fn apply_patch(&mut self, patch: LegacyPostPatch) {
        self.apply(patch);
    }

    fn seed(now_ms: i64) -> Vec<Self> {
        flat_seed(now_ms)
    }
}

/// Source of creation timestamps.
pub trait Clock {
    /// Current time as Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
            })
    }
}

/// Ordered, persisted post collection bound to one schema key.
pub struct PostStore<S: KeyValueStorage, P: StoredPost = Post> {
    storage: S,
    posts: Vec<P>,
    clock: Box<dyn Clock>,
}

/// Store over the block schema.
pub type BlockPostStore<S> = PostStore<S, Post>;
/// Store over the legacy flat schema.
pub type FlatPostStore<S> = PostStore<S, LegacyPost>;

impl<S: KeyValueStorage, P: StoredPost> PostStore<S, P> {
    /// Opens the store and loads (or seeds) its collection.
    pub fn open(storage: S) -> StoreResult<Self> {
        Self::open_with_clock(storage, Box::new(SystemClock))
    }

    pub fn open_with_clock(storage: S, clock: Box<dyn Clock>) -> StoreResult<Self> {
        let mut store = Self {
            storage,
            posts: Vec::new(),
            clock,
        };
        store.load_all()?;
        Ok(store)
    }

    /// Re-reads the collection from storage.
    ///
    /// # Contract
    /// - Absent data is the seed case: the seed collection is persisted and
    ///   returned.
    /// - Undecodable or invalid data is an error; the in-memory collection is
    ///   left as it was.
    pub fn load_all(&mut self) -> StoreResult<&[P]> {
        let key = P::SCHEMA.storage_key();
        let raw = self.storage.load(key).inspect_err(|err| {
            error!(
                "event=store_load module=store status=error schema={} error_code=storage_read_failed error={}",
                P::SCHEMA.as_str(),
                err
            );
        })?;

        let posts = match raw {
            Some(raw) => decode_collection::<P>(key, &raw)?,
            None => {
                let seeded = P::seed(self.clock.now_epoch_ms());
                self.persist(&seeded)?;
                info!(
                    "event=store_seed module=store status=ok schema={} post_count={}",
                    P::SCHEMA.as_str(),
                    seeded.len()
                );
                seeded
            }
        };

        info!(
            "event=store_load module=store status=ok schema={} post_count={}",
            P::SCHEMA.as_str(),
            posts.len()
        );
        self.posts = posts;
        Ok(&self.posts)
    }

    /// Current collection, newest first.
    pub fn posts(&self) -> &[P] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&P> {
        self.posts.iter().find(|post| post.id() == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Assigns identity and creation time, prepends, and persists.
    pub fn insert(&mut self, new: P::New) -> StoreResult<P> {
        let started_at = Instant::now();
        let post = P::from_new(new, Uuid::new_v4().to_string(), self.clock.now_epoch_ms());
        post.validate()?;

        let mut next = Vec::with_capacity(self.posts.len() + 1);
        next.push(post.clone());
        next.extend(self.posts.iter().cloned());
        self.write_through("store_insert", next, started_at)?;
        Ok(post)
    }

    /// Replaces mutable fields of the post with `id` in place.
    ///
    /// Returns `Ok(None)` without writing when no post has this id.
    pub fn update(&mut self, id: &str, patch: P::Patch) -> StoreResult<Option<P>> {
        let started_at = Instant::now();
        let Some(index) = self.position(id) else {
            warn!(
                "event=store_update module=store status=not_found schema={}",
                P::SCHEMA.as_str()
            );
            return Ok(None);
        };

        let mut updated = self.posts[index].clone();
        updated.apply_patch(patch);
        updated.validate()?;

        let mut next = self.posts.clone();
        next[index] = updated.clone();
        self.write_through("store_update", next, started_at)?;
        Ok(Some(updated))
    }

    /// Removes the post with `id` and persists the remainder.
    ///
    /// Returns `Ok(None)` without writing when no post has this id.
    pub fn delete(&mut self, id: &str) -> StoreResult<Option<P>> {
        let started_at = Instant::now();
        let Some(index) = self.position(id) else {
            warn!(
                "event=store_delete module=store status=not_found schema={}",
                P::SCHEMA.as_str()
            );
            return Ok(None);
        };

        let mut next = self.posts.clone();
        let removed = next.remove(index);
        self.write_through("store_delete", next, started_at)?;
        Ok(Some(removed))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.posts.iter().position(|post| post.id() == id)
    }

    fn write_through(&mut self, event: &str, next: Vec<P>, started_at: Instant) -> StoreResult<()> {
        if let Err(err) = self.persist(&next) {
            error!(
                "event={event} module=store status=error schema={} duration_ms={} error={}",
                P::SCHEMA.as_str(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
        info!(
            "event={event} module=store status=ok schema={} post_count={} duration_ms={}",
            P::SCHEMA.as_str(),
            next.len(),
            started_at.elapsed().as_millis()
        );
        self.posts = next;
        Ok(())
    }

    fn persist(&mut self, posts: &[P]) -> StoreResult<()> {
        let encoded = encode_collection(posts)?;
        self.storage.save(P::SCHEMA.storage_key(), &encoded)?;
        Ok(())
    }
}

/// Serializes a collection into its persisted JSON form.
pub fn encode_collection<P: StoredPost>(posts: &[P]) -> StoreResult<String> {
    serde_json::to_string(posts).map_err(StoreError::Encode)
}

/// Parses and validates a persisted JSON collection.
pub fn decode_collection<P: StoredPost>(key: &'static str, raw: &str) -> StoreResult<Vec<P>> {
    let posts: Vec<P> =
        serde_json::from_str(raw).map_err(|source| StoreError::Decode { key, source })?;

    let mut seen = HashSet::with_capacity(posts.len());
    for post in &posts {
        post.validate_stored().map_err(|err| {
            StoreError::InvalidData(format!("post `{}` in `{key}`: {err}", post.id()))
        })?;
        if !seen.insert(post.id()) {
            return Err(StoreError::InvalidData(format!(
                "duplicate post id `{}` in `{key}`",
                post.id()
            )));
        }
    }

    Ok(posts)
}
