//! Core domain logic for the Realm moments board.
//! This crate is the single source of truth for post invariants; the
//! presentation layer calls into it and owns nothing persistent.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::{ConfigError, CoreConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::block::{BlockContent, BlockId, BlockKind, ContentBlock, ImageRef};
pub use model::legacy::{LegacyPost, LegacyPostPatch, NewLegacyPost};
pub use model::post::{NewPost, Post, PostId, PostPatch, ValidationError};
pub use model::section::{Category, CategoryFilter, Section, Sectioned, UnknownLabel};
pub use repo::post_store::{
    BlockPostStore, Clock, FlatPostStore, PostStore, SchemaVersion, StoreError, StoreResult,
    StoredPost, SystemClock, BLOCK_POSTS_KEY, FLAT_POSTS_KEY,
};
pub use service::editor::{CommitError, Draft, DraftMode, ImageReadTicket};
pub use service::filter::{visible_posts, BoardSelection};
pub use service::ingest::{encode_data_url, read_image_file, IngestError};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
