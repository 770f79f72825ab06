//! Board use-case services.
//!
//! # Responsibility
//! - Drive drafts into the post store.
//! - Project the stored collection for display.
//! - Turn user-selected images into opaque references.

pub mod editor;
pub mod filter;
pub mod ingest;
