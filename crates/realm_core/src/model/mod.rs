//! Board domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by store, filter and editor.
//! - Keep the block schema and the legacy flat schema as separate types.
//!
//! # Invariants
//! - Every post is identified by a store-assigned id that never changes.
//! - A post exclusively owns its blocks.

pub mod block;
pub mod legacy;
pub mod post;
pub mod section;
