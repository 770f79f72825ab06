//! Post persistence layer.
//!
//! # Responsibility
//! - Own the persisted, ordered post collection and its lifecycle.
//! - Isolate collection encoding from storage backends.
//!
//! # Invariants
//! - Every mutation rewrites the whole collection under the schema's key.
//! - Missing ids on update/delete are reported as `Ok(None)`, never as panics.

pub mod post_store;
mod seed;
