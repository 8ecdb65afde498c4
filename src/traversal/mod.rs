//! Traversal documents and the fluent builder that produces them
//!
//! A traversal is a singly linked walk: filter a stage, step along an edge,
//! filter the next stage, and so on. The builder records the walk as a flat
//! list of [`Stage`]s and only materializes the nested
//! [`TraversalDocument`] when [`TraversalBuilder::build`] is called. The
//! remote service alone interprets directions, filters and limits.

pub mod builder;
pub mod direction;
pub mod document;

pub use builder::{Hop, Stage, TraversalBuilder, TraversalError, TraversalResult};
pub use direction::Direction;
pub use document::{HopDocument, Hops, TraversalDocument};

/// Result cap applied to a stage (and to filtered hops) when none is given
pub const DEFAULT_STAGE_LIMIT: u32 = 2000;

/// Result cap applied to hops created by `out`, `in_` and `both`
pub const DEFAULT_HOP_LIMIT: u32 = 1000;

/// Longest hop chain `build()` accepts. Documents nest once per hop, so very
/// deep chains exhaust the stack when serialized.
pub const MAX_HOPS: usize = 256;
