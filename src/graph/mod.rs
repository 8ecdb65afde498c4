//! Graph element addressing
//!
//! The remote service addresses every stored node and edge through an opaque
//! resource identifier. This module builds those identifiers; it never parses
//! them back.

pub mod resource;

pub use resource::ResourceId;
