//! Fluent traversal builder

use thiserror::Error;
use tracing::warn;

use super::direction::Direction;
use super::document::{HopDocument, TraversalDocument};
use super::{DEFAULT_HOP_LIMIT, DEFAULT_STAGE_LIMIT, MAX_HOPS};

/// Errors raised while materializing a traversal document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    /// A stage or hop limit of zero
    #[error("Invalid limit {limit} at stage {stage}: limits must be positive")]
    InvalidLimit { stage: usize, limit: u32 },

    #[error("Traversal has {hops} hops, at most {max} are supported")]
    TooManyHops { hops: usize, max: usize },
}

pub type TraversalResult<T> = Result<T, TraversalError>;

/// An edge step recorded by the builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub direction: Direction,
    pub filter: Option<String>,
    pub types: Vec<String>,
    pub limit: u32,
}

impl Hop {
    pub fn new<I, S>(direction: Direction, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            direction,
            filter: None,
            types: types.into_iter().map(Into::into).collect(),
            limit: DEFAULT_HOP_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Attach an edge predicate. Filtered hops fall back to the stage-level
    /// default limit.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self.limit = DEFAULT_STAGE_LIMIT;
        self
    }
}

/// One recorded builder call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    TypeFilter(String),
    IdFilter(String),
    Hop(Hop),
    GroupBy(String),
    LimitTo(u32),
}

/// Records a traversal as a flat list of stages.
///
/// Node-level calls (`is`, `has`, `group_by`, `limit_to`) apply to the
/// current stage; hop calls (`out`, `in_`, `both` and their `_limit` /
/// `_filter` variants) open a new stage that subsequent calls apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalBuilder {
    stages: Vec<Stage>,
}

impl TraversalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the current stage to nodes of `node_type`
    pub fn is(mut self, node_type: impl Into<String>) -> Self {
        self.stages.push(Stage::TypeFilter(node_type.into()));
        self
    }

    /// Filter the current stage by attribute. Only `id` is supported; any
    /// other attribute is logged and ignored.
    pub fn has(mut self, attr: &str, value: impl Into<String>) -> Self {
        if attr == "id" {
            self.stages.push(Stage::IdFilter(value.into()));
        } else {
            warn!(attr, "traversal attribute is not supported, ignoring filter");
        }
        self
    }

    pub fn out<I, S>(self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::Out, types))
    }

    pub fn in_<I, S>(self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::In, types))
    }

    pub fn both<I, S>(self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::Both, types))
    }

    pub fn out_limit<I, S>(self, limit: u32, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::Out, types).with_limit(limit))
    }

    pub fn in_limit<I, S>(self, limit: u32, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::In, types).with_limit(limit))
    }

    pub fn both_limit<I, S>(self, limit: u32, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::Both, types).with_limit(limit))
    }

    pub fn out_filter<I, S>(self, filter: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::Out, types).with_filter(filter))
    }

    pub fn in_filter<I, S>(self, filter: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::In, types).with_filter(filter))
    }

    pub fn both_filter<I, S>(self, filter: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop(Hop::new(Direction::Both, types).with_filter(filter))
    }

    /// Append an arbitrary hop
    pub fn hop(mut self, hop: Hop) -> Self {
        self.stages.push(Stage::Hop(hop));
        self
    }

    /// Add a `groupBy(<field>)` marker to the current stage
    pub fn group_by(mut self, field: impl Into<String>) -> Self {
        self.stages.push(Stage::GroupBy(field.into()));
        self
    }

    /// Cap the number of results of the current stage
    pub fn limit_to(mut self, limit: u32) -> Self {
        self.stages.push(Stage::LimitTo(limit));
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Materialize the nested document
    pub fn build(&self) -> TraversalResult<TraversalDocument> {
        let hop_count = self
            .stages
            .iter()
            .filter(|stage| matches!(stage, Stage::Hop(_)))
            .count();
        if hop_count > MAX_HOPS {
            return Err(TraversalError::TooManyHops {
                hops: hop_count,
                max: MAX_HOPS,
            });
        }

        let mut docs = vec![TraversalDocument::default()];
        let mut hops: Vec<&Hop> = Vec::new();

        for stage in &self.stages {
            let tip = docs.len() - 1;
            match stage {
                Stage::TypeFilter(node_type) => docs[tip].node_type = Some(node_type.clone()),
                Stage::IdFilter(id) => docs[tip].id = Some(id.clone()),
                Stage::GroupBy(field) => docs[tip].filters.push(format!("groupBy({})", field)),
                Stage::LimitTo(limit) => {
                    if *limit == 0 {
                        return Err(TraversalError::InvalidLimit { stage: tip, limit: 0 });
                    }
                    docs[tip].limit = *limit;
                }
                Stage::Hop(hop) => {
                    if hop.limit == 0 {
                        return Err(TraversalError::InvalidLimit { stage: tip, limit: 0 });
                    }
                    hops.push(hop);
                    docs.push(TraversalDocument::default());
                }
            }
        }

        // docs always holds exactly one more entry than hops
        let mut docs = docs.into_iter().rev();
        let mut tail = docs.next().unwrap_or_default();
        for (mut doc, hop) in docs.zip(hops.into_iter().rev()) {
            doc.next = Some(Box::new(HopDocument {
                direction: hop.direction,
                filter: hop.filter.clone(),
                types: hop.types.clone(),
                limit: hop.limit,
                target: tail,
            }));
            tail = doc;
        }

        Ok(tail)
    }
}
