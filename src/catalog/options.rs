use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::graph::{GraphLimits, DEFAULT_MAX_CAST, MAX_ACTORS};
use crate::storage::DEFAULT_CAPACITY;
use crate::types::{CatalogError, Result};

/// Default hop count for "known by" queries.
pub const DEFAULT_DEPTH: usize = 2;

/// Configuration options supplied when constructing a
/// [`super::Catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Bucket count for the actor and movie tables.
    pub table_capacity: usize,
    /// Maximum number of actors indexed by the co-occurrence graph; also the
    /// BFS queue capacity.
    pub max_actors: usize,
    /// Maximum cast size considered per movie when linking actors.
    pub max_cast: usize,
    /// Hop count used by [`super::Catalog::known_by_default`].
    pub default_depth: usize,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            table_capacity: DEFAULT_CAPACITY,
            max_actors: MAX_ACTORS,
            max_cast: DEFAULT_MAX_CAST,
            default_depth: DEFAULT_DEPTH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptions {
    table_capacity: Option<usize>,
    max_actors: Option<usize>,
    max_cast: Option<usize>,
    default_depth: Option<usize>,
}

impl CatalogOptions {
    /// Sets the bucket count of both tables.
    pub fn table_capacity(mut self, buckets: usize) -> Self {
        self.table_capacity = buckets;
        self
    }

    /// Sets the actor index and BFS queue bound.
    pub fn max_actors(mut self, max_actors: usize) -> Self {
        self.max_actors = max_actors;
        self
    }

    /// Sets the per-movie cast bound used while building the graph.
    pub fn max_cast(mut self, max_cast: usize) -> Self {
        self.max_cast = max_cast;
        self
    }

    /// Sets the default hop count for "known by" queries.
    pub fn default_depth(mut self, depth: usize) -> Self {
        self.default_depth = depth;
        self
    }

    /// Parses options from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let raw: RawOptions = toml::from_str(raw)?;
        let defaults = CatalogOptions::default();
        let options = Self {
            table_capacity: raw.table_capacity.unwrap_or(defaults.table_capacity),
            max_actors: raw.max_actors.unwrap_or(defaults.max_actors),
            max_cast: raw.max_cast.unwrap_or(defaults.max_cast),
            default_depth: raw.default_depth.unwrap_or(defaults.default_depth),
        };
        options.validate()?;
        Ok(options)
    }

    /// Reads and parses a TOML options file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Rejects option values a catalog cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if self.table_capacity == 0 {
            return Err(CatalogError::Config("table_capacity must be non-zero".into()));
        }
        if self.max_actors == 0 {
            return Err(CatalogError::Config("max_actors must be non-zero".into()));
        }
        if self.max_cast < 2 {
            return Err(CatalogError::Config(
                "max_cast must allow at least two cast members".into(),
            ));
        }
        Ok(())
    }

    /// Graph ceilings derived from these options.
    pub fn graph_limits(&self) -> GraphLimits {
        GraphLimits {
            max_actors: self.max_actors,
            max_cast: self.max_cast,
        }
    }
}
