//! Ordered fallback across several resolvers

use super::{EnvironmentValueResolver, MapValueResolver, ValueResolver};
use crate::argument::Argument;
use crate::convert::FromValue;

/// One source in a [`ChainedValueResolver`]
#[derive(Debug, Clone)]
pub enum ResolverSource {
    Map(MapValueResolver),
    Environment(EnvironmentValueResolver),
}

impl From<MapValueResolver> for ResolverSource {
    fn from(resolver: MapValueResolver) -> Self {
        ResolverSource::Map(resolver)
    }
}

impl From<EnvironmentValueResolver> for ResolverSource {
    fn from(resolver: EnvironmentValueResolver) -> Self {
        ResolverSource::Environment(resolver)
    }
}

impl ValueResolver for ResolverSource {
    fn get<T: FromValue>(&self, name: &str) -> Option<T> {
        match self {
            ResolverSource::Map(r) => r.get(name),
            ResolverSource::Environment(r) => r.get(name),
        }
    }

    fn get_argument<T: FromValue>(&self, name: &str, argument: &Argument<T>) -> Option<T> {
        match self {
            ResolverSource::Map(r) => r.get_argument(name, argument),
            ResolverSource::Environment(r) => r.get_argument(name, argument),
        }
    }

    fn contains(&self, name: &str) -> bool {
        match self {
            ResolverSource::Map(r) => r.contains(name),
            ResolverSource::Environment(r) => r.contains(name),
        }
    }
}

/// Resolves a name against each source in order
///
/// The first source yielding a converted value wins. A source holding the
/// name with an unconvertible value does not stop the search.
#[derive(Debug, Clone, Default)]
pub struct ChainedValueResolver {
    sources: Vec<ResolverSource>,
}

impl ChainedValueResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower precedence than the existing ones
    pub fn with_source(mut self, source: impl Into<ResolverSource>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn sources(&self) -> &[ResolverSource] {
        &self.sources
    }
}

impl ValueResolver for ChainedValueResolver {
    fn get<T: FromValue>(&self, name: &str) -> Option<T> {
        self.sources.iter().find_map(|source| source.get(name))
    }

    fn get_argument<T: FromValue>(&self, name: &str, argument: &Argument<T>) -> Option<T> {
        self.sources
            .iter()
            .find_map(|source| source.get_argument(name, argument))
    }

    fn contains(&self, name: &str) -> bool {
        self.sources.iter().any(|source| source.contains(name))
    }
}
