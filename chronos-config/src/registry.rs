// Named schedules and spans built from configuration

use crate::loader::ScheduleLoader;
use crate::{ConfigError, Result};
use chronos_core::{Chronos, Span};
use std::collections::BTreeMap;
use tracing::debug;

/// Built schedules and spans, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRegistry {
    schedules: BTreeMap<String, Chronos>,
    spans: BTreeMap<String, Span>,
}

impl ScheduleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and build every schedule in a TOML or JSON file.
    pub fn load(path: &str) -> Result<Self> {
        let registry = ScheduleLoader::auto(path)?.load_file(path)?.build()?;
        debug!(path, schedules = registry.len(), "Schedule registry ready");
        Ok(registry)
    }

    /// Register a schedule, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, chronos: Chronos) -> Option<Chronos> {
        self.schedules.insert(name.into(), chronos)
    }

    /// Register a span, returning the one it replaced.
    pub fn insert_span(&mut self, name: impl Into<String>, span: Span) -> Option<Span> {
        self.spans.insert(name.into(), span)
    }

    pub fn get(&self, name: &str) -> Option<&Chronos> {
        self.schedules.get(name)
    }

    /// Like [`get`](Self::get), failing with [`ConfigError::NotFound`].
    pub fn require(&self, name: &str) -> Result<&Chronos> {
        self.get(name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    pub fn span(&self, name: &str) -> Option<&Span> {
        self.spans.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schedules.contains_key(name)
    }

    /// Schedule names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schedules.keys().map(String::as_str)
    }

    /// Span names in sorted order.
    pub fn span_names(&self) -> impl Iterator<Item = &str> {
        self.spans.keys().map(String::as_str)
    }

    /// Number of schedules.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty() && self.spans.is_empty()
    }
}
