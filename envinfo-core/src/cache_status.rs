//! Cache type status reporting.

use indexmap::IndexMap;
use serde_json::Value;

use crate::env_data::{EnvData, CACHE_TYPES_KEY};
use crate::error::{Error, Result};

/// Source of cache type states, keyed by cache type in its native order.
///
/// A state of `1` means enabled and `0` disabled. Other values are kept
/// but belong to neither list.
pub trait CacheStatusProvider {
    fn status(&self) -> Result<IndexMap<String, i64>>;
}

/// Reads the `cache_types` section of the environment data.
pub struct EnvCacheStatus<'a> {
    env: &'a EnvData,
}

impl<'a> EnvCacheStatus<'a> {
    pub fn new(env: &'a EnvData) -> Self {
        Self { env }
    }
}

impl CacheStatusProvider for EnvCacheStatus<'_> {
    fn status(&self) -> Result<IndexMap<String, i64>> {
        let Some(section) = self.env.get(CACHE_TYPES_KEY) else {
            return Ok(IndexMap::new());
        };
        if section.as_array().is_some_and(Vec::is_empty) {
            return Ok(IndexMap::new());
        }
        let Some(types) = section.as_object() else {
            return Err(Error::ConfigKeyMissing {
                key: CACHE_TYPES_KEY.to_string(),
            });
        };

        Ok(types
            .iter()
            .map(|(name, state)| (name.clone(), state_value(state)))
            .collect())
    }
}

impl CacheStatusProvider for IndexMap<String, i64> {
    fn status(&self) -> Result<IndexMap<String, i64>> {
        Ok(self.clone())
    }
}

fn state_value(state: &Value) -> i64 {
    match state {
        Value::Number(n) => n.as_i64().unwrap_or(-1),
        Value::Bool(b) => *b as i64,
        Value::String(s) => s.trim().parse().unwrap_or(-1),
        _ => -1,
    }
}

/// Cache types split by state, each in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStates {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

impl CacheStates {
    pub fn partition(status: &IndexMap<String, i64>) -> Self {
        let mut states = Self::default();
        for (name, state) in status {
            match state {
                1 => states.enabled.push(name.clone()),
                0 => states.disabled.push(name.clone()),
                _ => {}
            }
        }
        states
    }
}

/// Joins names with ", ", or returns "None" for an empty list.
pub fn render_list(names: &[String]) -> String {
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}
