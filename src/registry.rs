use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::configer::{Adapter, Configer};
use crate::{ini, json, Error, Result};

/// Name-keyed table of format adapters.
///
/// Built by the caller and passed to whatever opens configuration files.
#[derive(Default)]
pub struct Registry {
    adapters: IndexMap<String, Box<dyn Adapter>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `ini` and `json` adapters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        ini::register(&mut registry);
        json::register(&mut registry);
        registry
    }

    /// # Panics
    ///
    /// Panics if an adapter is already registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, adapter: impl Adapter + 'static) {
        let name = name.into();
        if self.adapters.contains_key(&name) {
            panic!("config adapter {name} is only allowed to register once");
        }
        debug!(adapter = %name, "registered config adapter");
        self.adapters.insert(name, Box::new(adapter));
    }

    pub fn adapter(&self, name: &str) -> Result<&dyn Adapter> {
        self.adapters
            .get(name)
            .map(|adapter| adapter.as_ref())
            .ok_or_else(|| Error::UnknownAdapter(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }

    pub fn new_config(&self, name: &str, path: impl AsRef<Path>) -> Result<Box<dyn Configer>> {
        self.adapter(name)?.parse(path.as_ref())
    }

    pub fn new_config_data(&self, name: &str, data: &[u8]) -> Result<Box<dyn Configer>> {
        self.adapter(name)?.parse_data(data)
    }
}
