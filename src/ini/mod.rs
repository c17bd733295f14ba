//! Comment-preserving INI adapter.
//!
//! ```
//! use configer::{Configer, IniConfig};
//!
//! let cfg = IniConfig::from_slice(b"addr=127.0.0.1\n[mysql]\nport=3306\n")?;
//! assert_eq!(cfg.string("addr"), "127.0.0.1");
//! assert_eq!(cfg.int("mysql::port")?, 3306);
//! # Ok::<(), configer::Error>(())
//! ```

mod parser;
mod scan;
mod store;
mod writer;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::coerce::{parse_bool, parse_float, parse_int, parse_int64};
use crate::configer::{Adapter, Configer};
use crate::constants::{DEFAULT_SECTION, LIST_SEPARATOR};
use crate::key::KeyPath;
use crate::registry::Registry;
use crate::{Error, ParseOptions, Result};

pub use parser::Parser;
pub use scan::{LineKind, ScanLine};
pub use store::{Section, Store};
pub use writer::render;

pub fn register(registry: &mut Registry) {
    registry.register("ini", IniAdapter::new());
}

#[derive(Debug, Clone, Default)]
pub struct IniAdapter {
    options: ParseOptions,
}

impl IniAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl Adapter for IniAdapter {
    fn parse(&self, path: &Path) -> Result<Box<dyn Configer>> {
        Ok(Box::new(IniConfig::from_path(path)?))
    }

    fn parse_data(&self, data: &[u8]) -> Result<Box<dyn Configer>> {
        Ok(Box::new(IniConfig::from_slice_with_options(
            data,
            &self.options,
        )?))
    }
}

#[derive(Debug, Default)]
pub struct IniConfig {
    store: RwLock<Store>,
}

impl IniConfig {
    pub fn new(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let store = Parser::new().parse_file(path.as_ref())?;
        Ok(Self::new(store))
    }

    /// Creates the default scratch directory under the system temp dir, even
    /// when `data` has no `include` line.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::from_slice_with_options(data, &ParseOptions::default())
    }

    /// Relative includes resolve against the scratch directory, created on demand.
    pub fn from_slice_with_options(data: &[u8], options: &ParseOptions) -> Result<Self> {
        let dir = options.resolve_scratch_dir();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "parsing ini buffer");
        let store = Parser::new().parse_data(&dir, data)?;
        Ok(Self::new(store))
    }

    pub fn section_comment(&self, section: &str) -> Option<String> {
        self.store
            .read()
            .section_comment(&section.to_lowercase())
            .map(str::to_string)
    }

    /// Comment attached to `key`, addressed like the accessors.
    pub fn key_comment(&self, key: &str) -> Option<String> {
        let path = KeyPath::resolve(key);
        self.store
            .read()
            .key_comment(&path.section, &path.key)
            .map(str::to_string)
    }

    pub fn to_ini_string(&self) -> String {
        render(&self.store.read())
    }

    pub fn snapshot(&self) -> Store {
        self.store.read().clone()
    }

    fn raw(&self, key: &str) -> String {
        if key.is_empty() {
            return String::new();
        }
        let path = KeyPath::resolve(key);
        self.store
            .read()
            .get(&path.section, &path.key)
            .map(str::to_string)
            .unwrap_or_default()
    }
}

/// Same as [`IniConfig::from_slice`], so it touches the filesystem.
impl FromStr for IniConfig {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::from_slice(input.as_bytes())
    }
}

impl Configer for IniConfig {
    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        let path = KeyPath::resolve(key);
        self.store.write().insert(&path.section, path.key, value);
        Ok(())
    }

    fn string(&self, key: &str) -> String {
        self.raw(key)
    }

    fn strings(&self, key: &str) -> Option<Vec<String>> {
        let value = self.raw(key);
        if value.is_empty() {
            return None;
        }
        Some(
            value
                .replace('"', "")
                .split(LIST_SEPARATOR)
                .map(str::to_string)
                .collect(),
        )
    }

    fn int(&self, key: &str) -> Result<i32> {
        parse_int(&self.raw(key))
    }

    fn int64(&self, key: &str) -> Result<i64> {
        parse_int64(&self.raw(key))
    }

    fn bool(&self, key: &str) -> Result<bool> {
        parse_bool(&self.raw(key))
    }

    fn float(&self, key: &str) -> Result<f64> {
        parse_float(&self.raw(key))
    }

    fn interface_value(&self, key: &str) -> Result<Value> {
        let path = KeyPath::resolve(key);
        let guard = self.store.read();
        if path.section == DEFAULT_SECTION {
            if let Some(entries) = guard.section(&path.key) {
                return Ok(store::section_to_value(entries));
            }
        }
        guard
            .get(&path.section, &path.key)
            .map(|value| Value::String(value.to_string()))
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    fn section(&self, name: &str) -> Result<IndexMap<String, String>> {
        self.store
            .read()
            .section(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| Error::SectionNotFound(name.to_string()))
    }

    fn save_config_file(&self, path: &Path) -> Result<()> {
        let (text, sections) = {
            let guard = self.store.read();
            (render(&guard), guard.section_count())
        };
        fs::write(path, text)?;
        debug!(path = %path.display(), sections, "saved ini config");
        Ok(())
    }

    fn cfg_data(&self) -> Value {
        self.store.read().to_value()
    }
}
