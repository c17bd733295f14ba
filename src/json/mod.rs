//! JSON adapter backed by `serde_json`, exposing the same accessors as the INI adapter.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

use crate::coerce::{parse_float, parse_int, parse_int64, value_to_bool, value_to_string};
use crate::configer::{Adapter, Configer};
use crate::constants::SECTION_SEPARATOR;
use crate::num::format_number;
use crate::registry::Registry;
use crate::{Error, Result};

pub fn register(registry: &mut Registry) {
    registry.register("json", JsonAdapter);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAdapter;

impl Adapter for JsonAdapter {
    fn parse(&self, path: &Path) -> Result<Box<dyn Configer>> {
        Ok(Box::new(JsonConfig::from_path(path)?))
    }

    fn parse_data(&self, data: &[u8]) -> Result<Box<dyn Configer>> {
        Ok(Box::new(JsonConfig::from_slice(data)?))
    }
}

#[derive(Debug, Default)]
pub struct JsonConfig {
    data: RwLock<Map<String, Value>>,
}

impl JsonConfig {
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_slice(&data)
    }

    /// The document root must be an object.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let root: Map<String, Value> = serde_json::from_slice(data)?;
        Ok(Self::new(root))
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        let data = self.data.read();
        let lowered = key.to_lowercase();
        let parts: Vec<&str> = lowered.split(SECTION_SEPARATOR).collect();
        if parts.len() >= 2 {
            return match get_ignore_case(&data, parts[0]) {
                Some(Value::Object(section)) => get_ignore_case(section, parts[1]).cloned(),
                _ => None,
            };
        }
        get_ignore_case(&data, &lowered).cloned()
    }
}

impl FromStr for JsonConfig {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::from_slice(input.as_bytes())
    }
}

fn get_ignore_case<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        map.iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}

/// Drops the fraction; `None` when the float is not finite or its integer part overflows.
fn truncate_to_i64(float: f64) -> Option<i64> {
    let truncated = float.trunc();
    (truncated.is_finite() && (i64::MIN as f64..i64::MAX as f64).contains(&truncated))
        .then_some(truncated as i64)
}

fn number_to_i64(value: &Value, target: &'static str) -> Result<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_to_i64))
            .ok_or_else(|| Error::conversion(number.to_string(), target)),
        other => Err(Error::conversion(value_to_string(other), target)),
    }
}

impl Configer for JsonConfig {
    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        let mut data = self.data.write();
        match key.split_once(SECTION_SEPARATOR) {
            Some((section, name)) if !name.contains(SECTION_SEPARATOR) => {
                let slot = data
                    .entry(section.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(entries) = slot {
                    entries.insert(name.to_string(), Value::String(value.to_string()));
                }
            }
            _ => {
                data.insert(key.to_string(), Value::String(value.to_string()));
            }
        }
        Ok(())
    }

    fn string(&self, key: &str) -> String {
        self.lookup(key)
            .map(|value| value_to_string(&value))
            .unwrap_or_default()
    }

    fn strings(&self, key: &str) -> Option<Vec<String>> {
        match self.lookup(key)? {
            Value::String(text) => Some(vec![text]),
            Value::Array(items) => Some(items.iter().map(value_to_string).collect()),
            _ => None,
        }
    }

    fn int(&self, key: &str) -> Result<i32> {
        match self.lookup(key) {
            Some(Value::String(text)) => parse_int(&text),
            Some(value) => {
                let wide = number_to_i64(&value, "int")?;
                i32::try_from(wide).map_err(|_| Error::conversion(value.to_string(), "int"))
            }
            None => Err(Error::conversion("", "int")),
        }
    }

    fn int64(&self, key: &str) -> Result<i64> {
        match self.lookup(key) {
            Some(Value::String(text)) => parse_int64(&text),
            Some(value) => number_to_i64(&value, "int64"),
            None => Err(Error::conversion("", "int64")),
        }
    }

    fn bool(&self, key: &str) -> Result<bool> {
        match self.lookup(key) {
            Some(value) => value_to_bool(&value),
            None => Err(Error::conversion("", "bool")),
        }
    }

    fn float(&self, key: &str) -> Result<f64> {
        match self.lookup(key) {
            Some(Value::String(text)) => parse_float(&text),
            Some(Value::Number(number)) => number
                .as_f64()
                .ok_or_else(|| Error::conversion(format_number(&number), "float")),
            Some(other) => Err(Error::conversion(value_to_string(&other), "float")),
            None => Err(Error::conversion("", "float")),
        }
    }

    fn interface_value(&self, key: &str) -> Result<Value> {
        self.lookup(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    fn section(&self, name: &str) -> Result<IndexMap<String, String>> {
        let data = self.data.read();
        match get_ignore_case(&data, &name.to_lowercase()) {
            Some(Value::Object(entries)) => Ok(entries
                .iter()
                .map(|(key, value)| (key.clone(), value_to_string(value)))
                .collect()),
            _ => Err(Error::SectionNotFound(name.to_string())),
        }
    }

    fn save_config_file(&self, path: &Path) -> Result<()> {
        let encoded = serde_json::to_vec(&*self.data.read())?;
        fs::write(path, encoded)?;
        debug!(path = %path.display(), "saved json config");
        Ok(())
    }

    fn cfg_data(&self) -> Value {
        Value::Object(self.data.read().clone())
    }
}
