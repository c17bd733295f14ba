use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::Result;

/// Uniform key/value access over a parsed configuration.
///
/// Keys may be addressed as `section::key`; anything else resolves against
/// the adapter's top level. Each call takes the instance lock once, so a
/// read followed by a write is not atomic.
pub trait Configer: Send + Sync {
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// The stored value, or an empty string when absent.
    fn string(&self, key: &str) -> String;

    /// `None` when the value is empty.
    fn strings(&self, key: &str) -> Option<Vec<String>>;

    /// 32-bit; values outside `i32` are conversion errors, use [`Configer::int64`] for those.
    fn int(&self, key: &str) -> Result<i32>;

    fn int64(&self, key: &str) -> Result<i64>;

    fn bool(&self, key: &str) -> Result<bool>;

    fn float(&self, key: &str) -> Result<f64>;

    /// The raw stored value as a tagged variant.
    fn interface_value(&self, key: &str) -> Result<Value>;

    fn section(&self, name: &str) -> Result<IndexMap<String, String>>;

    fn save_config_file(&self, path: &Path) -> Result<()>;

    /// The whole underlying store. Its shape differs between adapters.
    fn cfg_data(&self) -> Value;

    fn default_string(&self, key: &str, fallback: &str) -> String {
        let value = self.string(key);
        if value.is_empty() {
            fallback.to_string()
        } else {
            value
        }
    }

    fn default_strings(&self, key: &str, fallback: Vec<String>) -> Vec<String> {
        self.strings(key).unwrap_or(fallback)
    }

    fn default_int(&self, key: &str, fallback: i32) -> i32 {
        self.int(key).unwrap_or(fallback)
    }

    fn default_int64(&self, key: &str, fallback: i64) -> i64 {
        self.int64(key).unwrap_or(fallback)
    }

    fn default_bool(&self, key: &str, fallback: bool) -> bool {
        self.bool(key).unwrap_or(fallback)
    }

    fn default_float(&self, key: &str, fallback: f64) -> f64 {
        self.float(key).unwrap_or(fallback)
    }
}

/// Turns a file or a byte buffer into a [`Configer`].
pub trait Adapter: Send + Sync {
    fn parse(&self, path: &Path) -> Result<Box<dyn Configer>>;

    fn parse_data(&self, data: &[u8]) -> Result<Box<dyn Configer>>;
}
