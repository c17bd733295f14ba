pub mod coerce;
pub mod configer;
pub mod constants;
pub mod error;
pub mod ini;
pub mod json;
pub mod key;
pub mod num;
pub mod options;
pub mod registry;

use std::path::Path;

pub use serde_json::Value;

pub use crate::configer::{Adapter, Configer};
pub use crate::error::{Error, ErrorKind};
pub use crate::ini::{IniAdapter, IniConfig};
pub use crate::json::{JsonAdapter, JsonConfig};
pub use crate::key::KeyPath;
pub use crate::options::ParseOptions;
pub use crate::registry::Registry;

pub type Result<T> = std::result::Result<T, Error>;

/// Opens `path` with the adapter registered under `adapter` in a default registry.
pub fn open(adapter: &str, path: impl AsRef<Path>) -> Result<Box<dyn Configer>> {
    Registry::with_defaults().new_config(adapter, path)
}

/// Parses `data` with the adapter registered under `adapter` in a default registry.
pub fn open_data(adapter: &str, data: &[u8]) -> Result<Box<dyn Configer>> {
    Registry::with_defaults().new_config_data(adapter, data)
}
