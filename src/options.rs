use std::path::{Path, PathBuf};

use crate::constants::SCRATCH_DIR_NAME;

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub scratch_dir: Option<PathBuf>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base directory for relative `include` paths when parsing an in-memory buffer.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub(crate) fn resolve_scratch_dir(&self) -> PathBuf {
        match &self.scratch_dir {
            Some(dir) => dir.clone(),
            None => std::env::temp_dir().join(SCRATCH_DIR_NAME),
        }
    }
}

pub(crate) fn base_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
