use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::constants::DEFAULT_SECTION;
use crate::ini::scan::{scan_lines, strip_bom, unquote, LineKind};
use crate::ini::store::Store;
use crate::options::base_dir;
use crate::{Error, Result};

/// Builds a [`Store`] from INI text, following `include` directives.
///
/// The canonical paths of the files currently being parsed are kept on a
/// stack; meeting one of them again is an include cycle.
#[derive(Debug, Default)]
pub struct Parser {
    include_stack: Vec<PathBuf>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<Store> {
        let canonical = fs::canonicalize(path)?;
        if self.include_stack.contains(&canonical) {
            return Err(Error::IncludeCycle { path: canonical });
        }
        let data = fs::read(path)?;

        self.include_stack.push(canonical);
        let parsed = self.parse_data(&base_dir(path), &data);
        self.include_stack.pop();
        parsed
    }

    /// Parses `data`, resolving relative includes against `dir`.
    pub fn parse_data(&mut self, dir: &Path, data: &[u8]) -> Result<Store> {
        let text = std::str::from_utf8(strip_bom(data))?;
        let mut store = Store::new();
        let mut comment = String::new();
        let mut section = DEFAULT_SECTION.to_string();

        for line in scan_lines(text) {
            match line?.kind {
                LineKind::Blank => {}
                LineKind::Comment(text) => {
                    if !comment.is_empty() {
                        comment.push('\n');
                    }
                    comment.push_str(text);
                }
                LineKind::Section(name) => {
                    section = name.to_lowercase();
                    if !comment.is_empty() {
                        store.set_section_comment(&section, std::mem::take(&mut comment));
                    }
                    store.ensure_section(&section);
                }
                LineKind::Include(target) => {
                    store.ensure_section(&section);
                    let included = self.parse_include(dir, target)?;
                    store.merge(included);
                }
                LineKind::Assign { key, value } => {
                    let key = key.to_lowercase();
                    if !comment.is_empty() {
                        store.set_key_comment(&section, &key, std::mem::take(&mut comment));
                    }
                    store.insert(&section, key, unquote(value));
                }
            }
        }
        Ok(store)
    }

    fn parse_include(&mut self, dir: &Path, target: &str) -> Result<Store> {
        let target = Path::new(target);
        let path = if target.is_absolute() {
            target.to_path_buf()
        } else {
            dir.join(target)
        };
        debug!(path = %path.display(), depth = self.include_stack.len(), "resolving include");
        let included = self.parse_file(&path)?;
        trace!(
            path = %path.display(),
            sections = included.section_count(),
            "merging include"
        );
        Ok(included)
    }
}
