use crate::constants::DEFAULT_SECTION;
use crate::ini::store::{Section, Store};

const COMMENT_PREFIX: char = '#';

pub(crate) struct Writer {
    buffer: String,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    /// One `#` line per comment line; a blank comment is a bare `#`.
    pub fn write_comment(&mut self, comment: Option<&str>) {
        let Some(comment) = comment else {
            return;
        };
        if comment.trim().is_empty() {
            self.buffer.push(COMMENT_PREFIX);
            self.write_newline();
            return;
        }
        for line in comment.split('\n') {
            self.buffer.push(COMMENT_PREFIX);
            self.buffer.push_str(line);
            self.write_newline();
        }
    }

    pub fn write_section_header(&mut self, name: &str) {
        self.buffer.push('[');
        self.buffer.push_str(name);
        self.buffer.push(']');
        self.write_newline();
    }

    pub fn write_entry(&mut self, key: &str, value: &str) {
        self.buffer.push_str(key);
        self.buffer.push('=');
        self.buffer.push_str(value);
        self.write_newline();
    }

    fn write_entries(&mut self, store: &Store, section: &str, entries: &Section) {
        for (key, value) in entries {
            self.write_comment(store.key_comment(section, key));
            self.write_entry(key, value);
        }
    }
}

/// Renders `store` as INI text, default section first and without a header.
pub fn render(store: &Store) -> String {
    let mut writer = Writer::new();

    if let Some(entries) = store.section(DEFAULT_SECTION) {
        writer.write_entries(store, DEFAULT_SECTION, entries);
    }

    for (name, entries) in store.sections() {
        if name == DEFAULT_SECTION {
            continue;
        }
        writer.write_comment(store.section_comment(name));
        writer.write_section_header(name);
        writer.write_entries(store, name, entries);
        writer.write_newline();
    }

    writer.finish()
}
