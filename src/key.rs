use crate::constants::{DEFAULT_SECTION, SECTION_SEPARATOR};

/// A lowercased `(section, key)` pair resolved from a requested key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    pub section: String,
    pub key: String,
}

impl KeyPath {
    /// `section::key` selects a section; any other shape lands in the default section whole.
    pub fn resolve(requested: &str) -> Self {
        let lowered = requested.to_lowercase();
        let mut parts = lowered.split(SECTION_SEPARATOR);
        if let (Some(section), Some(key), None) = (parts.next(), parts.next(), parts.next()) {
            return Self {
                section: section.to_string(),
                key: key.to_string(),
            };
        }
        Self {
            section: DEFAULT_SECTION.to_string(),
            key: lowered,
        }
    }

    /// Name under which the key comment is stored.
    pub fn comment_key(&self) -> String {
        comment_key(&self.section, &self.key)
    }
}

pub(crate) fn comment_key(section: &str, key: &str) -> String {
    format!("{section}.{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("addr", "default", "addr")]
    #[case("ADDR", "default", "addr")]
    #[case("mysql::addr", "mysql", "addr")]
    #[case("MySQL::Port", "mysql", "port")]
    #[case("::port", "", "port")]
    #[case("a::b::c", "default", "a::b::c")]
    #[case("", "default", "")]
    fn resolves_addressing(#[case] requested: &str, #[case] section: &str, #[case] key: &str) {
        let path = KeyPath::resolve(requested);
        assert_eq!(path.section, section);
        assert_eq!(path.key, key);
    }

    #[rstest::rstest]
    fn comment_key_joins_with_dot() {
        assert_eq!(KeyPath::resolve("mysql::addr").comment_key(), "mysql.addr");
    }
}
