pub const DEFAULT_SECTION: &str = "default";

pub const SECTION_SEPARATOR: &str = "::";

pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub const INCLUDE_KEYWORD: &str = "include";

pub const LIST_SEPARATOR: char = ';';

pub(crate) const SCRATCH_DIR_NAME: &str = "tmp";

pub const TRUE_LITERALS: &[&str] = &["1", "t", "true", "yes", "y", "on"];

pub const FALSE_LITERALS: &[&str] = &["0", "f", "false", "no", "n", "off"];

#[inline]
pub fn is_comment_prefix(byte: u8) -> bool {
    matches!(byte, b'#' | b';')
}
