use memchr::memchr_iter;
use smallvec::SmallVec;

use crate::constants::{is_comment_prefix, INCLUDE_KEYWORD, UTF8_BOM};
use crate::{Error, Result};

/// One classified, trimmed line of INI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// Text after the run of leading comment characters.
    Comment(&'a str),
    /// Raw text between the brackets, case preserved.
    Section(&'a str),
    /// Include target with surrounding quotes removed.
    Include(&'a str),
    Assign { key: &'a str, value: &'a str },
}

#[derive(Debug, Clone, Copy)]
pub struct ScanLine<'a> {
    pub number: usize,
    pub kind: LineKind<'a>,
}

pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Splits `input` on `\n`, classifying each line as it is reached.
pub fn scan_lines(input: &str) -> impl Iterator<Item = Result<ScanLine<'_>>> + '_ {
    let mut start = 0;
    memchr_iter(b'\n', input.as_bytes())
        .chain(std::iter::once(input.len()))
        .enumerate()
        .map(move |(idx, end)| {
            let raw = &input[start..end];
            start = end + 1;
            classify(raw, idx + 1)
        })
}

pub fn classify(raw: &str, number: usize) -> Result<ScanLine<'_>> {
    let line = raw.trim();
    let kind = match line.as_bytes().first() {
        None => LineKind::Blank,
        Some(&prefix) if is_comment_prefix(prefix) => {
            LineKind::Comment(line.trim_start_matches(prefix as char))
        }
        Some(b'[') if line.ends_with(']') && line.len() >= 2 => {
            LineKind::Section(&line[1..line.len() - 1])
        }
        Some(_) => match line.split_once('=') {
            Some((key, value)) => LineKind::Assign {
                key: key.trim(),
                value: value.trim(),
            },
            None => match include_target(line) {
                Some(path) => LineKind::Include(path),
                None => return Err(Error::format(line, number)),
            },
        },
    };
    Ok(ScanLine { number, kind })
}

fn include_target(line: &str) -> Option<&str> {
    let fields: SmallVec<[&str; 3]> = line.split_whitespace().take(3).collect();
    match *fields.as_slice() {
        [keyword, target] if keyword.eq_ignore_ascii_case(INCLUDE_KEYWORD) => {
            Some(target.trim_matches('"'))
        }
        _ => None,
    }
}

/// Removes every `"` when the value opens with one.
pub fn unquote(value: &str) -> String {
    if value.starts_with('"') {
        value.replace('"', "")
    } else {
        value.to_string()
    }
}
