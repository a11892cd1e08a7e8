//! Line-oriented `KEY=VALUE` parser for `.env` style files.
//!
//! Parsing is lenient: a line that is not a definition is recorded as a
//! [`SkippedLine`] and the rest of the file is still read. Interpolation,
//! `export` prefixes and multi-line values are not interpreted.

use std::collections::BTreeMap;
use std::fmt;

use super::position::Position;

/// One definition from a definitions file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    /// Value with surrounding whitespace and one layer of quotes removed.
    pub value: String,
    /// Start of the key on its effective (last) definition line.
    pub position: Position,
}

/// Why a line did not produce an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Line has no `=` separator.
    MissingSeparator,
    /// Separator present but nothing before it.
    EmptyKey,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSeparator => write!(f, "missing '=' separator"),
            SkipReason::EmptyKey => write!(f, "empty key"),
        }
    }
}

/// A malformed line that was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 0-indexed line number.
    pub line: u32,
    pub reason: SkipReason,
}

/// Result of parsing a whole file.
#[derive(Debug, Clone, Default)]
pub struct ParsedDefinitions {
    pub entries: BTreeMap<String, Entry>,
    pub skipped: Vec<SkippedLine>,
}

pub fn parse(content: &str) -> ParsedDefinitions {
    let mut parsed = ParsedDefinitions::default();
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    for (index, raw_line) in content.split('\n').enumerate() {
        let line_no = index as u32;
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            parsed.skipped.push(SkippedLine {
                line: line_no,
                reason: SkipReason::MissingSeparator,
            });
            continue;
        };

        let key = raw_key.trim();
        if key.is_empty() {
            parsed.skipped.push(SkippedLine {
                line: line_no,
                reason: SkipReason::EmptyKey,
            });
            continue;
        }

        let column = (raw_key.len() - raw_key.trim_start().len()) as u32;
        let entry = Entry {
            key: key.to_string(),
            value: unquote(raw_value.trim()).to_string(),
            position: Position::new(line_no, column),
        };

        // Later definitions override earlier ones.
        parsed.entries.insert(entry.key.clone(), entry);
    }

    parsed
}

/// Strip one layer of matching `"` or `'` quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
