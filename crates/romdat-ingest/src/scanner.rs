//! Line scanner: splits catalogue text into classified logical lines.

use crate::error::IngestError;

/// Classification of one catalogue line.
///
/// The grammar has no escaping; a value runs to the end of its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    /// Section header: `[` followed by exactly 32 key characters and `]`.
    Section(&'a str),
    /// `Key=Value`; the value may be empty.
    KeyValue { key: &'a str, value: &'a str },
}

/// One classified line with its 1-based source line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub kind: LineKind<'a>,
}

/// Scans raw catalogue text into classified lines, preserving order.
///
/// Malformed section headers and key lines without `=` abort the scan.
pub fn scan_lines(text: &str) -> Result<Vec<Line<'_>>, IngestError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let kind = classify(raw, number)?;
        lines.push(Line { number, kind });
    }
    Ok(lines)
}

fn classify(raw: &str, number: usize) -> Result<LineKind<'_>, IngestError> {
    if raw.is_empty() {
        return Ok(LineKind::Blank);
    }
    if raw.starts_with(';') {
        return Ok(LineKind::Comment);
    }
    if let Some(rest) = raw.strip_prefix('[') {
        let Some(key) = rest.strip_suffix(']') else {
            return Err(IngestError::MalformedLine {
                line: number,
                message: format!("section header missing closing bracket: {raw:?}"),
            });
        };
        if key.chars().count() != 32 {
            return Err(IngestError::MalformedLine {
                line: number,
                message: format!(
                    "section key must be exactly 32 characters, got {}: {key:?}",
                    key.chars().count()
                ),
            });
        }
        return Ok(LineKind::Section(key));
    }
    let Some((key, value)) = raw.split_once('=') else {
        return Err(IngestError::MalformedLine {
            line: number,
            message: format!("expected Key=Value, got {raw:?}"),
        });
    };
    Ok(LineKind::KeyValue { key, value })
}
