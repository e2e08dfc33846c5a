//! Parser for the Unicode break test files (`GraphemeBreakTest.txt`,
//! `WordBreakTest.txt`), shared by the integration tests.
//!
//! Each data line alternates boundary markers and hex scalar values:
//!
//! ```text
//! ÷ 0020 × 0308 ÷ 1F1E6 ÷	# comment
//! ```
//!
//! `÷` marks a boundary, `×` marks none. Everything after `#` is ignored.

use thiserror::Error;

use unisegment::matcher::{high_surrogate, low_surrogate};
use unisegment::ranges::{BMP_MAX, SCALAR_MAX};
use unisegment::TextCursor;

const BREAK: &str = "÷";
const NO_BREAK: &str = "×";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestDataError {
    #[error("line {line}: expected a boundary marker, found {token:?}")]
    ExpectedMarker { line: usize, token: String },
    #[error("line {line}: expected a hex codepoint, found {token:?}")]
    ExpectedCodepoint { line: usize, token: String },
    #[error("line {line}: must end with a boundary marker")]
    Unterminated { line: usize },
}

/// One test line: a text and the expected boundary at each code-unit offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakTestCase {
    /// 1-based line number in the source file.
    pub line: usize,
    pub text: Vec<u16>,
    /// `text.len() + 1` flags; offsets inside a surrogate pair are `false`.
    pub boundaries: Vec<bool>,
}

impl BreakTestCase {
    /// Offsets where a boundary is expected.
    pub fn expected_breaks(&self) -> Vec<usize> {
        self.boundaries
            .iter()
            .enumerate()
            .filter_map(|(pos, &brk)| brk.then_some(pos))
            .collect()
    }

    /// Offsets where `is_break` disagrees with the expected boundaries.
    pub fn mismatches<F>(&self, mut is_break: F) -> Vec<usize>
    where
        F: FnMut(&TextCursor<'_>, usize) -> bool,
    {
        let cursor = TextCursor::new(&self.text);
        self.boundaries
            .iter()
            .enumerate()
            .filter(|&(pos, &expected)| is_break(&cursor, pos) != expected)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// The case in the file's own notation, for failure messages.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let cursor = TextCursor::new(&self.text);
        for (pos, codepoint) in cursor.codepoints() {
            out.push_str(if self.boundaries[pos] { BREAK } else { NO_BREAK });
            out.push_str(&format!(" {:04X} ", codepoint.value()));
        }
        out.push_str(if self.boundaries[self.text.len()] { BREAK } else { NO_BREAK });
        out
    }
}

fn parse_codepoint(line: usize, token: &str) -> Result<u32, TestDataError> {
    u32::from_str_radix(token, 16)
        .ok()
        .filter(|&value| value <= SCALAR_MAX)
        .ok_or_else(|| TestDataError::ExpectedCodepoint {
            line,
            token: token.to_string(),
        })
}

fn parse_marker(line: usize, token: &str) -> Result<bool, TestDataError> {
    match token {
        BREAK => Ok(true),
        NO_BREAK => Ok(false),
        _ => Err(TestDataError::ExpectedMarker {
            line,
            token: token.to_string(),
        }),
    }
}

/// Parse one line; comment-only and blank lines give `None`.
///
/// Values in the surrogate block are kept as single code units.
pub fn parse_line(line: usize, source: &str) -> Result<Option<BreakTestCase>, TestDataError> {
    let data = source.split('#').next().unwrap_or_default().trim();
    if data.is_empty() {
        return Ok(None);
    }

    let mut text = Vec::new();
    let mut boundaries = Vec::new();
    let mut expect_marker = true;

    for token in data.split_whitespace() {
        if expect_marker {
            boundaries.push(parse_marker(line, token)?);
        } else {
            let value = parse_codepoint(line, token)?;
            if value > BMP_MAX {
                text.push(high_surrogate(value));
                text.push(low_surrogate(value));
                boundaries.push(false);
            } else {
                text.push(value as u16);
            }
        }
        expect_marker = !expect_marker;
    }

    if expect_marker || text.is_empty() {
        return Err(TestDataError::Unterminated { line });
    }
    debug_assert_eq!(boundaries.len(), text.len() + 1);
    Ok(Some(BreakTestCase { line, text, boundaries }))
}

/// Parse a whole test file.
pub fn parse_test_data(source: &str) -> Result<Vec<BreakTestCase>, TestDataError> {
    let mut cases = Vec::new();
    for (index, line) in source.lines().enumerate() {
        if let Some(case) = parse_line(index + 1, line)? {
            cases.push(case);
        }
    }
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_parse_line() {
        let case = parse_line(7, "÷ 0020 × 0308 ÷ 1F1E6 ÷\t#  ÷ [0.2] SPACE (Other) ...").unwrap().unwrap();
        assert_eq!(case.line, 7);
        assert_eq!(case.text, vec![0x20, 0x308, 0xD83C, 0xDDE6]);
        assert_eq!(case.boundaries, vec![true, false, true, false, true]);
        assert_eq!(case.expected_breaks(), vec![0, 2, 4]);
        assert_eq!(case.describe(), "÷ 0020 × 0308 ÷ 1F1E6 ÷");
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    #[test_case("# GraphemeBreakTest-16.0.0.txt" ; "comment")]
    fn test_skipped_lines(line: &str) {
        assert_eq!(parse_line(1, line), Ok(None));
    }

    #[test]
    fn test_lone_surrogate_value() {
        let case = parse_line(1, "÷ D800 ÷ 0061 ÷").unwrap().unwrap();
        assert_eq!(case.text, vec![0xD800, 0x61]);
        assert_eq!(case.boundaries, vec![true, true, true]);
    }

    #[test_case("0020 ÷", TestDataError::ExpectedMarker { line: 3, token: "0020".into() } ; "missing leading marker")]
    #[test_case("÷ 0020 × ÷", TestDataError::ExpectedCodepoint { line: 3, token: "÷".into() } ; "double marker")]
    #[test_case("÷ 110000 ÷", TestDataError::ExpectedCodepoint { line: 3, token: "110000".into() } ; "out of range")]
    #[test_case("÷ 0020", TestDataError::Unterminated { line: 3 } ; "unterminated")]
    #[test_case("÷", TestDataError::Unterminated { line: 3 } ; "no text")]
    fn test_malformed_lines(line: &str, expected: TestDataError) {
        assert_eq!(parse_line(3, line), Err(expected));
    }

    #[test]
    fn test_parse_file_reports_line() {
        let source = "# header\n÷ 0041 ÷\n\n÷ 0041 ? 0042 ÷\n";
        assert_eq!(
            parse_test_data(source),
            Err(TestDataError::ExpectedMarker {
                line: 4,
                token: "?".into()
            })
        );
        assert_eq!(
            parse_test_data("# header\n÷ 0041 ÷\n").map(|cases| cases.len()),
            Ok(1)
        );
        assert_eq!(
            TestDataError::Unterminated { line: 9 }.to_string(),
            "line 9: must end with a boundary marker"
        );
    }

    #[test]
    fn test_mismatches() {
        let case = parse_line(1, "÷ 0061 × 0062 ÷").unwrap().unwrap();
        assert!(case.mismatches(|_, pos| pos != 1).is_empty());
        assert_eq!(case.mismatches(|_, _| true), vec![1]);
    }
}
