//! # Conformance Test-File Loader (spec §6)
//!
//! Streams `BidiTest`/`BidiCharacterTest`-style fixture files line by line
//! rather than buffering the whole file, so a full upstream corpus (tens of
//! thousands of lines) doesn't need to be slurped into memory first.
//!
//! Format:
//! - blank lines and lines starting with `#`: skipped;
//! - `@Levels: <space-separated ints or 'x'>`: sets the expected levels for
//!   every test case until the next `@Levels:` line (`x` = removed);
//! - `@Reorder: <space-separated ints>`: sets the expected visual order;
//! - `<space-separated type tokens>;<flags-bitmask>`: one test case per set
//!   bit in the mask — bit 0 → base `ON` (auto), bit 1 → base `L`, bit 2 →
//!   base `R`.

use crate::error::BidiError;
use crate::types::{BaseDirection, BidiClass};
use std::io::BufRead;

/// One resolved test case: an input type sequence, a base direction, and the
/// expected `(levels, order)` pulled from the most recent `@Levels`/
/// `@Reorder` lines.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub line: usize,
    pub types: Vec<BidiClass>,
    pub base: BaseDirection,
    /// `None` at a position means the removed sentinel (`x` in the file).
    pub expected_levels: Vec<Option<u8>>,
    pub expected_order: Vec<usize>,
}

/// Stream `reader` and yield every test case it describes, in file order.
pub fn load_cases<R: BufRead>(reader: R) -> Result<Vec<TestCase>, BidiError> {
    let mut levels: Vec<Option<u8>> = Vec::new();
    let mut order: Vec<usize> = Vec::new();
    let mut cases = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| BidiError::Io {
            path: "<stream>".to_string(),
            source,
        })?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("@Levels:") {
            levels = parse_levels(rest, line_no)?;
            continue;
        }

        if let Some(rest) = line.strip_prefix("@Reorder:") {
            order = parse_order(rest, line_no)?;
            continue;
        }

        let (types_part, flags_part) = line.split_once(';').ok_or_else(|| BidiError::TestFile {
            line: line_no,
            message: "test line missing ';<flags>' suffix".to_string(),
        })?;

        let types = types_part
            .split_whitespace()
            .map(|tok| {
                BidiClass::from_token(tok).ok_or_else(|| BidiError::UnknownTypeCode {
                    token: tok.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let flags: u32 = flags_part.trim().parse().map_err(|_| BidiError::TestFile {
            line: line_no,
            message: format!("flags {flags_part:?} is not an integer bitmask"),
        })?;

        for (bit, base) in [
            (0, BaseDirection::Auto),
            (1, BaseDirection::Ltr),
            (2, BaseDirection::Rtl),
        ] {
            if flags & (1 << bit) != 0 {
                cases.push(TestCase {
                    line: line_no,
                    types: types.clone(),
                    base,
                    expected_levels: levels.clone(),
                    expected_order: order.clone(),
                });
            }
        }
    }

    Ok(cases)
}

fn parse_levels(rest: &str, line_no: usize) -> Result<Vec<Option<u8>>, BidiError> {
    rest.split_whitespace()
        .map(|tok| {
            if tok == "x" {
                Ok(None)
            } else {
                tok.parse::<u8>().map(Some).map_err(|_| BidiError::TestFile {
                    line: line_no,
                    message: format!("level token {tok:?} is not an int or 'x'"),
                })
            }
        })
        .collect()
}

fn parse_order(rest: &str, line_no: usize) -> Result<Vec<usize>, BidiError> {
    rest.split_whitespace()
        .map(|tok| {
            tok.parse::<usize>().map_err(|_| BidiError::TestFile {
                line: line_no,
                message: format!("order token {tok:?} is not an int"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str) -> Vec<TestCase> {
        load_cases(Cursor::new(text.as_bytes())).expect("valid fixture")
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let cases = load("# a comment\n\nL R;1\n");
        assert_eq!(cases.len(), 1);
    }

    #[test]
    fn expands_one_case_per_set_flag_bit() {
        let cases = load("L R;7"); // all three bits set
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[0].base, BaseDirection::Auto);
        assert_eq!(cases[1].base, BaseDirection::Ltr);
        assert_eq!(cases[2].base, BaseDirection::Rtl);
    }

    #[test]
    fn carries_levels_and_reorder_state_across_lines() {
        let cases = load("@Levels: 0 1 x\n@Reorder: 0 1\nL R PDF;1\nL L;1\n");
        assert_eq!(cases[0].expected_levels, vec![Some(0), Some(1), None]);
        assert_eq!(cases[0].expected_order, vec![0, 1]);
        // second test line reuses the same @Levels/@Reorder state.
        assert_eq!(cases[1].expected_levels, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn unknown_type_token_is_an_error() {
        let err = load_cases(Cursor::new(b"ZZ;1" as &[u8])).unwrap_err();
        assert!(matches!(err, BidiError::UnknownTypeCode { .. }));
    }

    #[test]
    fn missing_flags_suffix_is_a_test_file_error() {
        let err = load_cases(Cursor::new(b"L R" as &[u8])).unwrap_err();
        assert!(matches!(err, BidiError::TestFile { .. }));
    }
}
