//! Binary and categorical node attribute file parsing.
//!
//! Each file carries a preserved attribute name (used as a trace-file column
//! label) followed by `n` whitespace-separated non-negative integer tokens,
//! one per node in node-index order. Carries no dependency on `ergm-core`;
//! callers feed the returned vectors into `AttributeTable::with_binary` /
//! `with_categorical` themselves.

use std::io::BufRead;

use thiserror::Error;

/// Errors produced while parsing an attribute file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttributeParseError {
    /// The file did not contain exactly `expected` value tokens.
    #[error("expected {expected} attribute values, found {actual}")]
    CountMismatch {
        /// Declared node count.
        expected: usize,
        /// Tokens actually read.
        actual: usize,
    },
    /// A value token did not parse as a non-negative integer.
    #[error("line {line}: invalid attribute token {token:?}")]
    InvalidToken {
        /// 1-based line number of the offending token.
        line: usize,
        /// The raw token text.
        token: String,
    },
    /// A binary attribute token was neither `0` nor `1`.
    #[error("line {line}: binary attribute value {value} is not 0 or 1")]
    NotBinary {
        /// 1-based line number of the offending token.
        line: usize,
        /// The parsed out-of-range value.
        value: i64,
    },
    /// Underlying I/O failure while reading lines.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn read_name_and_tokens(
    reader: impl BufRead,
) -> Result<(String, Vec<(usize, String)>), AttributeParseError> {
    let mut lines = reader.lines();
    let name = lines.next().transpose()?.unwrap_or_default().trim().to_owned();
    let mut tokens = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line_no = idx + 2;
        for token in line.split_whitespace() {
            tokens.push((line_no, token.to_owned()));
        }
    }
    Ok((name, tokens))
}

fn parse_values(
    reader: impl BufRead,
    n: usize,
) -> Result<(String, Vec<i64>), AttributeParseError> {
    let (name, tokens) = read_name_and_tokens(reader)?;
    if tokens.len() != n {
        return Err(AttributeParseError::CountMismatch {
            expected: n,
            actual: tokens.len(),
        });
    }
    let mut values = Vec::with_capacity(n);
    for (line, token) in tokens {
        let value: i64 = token
            .parse()
            .map_err(|_| AttributeParseError::InvalidToken { line, token })?;
        if value < 0 {
            return Err(AttributeParseError::InvalidToken {
                line,
                token: value.to_string(),
            });
        }
        values.push(value);
    }
    Ok((name, values))
}

/// Parses a binary attribute file for a graph of `n` nodes.
///
/// # Errors
/// Returns [`AttributeParseError::CountMismatch`] if the file does not
/// contain exactly `n` value tokens, [`AttributeParseError::InvalidToken`] if
/// a token is not a non-negative integer, [`AttributeParseError::NotBinary`]
/// if a value is neither `0` nor `1`, or [`AttributeParseError::Io`] if
/// reading fails.
pub fn parse_binary_attributes(
    reader: impl BufRead,
    n: usize,
) -> Result<(String, Vec<u8>), AttributeParseError> {
    let (name, values) = parse_values(reader, n)?;
    let mut binary = Vec::with_capacity(values.len());
    for (idx, value) in values.into_iter().enumerate() {
        if value > 1 {
            return Err(AttributeParseError::NotBinary {
                line: idx + 2,
                value,
            });
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "value is checked to be 0 or 1 above"
        )]
        binary.push(value as u8);
    }
    Ok((name, binary))
}

/// Parses a categorical attribute file for a graph of `n` nodes.
///
/// # Errors
/// Returns [`AttributeParseError::CountMismatch`] if the file does not
/// contain exactly `n` value tokens, [`AttributeParseError::InvalidToken`] if
/// a token is not a non-negative integer, or [`AttributeParseError::Io`] if
/// reading fails.
pub fn parse_categorical_attributes(
    reader: impl BufRead,
    n: usize,
) -> Result<(String, Vec<i64>), AttributeParseError> {
    parse_values(reader, n)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{parse_binary_attributes, parse_categorical_attributes};

    fn cursor(text: &str) -> Cursor<&[u8]> {
        Cursor::new(text.as_bytes())
    }

    #[test]
    fn parses_binary_attribute_file() {
        let (name, values) =
            parse_binary_attributes(cursor("is_member\n1 0 1\n"), 3).expect("well-formed file");
        assert_eq!(name, "is_member");
        assert_eq!(values, vec![1, 0, 1]);
    }

    #[test]
    fn parses_categorical_attribute_file_across_multiple_lines() {
        let (name, values) = parse_categorical_attributes(cursor("group\n0 1\n2\n"), 3)
            .expect("tokens may span multiple lines");
        assert_eq!(name, "group");
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn binary_value_outside_zero_one_is_rejected() {
        let err =
            parse_binary_attributes(cursor("flag\n0 2\n"), 2).expect_err("2 is not binary");
        assert!(matches!(err, super::AttributeParseError::NotBinary { value: 2, .. }));
    }

    #[test]
    fn negative_token_is_rejected() {
        let err = parse_categorical_attributes(cursor("group\n-1 0\n"), 2)
            .expect_err("negative values are not accepted");
        assert!(matches!(err, super::AttributeParseError::InvalidToken { .. }));
    }

    #[test]
    fn non_integer_token_is_rejected() {
        let err = parse_categorical_attributes(cursor("group\nfoo bar\n"), 2)
            .expect_err("non-numeric tokens are rejected");
        assert!(matches!(err, super::AttributeParseError::InvalidToken { .. }));
    }

    #[test]
    fn token_count_mismatch_is_rejected() {
        let err = parse_categorical_attributes(cursor("group\n0 1\n"), 3)
            .expect_err("file has fewer tokens than declared nodes");
        assert!(matches!(
            err,
            super::AttributeParseError::CountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }
}
