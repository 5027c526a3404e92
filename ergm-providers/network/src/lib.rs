//! Pajek-like network file parsing.
//!
//! Parses the minimal edge-list dialect consumed by the estimation engine:
//! a `*vertices <n>` header, an ignored run of lines up to and including
//! `*arcs`, then whitespace-separated 1-based `i j` arc pairs. Carries no
//! dependency on `ergm-core`; callers feed the returned arcs into
//! `Graph::insert_arc` themselves.

use std::io::BufRead;

use thiserror::Error;

/// A parsed network: vertex count plus 0-based arc endpoints in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedNetwork {
    /// Number of vertices declared by the `*vertices` header.
    pub n: usize,
    /// Arcs `(i, j)` in file order, 0-based.
    pub arcs: Vec<(usize, usize)>,
}

/// Errors produced while parsing a Pajek-like network file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NetworkParseError {
    /// No `*vertices <n>` header line was found before EOF.
    #[error("missing '*vertices <n>' header")]
    MissingVerticesHeader,
    /// The `*vertices` header's count token did not parse as a `usize`.
    #[error("line {line}: invalid vertex count")]
    InvalidVertexCount {
        /// 1-based line number of the header.
        line: usize,
    },
    /// An arc endpoint was outside `1..=n`.
    #[error("line {line}: node index {index} out of range for n={n}")]
    NodeIndexOutOfRange {
        /// 1-based line number of the arc.
        line: usize,
        /// The offending 1-based index as written in the file.
        index: usize,
        /// The declared vertex count.
        n: usize,
    },
    /// An arc line named the same node as both endpoints.
    #[error("line {line}: self-loop at node {node}")]
    SelfLoopEdge {
        /// 1-based line number of the arc.
        line: usize,
        /// The offending 0-based node index.
        node: usize,
    },
    /// Underlying I/O failure while reading lines.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn header_vertex_count(line: &str, line_no: usize) -> Result<usize, NetworkParseError> {
    let mut parts = line.split_whitespace();
    let keyword = parts.next().unwrap_or_default();
    if !keyword.eq_ignore_ascii_case("*vertices") {
        return Err(NetworkParseError::MissingVerticesHeader);
    }
    parts
        .next()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or(NetworkParseError::InvalidVertexCount { line: line_no })
}

/// Parses a Pajek-like network file from `reader`.
///
/// Lines after the `*vertices <n>` header are ignored until one whose
/// trimmed, lowercased content is exactly `*arcs` (inclusive). Lines after
/// that are each parsed as a 1-based `i j` arc pair; the first line that
/// does not split into exactly two integer tokens ends parsing without
/// error, matching the reference dialect's "stops at EOF or first malformed
/// line" rule. A syntactically well-formed pair with an out-of-range index
/// or a self-loop is a fatal error instead, since those indicate a genuinely
/// corrupt file rather than a trailing blank/comment line.
///
/// # Errors
/// Returns [`NetworkParseError::MissingVerticesHeader`] if no header line is
/// found, [`NetworkParseError::InvalidVertexCount`] if its count token does
/// not parse, [`NetworkParseError::NodeIndexOutOfRange`] or
/// [`NetworkParseError::SelfLoopEdge`] for a malformed arc pair, or
/// [`NetworkParseError::Io`] if reading fails.
pub fn parse_pajek_arcs(reader: impl BufRead) -> Result<ParsedNetwork, NetworkParseError> {
    let mut lines = reader.lines().enumerate();

    let n = loop {
        let Some((idx, line)) = lines.next() else {
            return Err(NetworkParseError::MissingVerticesHeader);
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        break header_vertex_count(trimmed, idx + 1)?;
    };

    for (_, line) in lines.by_ref() {
        let line = line?;
        if line.trim().eq_ignore_ascii_case("*arcs") {
            break;
        }
    }

    let mut arcs = Vec::new();
    for (idx, line) in lines {
        let line = line?;
        let line_no = idx + 1;
        let mut tokens = line.split_whitespace();
        let (Some(i_tok), Some(j_tok), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            break;
        };
        let (Ok(i), Ok(j)) = (i_tok.parse::<usize>(), j_tok.parse::<usize>()) else {
            break;
        };
        if i == 0 || i > n {
            return Err(NetworkParseError::NodeIndexOutOfRange {
                line: line_no,
                index: i,
                n,
            });
        }
        if j == 0 || j > n {
            return Err(NetworkParseError::NodeIndexOutOfRange {
                line: line_no,
                index: j,
                n,
            });
        }
        if i == j {
            return Err(NetworkParseError::SelfLoopEdge {
                line: line_no,
                node: i - 1,
            });
        }
        arcs.push((i - 1, j - 1));
    }

    Ok(ParsedNetwork { n, arcs })
}
