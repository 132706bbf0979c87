//! Error types for the txmap library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing alignments and queries or translating positions.
///
/// Every error is fatal to a translation run. Messages embed the offending value and,
/// where there is a closed set of alternatives, the full list of valid values.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A record-level error annotated with the file and 1-based line it came from.
    #[error("{}:{line_num}: {source}", .path.display())]
    AtLine {
        path: PathBuf,
        line_num: usize,
        #[source]
        source: Box<Error>,
    },

    /// An input file path does not reference a regular file.
    #[error("unable to find {kind} file at {}", .path.display())]
    FileNotFound { kind: &'static str, path: PathBuf },

    /// A mapping line did not have four or five fields.
    #[error(
        "mapping lines must have 4 or 5 fields (transcript ID, contig, transcript start, \
         CIGAR string, optional direction); found {fields} in '{line}'"
    )]
    MalformedRecord { line: String, fields: usize },

    /// A query line did not have exactly two fields.
    #[error(
        "query lines must have exactly 2 fields (transcript ID, position); found {fields} in '{line}'"
    )]
    MalformedQuery { line: String, fields: usize },

    /// The transcript start field is not an integer.
    #[error("transcript start must be an integer; '{0}' was given")]
    InvalidStart(String),

    /// The query position is not a non-negative integer.
    #[error("position must be a non-negative integer; '{0}' was given")]
    InvalidPosition(String),

    /// The direction field is neither 1 nor -1.
    #[error("transcript direction must be either 1 or -1; '{0}' was given")]
    InvalidDirection(String),

    /// An operator code requested from the registry is not present in it.
    #[error("'{code}' is not a known CIGAR operator; valid operators are {}", list_codes(.valid))]
    UnknownOperator { code: char, valid: Vec<char> },

    /// A CIGAR string contains an operator outside the allowed set.
    #[error(
        "invalid CIGAR operator '{code}' in '{cigar}'; valid operators are {}",
        list_codes(.valid)
    )]
    InvalidOperator {
        code: String,
        cigar: String,
        valid: Vec<char>,
    },

    /// A CIGAR repeat count is zero or does not fit a 32-bit count.
    #[error("invalid CIGAR count '{count}' in '{cigar}'; counts must be positive integers")]
    InvalidCount { count: String, cigar: String },

    /// A CIGAR string does not alternate counts and operators.
    #[error("malformed CIGAR '{cigar}': {reason}")]
    MalformedCigar { cigar: String, reason: &'static str },

    /// A custom operator cannot be added to the registry.
    #[error("invalid CIGAR operator definition '{code}': {reason}")]
    InvalidOperatorDefinition { code: char, reason: &'static str },

    /// The mapping data contains two alignments for the same transcript.
    #[error(
        "found a duplicate map for transcript {0}; check the mapping file integrity and correct this issue"
    )]
    DuplicateTranscript(String),

    /// A query references a transcript absent from the mapping data.
    #[error(
        "a query was submitted for transcript {transcript_id}, but it was not found in the mapping data; \
         known transcripts: [{}]",
        .known.join(", ")
    )]
    UnknownTranscript {
        transcript_id: String,
        known: Vec<String>,
    },

    /// A query position lies beyond the read span of its transcript's alignment.
    #[error(
        "query position {position} is beyond the end of transcript {transcript_id} \
         (aligned read span {read_span})"
    )]
    PositionOutOfRange {
        transcript_id: String,
        position: u64,
        read_span: u64,
    },

    /// Walking the alignment moved the reference coordinate outside the `i64` range.
    #[error(
        "reference coordinate overflow translating position {position} of transcript \
         {transcript_id} from start {start}"
    )]
    CoordinateOverflow {
        transcript_id: String,
        start: i64,
        position: u64,
    },
}

impl Error {
    /// Returns the innermost error, looking through line annotations.
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Self::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn at_line(self, path: PathBuf, line_num: usize) -> Self {
        Self::AtLine {
            path,
            line_num,
            source: Box::new(self),
        }
    }
}

fn list_codes(codes: &[char]) -> String {
    let quoted: Vec<String> = codes.iter().map(|c| format!("'{c}'")).collect();
    format!("[{}]", quoted.join(", "))
}
