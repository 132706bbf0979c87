//! Alignment records: one transcript's placement on a contig.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::cigar::{BASIC_OPERATORS, CigarSequence};
use crate::error::Error;
use crate::strand::Strand;

/// Field delimiter used when none is given.
pub const DEFAULT_DELIMITER: &str = "\t";

/// Whether the CIGAR column is parsed while reading the line or kept as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CigarParsing {
    #[default]
    Eager,
    Deferred,
}

/// The CIGAR column of an alignment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CigarField {
    Parsed(CigarSequence),
    Unparsed(String),
}

impl CigarField {
    /// Returns the parsed sequence, parsing deferred text against the basic
    /// {D, M, I} operators.
    pub fn resolve(&self) -> Result<Cow<'_, CigarSequence>, Error> {
        match self {
            Self::Parsed(seq) => Ok(Cow::Borrowed(seq)),
            Self::Unparsed(text) => CigarSequence::parse(text, &BASIC_OPERATORS).map(Cow::Owned),
        }
    }
}

impl fmt::Display for CigarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(seq) => write!(f, "{seq}"),
            Self::Unparsed(text) => f.write_str(text),
        }
    }
}

/// A transcript aligned to a contig, starting at `transcript_start` and walking the
/// reference in the direction given by `strand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub transcript_id: String,
    pub contig: String,
    pub transcript_start: i64,
    pub strand: Strand,
    pub cigar: CigarField,
}

impl AlignmentRecord {
    /// Parses one mapping line:
    /// `transcript_id, contig, transcript_start, cigar[, direction]`.
    ///
    /// Eagerly parsed CIGARs may only use the D, M and I operators.
    pub fn from_line(
        line: &str,
        delimiter: &str,
        cigar_parsing: CigarParsing,
    ) -> Result<Self, Error> {
        let fields: Vec<&str> = line.trim().split(delimiter).collect();

        let strand = match fields.len() {
            4 => Strand::Forward,
            5 => fields[4].parse()?,
            n => {
                return Err(Error::MalformedRecord {
                    line: line.to_string(),
                    fields: n,
                });
            }
        };

        let transcript_start: i64 = fields[2]
            .trim()
            .parse()
            .map_err(|_| Error::InvalidStart(fields[2].to_string()))?;

        let cigar = match cigar_parsing {
            CigarParsing::Eager => {
                CigarField::Parsed(CigarSequence::parse(fields[3], &BASIC_OPERATORS)?)
            }
            CigarParsing::Deferred => CigarField::Unparsed(fields[3].to_string()),
        };

        Ok(Self {
            transcript_id: fields[0].to_string(),
            contig: fields[1].to_string(),
            transcript_start,
            strand,
            cigar,
        })
    }
}

impl FromStr for AlignmentRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_line(s, DEFAULT_DELIMITER, CigarParsing::Eager)
    }
}

impl fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.transcript_id, self.contig, self.transcript_start, self.strand
        )
    }
}
