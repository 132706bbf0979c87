//! Query records: a transcript ID and a 0-based read position to translate.

use std::fmt;
use std::str::FromStr;

use crate::alignment::DEFAULT_DELIMITER;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryRecord {
    pub transcript_id: String,
    pub position: u64,
}

impl QueryRecord {
    /// Parses one query line: `transcript_id, position`.
    pub fn from_line(line: &str, delimiter: &str) -> Result<Self, Error> {
        let fields: Vec<&str> = line.trim().split(delimiter).collect();
        let [transcript_id, position] = fields.as_slice() else {
            return Err(Error::MalformedQuery {
                line: line.to_string(),
                fields: fields.len(),
            });
        };

        // Negative and non-numeric values are the same caller mistake.
        let position: u64 = position
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPosition(position.to_string()))?;

        Ok(Self {
            transcript_id: transcript_id.to_string(),
            position,
        })
    }
}

impl FromStr for QueryRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_line(s, DEFAULT_DELIMITER)
    }
}

impl fmt::Display for QueryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.transcript_id, self.position)
    }
}
