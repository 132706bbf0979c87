//! Batch translation of queries against a set of alignments.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use crate::alignment::AlignmentRecord;
use crate::error::Error;
use crate::query::QueryRecord;
use crate::translate::translate;

/// Alignments keyed by transcript ID.
pub type AlignmentMap = HashMap<String, AlignmentRecord>;

/// A translated query: `transcript_id:position` lies at `contig:reference_position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub transcript_id: String,
    pub position: u64,
    pub contig: String,
    pub reference_position: i64,
}

impl TranslationResult {
    /// Renders the result as one output line without the trailing newline.
    #[must_use]
    pub fn to_line(&self, delimiter: &str) -> String {
        let position = self.position.to_string();
        let reference_position = self.reference_position.to_string();
        [
            self.transcript_id.as_str(),
            position.as_str(),
            self.contig.as_str(),
            reference_position.as_str(),
        ]
        .join(delimiter)
    }
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line("\t"))
    }
}

/// Inserts an alignment, rejecting a second alignment for the same transcript.
pub fn add_alignment(alignments: &mut AlignmentMap, record: AlignmentRecord) -> Result<(), Error> {
    match alignments.entry(record.transcript_id.clone()) {
        Entry::Occupied(_) => Err(Error::DuplicateTranscript(record.transcript_id)),
        Entry::Vacant(slot) => {
            slot.insert(record);
            Ok(())
        }
    }
}

/// Verifies that every query refers to a known transcript.
pub fn check_queries(alignments: &AlignmentMap, queries: &[QueryRecord]) -> Result<(), Error> {
    match queries
        .iter()
        .find(|q| !alignments.contains_key(&q.transcript_id))
    {
        Some(query) => Err(unknown_transcript(alignments, &query.transcript_id)),
        None => Ok(()),
    }
}

/// Translates a single query against its transcript's alignment.
pub fn resolve(alignments: &AlignmentMap, query: &QueryRecord) -> Result<TranslationResult, Error> {
    let alignment = alignments
        .get(&query.transcript_id)
        .ok_or_else(|| unknown_transcript(alignments, &query.transcript_id))?;
    let reference_position = translate(alignment, query)?;

    Ok(TranslationResult {
        transcript_id: query.transcript_id.clone(),
        position: query.position,
        contig: alignment.contig.clone(),
        reference_position,
    })
}

/// Translates every query, returning results in query order.
///
/// All queries are checked against the alignments before any translation runs, and the
/// first failure aborts the whole batch.
pub fn resolve_all(
    alignments: &AlignmentMap,
    queries: &[QueryRecord],
) -> Result<Vec<TranslationResult>, Error> {
    check_queries(alignments, queries)?;
    queries.iter().map(|q| resolve(alignments, q)).collect()
}

fn unknown_transcript(alignments: &AlignmentMap, transcript_id: &str) -> Error {
    let mut known: Vec<String> = alignments.keys().cloned().collect();
    known.sort();
    Error::UnknownTranscript {
        transcript_id: transcript_id.to_string(),
        known,
    }
}
