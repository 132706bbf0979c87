//! Transcript-to-reference coordinate translation by walking an alignment's CIGAR.

use crate::alignment::AlignmentRecord;
use crate::cigar::CigarSequence;
use crate::error::Error;
use crate::query::QueryRecord;
use crate::strand::Strand;

/// Outcome of walking a CIGAR towards a read offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// The read offset was reached at this reference coordinate.
    Reached(i64),
    /// The CIGAR ended before the read offset was reached.
    PastEnd,
    /// The reference coordinate left the `i64` range.
    Overflow,
}

/// Translates `query.position` into a reference coordinate on `alignment.contig`.
///
/// The caller is responsible for pairing the query with the alignment of the same
/// transcript. A position equal to the alignment's read span is valid; anything past
/// it fails with [`Error::PositionOutOfRange`].
pub fn translate(alignment: &AlignmentRecord, query: &QueryRecord) -> Result<i64, Error> {
    let cigar = alignment.cigar.resolve()?;
    match walk(
        &cigar,
        alignment.transcript_start,
        alignment.strand,
        query.position,
    ) {
        Walk::Reached(coordinate) => Ok(coordinate),
        Walk::PastEnd => Err(Error::PositionOutOfRange {
            transcript_id: alignment.transcript_id.clone(),
            position: query.position,
            read_span: cigar.read_span(),
        }),
        Walk::Overflow => Err(Error::CoordinateOverflow {
            transcript_id: alignment.transcript_id.clone(),
            start: alignment.transcript_start,
            position: query.position,
        }),
    }
}

/// Walks `cigar` from read offset 0 at reference `start` until the read offset reaches
/// `target`, returning the reference coordinate at that point.
///
/// The position is checked before each base is consumed, so the result is the
/// reference coordinate in effect when read offset `target` is first reached. Runs that
/// cannot reach the target are consumed whole; the walk is linear in the number of
/// CIGAR elements.
#[must_use]
pub fn walk(cigar: &CigarSequence, start: i64, strand: Strand, target: u64) -> Walk {
    let sign = strand.sign();
    let mut read_pos: u64 = 0;
    let mut ref_pos = start;

    for element in cigar {
        if read_pos >= target {
            return Walk::Reached(ref_pos);
        }

        let read_advance = u64::from(element.operator.read_advance());
        let ref_step = i64::from(element.operator.ref_advance()) * sign;

        // Read-free runs (deletions) never reach the target, so they are taken whole.
        let steps = if read_advance == 0 {
            element.count
        } else {
            u32::try_from(target - read_pos).map_or(element.count, |gap| gap.min(element.count))
        };

        read_pos += u64::from(steps) * read_advance;
        ref_pos = match ref_pos.checked_add(i64::from(steps) * ref_step) {
            Some(next) => next,
            None => return Walk::Overflow,
        };

        if steps < element.count {
            return Walk::Reached(ref_pos);
        }
    }

    if read_pos >= target {
        Walk::Reached(ref_pos)
    } else {
        Walk::PastEnd
    }
}
