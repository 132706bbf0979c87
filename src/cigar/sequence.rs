//! Run-length CIGAR strings parsed into (count, operator) elements.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

use super::operator::{CigarOperator, OperatorTable, STANDARD_OPERATORS};

/// One run of a CIGAR string: an operator repeated `count` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CigarElement {
    pub count: u32,
    pub operator: CigarOperator,
}

impl CigarElement {
    /// Read bases consumed by the whole run.
    #[must_use]
    pub fn read_len(&self) -> u64 {
        u64::from(self.count) * u64::from(self.operator.read_advance())
    }

    /// Reference bases consumed by the whole run.
    #[must_use]
    pub fn ref_len(&self) -> u64 {
        u64::from(self.count) * u64::from(self.operator.ref_advance())
    }
}

impl fmt::Display for CigarElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.operator)
    }
}

/// An ordered, immutable sequence of CIGAR elements.
///
/// Iterating always starts from the first element, so a sequence can be walked any
/// number of times, including concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CigarSequence {
    elements: Vec<CigarElement>,
}

impl CigarSequence {
    /// Parses a run-length string such as `76M1D23M`, resolving each operator
    /// against `operators`. Operator letters are matched case-insensitively.
    ///
    /// An empty string yields an empty sequence.
    pub fn parse(cigar: &str, operators: &OperatorTable) -> Result<Self, Error> {
        let malformed = |reason| Error::MalformedCigar {
            cigar: cigar.to_string(),
            reason,
        };

        let mut elements = Vec::new();
        let mut rest = cigar;

        while !rest.is_empty() {
            let count_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            if count_end == 0 {
                return Err(malformed("operator without a preceding count"));
            }
            let (count_text, tail) = rest.split_at(count_end);
            if tail.is_empty() {
                return Err(malformed("trailing count without an operator"));
            }

            let op_end = tail
                .find(|c: char| c.is_ascii_digit())
                .unwrap_or(tail.len());
            let (op_text, next) = tail.split_at(op_end);

            let count = match count_text.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::InvalidCount {
                        count: count_text.to_string(),
                        cigar: cigar.to_string(),
                    });
                }
            };

            let mut chars = op_text.chars();
            let operator = match (chars.next(), chars.next()) {
                (Some(code), None) => operators.get(code),
                _ => None,
            }
            .ok_or_else(|| Error::InvalidOperator {
                code: op_text.to_string(),
                cigar: cigar.to_string(),
                valid: operators.codes(),
            })?;

            elements.push(CigarElement {
                count,
                operator: operator.clone(),
            });
            rest = next;
        }

        Ok(Self { elements })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CigarElement> {
        self.elements.iter()
    }

    #[must_use]
    pub fn elements(&self) -> &[CigarElement] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total read bases covered by the alignment.
    #[must_use]
    pub fn read_span(&self) -> u64 {
        self.elements.iter().map(CigarElement::read_len).sum()
    }

    /// Total reference bases covered by the alignment.
    #[must_use]
    pub fn ref_span(&self) -> u64 {
        self.elements.iter().map(CigarElement::ref_len).sum()
    }
}

impl<'a> IntoIterator for &'a CigarSequence {
    type Item = &'a CigarElement;
    type IntoIter = std::slice::Iter<'a, CigarElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Parses against the full standard registry.
impl FromStr for CigarSequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &STANDARD_OPERATORS)
    }
}

impl fmt::Display for CigarSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cigar::operator::BASIC_OPERATORS;
    use proptest::prelude::*;

    fn codes(seq: &CigarSequence) -> Vec<(u32, char)> {
        seq.iter().map(|e| (e.count, e.operator.code())).collect()
    }

    #[test]
    fn parse_basic_cigar() {
        let seq: CigarSequence = "76M1D23M".parse().unwrap();
        assert_eq!(codes(&seq), vec![(76, 'M'), (1, 'D'), (23, 'M')]);
        assert_eq!(seq.read_span(), 99);
        assert_eq!(seq.ref_span(), 100);
    }

    #[test]
    fn parse_all_standard_operators() {
        let seq: CigarSequence = "2S3M1I1D4N1=1X1P5H".parse().unwrap();
        assert_eq!(seq.len(), 9);
        assert_eq!(seq.to_string(), "2S3M1I1D4N1=1X1P5H");
    }

    #[test]
    fn empty_string_is_empty_sequence() {
        let seq: CigarSequence = "".parse().unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.read_span(), 0);
        assert_eq!(seq.to_string(), "");
    }

    #[test]
    fn lowercase_operators_are_normalized() {
        let seq = CigarSequence::parse("10m2i", &BASIC_OPERATORS).unwrap();
        assert_eq!(seq.to_string(), "10M2I");
    }

    #[test]
    fn iteration_restarts_from_the_beginning() {
        let seq: CigarSequence = "5M2D5M".parse().unwrap();
        let first: Vec<_> = seq.iter().collect();
        let second: Vec<_> = (&seq).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn zero_count_is_invalid() {
        let err = "0M5M".parse::<CigarSequence>().unwrap_err();
        assert!(matches!(err, Error::InvalidCount { ref count, .. } if count == "0"));
    }

    #[test]
    fn overflowing_count_is_invalid() {
        let err = "99999999999M".parse::<CigarSequence>().unwrap_err();
        assert!(matches!(err, Error::InvalidCount { .. }));
    }

    #[test]
    fn trailing_digits_are_malformed() {
        let err = "10M5".parse::<CigarSequence>().unwrap_err();
        assert!(matches!(err, Error::MalformedCigar { .. }));
    }

    #[test]
    fn leading_operator_is_malformed() {
        let err = "M10".parse::<CigarSequence>().unwrap_err();
        assert!(matches!(err, Error::MalformedCigar { .. }));
    }

    #[test]
    fn operator_outside_table_is_invalid() {
        let err = CigarSequence::parse("10M5S", &BASIC_OPERATORS).unwrap_err();
        match err {
            Error::InvalidOperator { code, cigar, valid } => {
                assert_eq!(code, "S");
                assert_eq!(cigar, "10M5S");
                assert_eq!(valid, vec!['D', 'I', 'M']);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn multi_letter_run_is_invalid() {
        let err = "10MI".parse::<CigarSequence>().unwrap_err();
        assert!(matches!(err, Error::InvalidOperator { ref code, .. } if code == "MI"));
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            runs in prop::collection::vec(
                (1u32..100_000, prop::sample::select(vec!['D', 'H', 'I', 'M', 'N', 'P', 'S', 'X', '='])),
                0..20,
            )
        ) {
            let text: String = runs.iter().map(|(n, c)| format!("{n}{c}")).collect();
            let seq: CigarSequence = text.parse().unwrap();
            prop_assert_eq!(seq.len(), runs.len());
            prop_assert_eq!(seq.to_string(), text);
        }
    }
}
