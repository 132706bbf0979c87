//! CIGAR operator definitions and the operator registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::Error;

/// Operator codes with unambiguous genomic-length semantics, the only ones accepted
/// in alignment records.
pub const BASIC_CODES: [char; 3] = ['D', 'M', 'I'];

/// Full registry of the nine standard operators.
pub static STANDARD_OPERATORS: LazyLock<OperatorTable> = LazyLock::new(OperatorTable::standard);

/// The {D, M, I} subset of the standard registry.
pub static BASIC_OPERATORS: LazyLock<OperatorTable> = LazyLock::new(|| {
    STANDARD_OPERATORS
        .basic()
        .expect("standard registry defines D, M and I")
});

/// Boolean properties of a CIGAR operator.
///
/// `is_match` and `is_mismatch` are mutually exclusive. None of these flags
/// influence coordinate translation, which only looks at the advance amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperatorFlags {
    pub is_match: bool,
    pub is_mismatch: bool,
    pub present_in_read: bool,
    pub present_in_ref: bool,
}

/// A single CIGAR operator: its code and how far it advances read and reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CigarOperator {
    code: char,
    description: String,
    ref_advance: u8,
    read_advance: u8,
    flags: OperatorFlags,
}

impl CigarOperator {
    /// Creates a validated operator. The code is normalized to uppercase.
    pub fn new(
        code: char,
        description: &str,
        ref_advance: u8,
        read_advance: u8,
        flags: OperatorFlags,
    ) -> Result<Self, Error> {
        let invalid = |reason| Error::InvalidOperatorDefinition { code, reason };

        if code.is_ascii_digit() || !code.is_ascii_graphic() {
            return Err(invalid("code must be a printable non-digit ASCII character"));
        }
        if ref_advance > 1 || read_advance > 1 {
            return Err(invalid("advance amounts must be 0 or 1"));
        }
        if flags.is_match && flags.is_mismatch {
            return Err(invalid("an operator cannot be both a match and a mismatch"));
        }

        Ok(Self::standard_op(
            code.to_ascii_uppercase(),
            description,
            ref_advance,
            read_advance,
            flags,
        ))
    }

    fn standard_op(
        code: char,
        description: &str,
        ref_advance: u8,
        read_advance: u8,
        flags: OperatorFlags,
    ) -> Self {
        Self {
            code,
            description: description.to_string(),
            ref_advance,
            read_advance,
            flags,
        }
    }

    #[must_use]
    pub fn code(&self) -> char {
        self.code
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Reference bases consumed per repetition (0 or 1).
    #[must_use]
    pub fn ref_advance(&self) -> u8 {
        self.ref_advance
    }

    /// Read bases consumed per repetition (0 or 1).
    #[must_use]
    pub fn read_advance(&self) -> u8 {
        self.read_advance
    }

    #[must_use]
    pub fn flags(&self) -> OperatorFlags {
        self.flags
    }
}

impl fmt::Display for CigarOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// Registry of CIGAR operators keyed by uppercase code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTable {
    operators: BTreeMap<char, CigarOperator>,
}

impl OperatorTable {
    /// The nine standard operators: D, H, I, M, N, P, S, X and =.
    #[must_use]
    pub fn standard() -> Self {
        let flags = |present_in_read, present_in_ref| OperatorFlags {
            present_in_read,
            present_in_ref,
            ..OperatorFlags::default()
        };

        #[rustfmt::skip]
        let operators = [
            //                         code  description        ref read  flags
            CigarOperator::standard_op('D', "Deletion",        1,  0,   flags(false, true)),
            CigarOperator::standard_op('H', "Hard Clip",       1,  0,   flags(false, true)),
            CigarOperator::standard_op('I', "Insertion",       0,  1,   flags(true, false)),
            CigarOperator::standard_op('M', "Position Match",  1,  1,   flags(true, true)),
            CigarOperator::standard_op('N', "Skipped",         1,  0,   flags(false, true)),
            CigarOperator::standard_op('P', "Padding",         0,  0,   flags(false, false)),
            CigarOperator::standard_op('S', "Soft Clip",       1,  1,   flags(true, true)),
            CigarOperator::standard_op('X', "Base mismatch",   1,  1,   OperatorFlags { is_mismatch: true, ..flags(true, true) }),
            CigarOperator::standard_op('=', "Base match",      1,  1,   OperatorFlags { is_match: true, ..flags(true, true) }),
        ];

        Self {
            operators: operators.into_iter().map(|op| (op.code, op)).collect(),
        }
    }

    /// The {D, M, I} subset of this registry, validated like any other operator set.
    pub fn basic(&self) -> Result<OperatorTable, Error> {
        self.validate_set(BASIC_CODES)
    }

    /// Adds or replaces an operator, keyed by its uppercase code.
    pub fn insert(&mut self, operator: CigarOperator) -> Option<CigarOperator> {
        self.operators.insert(operator.code, operator)
    }

    /// Looks up an operator by code, case-insensitively.
    pub fn lookup(&self, code: char) -> Result<&CigarOperator, Error> {
        self.get(code).ok_or_else(|| Error::UnknownOperator {
            code,
            valid: self.codes(),
        })
    }

    /// Looks up an operator by code, case-insensitively.
    #[must_use]
    pub fn get(&self, code: char) -> Option<&CigarOperator> {
        self.operators.get(&code.to_ascii_uppercase())
    }

    /// Builds a sub-registry holding exactly the given codes.
    ///
    /// Codes are normalized to uppercase; any code absent from this registry fails
    /// with [`Error::UnknownOperator`].
    pub fn validate_set<I>(&self, codes: I) -> Result<OperatorTable, Error>
    where
        I: IntoIterator<Item = char>,
    {
        let mut operators = BTreeMap::new();
        for code in codes {
            let op = self.lookup(code)?;
            operators.insert(op.code, op.clone());
        }
        Ok(Self { operators })
    }

    /// All registered codes in sorted order.
    #[must_use]
    pub fn codes(&self) -> Vec<char> {
        self.operators.keys().copied().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CigarOperator> {
        self.operators.values()
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::standard()
    }
}
