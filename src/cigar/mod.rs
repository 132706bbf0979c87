//! CIGAR operators and run-length CIGAR sequences.

pub mod operator;
pub mod sequence;

pub use operator::{
    BASIC_CODES, BASIC_OPERATORS, CigarOperator, OperatorFlags, OperatorTable, STANDARD_OPERATORS,
};
pub use sequence::{CigarElement, CigarSequence};
