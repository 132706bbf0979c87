//! txmap: translate transcript-relative positions into genomic coordinates by walking
//! CIGAR alignments.

pub mod error;

pub mod alignment;
pub mod batch;
pub mod cigar;
pub mod cli;
pub mod config;
pub mod input;
pub mod output;
pub mod query;
pub mod strand;
pub mod translate;

pub use alignment::{AlignmentRecord, CigarField, CigarParsing};
pub use batch::{AlignmentMap, TranslationResult, resolve_all};
pub use error::Error;
pub use query::QueryRecord;
pub use translate::translate;
