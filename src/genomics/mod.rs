//! SAM alignment records and the pileup consensus built on top of them.
//!
//! Records are parsed from text lines, collected into an [`AlignmentSet`],
//! and queried column by column to build majority-vote consensus sequences.

mod alignment_set;
mod cigar;
mod consensus;
mod fasta;
mod mapper;
mod pileup;
mod types;

pub use alignment_set::{AlignmentSet, AlignmentSetError};
pub use cigar::{parse_cigar, query_len, reference_len, CigarError, CigarOp, CigarOpKind};
pub use consensus::{
    vote, ConsensusError, VoteSymbol, AMBIGUOUS_SYMBOL, GAP_SYMBOL, INSERTION_SYMBOL,
};
pub use fasta::{render_fasta, write_fasta};
pub use mapper::{locate, query_span, Landing, GAP_CHAR};
pub use pileup::Pileup;
pub use types::{AlignmentRecord, RecordError, SamFlags, MANDATORY_FIELDS};
