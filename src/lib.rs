//! # Majority-vote consensus from SAM pileups
//!
//! Reconstructs, per reference sequence, a consensus from overlapping
//! aligned reads.
//!
//! ## Core Algorithm
//!
//! 1. **Record parsing**: each SAM line becomes an immutable [`AlignmentRecord`]
//!    with its FLAG bits and CIGAR decoded once
//! 2. **Coordinate mapping**: a reference position is translated into the
//!    query indices that cover it; a base closing a match run before an
//!    insertion also reports the inserted bases
//! 3. **Pileup**: every primary read overlapping a position contributes its call
//! 4. **Voting**: the strict-majority symbol wins each column, ties become `N`
//!
//! ## Usage Example
//!
//! ```
//! use samvote::AlignmentSet;
//!
//! let sam = "r1\t0\tchr1\t1\t60\t4M\t*\t0\t0\tACGT\tIIII\n\
//!            r2\t0\tchr1\t2\t60\t3M\t*\t0\t0\tCGT\tIII\n";
//! let alignments = AlignmentSet::from_reader(sam.as_bytes())?;
//! assert_eq!(alignments.consensus("chr1")?, "ACGT");
//! assert_eq!(alignments.best_consensus(), "ACGT");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod aligner;    // External minimap2 invocation
pub mod config;     // Output and aligner settings
pub mod genomics;   // Records, mapping, pileup and consensus

// Re-exports for convenience
pub use aligner::{AlignerError, Minimap2Runner, PairedReads};
pub use config::{AlignerConfig, ConfigError, FastaConfig};
pub use genomics::{
    AlignmentRecord, AlignmentSet, AlignmentSetError, CigarOp, CigarOpKind, ConsensusError,
    Pileup, RecordError, SamFlags,
};
