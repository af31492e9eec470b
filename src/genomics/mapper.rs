//! Translation between reference coordinates and query-sequence indices.
//!
//! The walk over CIGAR runs is a fold that stops at the first run covering
//! the requested offset. An aligned base that closes its match block and is
//! directly followed by an insertion reports the inserted run together with
//! it, so a single column call can be longer than one base.

use std::ops::{ControlFlow, Range};

use crate::genomics::cigar::{CigarOp, CigarOpKind};
use crate::genomics::AlignmentRecord;

/// Placeholder rendered for deleted reference bases in [`AlignmentRecord::mapped_seq`].
pub const GAP_CHAR: char = '-';

/// Outcome of locating a reference offset within a CIGAR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// The offset maps onto an aligned base.
    Base {
        /// Index into the stored query sequence.
        query_idx: usize,
        /// Index of the match run containing the base.
        op_idx: usize,
        /// Whether the base is the last one of its match run.
        block_end: bool,
    },
    /// The offset falls inside a deletion.
    Deleted,
    /// No reference-consuming run covers the offset.
    Uncovered,
}

/// Locate a 0-based offset from the alignment start.
///
/// Soft clips and insertions only shift the query index; hard clips consume
/// neither axis.
pub fn locate(ops: &[CigarOp], local: usize) -> Landing {
    let scan = ops.iter().enumerate().try_fold(
        (0usize, 0usize),
        |(pad, mapped), (op_idx, op)| {
            let len = op.len as usize;
            match op.kind {
                CigarOpKind::SoftClip | CigarOpKind::Insertion => {
                    ControlFlow::Continue((pad + len, mapped))
                }
                CigarOpKind::HardClip => ControlFlow::Continue((pad, mapped)),
                CigarOpKind::Match if mapped + len > local => ControlFlow::Break(Landing::Base {
                    query_idx: pad + (local - mapped),
                    op_idx,
                    block_end: mapped + len == local + 1,
                }),
                CigarOpKind::Deletion if mapped + len > local => {
                    ControlFlow::Break(Landing::Deleted)
                }
                CigarOpKind::Match => ControlFlow::Continue((pad + len, mapped + len)),
                CigarOpKind::Deletion => ControlFlow::Continue((pad, mapped + len)),
            }
        },
    );

    match scan {
        ControlFlow::Break(landing) => landing,
        ControlFlow::Continue(_) => Landing::Uncovered,
    }
}

/// Query index range called at a 0-based reference offset.
///
/// Empty when the offset is deleted or uncovered; `1 + K` long when the base
/// closes a match run followed by a `K`-base insertion.
pub fn query_span(ops: &[CigarOp], local: usize) -> Range<usize> {
    match locate(ops, local) {
        Landing::Base {
            query_idx,
            op_idx,
            block_end,
        } => {
            let inserted = match ops.get(op_idx + 1) {
                Some(next) if block_end && next.kind == CigarOpKind::Insertion => {
                    next.len as usize
                }
                _ => 0,
            };
            query_idx..query_idx + 1 + inserted
        }
        Landing::Deleted | Landing::Uncovered => 0..0,
    }
}

impl AlignmentRecord {
    /// Query index range contributing to absolute reference position `pos`.
    pub fn read_span_at_pos(&self, pos: u32) -> Range<usize> {
        let (Some(ops), Some(mapped_len)) = (self.cigar_ops(), self.mapped_len()) else {
            return 0..0;
        };
        let Some(local) = pos.checked_sub(self.pos()) else {
            return 0..0;
        };
        let local = local as usize;
        if local >= mapped_len {
            return 0..0;
        }
        query_span(ops, local)
    }

    /// Query indices contributing to absolute reference position `pos`.
    pub fn read_idx_at_pos(&self, pos: u32) -> Vec<usize> {
        self.read_span_at_pos(pos).collect()
    }

    /// Bases called at `pos`: empty, one base, or an anchor base plus its insertion.
    pub fn base_at_pos(&self, pos: u32) -> String {
        let span = self.read_span_at_pos(pos);
        self.bases().get(span).unwrap_or_default().to_string()
    }

    /// Quality characters paired with [`AlignmentRecord::base_at_pos`].
    pub fn qual_at_pos(&self, pos: u32) -> String {
        let span = self.read_span_at_pos(pos);
        self.qualities().get(span).unwrap_or_default().to_string()
    }

    /// The read rendered in reference space.
    ///
    /// Soft clips are dropped, deletions become [`GAP_CHAR`], matched and
    /// inserted bases are copied in order.
    pub fn mapped_seq(&self) -> String {
        let Some(ops) = self.cigar_ops() else {
            return String::new();
        };
        let seq = self.bases();
        let mut rendered = String::with_capacity(seq.len());
        let mut idx = 0;

        for op in ops {
            let len = op.len as usize;
            match op.kind {
                CigarOpKind::SoftClip => idx += len,
                CigarOpKind::HardClip => {}
                CigarOpKind::Deletion => rendered.extend(std::iter::repeat(GAP_CHAR).take(len)),
                CigarOpKind::Match | CigarOpKind::Insertion => {
                    if let Some(chunk) = seq.get(idx..idx + len) {
                        rendered.push_str(chunk);
                    }
                    idx += len;
                }
            }
        }

        rendered
    }
}
