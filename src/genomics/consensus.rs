use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::genomics::AlignmentSet;

/// Symbol emitted when an empty call wins a column.
pub const GAP_SYMBOL: char = '-';
/// Symbol emitted when anchor-plus-insertion calls win a column.
pub const INSERTION_SYMBOL: char = 'I';
/// Symbol emitted when two or more symbols tie for the most votes.
pub const AMBIGUOUS_SYMBOL: char = 'N';

/// Errors originating from consensus construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsensusError {
    /// No retained record declares the requested reference.
    #[error("no alignments for reference '{0}'")]
    UnknownReference(String),
}

/// One vote cast by a single read call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteSymbol {
    /// A single base, kept verbatim.
    Base(char),
    /// An empty call.
    Gap,
    /// An anchor base followed by inserted bases.
    Insertion,
}

impl VoteSymbol {
    /// Classify a pileup call by its length.
    pub fn classify(call: &str) -> Self {
        let mut chars = call.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Self::Gap,
            (Some(base), None) => Self::Base(base),
            (Some(_), Some(_)) => Self::Insertion,
        }
    }

    /// Character written to the consensus for this symbol.
    pub fn as_char(self) -> char {
        match self {
            Self::Base(base) => base,
            Self::Gap => GAP_SYMBOL,
            Self::Insertion => INSERTION_SYMBOL,
        }
    }
}

/// Majority vote over a column's calls.
///
/// Returns `None` for an empty column and [`AMBIGUOUS_SYMBOL`] when the top
/// count is shared by more than one symbol.
pub fn vote<S: AsRef<str>>(calls: &[S]) -> Option<char> {
    let mut tally: HashMap<VoteSymbol, usize> = HashMap::new();
    for call in calls {
        *tally.entry(VoteSymbol::classify(call.as_ref())).or_default() += 1;
    }

    let top = tally.values().copied().max()?;
    let mut leaders = tally
        .into_iter()
        .filter(|&(_, count)| count == top)
        .map(|(symbol, _)| symbol);

    match (leaders.next(), leaders.next()) {
        (Some(symbol), None) => Some(symbol.as_char()),
        _ => Some(AMBIGUOUS_SYMBOL),
    }
}

impl AlignmentSet {
    /// Consensus character at `pos` on `rname`; empty when nothing covers it.
    pub fn consensus_at_pos(&self, rname: &str, pos: u32) -> String {
        let pileup = self.pileup_at_pos(rname, pos);
        vote(&pileup.bases).map(String::from).unwrap_or_default()
    }

    /// Consensus across `[min pos, max pos + len(seq)]` of the records on `rname`.
    ///
    /// Uncovered columns are skipped, so the result may be shorter than the span.
    pub fn consensus(&self, rname: &str) -> Result<String, ConsensusError> {
        let span = self
            .span(rname)
            .ok_or_else(|| ConsensusError::UnknownReference(rname.to_string()))?;

        let mut consensus = String::new();
        let mut uncovered = 0usize;
        for pos in span.clone() {
            match vote(&self.pileup_at_pos(rname, pos).bases) {
                Some(symbol) => consensus.push(symbol),
                None => uncovered += 1,
            }
        }

        debug!(
            rname,
            start = *span.start(),
            end = *span.end(),
            called = consensus.len(),
            uncovered,
            "built consensus"
        );
        Ok(consensus)
    }

    /// Reference with the greatest summed raw read length.
    ///
    /// Ties go to the reference seen first; references with zero summed
    /// length are never chosen.
    pub fn best_reference(&self) -> Option<&str> {
        self.coverage()
            .into_iter()
            .fold(None, |best: Option<(&str, u64)>, (rname, total)| match best {
                Some((_, best_total)) if total <= best_total => best,
                _ if total == 0 => best,
                _ => Some((rname, total)),
            })
            .map(|(rname, _)| rname)
    }

    /// Consensus of [`AlignmentSet::best_reference`], or empty when there is none.
    pub fn best_consensus(&self) -> String {
        let Some(rname) = self.best_reference() else {
            return String::new();
        };
        debug!(rname, "selected best-covered reference");
        self.consensus(rname).unwrap_or_default()
    }
}
