use crate::genomics::AlignmentSet;

/// Per-read calls observed at one reference coordinate.
///
/// `bases` and `qualities` are parallel; a call longer than one character is
/// an anchor base followed by inserted bases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pileup {
    /// 1-based reference coordinate of the column.
    pub position: u32,
    /// Base calls, one per contributing read.
    pub bases: Vec<String>,
    /// Quality strings paired with `bases`.
    pub qualities: Vec<String>,
}

impl Pileup {
    pub(crate) fn new(position: u32) -> Self {
        Self {
            position,
            bases: Vec::new(),
            qualities: Vec::new(),
        }
    }

    pub(crate) fn observe(&mut self, base: String, quality: String) {
        self.bases.push(base);
        self.qualities.push(quality);
    }

    /// Number of reads contributing a call.
    pub fn depth(&self) -> usize {
        self.bases.len()
    }

    /// Whether no read contributed a call.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Iterate `(base, quality)` pairs in read order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bases
            .iter()
            .map(String::as_str)
            .zip(self.qualities.iter().map(String::as_str))
    }
}

impl AlignmentSet {
    /// Gather the calls of every overlapping read at `pos` on `rname`.
    ///
    /// A read contributes only when both its base and quality calls are
    /// non-empty; order follows the load order.
    pub fn pileup_at_pos(&self, rname: &str, pos: u32) -> Pileup {
        let mut pileup = Pileup::new(pos);
        for record in self.reads_at_pos(rname, pos) {
            let base = record.base_at_pos(pos);
            let quality = record.qual_at_pos(pos);
            if !base.is_empty() && !quality.is_empty() {
                pileup.observe(base, quality);
            }
        }
        pileup
    }
}
