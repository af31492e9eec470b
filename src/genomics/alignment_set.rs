use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::RangeInclusive;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::genomics::{AlignmentRecord, RecordError};

/// Errors surfaced while loading a batch of SAM lines.
#[derive(Debug, Error)]
pub enum AlignmentSetError {
    /// Failure reading the underlying source.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be parsed; loading stops at the first such line.
    #[error("malformed record on line {line}: {source}")]
    Record {
        /// 1-based line number within the batch.
        line: usize,
        /// Underlying parse failure.
        #[source]
        source: RecordError,
    },
}

/// Primary alignment records of a SAM batch, indexed by reference name.
///
/// Unmapped primary records are retained; they simply contribute nothing
/// to pileups.
#[derive(Debug, Clone, Default)]
pub struct AlignmentSet {
    records: Vec<AlignmentRecord>,
    references: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct LoadStats {
    lines: usize,
    headers: usize,
    non_primary: usize,
}

impl AlignmentSet {
    /// Load from an ordered sequence of SAM lines.
    ///
    /// Lines starting with `@` are headers and blank lines are ignored.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, AlignmentSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::load(lines.into_iter().map(Ok::<S, io::Error>))
    }

    /// Load from a buffered reader yielding SAM text.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, AlignmentSetError> {
        Self::load(reader.lines())
    }

    /// Load a SAM file from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AlignmentSetError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    fn load<I, S>(lines: I) -> Result<Self, AlignmentSetError>
    where
        I: Iterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        let mut stats = LoadStats::default();

        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line = line.as_ref();
            stats.lines += 1;

            if line.starts_with('@') {
                stats.headers += 1;
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let record = AlignmentRecord::parse(line).map_err(|source| {
                AlignmentSetError::Record {
                    line: idx + 1,
                    source,
                }
            })?;

            if record.is_primary() {
                set.references.insert(record.rname().to_string());
                set.records.push(record);
            } else {
                stats.non_primary += 1;
            }
        }

        debug!(
            headers = stats.headers,
            non_primary = stats.non_primary,
            "skipped non-record lines"
        );
        info!(
            lines = stats.lines,
            retained = set.records.len(),
            references = set.references.len(),
            "loaded alignment batch"
        );

        Ok(set)
    }

    /// Retained records in load order.
    pub fn records(&self) -> &[AlignmentRecord] {
        &self.records
    }

    /// Distinct reference names among retained records.
    pub fn references(&self) -> &BTreeSet<String> {
        &self.references
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Retained records declaring `rname`, in load order.
    pub fn records_for<'a>(
        &'a self,
        rname: &'a str,
    ) -> impl Iterator<Item = &'a AlignmentRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.rname() == rname)
    }

    /// Records on `rname` whose raw extent `[pos, pos + len(seq)]` contains `pos`.
    ///
    /// The extent ignores the CIGAR, so some returned records may have no
    /// call at `pos`.
    pub fn reads_at_pos<'a>(
        &'a self,
        rname: &'a str,
        pos: u32,
    ) -> impl Iterator<Item = &'a AlignmentRecord> + 'a {
        self.records_for(rname)
            .filter(move |record| record.pos() <= pos && pos <= record.raw_end())
    }

    /// Inclusive span `[min pos, max raw end]` over the records on `rname`.
    pub fn span(&self, rname: &str) -> Option<RangeInclusive<u32>> {
        let (start, end) = self.records_for(rname).fold(None, |acc, record| {
            Some(match acc {
                None => (record.pos(), record.raw_end()),
                Some((start, end)) => (
                    u32::min(start, record.pos()),
                    u32::max(end, record.raw_end()),
                ),
            })
        })?;
        Some(start..=end)
    }

    /// Summed raw sequence length per reference, in first-seen order.
    pub fn coverage(&self) -> Vec<(&str, u64)> {
        let mut order: Vec<(&str, u64)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        for record in &self.records {
            let slot = *slots.entry(record.rname()).or_insert_with(|| {
                order.push((record.rname(), 0));
                order.len() - 1
            });
            order[slot].1 += record.len() as u64;
        }

        order
    }
}
