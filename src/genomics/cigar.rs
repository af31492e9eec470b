use std::fmt;

use thiserror::Error;

/// CIGAR operation kinds describing how a read aligns to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarOpKind {
    /// Aligned base (`M`, `=` or `X`); consumes reference and query.
    Match,
    /// Insertion relative to the reference; consumes query only.
    Insertion,
    /// Deletion relative to the reference; consumes reference only.
    Deletion,
    /// Soft clipping (sequence present in read only).
    SoftClip,
    /// Hard clipping (trimmed sequence not present in read).
    HardClip,
}

impl CigarOpKind {
    /// Parse a single CIGAR operation code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' | '=' | 'X' => Some(Self::Match),
            'I' => Some(Self::Insertion),
            'D' => Some(Self::Deletion),
            'S' => Some(Self::SoftClip),
            'H' => Some(Self::HardClip),
            _ => None,
        }
    }

    /// Canonical single-letter code.
    pub fn code(self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
            Self::SoftClip => 'S',
            Self::HardClip => 'H',
        }
    }

    /// Whether the operation advances along the reference.
    pub fn consumes_reference(self) -> bool {
        matches!(self, Self::Match | Self::Deletion)
    }

    /// Whether the operation advances along the stored query sequence.
    pub fn consumes_query(self) -> bool {
        matches!(self, Self::Match | Self::Insertion | Self::SoftClip)
    }
}

/// CIGAR operation with length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    /// Operation kind.
    pub kind: CigarOpKind,
    /// Number of bases affected by the operation.
    pub len: u32,
}

impl CigarOp {
    /// Construct a new CIGAR operation.
    pub fn new(kind: CigarOpKind, len: u32) -> Self {
        Self { kind, len }
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.kind.code())
    }
}

/// Errors raised while parsing a CIGAR string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CigarError {
    /// An operation code was not preceded by a run length.
    #[error("missing length before operation '{op}' in CIGAR '{cigar}'")]
    MissingLength {
        /// Operation code lacking a length.
        op: char,
        /// Full CIGAR string.
        cigar: String,
    },

    /// Run length was zero, overflowed, or the string ended with digits.
    #[error("invalid operation length '{len}' in CIGAR '{cigar}'")]
    InvalidLength {
        /// Offending length text.
        len: String,
        /// Full CIGAR string.
        cigar: String,
    },

    /// Operation code outside M, =, X, I, D, S, H.
    #[error("unsupported CIGAR operation '{op}' in '{cigar}'")]
    UnsupportedOperation {
        /// Unsupported operation code.
        op: char,
        /// Full CIGAR string.
        cigar: String,
    },
}

/// Parse a CIGAR string into its `<length><op>` runs.
///
/// `*` (no alignment) yields an empty list.
pub fn parse_cigar(cigar: &str) -> Result<Vec<CigarOp>, CigarError> {
    if cigar == "*" {
        return Ok(Vec::new());
    }

    let mut ops = Vec::new();
    let mut num_start = 0;

    for (i, c) in cigar.char_indices() {
        if c.is_ascii_digit() {
            continue;
        }
        let digits = &cigar[num_start..i];
        if digits.is_empty() {
            return Err(CigarError::MissingLength {
                op: c,
                cigar: cigar.to_string(),
            });
        }
        let kind = CigarOpKind::from_code(c).ok_or_else(|| CigarError::UnsupportedOperation {
            op: c,
            cigar: cigar.to_string(),
        })?;
        let len = digits
            .parse::<u32>()
            .ok()
            .filter(|&len| len > 0)
            .ok_or_else(|| CigarError::InvalidLength {
                len: digits.to_string(),
                cigar: cigar.to_string(),
            })?;
        ops.push(CigarOp::new(kind, len));
        num_start = i + c.len_utf8();
    }

    if num_start != cigar.len() {
        return Err(CigarError::InvalidLength {
            len: cigar[num_start..].to_string(),
            cigar: cigar.to_string(),
        });
    }

    Ok(ops)
}

/// Number of reference bases spanned by the operations (M and D runs).
pub fn reference_len(ops: &[CigarOp]) -> usize {
    ops.iter()
        .filter(|op| op.kind.consumes_reference())
        .map(|op| op.len as usize)
        .sum()
}

/// Number of stored query bases implied by the operations (M, I and S runs).
pub fn query_len(ops: &[CigarOp]) -> usize {
    ops.iter()
        .filter(|op| op.kind.consumes_query())
        .map(|op| op.len as usize)
        .sum()
}
