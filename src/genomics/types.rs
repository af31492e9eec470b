use std::str::FromStr;

use thiserror::Error;

use crate::genomics::cigar::{parse_cigar, reference_len, CigarError, CigarOp};

/// Number of mandatory tab-separated SAM columns.
pub const MANDATORY_FIELDS: usize = 11;

const FLAG_UNMAPPED: u16 = 0x4;
const FLAG_REVERSE: u16 = 0x10;
const FLAG_SECONDARY: u16 = 0x100;
const FLAG_SUPPLEMENTARY: u16 = 0x800;

/// Mapping status derived once from the SAM FLAG bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamFlags {
    bits: u16,
    is_mapped: bool,
    is_reverse: bool,
    is_primary: bool,
}

impl SamFlags {
    /// Decode the interpreted bits of a FLAG value; other bits are kept verbatim.
    pub fn from_bits(bits: u16) -> Self {
        Self {
            bits,
            is_mapped: bits & FLAG_UNMAPPED == 0,
            is_reverse: bits & FLAG_REVERSE != 0,
            is_primary: bits & (FLAG_SECONDARY | FLAG_SUPPLEMENTARY) == 0,
        }
    }

    /// Raw FLAG value.
    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Bit 0x4 clear.
    pub fn is_mapped(&self) -> bool {
        self.is_mapped
    }

    /// Bit 0x10 clear.
    pub fn is_forward(&self) -> bool {
        !self.is_reverse
    }

    /// Bit 0x10 set.
    pub fn is_reverse(&self) -> bool {
        self.is_reverse
    }

    /// Neither secondary (0x100) nor supplementary (0x800).
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

/// Errors produced while parsing a SAM alignment line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// Fewer than the 11 mandatory columns were present.
    #[error("expected at least 11 tab-separated fields, found {found}")]
    MissingFields {
        /// Number of fields actually present.
        found: usize,
    },

    /// A numeric column did not hold an integer of the expected range.
    #[error("invalid integer '{value}' in {field} field")]
    InvalidInteger {
        /// Column name.
        field: &'static str,
        /// Raw column text.
        value: String,
    },

    /// The CIGAR column of a mapped record could not be parsed.
    #[error(transparent)]
    Cigar(#[from] CigarError),
}

/// One parsed SAM alignment line.
///
/// Mapped records carry their parsed CIGAR and reference span; both are
/// absent for unmapped records. The record is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    qname: String,
    flags: SamFlags,
    rname: String,
    pos: u32,
    mapq: u8,
    cigar: String,
    rnext: String,
    pnext: u32,
    tlen: i32,
    seq: String,
    qual: String,
    tags: Vec<String>,
    cigar_ops: Option<Vec<CigarOp>>,
    mapped_len: Option<usize>,
}

fn parse_int<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

impl AlignmentRecord {
    /// Parse one SAM alignment line (trailing line terminators are ignored).
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MANDATORY_FIELDS {
            return Err(RecordError::MissingFields {
                found: fields.len(),
            });
        }

        let flags = SamFlags::from_bits(parse_int("FLAG", fields[1])?);
        let pos = parse_int("POS", fields[3])?;
        let mapq = parse_int("MAPQ", fields[4])?;
        let pnext = parse_int("PNEXT", fields[7])?;
        let tlen = parse_int("TLEN", fields[8])?;

        let cigar = fields[5];
        let (cigar_ops, mapped_len) = if flags.is_mapped() {
            let ops = parse_cigar(cigar)?;
            let span = reference_len(&ops);
            (Some(ops), Some(span))
        } else {
            (None, None)
        };

        Ok(Self {
            qname: fields[0].to_string(),
            flags,
            rname: fields[2].to_string(),
            pos,
            mapq,
            cigar: cigar.to_string(),
            rnext: fields[6].to_string(),
            pnext,
            tlen,
            seq: fields[9].to_string(),
            qual: fields[10].to_string(),
            tags: fields[MANDATORY_FIELDS..]
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
            cigar_ops,
            mapped_len,
        })
    }

    /// Query template name.
    pub fn qname(&self) -> &str {
        &self.qname
    }

    /// Raw FLAG value.
    pub fn flag(&self) -> u16 {
        self.flags.bits()
    }

    /// Decoded mapping status.
    pub fn flags(&self) -> SamFlags {
        self.flags
    }

    /// Reference sequence name.
    pub fn rname(&self) -> &str {
        &self.rname
    }

    /// 1-based leftmost mapping position.
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Mapping quality associated with the alignment.
    pub fn mapq(&self) -> u8 {
        self.mapq
    }

    /// CIGAR text as stored in the line.
    pub fn cigar(&self) -> &str {
        &self.cigar
    }

    /// Reference name of the mate/next read.
    pub fn rnext(&self) -> &str {
        &self.rnext
    }

    /// Position of the mate/next read.
    pub fn pnext(&self) -> u32 {
        self.pnext
    }

    /// Observed template length.
    pub fn tlen(&self) -> i32 {
        self.tlen
    }

    /// Query sequence as stored in the line.
    pub fn sequence(&self) -> &str {
        &self.seq
    }

    /// Query quality string as stored in the line.
    pub fn quality(&self) -> &str {
        &self.qual
    }

    /// Optional `TAG:TYPE:VALUE` columns, in order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Bit 0x4 clear.
    pub fn is_mapped(&self) -> bool {
        self.flags.is_mapped()
    }

    /// Bit 0x10 clear.
    pub fn is_forward(&self) -> bool {
        self.flags.is_forward()
    }

    /// Bit 0x10 set.
    pub fn is_reverse(&self) -> bool {
        self.flags.is_reverse()
    }

    /// Neither secondary nor supplementary.
    pub fn is_primary(&self) -> bool {
        self.flags.is_primary()
    }

    /// Parsed CIGAR operations; `None` for unmapped records.
    pub fn cigar_ops(&self) -> Option<&[CigarOp]> {
        self.cigar_ops.as_deref()
    }

    /// Reference bases covered by M and D runs; `None` for unmapped records.
    pub fn mapped_len(&self) -> Option<usize> {
        self.mapped_len
    }

    /// Read length inferred from the raw sequence column.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Whether the sequence column is empty.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Inclusive end used for coarse overlap tests: `pos + len(seq)`.
    pub fn raw_end(&self) -> u32 {
        let len = u32::try_from(self.seq.len()).unwrap_or(u32::MAX);
        self.pos.saturating_add(len)
    }

    /// Sequence bases, with the `*` placeholder read as empty.
    pub(crate) fn bases(&self) -> &str {
        if self.seq == "*" {
            ""
        } else {
            &self.seq
        }
    }

    /// Quality characters, with the `*` placeholder read as empty.
    pub(crate) fn qualities(&self) -> &str {
        if self.qual == "*" {
            ""
        } else {
            &self.qual
        }
    }
}

impl FromStr for AlignmentRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
