#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("SAMVOTE_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set SAMVOTE_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Forward-strand primary SAM line with uniform `I` qualities.
pub fn sam_line(qname: &str, rname: &str, pos: u32, cigar: &str, seq: &str) -> String {
    sam_line_with_flag(qname, 0, rname, pos, cigar, seq)
}

/// SAM line with an explicit FLAG and uniform `I` qualities.
pub fn sam_line_with_flag(
    qname: &str,
    flag: u16,
    rname: &str,
    pos: u32,
    cigar: &str,
    seq: &str,
) -> String {
    let qual = "I".repeat(seq.len());
    format!("{qname}\t{flag}\t{rname}\t{pos}\t60\t{cigar}\t*\t0\t0\t{seq}\t{qual}")
}

/// Small two-reference alignment batch with a header, a secondary hit and
/// an insertion-supported column.
pub const MIXED_SAM: &str = "\
@HD\tVN:1.6\tSO:coordinate
@SQ\tSN:contigA\tLN:40
@SQ\tSN:contigB\tLN:40
@PG\tID:minimap2\tPN:minimap2
a1\t99\tcontigA\t1\t60\t8M\t=\t5\t12\tACGTTGCA\tIIIIIIII\tNM:i:0
a2\t147\tcontigA\t5\t60\t4M2I4M\t=\t1\t-12\tTGCAGGATCC\tIIIIIIIIII\tNM:i:2
a3\t0\tcontigA\t5\t60\t2S4M2I4M\t*\t0\t0\tnnTGCAGGATCC\tIIIIIIIIIIII
a4\t256\tcontigB\t1\t0\t8M\t*\t0\t0\tTTTTTTTT\tIIIIIIII
b1\t0\tcontigB\t3\t60\t3M1D3M\t*\t0\t0\tGGGCCC\tIIIIII
u1\t4\t*\t0\t0\t*\t*\t0\t0\tACGTACGT\tIIIIIIII
";
