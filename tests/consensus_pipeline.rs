#[path = "common/mod.rs"]
mod common;
use common::{sam_line, sam_line_with_flag, MIXED_SAM};
use samvote::{AlignmentRecord, AlignmentSet, ConsensusError};

#[test]
fn match_only_record_maps_each_position() {
    let record = AlignmentRecord::parse(&sam_line("r", "ref", 10, "5M", "ACGTA")).unwrap();
    assert_eq!(record.read_idx_at_pos(10), vec![0]);
    assert_eq!(record.read_idx_at_pos(14), vec![4]);
    assert!(record.read_idx_at_pos(15).is_empty());
}

#[test]
fn insertion_is_reported_with_its_anchor_base() {
    let record = AlignmentRecord::parse(&sam_line("r", "ref", 10, "3M2I3M", "AAAGGCCC")).unwrap();
    assert_eq!(record.read_idx_at_pos(12), vec![2, 3, 4]);
    assert_eq!(record.base_at_pos(12), "AGG");
}

#[test]
fn deleted_positions_have_no_call() {
    let record = AlignmentRecord::parse(&sam_line("r", "ref", 10, "3M2D3M", "AAACCC")).unwrap();
    assert!(record.read_idx_at_pos(13).is_empty());
    assert!(record.read_idx_at_pos(14).is_empty());
    assert_eq!(record.mapped_seq(), "AAA--CCC");
}

#[test]
fn tied_column_is_ambiguous() {
    let alignments = AlignmentSet::from_lines([
        sam_line("r1", "ref", 7, "3M", "AGT"),
        sam_line("r2", "ref", 7, "3M", "CGT"),
    ])
    .unwrap();
    assert_eq!(alignments.consensus_at_pos("ref", 7), "N");
    assert_eq!(alignments.consensus("ref").unwrap(), "NGT");
}

#[test]
fn mixed_batch_builds_expected_consensus() {
    let alignments = AlignmentSet::from_reader(MIXED_SAM.as_bytes()).unwrap();

    assert_eq!(alignments.len(), 5);
    let references: Vec<&str> = alignments.references().iter().map(String::as_str).collect();
    assert_eq!(references, ["*", "contigA", "contigB"]);

    assert_eq!(alignments.consensus("contigA").unwrap(), "ACGTTGCIATCC");
    assert_eq!(alignments.consensus("contigB").unwrap(), "GGGCCC");
    assert_eq!(alignments.best_reference(), Some("contigA"));
    assert_eq!(alignments.best_consensus(), "ACGTTGCIATCC");
}

#[test]
fn pileup_reports_insertion_calls() {
    let alignments = AlignmentSet::from_reader(MIXED_SAM.as_bytes()).unwrap();
    let pileup = alignments.pileup_at_pos("contigA", 8);
    assert_eq!(pileup.bases, ["A", "AGG", "AGG"]);
    assert_eq!(pileup.qualities, ["I", "III", "III"]);
}

#[test]
fn secondary_only_reference_is_unknown() {
    let alignments = AlignmentSet::from_lines([
        sam_line("r1", "ref", 1, "2M", "AC"),
        sam_line_with_flag("r2", 256, "alt", 1, "2M", "AC"),
    ])
    .unwrap();
    assert_eq!(
        alignments.consensus("alt"),
        Err(ConsensusError::UnknownReference("alt".to_string()))
    );
}

#[test]
fn coverage_gaps_shorten_the_consensus() {
    let alignments = AlignmentSet::from_lines([
        sam_line("r1", "ref", 1, "3M", "ACG"),
        sam_line("r2", "ref", 20, "3M", "TTA"),
    ])
    .unwrap();
    assert_eq!(alignments.consensus("ref").unwrap(), "ACGTTA");
}

#[test]
fn header_only_batch_has_empty_best_consensus() {
    let alignments = AlignmentSet::from_lines(["@HD\tVN:1.6", "@SQ\tSN:ref\tLN:10"]).unwrap();
    assert!(alignments.is_empty());
    assert_eq!(alignments.best_consensus(), "");
}
