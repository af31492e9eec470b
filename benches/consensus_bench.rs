//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use samvote::AlignmentSet;

fn synthetic_sam(reads: usize, read_len: usize) -> Vec<String> {
    let bases: String = "ACGTTGCA".chars().cycle().take(read_len + reads).collect();
    let qual = "I".repeat(read_len);
    (0..reads)
        .map(|i| {
            let seq = &bases[i..i + read_len];
            let cigar = if i % 7 == 0 {
                format!("{}M1I{}M", read_len / 2, read_len - read_len / 2 - 1)
            } else {
                format!("{read_len}M")
            };
            format!(
                "read{i}\t0\tcontig{}\t{}\t60\t{cigar}\t*\t0\t0\t{seq}\t{qual}",
                i % 3,
                i + 1
            )
        })
        .collect()
}

fn benchmark_consensus(c: &mut Criterion) {
    let lines = synthetic_sam(600, 100);

    c.bench_function("load_600_reads", |b| {
        b.iter(|| AlignmentSet::from_lines(black_box(&lines)).expect("synthetic SAM loads"));
    });

    let alignments = AlignmentSet::from_lines(&lines).expect("synthetic SAM loads");
    c.bench_function("best_consensus_600_reads", |b| {
        b.iter(|| black_box(alignments.best_consensus()));
    });
}

criterion_group!(benches, benchmark_consensus);
criterion_main!(benches);
