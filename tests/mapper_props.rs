use proptest::prelude::*;
use samvote::genomics::{query_len, SamFlags};
use samvote::AlignmentRecord;

/// CIGAR built from match blocks, each optionally followed by an insertion
/// or a deletion, with optional soft clips on both ends.
#[derive(Debug, Clone)]
struct Layout {
    lead_clip: u32,
    blocks: Vec<(u32, u8, u32)>,
    tail_clip: u32,
}

impl Layout {
    fn cigar(&self) -> String {
        let mut cigar = String::new();
        if self.lead_clip > 0 {
            cigar.push_str(&format!("{}S", self.lead_clip));
        }
        for &(matched, follow, len) in &self.blocks {
            cigar.push_str(&format!("{matched}M"));
            match follow {
                1 => cigar.push_str(&format!("{len}I")),
                2 => cigar.push_str(&format!("{len}D")),
                _ => {}
            }
        }
        if self.tail_clip > 0 {
            cigar.push_str(&format!("{}S", self.tail_clip));
        }
        cigar
    }

    fn matched(&self) -> usize {
        self.blocks.iter().map(|&(m, _, _)| m as usize).sum()
    }

    fn inserted(&self) -> usize {
        self.blocks
            .iter()
            .filter(|&&(_, follow, _)| follow == 1)
            .map(|&(_, _, len)| len as usize)
            .sum()
    }

    fn query_len(&self) -> usize {
        (self.lead_clip + self.tail_clip) as usize + self.matched() + self.inserted()
    }
}

fn layout() -> impl Strategy<Value = Layout> {
    (
        0u32..3,
        proptest::collection::vec((1u32..6, 0u8..3, 1u32..4), 1..6),
        0u32..3,
    )
        .prop_map(|(lead_clip, blocks, tail_clip)| Layout {
            lead_clip,
            blocks,
            tail_clip,
        })
}

fn record(layout: &Layout, start: u32) -> AlignmentRecord {
    let seq: String = "ACGT".chars().cycle().take(layout.query_len()).collect();
    let qual = "I".repeat(seq.len());
    let line = format!(
        "read\t0\tref\t{start}\t60\t{}\t*\t0\t0\t{seq}\t{qual}",
        layout.cigar()
    );
    AlignmentRecord::parse(&line).expect("generated record parses")
}

proptest! {
    #[test]
    fn forward_and_reverse_are_exclusive(bits in any::<u16>()) {
        let flags = SamFlags::from_bits(bits);
        prop_assert_ne!(flags.is_forward(), flags.is_reverse());
    }

    #[test]
    fn cigar_query_length_matches_sequence(layout in layout(), start in 1u32..1000) {
        let read = record(&layout, start);
        let ops = read.cigar_ops().expect("mapped record has ops");
        prop_assert_eq!(query_len(ops), read.sequence().len());
    }

    #[test]
    fn positions_outside_mapped_span_are_empty(layout in layout(), start in 1u32..1000) {
        let read = record(&layout, start);
        let mapped_len = read.mapped_len().expect("mapped record has a span") as u32;
        prop_assert!(read.read_idx_at_pos(start - 1).is_empty());
        prop_assert!(read.read_idx_at_pos(start + mapped_len).is_empty());
        prop_assert!(read.read_idx_at_pos(start + mapped_len + 7).is_empty());
    }

    #[test]
    fn calls_cover_every_aligned_and_inserted_base(layout in layout(), start in 1u32..1000) {
        let read = record(&layout, start);
        let mapped_len = read.mapped_len().expect("mapped record has a span") as u32;

        let mut called_columns = 0;
        let mut called_bases = 0;
        for pos in start..start + mapped_len {
            let idx = read.read_idx_at_pos(pos);
            prop_assert!(idx.iter().all(|&i| i < read.sequence().len()));
            prop_assert!(idx.windows(2).all(|pair| pair[1] == pair[0] + 1));
            if !idx.is_empty() {
                called_columns += 1;
                called_bases += idx.len();
            }
        }

        prop_assert_eq!(called_columns, layout.matched());
        prop_assert_eq!(called_bases, layout.matched() + layout.inserted());
    }
}
