//! Property tests for chunk coverage and similarity search ordering.

use pathfinder_rag::{DistanceMetric, Segment, SimilarityIndex, split};
use proptest::prelude::*;

/// Generate a non-zero embedding of the given dimension.
fn arb_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim)
}

fn arb_metric() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![Just(DistanceMetric::SquaredEuclidean), Just(DistanceMetric::Cosine)]
}

fn segments(count: usize) -> Vec<Segment> {
    (0..count)
        .map(|i| Segment {
            id: format!("doc_{i}"),
            document_id: "doc".to_string(),
            ordinal: i,
            offset: i,
            text: format!("segment {i}"),
        })
        .collect()
}

/// *For any* valid chunk size and overlap, segments cover the text without
/// gaps, neighbours overlap by exactly `overlap`, and only the last segment
/// may be short.
mod prop_chunk_coverage {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn segments_cover_text_with_exact_overlap(
            text in "[a-zé •\n]{1,400}",
            chunk_size in 1usize..60,
            overlap_seed in 0usize..60,
        ) {
            let overlap = overlap_seed % chunk_size;
            let segs = split(&text, chunk_size, overlap).unwrap();
            let chars: Vec<char> = text.chars().collect();

            prop_assert!(!segs.is_empty());
            prop_assert_eq!(segs[0].offset, 0);

            let last = segs.last().unwrap();
            prop_assert_eq!(last.offset + last.char_len(), chars.len());

            for seg in &segs[..segs.len() - 1] {
                prop_assert_eq!(seg.char_len(), chunk_size);
            }
            for pair in segs.windows(2) {
                let prev_end = pair[0].offset + pair[0].char_len();
                prop_assert_eq!(prev_end - pair[1].offset, overlap);
            }

            // Reassembling segments, dropping each overlap, reproduces the text.
            let mut rebuilt: String = segs[0].text.clone();
            for seg in &segs[1..] {
                rebuilt.extend(seg.text.chars().skip(overlap));
            }
            prop_assert_eq!(rebuilt, text);
        }
    }
}

/// *For any* index and query, results come back in non-decreasing distance
/// order and their count is `min(k, len)`.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_and_bounded_by_k(
            vectors in proptest::collection::vec(arb_embedding(DIM), 1..20),
            query in arb_embedding(DIM),
            k in 0usize..25,
            metric in arb_metric(),
        ) {
            let count = vectors.len();
            let index = SimilarityIndex::build(segments(count), vectors, metric).unwrap();
            let hits = index.search(&query, k).unwrap();

            prop_assert_eq!(hits.len(), k.min(count));
            for window in hits.windows(2) {
                prop_assert!(
                    window[0].distance <= window[1].distance,
                    "results not in ascending distance order: {} > {}",
                    window[0].distance,
                    window[1].distance,
                );
            }
        }
    }
}
