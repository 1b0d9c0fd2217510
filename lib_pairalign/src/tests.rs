use std::fs::read_to_string;

use crate::{
    aligner::{align, align_score},
    alignment_configuration::AlignmentConfiguration,
    alignment_result::AlignmentResult,
    similarity::MatchMismatchSimilarity,
    token::{
        code_alignment::{CodeAligner, CodeAlignmentConfiguration, tokens_match},
        source_tokenizer::SourceTokenizer,
    },
};

const SEQUENCE_PAIRS: &[(&str, &str)] = &[
    ("", ""),
    ("A", ""),
    ("", "TTT"),
    ("AC", "AGC"),
    ("AA", "TT"),
    ("GATTACA", "GCATGCU"),
    ("ACGTACGTACGT", "TGCA"),
    ("CCCCAGGGG", "CCCCTTTAGGGG"),
    ("This is a long sentence with words in it.", "This is a shorter sentence."),
];

fn configurations() -> Vec<(AlignmentConfiguration, MatchMismatchSimilarity)> {
    vec![
        (
            AlignmentConfiguration::global(-1.0).unwrap(),
            MatchMismatchSimilarity::default(),
        ),
        (
            AlignmentConfiguration::global(-2.5).unwrap(),
            MatchMismatchSimilarity::new(2.0, -1.0),
        ),
        (
            AlignmentConfiguration::local(-1.0).unwrap(),
            MatchMismatchSimilarity::default(),
        ),
        (
            AlignmentConfiguration::local(-3.0).unwrap(),
            MatchMismatchSimilarity::new(1.0, -3.0),
        ),
    ]
}

fn chars(sequence: &str) -> Vec<char> {
    sequence.chars().collect()
}

fn for_all_alignments(
    mut check: impl FnMut(
        &[char],
        &[char],
        &AlignmentConfiguration,
        &MatchMismatchSimilarity,
        &AlignmentResult<char>,
    ),
) {
    for (configuration, similarity) in configurations() {
        for (reference, query) in SEQUENCE_PAIRS {
            let reference = chars(reference);
            let query = chars(query);
            let result = align(&reference, &query, &similarity, &configuration).unwrap();
            check(&reference, &query, &configuration, &similarity, &result);
        }
    }
}

#[test]
fn rescoring_reproduces_the_score() {
    for_all_alignments(|_, _, configuration, similarity, result| {
        assert_eq!(
            result
                .rescore(similarity, configuration.gap_penalty())
                .unwrap(),
            result.score()
        );
    });
}

#[test]
fn length_bounds() {
    for_all_alignments(|reference, query, configuration, _, result| {
        assert!(result.len() <= reference.len() + query.len());
        if !configuration.is_local() {
            assert!(result.len() >= reference.len().max(query.len()));
        }
    });
}

#[test]
fn global_alignments_consume_both_sequences() {
    for_all_alignments(|reference, query, configuration, _, result| {
        if !configuration.is_local() {
            assert!(result.reference_row().flatten().eq(reference.iter()));
            assert!(result.query_row().flatten().eq(query.iter()));
        }
    });
}

#[test]
fn local_alignments_are_substrings() {
    for_all_alignments(|reference, query, configuration, _, result| {
        if configuration.is_local() {
            assert!(result.score().as_f64() >= 0.0);

            let reference_part: Vec<_> = result.reference_row().flatten().copied().collect();
            let query_part: Vec<_> = result.query_row().flatten().copied().collect();
            assert!(
                reference_part.is_empty()
                    || reference
                        .windows(reference_part.len())
                        .any(|window| window == reference_part.as_slice())
            );
            assert!(
                query_part.is_empty()
                    || query
                        .windows(query_part.len())
                        .any(|window| window == query_part.as_slice())
            );
        }
    });
}

#[test]
fn score_only_variant_agrees() {
    for_all_alignments(|reference, query, configuration, similarity, result| {
        assert_eq!(
            align_score(reference, query, similarity, configuration).unwrap(),
            result.score()
        );
    });
}

#[test]
fn identity_alignment() {
    let sequence = chars("GATTACA");
    let result = align(
        &sequence,
        &sequence,
        &MatchMismatchSimilarity::default(),
        &AlignmentConfiguration::default(),
    )
    .unwrap();

    assert_eq!(result.score().as_f64(), sequence.len() as f64);
    assert_eq!(result.gap_count(), 0);
    assert!(result.alignment().iter().all(|(a, b)| a == b));
}

#[test]
fn local_disjoint_sequences() {
    let result = align(
        &chars("AA"),
        &chars("TT"),
        &MatchMismatchSimilarity::default(),
        &AlignmentConfiguration::local(-1.0).unwrap(),
    )
    .unwrap();

    assert_eq!(result.score().as_f64(), 0.0);
}

#[test]
fn unequal_lengths() {
    // The reference is exhausted long before the query.
    let result = align(
        &chars("G"),
        &chars("AAAAG"),
        &MatchMismatchSimilarity::default(),
        &AlignmentConfiguration::global(-1.0).unwrap(),
    )
    .unwrap();

    assert_eq!(result.len(), 5);
    assert_eq!(result.cigar(), "4I1=");
    assert_eq!(result.score().as_f64(), -3.0);
}

#[test]
fn code_files() {
    let reference = read_to_string("../test_files/code/reference.py").unwrap();
    let query = read_to_string("../test_files/code/query.py").unwrap();
    let aligner = CodeAligner::new(
        SourceTokenizer::default(),
        CodeAlignmentConfiguration::default(),
    );

    let result = aligner.align(&reference, &query).unwrap();
    let configuration = aligner.configuration();
    assert_eq!(
        result
            .rescore(
                &configuration.similarity,
                configuration.alignment.gap_penalty()
            )
            .unwrap(),
        result.score()
    );
    assert!(
        result
            .reference_row()
            .flatten()
            .eq(aligner.tokenize(&reference).unwrap().iter())
    );

    let statistics = result.statistics(
        &configuration.alignment,
        aligner.tokenize(&reference).unwrap().len(),
        aligner.tokenize(&query).unwrap().len(),
        |a, b| tokens_match(Some(a), Some(b)),
    );
    assert!(statistics.matches > statistics.substitutions);
    assert_eq!(
        statistics.matches + statistics.substitutions + statistics.deletions,
        statistics.reference_length
    );
    assert_eq!(
        statistics.matches + statistics.substitutions + statistics.insertions,
        statistics.query_length
    );
}
