use log::{debug, trace};
use num_traits::{CheckedAdd, Zero};

use crate::{
    alignment_configuration::AlignmentConfiguration,
    alignment_matrix::AlignmentMatrix,
    alignment_result::AlignmentResult,
    error::{Error, Result},
    score::Score,
    similarity::SimilarityFunction,
};

/// Computes an optimal alignment of `reference` and `query`.
///
/// In global mode, the alignment contains every element of both sequences.
/// In local mode, it is the highest scoring pair of substrings, which may be empty.
/// If there are multiple optimal alignments, matches and substitutions are preferred over insertions, and insertions over deletions.
pub fn align<T: Clone, Similarity: SimilarityFunction<T> + ?Sized>(
    reference: &[T],
    query: &[T],
    similarity: &Similarity,
    configuration: &AlignmentConfiguration,
) -> Result<AlignmentResult<T>> {
    debug!(
        "Aligning {} reference elements with {} query elements in {} mode",
        reference.len(),
        query.len(),
        configuration.mode(),
    );

    let mut matrix = AlignmentMatrix::new(configuration.clone(), reference.len(), query.len());
    matrix.fill(reference, query, similarity)?;
    trace!("Alignment matrix:\n{matrix}");

    let (start, score) = if configuration.is_local() {
        let maximum = matrix.maximum();
        (maximum.index, maximum.score)
    } else {
        let end = matrix.end_index();
        (end, matrix.entry(end).score)
    };

    let alignment = matrix.backtrace(start, reference, query);
    debug!(
        "Found alignment with {} columns and score {score}",
        alignment.len()
    );

    Ok(AlignmentResult::new(score, alignment))
}

/// Computes only the score of an optimal alignment.
///
/// Returns the same score as [`align`], but keeps only two rows of the alignment matrix in memory.
pub fn align_score<T, Similarity: SimilarityFunction<T> + ?Sized>(
    reference: &[T],
    query: &[T],
    similarity: &Similarity,
    configuration: &AlignmentConfiguration,
) -> Result<Score> {
    let gap_penalty = configuration.gap_penalty();
    let floor = configuration.floor();

    let mut previous = Vec::with_capacity(query.len() + 1);
    previous.push(Score::zero());
    for query_index in 1..=query.len() {
        let score = match floor {
            Some(floor) => floor,
            None => checked_add(previous[query_index - 1], gap_penalty, 0, query_index)?,
        };
        previous.push(score);
    }

    let mut current = vec![Score::zero(); query.len() + 1];
    let mut maximum = Score::zero();

    for (reference_index, reference_element) in reference.iter().enumerate() {
        let row = reference_index + 1;
        current[0] = match floor {
            Some(floor) => floor,
            None => checked_add(previous[0], gap_penalty, row, 0)?,
        };

        for (query_index, query_element) in query.iter().enumerate() {
            let column = query_index + 1;
            let value = similarity.similarity(reference_element, query_element);
            let pair_score = Score::try_from_f64(value).ok_or(Error::InvalidScore {
                reference_index,
                query_index,
                value,
            })?;

            let mut score = checked_add(previous[query_index], pair_score, row, column)?;
            score = score.max(checked_add(current[query_index], gap_penalty, row, column)?);
            score = score.max(checked_add(previous[column], gap_penalty, row, column)?);
            if let Some(floor) = floor {
                score = score.max(floor);
            }

            maximum = maximum.max(score);
            current[column] = score;
        }

        std::mem::swap(&mut previous, &mut current);
    }

    Ok(if configuration.is_local() {
        maximum
    } else {
        previous[query.len()]
    })
}

fn checked_add(a: Score, b: Score, reference_index: usize, query_index: usize) -> Result<Score> {
    a.checked_add(&b).ok_or(Error::ScoreOverflow {
        reference_index,
        query_index,
    })
}
