use index::AlignmentMatrixIndex;
use ndarray::Array2;
use num_traits::{CheckedAdd, Zero};

use crate::{
    alignment_configuration::AlignmentConfiguration,
    alignment_result::AlignmentColumn,
    error::{Error, Result},
    score::Score,
    similarity::SimilarityFunction,
};

pub mod index;

/// The dynamic programming matrix of a single alignment.
///
/// Entry `[i, j]` holds the best score of aligning the first `i` reference elements with the first `j` query elements,
/// together with the alignment type of the last column of that alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentMatrix {
    matrix: Array2<AlignmentMatrixEntry>,
    configuration: AlignmentConfiguration,
    maximum: AlignmentMatrixMaximum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentMatrixEntry {
    pub score: Score,
    pub alignment_type: BaseAlignmentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseAlignmentType {
    /// Marks the matrix origin at [0, 0], and in local mode every entry where an alignment may start.
    None,
    /// A query element aligned to a gap.
    Insertion,
    /// A reference element aligned to a gap.
    Deletion,
    MatchOrSubstitution,
}

/// The first entry with maximum score in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentMatrixMaximum {
    pub index: AlignmentMatrixIndex,
    pub score: Score,
}

impl AlignmentMatrix {
    pub fn new(
        configuration: AlignmentConfiguration,
        reference_length: usize,
        query_length: usize,
    ) -> Self {
        Self {
            matrix: Array2::default((reference_length + 1, query_length + 1)),
            configuration,
            maximum: Default::default(),
        }
    }

    /// The index of the entry that aligns both sequences completely.
    pub fn end_index(&self) -> AlignmentMatrixIndex {
        AlignmentMatrixIndex::new(self.matrix.dim().0 - 1, self.matrix.dim().1 - 1)
    }

    pub fn entry(&self, index: AlignmentMatrixIndex) -> AlignmentMatrixEntry {
        self.matrix[index]
    }

    pub fn maximum(&self) -> AlignmentMatrixMaximum {
        self.maximum
    }

    /// Fills the matrix row by row.
    ///
    /// Fails if the similarity function returns a non-finite value, or if a score leaves the finite range.
    pub fn fill<T, Similarity: SimilarityFunction<T> + ?Sized>(
        &mut self,
        reference: &[T],
        query: &[T],
        similarity: &Similarity,
    ) -> Result<()> {
        debug_assert_eq!(reference.len() + 1, self.matrix.dim().0);
        debug_assert_eq!(query.len() + 1, self.matrix.dim().1);

        self.initialise()?;
        for index in index::inner_indices(self.matrix.dim()) {
            self.set_max_score(index, reference, query, similarity)?;
        }

        Ok(())
    }

    fn initialise(&mut self) -> Result<()> {
        // Initialise matrix origin.
        let origin = AlignmentMatrixIndex::new(0, 0);
        self.matrix[origin] = AlignmentMatrixEntry::default();
        self.maximum = AlignmentMatrixMaximum {
            index: origin,
            score: Score::zero(),
        };

        // Initialise matrix edges.
        let dimensions = self.matrix.dim();
        let borders = index::reference_border(dimensions)
            .map(|index| (index, BaseAlignmentType::Deletion))
            .chain(
                index::query_border(dimensions).map(|index| (index, BaseAlignmentType::Insertion)),
            );
        for (index, alignment_type) in borders {
            self.matrix[index] = if self.configuration.is_local() {
                AlignmentMatrixEntry::default()
            } else {
                self.compute_gap_entry(index, alignment_type)?
                    .unwrap_or_default()
            };
        }

        Ok(())
    }

    fn set_max_score<T, Similarity: SimilarityFunction<T> + ?Sized>(
        &mut self,
        index: AlignmentMatrixIndex,
        reference: &[T],
        query: &[T],
        similarity: &Similarity,
    ) -> Result<()> {
        // Ties are resolved in favour of matches and substitutions, then insertions, then deletions.
        let candidates = [
            self.compute_match_or_substitution_entry(index, reference, query, similarity)?,
            self.compute_gap_entry(index, BaseAlignmentType::Insertion)?,
            self.compute_gap_entry(index, BaseAlignmentType::Deletion)?,
        ];
        let mut best: Option<AlignmentMatrixEntry> = None;
        for candidate in candidates.into_iter().flatten() {
            if best.is_none_or(|best| candidate.score > best.score) {
                best = Some(candidate);
            }
        }
        let mut entry = best.unwrap_or_default();

        if let Some(floor) = self.configuration.floor() {
            if entry.score < floor {
                entry = AlignmentMatrixEntry {
                    score: floor,
                    alignment_type: BaseAlignmentType::None,
                };
            }
        }

        if entry.score > self.maximum.score {
            self.maximum = AlignmentMatrixMaximum {
                index,
                score: entry.score,
            };
        }

        self.matrix[index] = entry;
        Ok(())
    }

    /// Returns `None` if the gap column would start outside of the matrix.
    fn compute_gap_entry(
        &self,
        index: AlignmentMatrixIndex,
        alignment_type: BaseAlignmentType,
    ) -> Result<Option<AlignmentMatrixEntry>> {
        let Some(predecessor) = index.predecessor(alignment_type) else {
            return Ok(None);
        };
        let predecessor_score = self.matrix[predecessor].score;

        Ok(Some(AlignmentMatrixEntry {
            score: checked_add(predecessor_score, self.configuration.gap_penalty(), index)?,
            alignment_type,
        }))
    }

    fn compute_match_or_substitution_entry<T, Similarity: SimilarityFunction<T> + ?Sized>(
        &self,
        index: AlignmentMatrixIndex,
        reference: &[T],
        query: &[T],
        similarity: &Similarity,
    ) -> Result<Option<AlignmentMatrixEntry>> {
        let Some(predecessor) = index.predecessor(BaseAlignmentType::MatchOrSubstitution) else {
            return Ok(None);
        };
        // The elements aligned by the diagonal step have the indices of its predecessor.
        let reference_index = predecessor.reference_index;
        let query_index = predecessor.query_index;
        let value = similarity.similarity(&reference[reference_index], &query[query_index]);
        let pair_score = Score::try_from_f64(value).ok_or(Error::InvalidScore {
            reference_index,
            query_index,
            value,
        })?;
        let predecessor_score = self.matrix[predecessor].score;

        Ok(Some(AlignmentMatrixEntry {
            score: checked_add(predecessor_score, pair_score, index)?,
            alignment_type: BaseAlignmentType::MatchOrSubstitution,
        }))
    }

    /// Reconstructs the alignment ending in `start` by following the alignment types of the entries.
    ///
    /// In local mode, the backtrace stops at the first entry with score zero.
    /// In global mode, it stops at the origin, emitting gap columns for whatever remains of the longer sequence.
    pub fn backtrace<T: Clone>(
        &self,
        start: AlignmentMatrixIndex,
        reference: &[T],
        query: &[T],
    ) -> Vec<AlignmentColumn<T>> {
        let mut alignment = Vec::new();
        let mut index = start;

        loop {
            let entry = self.matrix[index];
            if self.configuration.is_local() && entry.score.is_zero() {
                break;
            }

            let Some(predecessor) = index.predecessor(entry.alignment_type) else {
                break;
            };
            let reference_element = || Some(reference[predecessor.reference_index].clone());
            let query_element = || Some(query[predecessor.query_index].clone());
            alignment.push(match entry.alignment_type {
                BaseAlignmentType::Insertion => (None, query_element()),
                BaseAlignmentType::Deletion => (reference_element(), None),
                _ => (reference_element(), query_element()),
            });
            index = predecessor;
        }

        alignment.reverse();
        alignment
    }

    #[cfg(test)]
    fn manual_debug_fill(&mut self, entries: impl IntoIterator<Item = AlignmentMatrixEntry>) {
        let mut entries = entries.into_iter();
        for index in index::inner_indices(self.matrix.dim()) {
            self.matrix[index] = entries.next().unwrap();
        }
        assert!(entries.next().is_none());
    }
}

fn checked_add(a: Score, b: Score, index: AlignmentMatrixIndex) -> Result<Score> {
    a.checked_add(&b).ok_or(Error::ScoreOverflow {
        reference_index: index.reference_index,
        query_index: index.query_index,
    })
}

impl Default for AlignmentMatrixEntry {
    fn default() -> Self {
        Self {
            score: Score::zero(),
            alignment_type: BaseAlignmentType::None,
        }
    }
}

impl Default for AlignmentMatrixMaximum {
    fn default() -> Self {
        Self {
            index: AlignmentMatrixIndex::new(0, 0),
            score: Score::zero(),
        }
    }
}

impl core::fmt::Display for AlignmentMatrix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut score_column_widths = vec![1; self.matrix.dim().1];
        for reference_index in 0..self.matrix.dim().0 {
            for (query_index, score_column_width) in score_column_widths.iter_mut().enumerate() {
                let score = self.matrix[[reference_index, query_index]].score;
                *score_column_width = score.to_string().len().max(*score_column_width);
            }
        }

        for reference_index in 0..self.matrix.dim().0 {
            write!(f, "[ ")?;
            #[allow(clippy::needless_range_loop)]
            for query_index in 0..self.matrix.dim().1 {
                write!(
                    f,
                    "{: >width$}",
                    self.matrix[[reference_index, query_index]].score.to_string(),
                    width = score_column_widths[query_index],
                )?;
                write!(
                    f,
                    "{} ",
                    match self.matrix[[reference_index, query_index]].alignment_type {
                        BaseAlignmentType::None => "N",
                        BaseAlignmentType::Insertion => "I",
                        BaseAlignmentType::Deletion => "D",
                        BaseAlignmentType::MatchOrSubstitution => "M",
                    }
                )?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
