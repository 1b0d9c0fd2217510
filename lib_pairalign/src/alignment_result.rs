use std::fmt::{Display, Formatter, Result as FmtResult, Write};

use num_traits::{CheckedAdd, Zero};

use crate::{
    alignment_configuration::{AlignmentConfiguration, AlignmentMode},
    error::{Error, Result},
    score::Score,
    similarity::SimilarityFunction,
};

/// A column of a pairwise alignment.
///
/// The first element is from the reference, the second from the query.
/// `None` denotes a gap. A column never consists of two gaps.
pub type AlignmentColumn<T> = (Option<T>, Option<T>);

/// The kind of an alignment column, as used in CIGAR strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentColumnType {
    Match,
    Substitution,
    Insertion,
    Deletion,
}

/// An optimal alignment of two sequences together with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult<T> {
    score: Score,
    alignment: Vec<AlignmentColumn<T>>,
}

/// Summary of an alignment, suitable for serialisation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentStatistics {
    pub mode: AlignmentMode,
    pub gap_penalty: f64,
    pub score: f64,
    pub reference_length: usize,
    pub query_length: usize,
    pub alignment_length: usize,
    pub matches: usize,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub cigar: String,
}

impl<T> AlignmentResult<T> {
    pub(crate) fn new(score: Score, alignment: Vec<AlignmentColumn<T>>) -> Self {
        debug_assert!(
            alignment
                .iter()
                .all(|(reference, query)| reference.is_some() || query.is_some())
        );

        Self { score, alignment }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn alignment(&self) -> &[AlignmentColumn<T>] {
        &self.alignment
    }

    pub fn into_alignment(self) -> Vec<AlignmentColumn<T>> {
        self.alignment
    }

    pub fn len(&self) -> usize {
        self.alignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignment.is_empty()
    }

    /// The reference side of each column.
    pub fn reference_row(&self) -> impl use<'_, T> + Iterator<Item = Option<&T>> {
        self.alignment.iter().map(|(reference, _)| reference.as_ref())
    }

    /// The query side of each column.
    pub fn query_row(&self) -> impl use<'_, T> + Iterator<Item = Option<&T>> {
        self.alignment.iter().map(|(_, query)| query.as_ref())
    }

    pub fn gap_count(&self) -> usize {
        self.alignment
            .iter()
            .filter(|(reference, query)| reference.is_none() || query.is_none())
            .count()
    }

    pub fn column_types(
        &self,
        is_match: impl Fn(&T, &T) -> bool,
    ) -> impl Iterator<Item = AlignmentColumnType> {
        self.alignment
            .iter()
            .map(move |column| AlignmentColumnType::classify(column, &is_match))
    }

    /// Recomputes the score of the alignment from its columns.
    ///
    /// For an alignment produced by the aligner, this equals [`score`](Self::score) when called with the similarity function and gap penalty of the alignment.
    pub fn rescore<Similarity: SimilarityFunction<T> + ?Sized>(
        &self,
        similarity: &Similarity,
        gap_penalty: Score,
    ) -> Result<Score> {
        let mut score = Score::zero();
        let mut reference_index = 0;
        let mut query_index = 0;

        for (reference, query) in &self.alignment {
            let column_score = match (reference, query) {
                (Some(reference), Some(query)) => {
                    let value = similarity.similarity(reference, query);
                    Score::try_from_f64(value).ok_or(Error::InvalidScore {
                        reference_index,
                        query_index,
                        value,
                    })?
                }
                _ => gap_penalty,
            };
            score = score
                .checked_add(&column_score)
                .ok_or(Error::ScoreOverflow {
                    reference_index,
                    query_index,
                })?;

            reference_index += usize::from(reference.is_some());
            query_index += usize::from(query.is_some());
        }

        Ok(score)
    }

    /// The alignment as run-length encoded column types.
    pub fn compact_column_types(
        &self,
        is_match: impl Fn(&T, &T) -> bool,
    ) -> Vec<(usize, AlignmentColumnType)> {
        let mut result: Vec<(usize, AlignmentColumnType)> = Vec::new();
        for column_type in self.column_types(is_match) {
            if let Some((multiplicity, last_column_type)) = result.last_mut() {
                if *last_column_type == column_type {
                    *multiplicity += 1;
                    continue;
                }
            }
            result.push((1, column_type));
        }
        result
    }

    pub fn cigar_with(&self, is_match: impl Fn(&T, &T) -> bool) -> String {
        let mut result = String::new();
        self.write_cigar_with(&mut result, is_match).unwrap();
        result
    }

    pub fn write_cigar_with(
        &self,
        writer: &mut impl Write,
        is_match: impl Fn(&T, &T) -> bool,
    ) -> std::fmt::Result {
        for (amount, column_type) in self.compact_column_types(is_match) {
            write!(writer, "{amount}{column_type}")?;
        }

        Ok(())
    }

    pub fn statistics(
        &self,
        configuration: &AlignmentConfiguration,
        reference_length: usize,
        query_length: usize,
        is_match: impl Fn(&T, &T) -> bool,
    ) -> AlignmentStatistics {
        let mut statistics = AlignmentStatistics {
            mode: configuration.mode(),
            gap_penalty: configuration.gap_penalty().as_f64(),
            score: self.score.as_f64(),
            reference_length,
            query_length,
            alignment_length: self.len(),
            matches: 0,
            substitutions: 0,
            insertions: 0,
            deletions: 0,
            cigar: String::new(),
        };

        for column_type in self.column_types(&is_match) {
            match column_type {
                AlignmentColumnType::Match => statistics.matches += 1,
                AlignmentColumnType::Substitution => statistics.substitutions += 1,
                AlignmentColumnType::Insertion => statistics.insertions += 1,
                AlignmentColumnType::Deletion => statistics.deletions += 1,
            }
        }
        statistics.cigar = self.cigar_with(is_match);

        statistics
    }
}

impl<T: PartialEq> AlignmentResult<T> {
    pub fn cigar(&self) -> String {
        self.cigar_with(T::eq)
    }
}

impl AlignmentColumnType {
    fn classify<T>(
        (reference, query): &AlignmentColumn<T>,
        is_match: impl Fn(&T, &T) -> bool,
    ) -> Self {
        match (reference, query) {
            (Some(reference), Some(query)) => {
                if is_match(reference, query) {
                    Self::Match
                } else {
                    Self::Substitution
                }
            }
            (None, Some(_)) => Self::Insertion,
            (Some(_), None) => Self::Deletion,
            (None, None) => unreachable!("An alignment column cannot consist of two gaps"),
        }
    }
}

impl Display for AlignmentColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}",
            match self {
                Self::Match => "=",
                Self::Substitution => "X",
                Self::Insertion => "I",
                Self::Deletion => "D",
            }
        )
    }
}

impl<T: PartialEq> Display for AlignmentResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "CIGAR: ")?;
        self.write_cigar_with(f, T::eq)?;

        Ok(())
    }
}

impl Display for AlignmentStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "Gap penalty: {}", self.gap_penalty)?;
        writeln!(f, "Score: {}", self.score)?;
        writeln!(
            f,
            "Lengths: reference {}, query {}, alignment {}",
            self.reference_length, self.query_length, self.alignment_length
        )?;
        writeln!(
            f,
            "Columns: {} matches, {} substitutions, {} insertions, {} deletions",
            self.matches, self.substitutions, self.insertions, self.deletions
        )?;
        write!(f, "CIGAR: {}", self.cigar)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        alignment_configuration::{AlignmentConfiguration, AlignmentMode},
        error::Error,
        score::Score,
        similarity::MatchMismatchSimilarity,
    };

    use super::{AlignmentColumnType, AlignmentResult};

    fn example() -> AlignmentResult<char> {
        AlignmentResult::new(
            Score::try_from_f64(0.0).unwrap(),
            vec![
                (Some('A'), Some('A')),
                (Some('C'), Some('C')),
                (None, Some('G')),
                (None, Some('G')),
                (Some('T'), Some('A')),
                (Some('T'), None),
            ],
        )
    }

    #[test]
    fn cigar() {
        let result = example();
        assert_eq!(result.cigar(), "2=2I1X1D");
        assert_eq!(result.cigar_with(|_, _| true), "2=2I1=1D");
        assert_eq!(
            result.compact_column_types(char::eq).first(),
            Some(&(2, AlignmentColumnType::Match))
        );
        assert_eq!(result.to_string(), "Score: 0\nCIGAR: 2=2I1X1D");
    }

    #[test]
    fn rows() {
        let result = example();
        assert_eq!(
            result.reference_row().collect::<Vec<_>>(),
            vec![Some(&'A'), Some(&'C'), None, None, Some(&'T'), Some(&'T')]
        );
        assert_eq!(
            result.query_row().flatten().collect::<String>(),
            "ACGGA".to_string()
        );
        assert_eq!(result.gap_count(), 3);
        assert_eq!(result.len(), 6);
    }

    #[test]
    fn rescore() {
        let result = example();
        let score = result
            .rescore(
                &MatchMismatchSimilarity::default(),
                Score::try_from_f64(-1.0).unwrap(),
            )
            .unwrap();
        // 2 matches, 1 substitution, 3 gaps.
        assert_eq!(score.as_f64(), -2.0);

        let error = result
            .rescore(
                &|a: &char, _: &char| if *a == 'T' { f64::INFINITY } else { 0.0 },
                Score::try_from_f64(-1.0).unwrap(),
            )
            .unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidScore {
                reference_index: 2,
                query_index: 4,
                ..
            }
        ));
    }

    #[test]
    fn statistics() {
        let result = example();
        let statistics = result.statistics(
            &AlignmentConfiguration::global(-1.0).unwrap(),
            4,
            5,
            char::eq,
        );

        assert_eq!(statistics.mode, AlignmentMode::Global);
        assert_eq!(statistics.alignment_length, 6);
        assert_eq!(statistics.matches, 2);
        assert_eq!(statistics.substitutions, 1);
        assert_eq!(statistics.insertions, 2);
        assert_eq!(statistics.deletions, 1);
        assert_eq!(statistics.cigar, "2=2I1X1D");
    }
}
