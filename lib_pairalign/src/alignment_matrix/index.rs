use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{Index, IndexMut},
};

use ndarray::Array2;

use super::BaseAlignmentType;

/// A cell of the alignment matrix.
///
/// The reference index selects the row, and the query index selects the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AlignmentMatrixIndex {
    pub(super) reference_index: usize,
    pub(super) query_index: usize,
}

impl AlignmentMatrixIndex {
    pub fn new(reference_index: usize, query_index: usize) -> Self {
        Self {
            reference_index,
            query_index,
        }
    }

    pub fn reference_index(&self) -> usize {
        self.reference_index
    }

    pub fn query_index(&self) -> usize {
        self.query_index
    }

    pub fn is_origin(&self) -> bool {
        self.reference_index == 0 && self.query_index == 0
    }

    /// The cell from which an alignment column of the given type leads to this cell.
    ///
    /// Returns `None` for [`BaseAlignmentType::None`], and if the column would leave the matrix.
    pub fn predecessor(&self, alignment_type: BaseAlignmentType) -> Option<Self> {
        let (reference_step, query_step) = match alignment_type {
            BaseAlignmentType::None => return None,
            BaseAlignmentType::Insertion => (0, 1),
            BaseAlignmentType::Deletion => (1, 0),
            BaseAlignmentType::MatchOrSubstitution => (1, 1),
        };

        Some(Self {
            reference_index: self.reference_index.checked_sub(reference_step)?,
            query_index: self.query_index.checked_sub(query_step)?,
        })
    }
}

/// The indices of the first column except the origin, top to bottom.
pub(super) fn reference_border(
    (rows, _): (usize, usize),
) -> impl Iterator<Item = AlignmentMatrixIndex> {
    (1..rows).map(|reference_index| AlignmentMatrixIndex::new(reference_index, 0))
}

/// The indices of the first row except the origin, left to right.
pub(super) fn query_border(
    (_, columns): (usize, usize),
) -> impl Iterator<Item = AlignmentMatrixIndex> {
    (1..columns).map(|query_index| AlignmentMatrixIndex::new(0, query_index))
}

/// The indices of all cells outside the first row and column, in row-major order.
pub(super) fn inner_indices(
    (rows, columns): (usize, usize),
) -> impl Iterator<Item = AlignmentMatrixIndex> {
    (1..rows).flat_map(move |reference_index| {
        (1..columns).map(move |query_index| AlignmentMatrixIndex::new(reference_index, query_index))
    })
}

impl Display for AlignmentMatrixIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({}, {})", self.reference_index, self.query_index)
    }
}

impl<T> Index<AlignmentMatrixIndex> for Array2<T> {
    type Output = T;

    fn index(&self, index: AlignmentMatrixIndex) -> &Self::Output {
        &self[[index.reference_index, index.query_index]]
    }
}

impl<T> IndexMut<AlignmentMatrixIndex> for Array2<T> {
    fn index_mut(&mut self, index: AlignmentMatrixIndex) -> &mut Self::Output {
        &mut self[[index.reference_index, index.query_index]]
    }
}
