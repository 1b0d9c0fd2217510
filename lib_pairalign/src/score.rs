use std::{fmt::Display, ops::Add};

use noisy_float::types::R64;
use num_traits::{CheckedAdd, Zero};

/// The score of an alignment.
///
/// Scores are always finite.
/// Use [`Score::try_from_f64`] to convert untrusted values, and [`CheckedAdd`] to sum scores without leaving the finite range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score(R64);

impl Score {
    /// Returns `None` if the value is NaN or infinite.
    pub fn try_from_f64(value: f64) -> Option<Self> {
        R64::try_new(value).map(Self)
    }

    pub fn as_f64(&self) -> f64 {
        self.0.raw()
    }

    /// Multiplies the score with a count, e.g. to compute the cost of multiple gaps.
    pub fn checked_mul_usize(&self, factor: usize) -> Option<Self> {
        Self::try_from_f64(self.as_f64() * factor as f64)
    }
}

/// Panics if the sum is not finite. Use [`CheckedAdd`] where this can happen.
impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(&rhs).unwrap()
    }
}

impl CheckedAdd for Score {
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        Self::try_from_f64(self.as_f64() + rhs.as_f64())
    }
}

impl Zero for Score {
    fn zero() -> Self {
        Self(R64::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.as_f64(), f)
    }
}
