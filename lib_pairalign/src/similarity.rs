/// Scores a pair of sequence elements.
///
/// Higher values mean more similar.
/// The function must be deterministic, and it must return a finite value for every pair it is given.
/// The aligner rejects NaN and infinite values.
pub trait SimilarityFunction<T: ?Sized> {
    fn similarity(&self, a: &T, b: &T) -> f64;
}

impl<T: ?Sized, Function: Fn(&T, &T) -> f64> SimilarityFunction<T> for Function {
    fn similarity(&self, a: &T, b: &T) -> f64 {
        self(a, b)
    }
}

/// Scores equal elements with `match_score` and all other pairs with `mismatch_score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchMismatchSimilarity {
    pub match_score: f64,
    pub mismatch_score: f64,
}

impl MatchMismatchSimilarity {
    pub const DEFAULT_MATCH_SCORE: f64 = 1.0;
    pub const DEFAULT_MISMATCH_SCORE: f64 = -1.0;

    pub fn new(match_score: f64, mismatch_score: f64) -> Self {
        Self {
            match_score,
            mismatch_score,
        }
    }
}

impl Default for MatchMismatchSimilarity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MATCH_SCORE, Self::DEFAULT_MISMATCH_SCORE)
    }
}

impl<T: PartialEq + ?Sized> SimilarityFunction<T> for MatchMismatchSimilarity {
    fn similarity(&self, a: &T, b: &T) -> f64 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}
