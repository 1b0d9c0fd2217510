pub mod aligner;
pub mod alignment_configuration;
pub mod alignment_matrix;
pub mod alignment_result;
pub mod error;
mod io;
pub mod score;
pub mod similarity;
pub mod token;

#[cfg(test)]
mod tests;

pub use aligner::{align, align_score};
pub use alignment_configuration::{AlignmentConfiguration, AlignmentMode};
pub use alignment_result::{AlignmentColumn, AlignmentResult, AlignmentStatistics};
pub use score::Score;
pub use similarity::{MatchMismatchSimilarity, SimilarityFunction};
