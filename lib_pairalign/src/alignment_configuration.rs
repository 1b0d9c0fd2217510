use std::{fmt::Display, str::FromStr};

use num_traits::Zero;

use crate::{
    error::{Error, Result},
    score::Score,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlignmentMode {
    /// Align both sequences end-to-end.
    #[default]
    Global,
    /// Align the highest-scoring pair of contiguous subsequences.
    Local,
}

/// The immutable parameters of an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentConfiguration {
    mode: AlignmentMode,
    gap_penalty: Score,
}

impl AlignmentConfiguration {
    pub const DEFAULT_GAP_PENALTY: f64 = -1.0;

    /// The gap penalty is added to the score once per gap column.
    /// It is usually negative, but any finite value is accepted.
    pub fn new(mode: AlignmentMode, gap_penalty: f64) -> Result<Self> {
        let gap_penalty =
            Score::try_from_f64(gap_penalty).ok_or(Error::NonFiniteGapPenalty(gap_penalty))?;
        Ok(Self { mode, gap_penalty })
    }

    pub fn global(gap_penalty: f64) -> Result<Self> {
        Self::new(AlignmentMode::Global, gap_penalty)
    }

    pub fn local(gap_penalty: f64) -> Result<Self> {
        Self::new(AlignmentMode::Local, gap_penalty)
    }

    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    pub fn gap_penalty(&self) -> Score {
        self.gap_penalty
    }

    pub fn is_local(&self) -> bool {
        self.mode == AlignmentMode::Local
    }

    /// The score below which a local alignment is not extended.
    pub(crate) fn floor(&self) -> Option<Score> {
        match self.mode {
            AlignmentMode::Global => None,
            AlignmentMode::Local => Some(Score::zero()),
        }
    }
}

impl Default for AlignmentConfiguration {
    fn default() -> Self {
        Self {
            mode: AlignmentMode::Global,
            gap_penalty: Score::try_from_f64(Self::DEFAULT_GAP_PENALTY).unwrap(),
        }
    }
}

impl FromStr for AlignmentMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "local" => Ok(Self::Local),
            _ => Err(Error::UnknownAlignmentMode(s.to_string())),
        }
    }
}

impl Display for AlignmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Local => write!(f, "local"),
        }
    }
}
