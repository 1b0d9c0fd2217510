use log::debug;

use crate::{
    aligner::{align, align_score},
    alignment_configuration::AlignmentConfiguration,
    alignment_result::AlignmentResult,
    error::Result,
    score::Score,
    similarity::SimilarityFunction,
};

use super::{Token, Tokenizer, glyph::GlyphTable};

/// Scores two tokens by their kind only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenKindSimilarity {
    pub match_score: f64,
    pub mismatch_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeAlignmentConfiguration {
    pub alignment: AlignmentConfiguration,
    pub similarity: TokenKindSimilarity,
    pub glyphs: GlyphTable,
}

/// Aligns source texts by their token sequences.
#[derive(Debug, Clone)]
pub struct CodeAligner<TokenizerType> {
    tokenizer: TokenizerType,
    configuration: CodeAlignmentConfiguration,
}

impl TokenKindSimilarity {
    pub const DEFAULT_MATCH_SCORE: f64 = 3.0;
    pub const DEFAULT_MISMATCH_SCORE: f64 = -2.0;

    pub fn new(match_score: f64, mismatch_score: f64) -> Self {
        Self {
            match_score,
            mismatch_score,
        }
    }
}

impl Default for TokenKindSimilarity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MATCH_SCORE, Self::DEFAULT_MISMATCH_SCORE)
    }
}

impl SimilarityFunction<Token> for TokenKindSimilarity {
    fn similarity(&self, a: &Token, b: &Token) -> f64 {
        if a.kind == b.kind {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

impl<TokenizerType: Tokenizer> CodeAligner<TokenizerType> {
    pub fn new(tokenizer: TokenizerType, configuration: CodeAlignmentConfiguration) -> Self {
        Self {
            tokenizer,
            configuration,
        }
    }

    pub fn configuration(&self) -> &CodeAlignmentConfiguration {
        &self.configuration
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>> {
        Ok(self.tokenizer.tokenize(source)?)
    }

    /// Tokenizes both sources and aligns the token sequences.
    pub fn align(&self, reference_source: &str, query_source: &str) -> Result<AlignmentResult<Token>> {
        let (reference, query) = self.tokenize_pair(reference_source, query_source)?;
        self.align_tokens(&reference, &query)
    }

    /// Aligns already tokenized sources.
    pub fn align_tokens(&self, reference: &[Token], query: &[Token]) -> Result<AlignmentResult<Token>> {
        align(
            reference,
            query,
            &self.configuration.similarity,
            &self.configuration.alignment,
        )
    }

    pub fn align_score(&self, reference_source: &str, query_source: &str) -> Result<Score> {
        let (reference, query) = self.tokenize_pair(reference_source, query_source)?;
        align_score(
            &reference,
            &query,
            &self.configuration.similarity,
            &self.configuration.alignment,
        )
    }

    pub fn glyph(&self, token: Option<&Token>) -> char {
        self.configuration.glyphs.glyph(token.map(|token| token.kind))
    }

    fn tokenize_pair(
        &self,
        reference_source: &str,
        query_source: &str,
    ) -> Result<(Vec<Token>, Vec<Token>)> {
        let reference = self.tokenize(reference_source)?;
        let query = self.tokenize(query_source)?;
        debug!(
            "Tokenized reference into {} tokens and query into {} tokens",
            reference.len(),
            query.len()
        );

        Ok((reference, query))
    }
}

/// Two column entries match if both are tokens of the same kind.
pub fn tokens_match(a: Option<&Token>, b: Option<&Token>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a.kind == b.kind)
}
