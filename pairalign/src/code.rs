use std::{fs::read_to_string, path::PathBuf};

use anyhow::{Context, Result, ensure};
use clap::Parser;
use lib_pairalign::token::{
    code_alignment::{CodeAligner, CodeAlignmentConfiguration, TokenKindSimilarity, tokens_match},
    source_tokenizer::SourceTokenizer,
};
use log::info;

use crate::settings::{AlignmentArgs, init_logging};

#[derive(Parser)]
pub struct Cli {
    #[command(flatten)]
    alignment: AlignmentArgs,

    /// The reference source file.
    #[clap(long, short = 'r')]
    reference: PathBuf,

    /// The query source file.
    #[clap(long, short = 'q')]
    query: PathBuf,

    /// The number of columns a tab advances the indentation to.
    #[clap(long, default_value = "8")]
    tab_size: usize,
}

pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.alignment.log_level);
    ensure!(cli.tab_size > 0, "The tab size must be positive");

    let settings = cli.alignment.load(
        TokenKindSimilarity::DEFAULT_MATCH_SCORE,
        TokenKindSimilarity::DEFAULT_MISMATCH_SCORE,
    )?;
    let aligner = CodeAligner::new(
        SourceTokenizer::new(cli.tab_size),
        CodeAlignmentConfiguration {
            alignment: settings.configuration.clone(),
            similarity: TokenKindSimilarity::new(settings.match_score, settings.mismatch_score),
            glyphs: settings.glyphs.clone().unwrap_or_default(),
        },
    );

    info!("Tokenizing reference file {:?}", cli.reference);
    let reference = read_to_string(&cli.reference)
        .with_context(|| format!("Cannot read {:?}", cli.reference))?;
    let reference = aligner
        .tokenize(&reference)
        .with_context(|| format!("Cannot tokenize {:?}", cli.reference))?;

    info!("Tokenizing query file {:?}", cli.query);
    let query =
        read_to_string(&cli.query).with_context(|| format!("Cannot read {:?}", cli.query))?;
    let query = aligner
        .tokenize(&query)
        .with_context(|| format!("Cannot tokenize {:?}", cli.query))?;

    info!(
        "Aligning {} reference tokens with {} query tokens",
        reference.len(),
        query.len()
    );
    if settings.score_only {
        let score = lib_pairalign::align_score(
            &reference,
            &query,
            &aligner.configuration().similarity,
            &aligner.configuration().alignment,
        )?;
        println!("Score: {score}");
        return Ok(());
    }

    let result = aligner.align_tokens(&reference, &query)?;
    settings.report(
        &result,
        reference.len(),
        query.len(),
        |token| aligner.glyph(token).to_string(),
        |a, b| tokens_match(Some(a), Some(b)),
    )
}
