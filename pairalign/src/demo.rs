use anyhow::Result;
use clap::Parser;
use lib_pairalign::{AlignmentConfiguration, MatchMismatchSimilarity, align};
use lib_pairshow::plain_text::PlainTextRenderer;
use log::{LevelFilter, info};

use crate::settings::init_logging;

pub const REFERENCE_SENTENCE: &str = "This is a long sentence with words in it.";
pub const QUERY_SENTENCE: &str = "This is a shorter sentence.";

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The maximum width of a line of the rendered alignment.
    #[clap(long, short = 'w', default_value = "80")]
    line_width: usize,
}

/// Aligns two fixed sentences character by character, with a harsh mismatch score.
pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let reference: Vec<_> = REFERENCE_SENTENCE.chars().collect();
    let query: Vec<_> = QUERY_SENTENCE.chars().collect();
    info!("Aligning {REFERENCE_SENTENCE:?} with {QUERY_SENTENCE:?}");

    let result = align(
        &reference,
        &query,
        &MatchMismatchSimilarity::new(1.0, -3.0),
        &AlignmentConfiguration::global(-1.0)?,
    )?;
    println!("{}", result.score());

    PlainTextRenderer::with_match_marker(cli.line_width, None)?.render(
        std::io::stdout().lock(),
        result.alignment(),
        |c| c.map(ToString::to_string).unwrap_or_else(|| "-".to_string()),
        char::eq,
    )?;

    Ok(())
}
