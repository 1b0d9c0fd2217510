use std::{fs::read_to_string, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use lib_pairalign::{MatchMismatchSimilarity, align, align_score};
use log::{info, warn};

use crate::settings::{AlignmentArgs, init_logging};

#[derive(Parser)]
pub struct Cli {
    #[command(flatten)]
    alignment: AlignmentArgs,

    /// The reference text.
    #[clap(long, short = 'r', conflicts_with = "reference_file")]
    reference: Option<String>,

    /// A file containing the reference text.
    #[clap(long)]
    reference_file: Option<PathBuf>,

    /// The query text.
    #[clap(long, short = 'q', conflicts_with = "query_file")]
    query: Option<String>,

    /// A file containing the query text.
    #[clap(long)]
    query_file: Option<PathBuf>,
}

pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.alignment.log_level);
    let settings = cli.alignment.load(
        MatchMismatchSimilarity::DEFAULT_MATCH_SCORE,
        MatchMismatchSimilarity::DEFAULT_MISMATCH_SCORE,
    )?;
    if settings.glyphs.is_some() {
        warn!("The glyph table of the configuration file is ignored for text alignments");
    }

    let reference: Vec<char> = load_text("reference", cli.reference, cli.reference_file)?
        .chars()
        .collect();
    let query: Vec<char> = load_text("query", cli.query, cli.query_file)?
        .chars()
        .collect();
    let similarity = MatchMismatchSimilarity::new(settings.match_score, settings.mismatch_score);

    if settings.score_only {
        let score = align_score(&reference, &query, &similarity, &settings.configuration)?;
        println!("Score: {score}");
        return Ok(());
    }

    let result = align(&reference, &query, &similarity, &settings.configuration)?;
    settings.report(
        &result,
        reference.len(),
        query.len(),
        |c| c.map(ToString::to_string).unwrap_or_else(|| "-".to_string()),
        char::eq,
    )
}

fn load_text(name: &str, text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(file)) => {
            info!("Loading {name} file {file:?}");
            let text = read_to_string(&file).with_context(|| format!("Cannot read {file:?}"))?;
            Ok(text.trim_end_matches(['\n', '\r']).to_string())
        }
        (None, None) => bail!("No {name} given"),
    }
}
