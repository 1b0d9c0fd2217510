use std::{
    collections::BTreeMap,
    fs::{File, read_to_string},
    io::{BufWriter, Write, stdout},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use lib_pairalign::{
    AlignmentConfiguration, AlignmentMode, AlignmentResult,
    token::{
        TokenKind,
        glyph::{GlyphEntry, GlyphTable},
    },
};
use lib_pairshow::plain_text::PlainTextRenderer;
use log::{LevelFilter, debug, info};
use serde::Deserialize;
use simplelog::{ColorChoice, TermLogger, TerminalMode};

/// Options shared by all alignment subcommands.
#[derive(Args, Debug, Clone)]
pub struct AlignmentArgs {
    #[clap(long, short = 'l', default_value = "info")]
    pub log_level: LevelFilter,

    /// The alignment mode, either `global` or `local`.
    #[clap(long, short = 'm')]
    pub mode: Option<AlignmentMode>,

    /// The score of a gap column, usually negative.
    #[clap(long, short = 'g', allow_negative_numbers = true)]
    pub gap_penalty: Option<f64>,

    /// The score of two matching elements.
    #[clap(long, allow_negative_numbers = true)]
    pub match_score: Option<f64>,

    /// The score of two mismatching elements.
    #[clap(long, allow_negative_numbers = true)]
    pub mismatch_score: Option<f64>,

    /// A toml file with default values for the alignment options.
    ///
    /// Options given on the command line take precedence.
    #[clap(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// The maximum width of a line of the rendered alignment.
    #[clap(long, short = 'w')]
    pub line_width: Option<usize>,

    /// Only compute the score, using linear memory.
    #[clap(long)]
    pub score_only: bool,

    /// The file to store the alignment statistics in toml format.
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    mode: Option<AlignmentMode>,
    gap_penalty: Option<f64>,
    match_score: Option<f64>,
    mismatch_score: Option<f64>,
    line_width: Option<usize>,
    glyphs: Option<GlyphConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GlyphConfig {
    fallback: Option<char>,
    gap: Option<char>,
    #[serde(default)]
    entries: BTreeMap<TokenKind, String>,
}

/// The resolved options of an alignment subcommand.
#[derive(Debug)]
pub struct Settings {
    pub configuration: AlignmentConfiguration,
    pub match_score: f64,
    pub mismatch_score: f64,
    pub renderer: PlainTextRenderer,
    pub score_only: bool,
    pub output: Option<PathBuf>,
    pub glyphs: Option<GlyphTable>,
}

pub fn init_logging(log_level: LevelFilter) {
    if let Err(error) = TermLogger::init(
        log_level,
        Default::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        debug!("Logger was already initialised: {error}");
    }
}

impl AlignmentArgs {
    /// Combines the command line, the config file and the given default scores.
    pub fn load(&self, default_match_score: f64, default_mismatch_score: f64) -> Result<Settings> {
        let config = if let Some(path) = &self.config {
            info!("Loading configuration file {path:?}");
            ConfigFile::read(path)?
        } else {
            ConfigFile::default()
        };

        let mode = self.mode.or(config.mode).unwrap_or_default();
        let gap_penalty = self
            .gap_penalty
            .or(config.gap_penalty)
            .unwrap_or(AlignmentConfiguration::DEFAULT_GAP_PENALTY);
        let configuration = AlignmentConfiguration::new(mode, gap_penalty)?;
        let line_width = self
            .line_width
            .or(config.line_width)
            .unwrap_or(PlainTextRenderer::DEFAULT_LINE_WIDTH);

        let settings = Settings {
            configuration,
            match_score: self
                .match_score
                .or(config.match_score)
                .unwrap_or(default_match_score),
            mismatch_score: self
                .mismatch_score
                .or(config.mismatch_score)
                .unwrap_or(default_mismatch_score),
            renderer: PlainTextRenderer::new(line_width)?,
            score_only: self.score_only,
            output: self.output.clone(),
            glyphs: config.glyphs.map(GlyphConfig::into_table).transpose()?,
        };
        debug!("Using {settings:?}");

        Ok(settings)
    }
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self> {
        let config = read_to_string(path)
            .with_context(|| format!("Cannot read configuration file {path:?}"))?;
        toml::from_str(&config).with_context(|| format!("Cannot parse configuration file {path:?}"))
    }
}

impl GlyphConfig {
    fn into_table(self) -> Result<GlyphTable> {
        let entries = self
            .entries
            .into_iter()
            .map(|(kind, glyph)| -> Result<_> { Ok((kind, glyph.parse::<GlyphEntry>()?)) })
            .collect::<Result<Vec<_>>>()?;

        Ok(GlyphTable::new(
            entries,
            self.fallback.unwrap_or(GlyphTable::DEFAULT_FALLBACK),
            self.gap.unwrap_or(GlyphTable::DEFAULT_GAP),
        )?)
    }
}

impl Settings {
    /// Prints the score and the rendered alignment, and writes the statistics file if requested.
    pub fn report<T>(
        &self,
        result: &AlignmentResult<T>,
        reference_length: usize,
        query_length: usize,
        render_element: impl FnMut(Option<&T>) -> String,
        is_match: impl Fn(&T, &T) -> bool,
    ) -> Result<()> {
        let cigar = result.cigar_with(&is_match);
        info!("CIGAR: {cigar}");
        println!("Score: {}", result.score());

        self.renderer
            .render(stdout().lock(), result.alignment(), render_element, &is_match)?;

        if let Some(output) = &self.output {
            info!("Writing statistics to {output:?}");
            let statistics = result.statistics(
                &self.configuration,
                reference_length,
                query_length,
                &is_match,
            );
            let mut output = BufWriter::new(
                File::create(output).with_context(|| format!("Cannot create {output:?}"))?,
            );
            write!(output, "{}", toml::to_string(&statistics)?)?;
        }

        Ok(())
    }
}
