use std::{env, fs::read_to_string, path::Path};

use anyhow::{Result, anyhow};
use clap::Parser;
use lib_pairalign::AlignmentStatistics;
use pairalign::{code, demo, text};

pub fn run_in_repo_root(args: &str) -> Result<()> {
    // working directory is this crate, a.k.a. "[...]/pairalign-tests"
    // simulate a call from the repo root
    env::set_current_dir(
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .ok_or(anyhow!("No parent directory"))?,
    )?;

    if args.starts_with("text ") {
        let args = text::Cli::parse_from(args.split_whitespace());
        text::cli(args)?;
    } else if args.starts_with("code ") {
        let args = code::Cli::parse_from(args.split_whitespace());
        code::cli(args)?;
    } else if args.starts_with("demo") {
        let args = demo::Cli::parse_from(args.split_whitespace());
        demo::cli(args)?;
    } else {
        return Err(anyhow!("Unknown subcommand in {args:?}"));
    }

    Ok(())
}

/// Runs the command with an additional `--output` option and returns the statistics it wrote.
pub fn run_with_statistics(args: &str, name: &str) -> Result<AlignmentStatistics> {
    let output = env::temp_dir().join(format!("pairalign-tests-{name}.toml"));
    run_in_repo_root(&format!("{args} --output {}", output.display()))?;
    Ok(toml::from_str(&read_to_string(output)?)?)
}
