use clap::{Parser, Subcommand};
use pairalign::{code, demo, text};

/// Align two strings or two source files.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    subcommand: CliSubcommand,
}

#[derive(Subcommand)]
enum CliSubcommand {
    /// Align two texts character by character.
    Text(text::Cli),
    /// Align two source files token by token.
    Code(code::Cli),
    /// Align two example sentences.
    Demo(demo::Cli),
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().subcommand {
        CliSubcommand::Text(cli) => text::cli(cli),
        CliSubcommand::Code(cli) => code::cli(cli),
        CliSubcommand::Demo(cli) => demo::cli(cli),
    }
}
