//! CLI command definitions and handlers

mod init;
mod score;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BlackBox - hotness, quality and spaminess scores
#[derive(Parser, Debug)]
#[command(name = "blackbox")]
#[command(
    version,
    about = "Score article and comment snapshots",
    after_help = "\
Examples:
  blackbox hotness article.json            Hotness of an article snapshot
  blackbox quality comment.json --json     Quality score as JSON
  blackbox spaminess comment.json          Spam likelihood (0-100)
  blackbox init                            Write an example blackbox.toml

External scoring is used when AWS_SDK_KEY holds a real credential and
BLACKBOX_FUNCTION_URL points at the function service."
)]
pub struct Cli {
    /// Scoring config file (default: ./blackbox.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Never call the external function service
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print the result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hotness of an article snapshot (JSON file, `-` for stdin)
    Hotness { input: PathBuf },

    /// Quality of a comment snapshot (JSON file, `-` for stdin)
    Quality { input: PathBuf },

    /// Spaminess of a comment snapshot (JSON file, `-` for stdin)
    Spaminess { input: PathBuf },

    /// Write an example blackbox.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let options = score::ScoreOptions {
        config: cli.config,
        offline: cli.offline,
        json: cli.json,
    };

    match cli.command {
        Commands::Init { force } => init::run(&std::env::current_dir()?, force),
        Commands::Hotness { input } => score::run(score::ScoreKind::Hotness, &input, &options),
        Commands::Quality { input } => score::run(score::ScoreKind::Quality, &input, &options),
        Commands::Spaminess { input } => score::run(score::ScoreKind::Spaminess, &input, &options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hotness() {
        let cli = Cli::try_parse_from(["blackbox", "hotness", "article.json", "--offline"]).unwrap();
        assert!(cli.offline);
        assert!(matches!(cli.command, Commands::Hotness { .. }));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "blackbox",
            "spaminess",
            "-",
            "--json",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["blackbox", "--log-level", "loud", "init"]).is_err());
    }
}
