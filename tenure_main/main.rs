mod cmd;
mod config;
mod log;

use clap::{Parser, Subcommand};
use cmd::Format;
use config::Config;
use eyre::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tenure_core::Locale;

/// Formats and merges tenures of posts, groups and memberships in an association registry.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Registry document (defaults to the configured path)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[arg(short, long, global = true, value_enum, default_value_t)]
    format: Format,

    /// Month names used in dates (english or swedish)
    #[arg(short, long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Marker printed after the begin date of ongoing tenures
    #[arg(long, global = true)]
    ongoing_marker: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a member's posts, groups, membership history and decorations
    Profile {
        /// Member id or full name
        member: String,
    },
    /// List everyone active during a calendar year
    Year { year: i32 },
    /// Merge a YAML list of `{key, begin, end}` entries per key
    Merge {
        /// Input file, stdin when omitted
        file: Option<PathBuf>,
    },
}

fn parse_locale(s: &str) -> Result<Locale, serde_yml::Error> {
    serde_yml::from_str(s)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    crate::log::init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let mut config = Config::load()?;
    if let Some(data) = cli.data {
        config.data = data;
    }
    if let Some(locale) = cli.locale {
        config.style.locale = locale;
    }
    if let Some(marker) = cli.ongoing_marker {
        config.style.ongoing_marker = marker;
    }
    tracing::debug!(?config, command = ?cli.command, "Running");

    let style = &config.style;
    match cli.command {
        Command::Profile { member } => {
            let registry = cmd::load_registry(&config.data)?;
            cmd::profile(&registry, &member, style, cli.format)
        }
        Command::Year { year } => {
            let registry = cmd::load_registry(&config.data)?;
            cmd::year(&registry, year, style, cli.format)
        }
        Command::Merge { file } => cmd::merge(file.as_deref(), style, cli.format),
    }
}
