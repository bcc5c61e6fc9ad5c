// dnacompare CLI - compare ethnicity estimates across DNA testing services

mod commands;
mod exit_codes;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use commands::{CompareArgs, OutputFormat};
use dnacompare_config::{Settings, SortOrder};
use exit_codes::{EXIT_CONFIG, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "dnacompare")]
#[command(about = "Compare ethnicity estimates from several DNA services (Bayesian, average, weighted average)")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/dnacompare/config.toml if present)
    #[arg(long, global = true, env = "DNACOMPARE_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging to stderr (DNACOMPARE_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare ethnicity data using the Bayesian method, simple average and weighted average
    #[command(after_help = "\
Input CSV needs a header row with service, ethnicity, percentage and rating
columns (names configurable under [columns]).

Examples:
  dnacompare compare results.csv
  dnacompare compare results.csv --sort value --precision 1
  dnacompare compare results.csv --json
  dnacompare compare results.csv --output comparison.csv")]
    Compare {
        /// Input CSV file
        input: PathBuf,

        /// Print a JSON document to stdout instead of the text report
        #[arg(long, conflicts_with = "csv")]
        json: bool,

        /// Print CSV (one row per ethnicity) to stdout instead of the text report
        #[arg(long)]
        csv: bool,

        /// Also write results to a file (.csv → CSV, anything else → JSON)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Row order in the text report
        #[arg(long)]
        sort: Option<SortArg>,

        /// Decimal places in the text report
        #[arg(long)]
        precision: Option<usize>,
    },

    /// Load and validate an input file without aggregating
    #[command(after_help = "\
Examples:
  dnacompare validate results.csv")]
    Validate {
        /// Input CSV file
        input: PathBuf,
    },

    /// List services in processing order with their resolved rating
    #[command(after_help = "\
Examples:
  dnacompare services results.csv
  dnacompare services results.csv --json")]
    Services {
        /// Input CSV file
        input: PathBuf,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the config file in use
    Path,
    /// Print the effective settings as TOML
    Show,
    /// Write a commented default config file
    Init {
        /// Destination (default: the standard config path)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    Value,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortOrder::Name,
            SortArg::Value => SortOrder::Value,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  dnacompare-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // `config init` must work even when the existing file is broken.
    if let Commands::Config(ConfigCommands::Init { path, force }) = &cli.command {
        logging::init(None, cli.verbose);
        return commands::cmd_config_init(path.clone(), *force);
    }

    let (settings, used) = Settings::load(cli.config.as_deref())
        .map_err(|e| CliError::config(e.to_string()))?;

    logging::init(settings.log.filter.as_deref(), cli.verbose);
    if let Some(ref path) = used {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Commands::Compare { input, json, csv, output, sort, precision } => {
            let format = match (json, csv) {
                (true, false) => OutputFormat::Json,
                (false, true) => OutputFormat::Csv,
                (false, false) => OutputFormat::Text,
                (true, true) => return Err(CliError::args("--json and --csv are mutually exclusive")),
            };
            commands::cmd_compare(
                CompareArgs { input, format, output, sort: sort.map(SortOrder::from), precision },
                &settings,
            )
        }
        Commands::Validate { input } => commands::cmd_validate(input, &settings),
        Commands::Services { input, json } => commands::cmd_services(input, json, &settings),
        Commands::Config(ConfigCommands::Path) => commands::cmd_config_path(used.as_deref()),
        Commands::Config(ConfigCommands::Show) => commands::cmd_config_show(&settings),
        Commands::Config(ConfigCommands::Init { .. }) => unreachable!("handled above"),
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_CONFIG,
            message: msg.into(),
            hint: Some(format!("see `dnacompare config init`; default path: {}", Settings::config_path_display())),
        }
    }
}
