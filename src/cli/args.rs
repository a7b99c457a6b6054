//! CLI argument definitions for `gymevo`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gym_evolution::config::ConfigOverrides;
use logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Level::from(*self).fmt(f)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `endpoint`, `utc_offset`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Month/year narrowing shared by evolution and report commands
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct FilterArgs {
    /// Only snapshots taken in this month (1-12)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Only snapshots taken in this year
    #[arg(long)]
    pub year: Option<i32>,
}

/// Output options shared by report commands
#[derive(Debug, Clone, Default, Args)]
pub struct ReportArgs {
    /// Report format: markdown (md), html, or pdf. Defaults to config `format`
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Output file path (defaults to the reports directory and a name derived from the student)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Chrome-compatible binary used for PDF conversion
    #[arg(long, value_name = "PATH")]
    pub pdf_converter: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum StudentsSubcommand {
    /// List students sorted by name.
    List,
    /// Show one student's record.
    Show {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Register a new student.
    Add {
        /// Full name
        #[arg(long)]
        name: String,
        /// Contact phone
        #[arg(long)]
        phone: String,
        /// Register with an inactive membership
        #[arg(long)]
        inactive: bool,
        /// Measurements as FIELD=VALUE (e.g. `peso=80,5 altura=1.78`)
        #[arg(value_name = "FIELD=VALUE")]
        values: Vec<String>,
    },
    /// Edit a student; unspecified fields keep their stored values.
    Edit {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New phone
        #[arg(long)]
        phone: Option<String>,
        /// Membership flag (true/false)
        #[arg(long, value_parser = BoolishValueParser::new())]
        active: Option<bool>,
        /// Measurements as FIELD=VALUE; an empty VALUE clears the field
        #[arg(value_name = "FIELD=VALUE")]
        values: Vec<String>,
    },
    /// Delete a student (requires confirmation unless --yes).
    Delete {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum EvolutionSubcommand {
    /// Show the snapshot history table, newest first.
    List {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show trend series for weight, body fat and muscle.
    Trend {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Compare the two most recent snapshots.
    Compare {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Record a new snapshot.
    Add {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        /// Snapshot date or timestamp (store assigns one when omitted)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
        /// Measurements as FIELD=VALUE (blank or non-numeric values are skipped)
        #[arg(value_name = "FIELD=VALUE", num_args = 1..)]
        values: Vec<String>,
    },
    /// List the years that have snapshots, most recent first.
    Years {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportSubcommand {
    /// Export the evolution-history report.
    History {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        filter: FilterArgs,
        #[command(flatten)]
        output: ReportArgs,
    },
    /// Export the student detail sheet.
    Student {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        output: ReportArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum PaymentsSubcommand {
    /// List recorded payments.
    List,
    /// Record a payment for a student picked by exact name.
    Add {
        /// Student name as shown by `students list`
        #[arg(long)]
        student: String,
        /// Amount in BRL (comma or dot decimal)
        #[arg(long)]
        amount: String,
        /// Payment date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        date: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Log in and store the bearer token in the config file.
    Login {
        /// Account e-mail
        #[arg(long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored bearer token.
    Logout,
    /// Manage students.
    Students {
        #[command(subcommand)]
        subcommand: StudentsSubcommand,
    },
    /// Inspect and record body-measurement evolution.
    Evolution {
        #[command(subcommand)]
        subcommand: EvolutionSubcommand,
    },
    /// Export reports (markdown, html, pdf).
    Report {
        #[command(subcommand)]
        subcommand: ReportSubcommand,
    },
    /// Manage payments.
    Payments {
        #[command(subcommand)]
        subcommand: PaymentsSubcommand,
    },
    /// Show membership counts and this month's cash flow.
    Dashboard,
}

#[derive(Parser, Debug)]
#[command(
    name = "gymevo",
    about = "Gym membership and body-evolution command-line client",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config API token
    #[arg(long = "config-token", value_name = "TOKEN")]
    pub config_token: Option<String>,

    /// Override config API token (short form)
    #[arg(long = "token", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Override config API endpoint
    #[arg(long = "config-endpoint", value_name = "URL")]
    pub config_endpoint: Option<String>,

    /// Override config API endpoint (short form)
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override the UTC offset used to read snapshot dates (e.g. -03:00)
    #[arg(long = "utc-offset", value_name = "OFFSET", allow_hyphen_values = true)]
    pub utc_offset: Option<String>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--token`) take precedence over long-form flags
    /// (e.g., `--config-token`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            token: self.token.clone().or_else(|| self.config_token.clone()),
            endpoint: self
                .endpoint
                .clone()
                .or_else(|| self.config_endpoint.clone()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            utc_offset: self.utc_offset.clone(),
        }
    }
}
