//! CLI command handlers for `gymevo`.
//!
//! Each command is implemented in its own submodule. Handlers that talk to
//! the store share an [`App`] and return [`CommandError`]; `main` turns the
//! error into a message and a non-zero exit code.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod evolution;
pub mod payments;
pub mod report;
pub mod students;

use chrono::{FixedOffset, Local, NaiveDate};
use gym_evolution::api::{ApiError, HttpStore, Session};
use gym_evolution::config::Config;
use gym_evolution::evolution::{FilterSelection, InvalidMonth};
use gym_evolution::forms::FormError;
use gym_evolution::models::RecordId;
use std::io::{self, Write};
use thiserror::Error;

use crate::args::FilterArgs;

/// Failure of a store-backed command
#[derive(Debug, Error)]
pub enum CommandError {
    /// Store call failed
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Rejected user input
    #[error(transparent)]
    Form(#[from] FormError),
    /// Month outside 1..=12
    #[error(transparent)]
    Filter(#[from] InvalidMonth),
    /// Bad configuration value
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Report rendering or writing failed
    #[error("failed to generate report: {0}")]
    Report(String),
    /// Terminal or filesystem I/O
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CommandError {
    /// True when the stored credential is missing or was rejected
    pub const fn needs_login(&self) -> bool {
        match self {
            Self::Api(e) => e.needs_login(),
            _ => false,
        }
    }
}

/// Everything a store-backed command needs
pub struct App {
    /// Effective configuration (file plus CLI overrides)
    pub config: Config,
    /// Credential for this run
    pub session: Session,
    /// REST client rooted at `api.endpoint`
    pub store: HttpStore,
    /// Calendar zone for dates and filters
    pub zone: FixedOffset,
}

impl App {
    /// Build the context from `config`
    ///
    /// # Errors
    /// [`CommandError::Config`] for a bad offset, [`CommandError::Api`] for a bad endpoint
    pub fn new(config: Config) -> Result<Self, CommandError> {
        let zone = config.calendar_zone().map_err(CommandError::Config)?;
        let store = HttpStore::new(&config.api.endpoint)?;
        let session = Session::new(config.token());
        logger::debug!("Using endpoint {}", store.base());
        Ok(Self {
            config,
            session,
            store,
            zone,
        })
    }

    /// Today's date in the calendar zone
    pub fn today(&self) -> NaiveDate {
        Local::now().with_timezone(&self.zone).date_naive()
    }

    /// Write the session's current token (or its absence) to the config file
    pub fn persist_token(&mut self) {
        let mut stored = Config::load();
        stored.api.token = self.session.current().unwrap_or_default();
        self.config.api.token.clone_from(&stored.api.token);
        if let Err(e) = stored.save() {
            logger::error!("Failed to save config: {e}");
            eprintln!("Failed to save config: {e}");
        }
    }

    /// Report a failed command; a rejected credential is forgotten on disk
    pub fn report_failure(&mut self, err: &CommandError) {
        if err.needs_login() {
            if matches!(err, CommandError::Api(ApiError::Unauthorized)) {
                self.persist_token();
            }
            eprintln!("✗ {err}");
            return;
        }
        logger::error!("{err}");
        eprintln!("✗ Could not load data: {err}");
    }
}

/// Validated month/year selection from the shared flags
///
/// # Errors
/// [`CommandError::Filter`] for a month outside 1..=12
pub fn selection(filter: FilterArgs) -> Result<FilterSelection, CommandError> {
    Ok(FilterSelection::new(filter.month, filter.year)?)
}

/// Parse a student id argument
pub fn record_id(raw: &str) -> RecordId {
    RecordId::new(raw.trim())
}

/// Ask a yes/no question on stdin
pub fn confirm(question: &str) -> bool {
    print!("{question} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let answer = response.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
