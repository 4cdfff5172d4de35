use std::path::PathBuf;
use std::time::Duration;

use analyst_core::DEFAULT_PROFILE;
use analyst_engine::{ServiceSettings, DEFAULT_ENDPOINT};
use analyst_logging::{LogDestination, DEFAULT_LOG_FILE};
use clap::Parser;
use log::LevelFilter;

/// Terminal chat client for the financial analyst service.
#[derive(Debug, Parser)]
#[command(name = "analyst-chat", version)]
pub struct Cli {
    /// URL of the analysis endpoint.
    #[arg(long, env = "ANALYST_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Investor profile sent along with every question.
    #[arg(long, env = "ANALYST_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Give up on a request after this many seconds (default: wait forever).
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Give up on connecting to the backend after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub connect_timeout_secs: Option<u64>,

    /// Ask a single question, print the answer and exit.
    #[arg(long, value_name = "TEXT")]
    pub ask: Option<String>,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Also write log lines to the terminal.
    #[arg(long)]
    pub log_to_terminal: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        if self.log_to_terminal {
            LogDestination::Both(self.log_file.clone())
        } else {
            LogDestination::File(self.log_file.clone())
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
