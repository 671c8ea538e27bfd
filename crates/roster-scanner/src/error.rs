use roster_browser::BrowserError;
use roster_core::{RosterError, HOMEPAGE_UNAVAILABLE, NO_ROSTER_FOUND};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid roster request: {0}")]
    InvalidRequest(#[from] RosterError),

    #[error("could not start browser session: {0}")]
    Launch(#[from] BrowserError),

    #[error("could not load athletics homepage {url}: {source}")]
    HomepageUnavailable {
        url: String,
        #[source]
        source: BrowserError,
    },

    #[error("no roster found for {gender} {sport} at {base_url}")]
    NoRosterFound {
        base_url: String,
        sport: String,
        gender: String,
    },

    #[error("browser session aborted unexpectedly")]
    SessionFault,
}

impl ScanError {
    /// Message placed in the failure descriptor handed back to callers.
    pub fn failure_message(&self) -> String {
        match self {
            ScanError::HomepageUnavailable { .. } => HOMEPAGE_UNAVAILABLE.to_string(),
            ScanError::NoRosterFound { .. } => NO_ROSTER_FOUND.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
