use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("selector not found: {0}")]
    SelectorNotFound(String),

    #[error("selector query failed: {0}")]
    QueryFailed(String),

    #[error("script evaluation failed: {0}")]
    ScriptError(String),

    #[error("timeout: {0}")]
    Timeout(String),
}

impl From<BrowserError> for roster_core::RosterError {
    fn from(err: BrowserError) -> Self {
        roster_core::RosterError::Browser(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BrowserError::NavigationError("net::ERR_NAME_NOT_RESOLVED".to_string());
        assert_eq!(
            err.to_string(),
            "navigation failed: net::ERR_NAME_NOT_RESOLVED"
        );
    }

    #[test]
    fn test_timeout_error() {
        let err = BrowserError::Timeout("https://example.edu/roster".to_string());
        assert!(err.to_string().contains("example.edu"));
    }

    #[test]
    fn test_into_core_error() {
        let err: roster_core::RosterError = BrowserError::QueryFailed("a[".to_string()).into();
        assert!(matches!(err, roster_core::RosterError::Browser(_)));
    }
}
