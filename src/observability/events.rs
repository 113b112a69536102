//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in bookshelf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Data file created by `init`
    StoreInitialized,
    /// Server boot begins
    ServerStart,
    /// Listener bound, ready for requests
    ServerListening,
    /// Graceful shutdown complete
    ShutdownComplete,

    // Collection mutations
    BookCreated,
    BookUpdated,
    BookDeleted,

    // HTTP
    /// One request served
    HttpRequest,
    /// A request failed server side
    RequestFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreInitialized => "STORE_INITIALIZED",
            Event::ServerStart => "SERVER_START",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BookCreated => "BOOK_CREATED",
            Event::BookUpdated => "BOOK_UPDATED",
            Event::BookDeleted => "BOOK_DELETED",
            Event::HttpRequest => "HTTP_REQUEST",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Severity the event is logged at unless the caller overrides it
    pub fn severity(&self) -> Severity {
        match self {
            Event::RequestFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_upper_snake() {
        let events = [
            Event::ConfigLoaded,
            Event::StoreInitialized,
            Event::ServerStart,
            Event::ServerListening,
            Event::ShutdownComplete,
            Event::BookCreated,
            Event::BookUpdated,
            Event::BookDeleted,
            Event::HttpRequest,
            Event::RequestFailed,
        ];

        for event in events {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_failures_log_as_errors() {
        assert_eq!(Event::RequestFailed.severity(), Severity::Error);
        assert_eq!(Event::BookCreated.severity(), Severity::Info);
    }
}
