//! Observability for bookshelf
//!
//! Structured JSON logging of lifecycle events, collection mutations and
//! served requests.
//!
//! # Usage
//!
//! ```ignore
//! use bookshelf::observability::{log_event_with_fields, Event, Logger};
//!
//! log_event_with_fields(Event::BookDeleted, &[("id", "42")]);
//! Logger::info("HTTP_REQUEST", &[("status", "200")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
