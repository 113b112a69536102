//! bookshelf - a small REST service for book records kept in a flat JSON file
//!
//! Request flow: router → handler → store read → validation → mutation →
//! store write → response. Failures travel as `BookError`, which carries
//! its own HTTP status.

pub mod books;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
