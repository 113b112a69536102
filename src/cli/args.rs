//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf init --config <path>
//! - bookshelf serve --config <path> [--port <n>] [--data-file <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bookshelf - a REST service for book records kept in a JSON file
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data file holding an empty collection
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./bookshelf.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./bookshelf.json")]
        config: PathBuf,

        /// Listening port (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Data file (overrides config and BOOKSHELF_DATA_FILE)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["bookshelf", "serve", "--port", "8081"]).unwrap();
        match cli.command {
            Command::Serve { config, port, data_file } => {
                assert_eq!(config, PathBuf::from("./bookshelf.json"));
                assert_eq!(port, Some(8081));
                assert!(data_file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_custom_config() {
        let cli = Cli::try_parse_from(["bookshelf", "init", "--config", "/etc/shelf.json"]).unwrap();
        assert!(matches!(cli.command, Command::Init { .. }));
    }
}
