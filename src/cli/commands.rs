//! CLI command implementations

use std::path::{Path, PathBuf};

use super::args::Command;
use super::errors::{CliError, CliResult};
use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::store::FileBookStore;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve {
            config,
            port,
            data_file,
        } => serve(&config, port, data_file),
    }
}

/// Resolve configuration: file, then environment, then flags
pub fn load_config(
    config_path: &Path,
    port: Option<u16>,
    data_file: Option<PathBuf>,
) -> CliResult<ServerConfig> {
    let mut config = ServerConfig::load(config_path)?;
    config.apply_env()?;

    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_file) = data_file {
        config.data_file = data_file;
    }
    config.validate()?;

    Logger::set_min_severity(config.log_level);

    let port = config.port.to_string();
    let data_file = config.data_file.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("data_file", data_file.as_str()), ("port", port.as_str())],
    );

    Ok(config)
}

/// Create the data file with an empty collection
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path, None, None)?;
    let store = FileBookStore::new(config.data_file.clone());

    if store.path().exists() {
        return Err(CliError::already_initialized(store.path().display()));
    }
    store.initialize()?;

    let data_file = store.path().display().to_string();
    log_event_with_fields(Event::StoreInitialized, &[("data_file", data_file.as_str())]);
    Ok(())
}

/// Start the HTTP server and block until it stops
pub fn serve(config_path: &Path, port: Option<u16>, data_file: Option<PathBuf>) -> CliResult<()> {
    let config = load_config(config_path, port, data_file)?;
    log_event(Event::ServerStart);

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::errors::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("bookshelf.json");
        fs::write(&config_path, r#"{"port": 4000, "data_file": "a.json"}"#).unwrap();

        let config = load_config(&config_path, Some(4100), Some(temp.path().join("b.json"))).unwrap();
        assert_eq!(config.port, 4100);
        assert_eq!(config.data_file, temp.path().join("b.json"));
    }

    #[test]
    fn test_init_creates_then_refuses() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("bookshelf.json");
        let data_file = temp.path().join("data").join("books.json");
        fs::write(
            &config_path,
            serde_json::json!({ "data_file": data_file }).to_string(),
        )
        .unwrap();

        init(&config_path).unwrap();
        assert_eq!(fs::read_to_string(&data_file).unwrap(), "[]");

        let err = init(&config_path).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::AlreadyInitialized);
    }
}
