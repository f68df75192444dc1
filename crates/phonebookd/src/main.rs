// # phonebookd - Phonebook Server Daemon
//
// The phonebookd daemon is a thin integration layer. It is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the directory store and the HTTP router
// 4. Serving until SIGINT/SIGTERM
//
// All directory logic lives in phonebook-core; all HTTP mapping lives in
// phonebook-api.
//
// ## Configuration
//
// - `PORT`: Port to listen on (default 3001)
// - `PHONEBOOK_HOST`: Address to bind (default 0.0.0.0)
// - `PHONEBOOK_ID_STRATEGY`: Id allocation, `random` or `sequential` (default random)
// - `PHONEBOOK_SEED`: Start with the seed entries, `true` or `false` (default true)
// - `PHONEBOOK_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export PORT=3001
// export PHONEBOOK_ID_STRATEGY=sequential
//
// phonebookd
// ```

use anyhow::Result;
use phonebook_api::{AppState, create_router};
use phonebook_core::{
    DirectoryStore, IdStrategy, MemoryDirectoryStore, PhonebookConfig, ServerConfig, StoreConfig,
};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum PhonebookExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<PhonebookExitCode> for ExitCode {
    fn from(code: PhonebookExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    host: String,
    port: String,
    id_strategy: String,
    seed: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("PHONEBOOK_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT").unwrap_or_else(|| "3001".to_string()),
            id_strategy: lookup("PHONEBOOK_ID_STRATEGY").unwrap_or_else(|| "random".to_string()),
            seed: lookup("PHONEBOOK_SEED").unwrap_or_else(|| "true".to_string()),
            log_level: lookup("PHONEBOOK_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Validate the configuration and convert it into a `PhonebookConfig`
    fn validate(&self) -> Result<PhonebookConfig> {
        if self.host.trim().is_empty() {
            anyhow::bail!("PHONEBOOK_HOST cannot be empty. Unset it to bind 0.0.0.0");
        }

        let port: u16 = match self.port.trim().parse() {
            Ok(port) => port,
            Err(_) => anyhow::bail!(
                "PORT must be a number between 0 and 65535. Got: '{}'",
                self.port
            ),
        };

        let id_strategy: IdStrategy = self
            .id_strategy
            .parse()
            .map_err(|e| anyhow::anyhow!("PHONEBOOK_ID_STRATEGY: {}", e))?;

        let seed = match self.seed.to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => anyhow::bail!(
                "PHONEBOOK_SEED '{}' is not valid. Use true or false",
                self.seed
            ),
        };

        // Validate log level
        self.log_level()?;

        let config = PhonebookConfig {
            server: ServerConfig::new(self.host.trim(), port),
            store: StoreConfig::default()
                .with_seed(seed)
                .with_id_strategy(id_strategy),
        };
        config.validate()?;

        Ok(config)
    }

    /// Parse the configured log level
    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "PHONEBOOK_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();

    let phonebook_config = match config.validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return PhonebookExitCode::ConfigError.into();
        }
    };

    // Initialize tracing
    let log_level = config.log_level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return PhonebookExitCode::ConfigError.into();
    }

    info!("Starting phonebookd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return PhonebookExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_server(phonebook_config).await {
            error!("Server error: {}", e);
            PhonebookExitCode::RuntimeError
        } else {
            PhonebookExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the server until a shutdown signal arrives
async fn run_server(config: PhonebookConfig) -> Result<()> {
    let store = MemoryDirectoryStore::new(&config.store);
    info!(
        "Directory store ready: {} entries, {:?} ids",
        store.count().await?,
        config.store.id_strategy
    );

    let router = create_router(AppState::new(store));

    let address = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", address, e))?;

    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            match wait_for_shutdown().await {
                Ok(signal) => info!("Received shutdown signal: {}", signal),
                Err(e) => error!("Shutdown signal error: {}", e),
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
