// # phonebook - Terminal Front End
//
// Line-oriented host for the client controller. Each line is one command;
// after every command the current view is printed.
//
// ## Configuration
//
// - `PHONEBOOK_URL`: Server base URL (default http://localhost:3001)
// - `PHONEBOOK_NOTIFICATION_SECS`: Banner lifetime in seconds (default 5)
// - `PHONEBOOK_LOG_LEVEL`: trace, debug, info, warn, error (default warn)
//
// Logs go to stderr so they do not interleave with the rendered view.

use anyhow::Result;
use phonebook_client::{Controller, HttpPersonsService, Outcome};
use phonebook_core::EntryId;
use std::env;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const HELP: &str = "\
Commands:
  name <text>     set the name input
  number <text>   set the number input
  add             submit the form
  filter <text>   show only names containing <text>
  delete <id>     delete an entry
  yes | no        answer a pending question
  show            print the current view
  help            print this help
  quit            exit";

/// Exit codes, matching phonebookd
#[derive(Debug, Clone, Copy)]
enum ClientExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<ClientExitCode> for ExitCode {
    fn from(code: ClientExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug)]
struct Config {
    url: String,
    notification_secs: String,
    log_level: String,
}

impl Config {
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup("PHONEBOOK_URL").unwrap_or_else(|| "http://localhost:3001".to_string()),
            notification_secs: lookup("PHONEBOOK_NOTIFICATION_SECS")
                .unwrap_or_else(|| "5".to_string()),
            log_level: lookup("PHONEBOOK_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            anyhow::bail!(
                "PHONEBOOK_URL must start with http:// or https://. Got: '{}'",
                self.url
            );
        }
        self.notification_ttl()?;
        self.log_level()?;
        Ok(())
    }

    fn notification_ttl(&self) -> Result<Duration> {
        match self.notification_secs.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => anyhow::bail!(
                "PHONEBOOK_NOTIFICATION_SECS must be a positive number. Got: '{}'",
                self.notification_secs
            ),
        }
    }

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

/// One parsed input line
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Name(String),
    Number(String),
    Add,
    Filter(String),
    Delete(EntryId),
    Yes,
    No,
    Show,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(' ') {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "name" => Command::Name(rest.to_string()),
        "number" => Command::Number(rest.to_string()),
        "add" => Command::Add,
        "filter" => Command::Filter(rest.to_string()),
        "delete" => match rest.parse::<EntryId>() {
            Ok(id) => Command::Delete(id),
            Err(_) => Command::Invalid(format!("Not an id: '{}'", rest)),
        },
        "yes" | "y" => Command::Yes,
        "no" | "n" => Command::No,
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("Unknown command: '{}'", other)),
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return ClientExitCode::ConfigError.into();
    }

    let log_level = config.log_level().unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ClientExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ClientExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        let ttl = config
            .notification_ttl()
            .unwrap_or(Duration::from_secs(5));
        let controller =
            Controller::new(HttpPersonsService::new(config.url.clone())).with_notification_ttl(ttl);

        if let Err(e) = run_terminal(&controller).await {
            error!("Terminal error: {}", e);
            ClientExitCode::RuntimeError
        } else {
            ClientExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Read commands from stdin until `quit` or end of input
async fn run_terminal(controller: &Controller<HttpPersonsService>) -> Result<()> {
    info!("Connecting to {}", controller.service().base_url());
    controller.load().await;
    println!("{}", controller.view().await);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = match parse_command(&line) {
            Command::Name(text) => {
                controller.set_name_input(text).await;
                Outcome::Nothing
            }
            Command::Number(text) => {
                controller.set_number_input(text).await;
                Outcome::Nothing
            }
            Command::Filter(text) => {
                controller.set_filter_text(text).await;
                Outcome::Nothing
            }
            Command::Add => controller.submit().await,
            Command::Delete(id) => controller.request_delete(id).await,
            Command::Yes => controller.confirm().await,
            Command::No => controller.cancel().await,
            Command::Show => Outcome::Nothing,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
            Command::Invalid(message) => {
                println!("{}", message);
                continue;
            }
        };

        tracing::debug!("Outcome: {:?}", outcome);
        println!("{}", controller.view().await);
    }

    Ok(())
}
