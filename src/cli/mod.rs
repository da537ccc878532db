//! CLI subcommand definitions and handlers.
//!
//! Uses clap derive to define the subcommands:
//! - `sanitize` -- sanitize a message (argument, stdin, or stdin line by line)
//! - `classify` -- classify a single URL as image/video media
//! - `color` -- validate a color value
//! - `phone` -- validate a phone number
//! - `version` -- print build/version info

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::{self, OutputConfig};
use crate::logging;
use crate::message::{
    classify_url, is_valid_phone_number, sanitize_color, sanitize_message, sanitize_payload,
};

/// Sanitize untrusted chat messages and classify embedded media links.
#[derive(Parser, Debug)]
#[command(
    name = "chatshield",
    version = env!("CARGO_PKG_VERSION"),
    about = "chatshield - sanitize chat messages and detect embeddable media"
)]
pub struct Cli {
    /// Path to a JSON5 config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sanitize a message and print the payload as JSON.
    Sanitize {
        /// Message (JSON object text or plain text). Read from stdin if omitted.
        message: Option<String>,

        /// Treat stdin as one message per line and print one payload per line.
        #[arg(long, conflicts_with = "message")]
        lines: bool,
    },

    /// Print the media classification of a URL (`null` when none).
    Classify {
        url: String,
    },

    /// Print the sanitized form of a color value.
    Color {
        value: String,
    },

    /// Print whether a value looks like a phone number.
    Phone {
        value: String,
    },

    /// Print version, build date, and git commit information.
    Version,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load config, set up logging, and dispatch the subcommand.
pub fn run(cli: Cli) -> CliResult {
    let cfg = config::load_config(cli.config.as_deref())?;
    logging::init_logging(&cfg.logging)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Sanitize { message, lines } => {
            let stdin = io::stdin();
            handle_sanitize(message, lines, &cfg.output, stdin.lock(), &mut out)
        }
        Command::Classify { url } => handle_classify(&url, &mut out),
        Command::Color { value } => handle_color(&value, &mut out),
        Command::Phone { value } => handle_phone(&value, &mut out),
        Command::Version => handle_version(&mut out),
    }
}

// ---------------------------------------------------------------------------
// Subcommand handlers
// ---------------------------------------------------------------------------

/// Run the `sanitize` subcommand.
pub fn handle_sanitize(
    message: Option<String>,
    lines: bool,
    output: &OutputConfig,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> CliResult {
    if lines {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            writeln!(out, "{}", sanitize_message(&Value::String(line)))?;
        }
        return Ok(());
    }

    let message = match message {
        Some(message) => message,
        None => {
            let mut buf = String::new();
            input.read_to_string(&mut buf)?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let value = Value::String(message);
    let rendered = if output.pretty {
        serde_json::to_string_pretty(&sanitize_payload(&value))?
    } else {
        sanitize_message(&value)
    };
    writeln!(out, "{}", rendered)?;
    Ok(())
}

/// Run the `classify <url>` subcommand.
pub fn handle_classify(url: &str, out: &mut impl Write) -> CliResult {
    let media = classify_url(url);
    writeln!(out, "{}", serde_json::to_string(&media)?)?;
    Ok(())
}

/// Run the `color <value>` subcommand.
pub fn handle_color(value: &str, out: &mut impl Write) -> CliResult {
    writeln!(out, "{}", sanitize_color(value))?;
    Ok(())
}

/// Run the `phone <value>` subcommand.
pub fn handle_phone(value: &str, out: &mut impl Write) -> CliResult {
    writeln!(out, "{}", is_valid_phone_number(value))?;
    Ok(())
}

/// Run the `version` subcommand.
pub fn handle_version(out: &mut impl Write) -> CliResult {
    writeln!(
        out,
        "chatshield {} (commit {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("CHATSHIELD_GIT_HASH"),
        env!("CHATSHIELD_BUILD_DATE"),
    )?;
    Ok(())
}
