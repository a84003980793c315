use clap::{Args, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use lpmsg_transport::{DEFAULT_HOST, DEFAULT_PORT};

use crate::exit::{io_error, CliError, CliResult, DATA_INVALID, USAGE};
use crate::output::OutputFormat;

pub mod encode;
pub mod send;
pub mod version;

/// Payload used when neither text nor a file is given.
pub const DEFAULT_PAYLOAD: &str = "Hello World";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a message and send it as one UDP datagram.
    Send(SendArgs),
    /// Encode a message and print the frame without sending it.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Message text (default: "Hello World").
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,
    /// Read the message text from a UTF-8 file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Destination host name or IP address.
    #[arg(long, env = "LPMSG_HOST", default_value = DEFAULT_HOST)]
    pub host: String,
    /// Destination UDP port.
    #[arg(long, env = "LPMSG_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Write timeout for the send (e.g. 5s, 500ms).
    #[arg(long, value_name = "DURATION")]
    pub write_timeout: Option<String>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn resolve_payload(args: &PayloadArgs) -> CliResult<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        let bytes = fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        return String::from_utf8(bytes).map_err(|err| {
            CliError::new(
                DATA_INVALID,
                format!("{} is not valid UTF-8: {err}", path.display()),
            )
        });
    }
    Ok(DEFAULT_PAYLOAD.to_string())
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}
