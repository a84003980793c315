use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Overrides `--log-level` with a full filter directive, e.g. `lpmsg_transport=trace`.
pub const LOG_ENV: &str = "LPMSG_LOG";

/// Crates whose events follow `--log-level`. Everything else stays at `warn`.
const LPMSG_TARGETS: [&str; 3] = ["lpmsg", "lpmsg_frame", "lpmsg_transport"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Directive string used when `LPMSG_LOG` is unset.
fn default_directives(level: LogLevel) -> String {
    let level = level.as_directive();
    std::iter::once("warn".to_string())
        .chain(LPMSG_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_filter(env_value: Option<&str>, level: LogLevel) -> EnvFilter {
    env_value
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(level)))
}

/// Install the stderr subscriber. Later calls are ignored.
///
/// An unparsable `LPMSG_LOG` falls back to `--log-level`.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let env_value = std::env::var(LOG_ENV).ok();
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(env_value.as_deref(), level))
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}
