//! Logging utilities for the application
//!
//! Stage logs are emitted through `tracing`; error constructors log through the
//! `log` facade, which the subscriber installed here bridges into the same
//! output.
//!
//! The filter is taken from `RUST_LOG` when set, otherwise from the configured
//! level (`--log-level` / `LOG_LEVEL`), otherwise `info`.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Picks the filter directive from `RUST_LOG`, the configured level or the default
fn resolve_filter_directive(rust_log: Option<&str>, level: Option<&str>) -> String {
	rust_log
		.filter(|directive| !directive.trim().is_empty())
		.or(level.filter(|level| !level.trim().is_empty()))
		.unwrap_or(DEFAULT_LOG_LEVEL)
		.to_string()
}

/// Setup logging for the application
///
/// Logs are written to stdout.
pub fn setup_logging(
	level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	setup_logging_with_writer(level, std::io::stdout)
}

/// Setup logging for the application with a custom writer
pub fn setup_logging_with_writer<W>(
	level: Option<&str>,
	writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	let rust_log = std::env::var("RUST_LOG").ok();
	let directive = resolve_filter_directive(rust_log.as_deref(), level);

	create_subscriber(&directive, writer).try_init()?;
	Ok(())
}

/// Builds the subscriber for `directive`; an invalid directive falls back to `info`
fn create_subscriber<W>(directive: &str, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

	tracing_subscriber::registry().with(filter).with(
		fmt::layer()
			.with_writer(writer)
			.event_format(
				fmt::format()
					.with_level(true)
					.with_target(true)
					.with_thread_ids(false)
					.with_thread_names(false)
					.with_ansi(true)
					.compact(),
			)
			.fmt_fields(fmt::format::PrettyFields::new()),
	)
}
