use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

type ReloadHandle = Box<dyn Fn(&str) -> Result<(), LoggingError> + Sync + Send>;

static RELOAD_HANDLE: OnceCell<ReloadHandle> = OnceCell::new();

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Default,
	Json,
	Pretty,
	Compact,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("invalid logging filter: {0}")]
	InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
	#[error("failed to init logger: {0}")]
	Init(#[from] tracing_subscriber::util::TryInitError),
	#[error("failed to reload logger: {0}")]
	Reload(#[from] tracing_subscriber::reload::Error),
}

/// Installs the global subscriber. The first call decides the output mode;
/// later calls only reload the filter, so tests can call this repeatedly.
pub fn init(level: &str, mode: Mode) -> Result<(), LoggingError> {
	let reload = RELOAD_HANDLE.get_or_try_init(|| {
		let (filter, handle) = tracing_subscriber::reload::Layer::new(EnvFilter::from_str(level)?);

		let registry = tracing_subscriber::registry().with(filter);

		match mode {
			Mode::Default => {
				registry
					.with(fmt::layer().with_line_number(true).with_file(true))
					.try_init()?;
			}
			Mode::Json => {
				registry
					.with(fmt::layer().json().with_line_number(true).with_file(true))
					.try_init()?;
			}
			Mode::Pretty => {
				registry
					.with(fmt::layer().pretty().with_line_number(true).with_file(true))
					.try_init()?;
			}
			Mode::Compact => {
				registry
					.with(fmt::layer().compact().with_line_number(true).with_file(true))
					.try_init()?;
			}
		}

		Ok::<_, LoggingError>(Box::new(move |level: &str| {
			let level = EnvFilter::from_str(level)?;
			handle.reload(level)?;
			Ok(())
		}) as ReloadHandle)
	})?;

	reload(level)?;

	Ok(())
}
