//! Tracing initialization.
//!
//! The terminal belongs to the interface, so logs go to a file. The filter
//! comes from `QUICKJUMP_LOG` when set, otherwise from the configured level.

use std::fs::{self, OpenOptions};
use std::sync::{Mutex, Once};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::settings::LogConfig;

const LOG_ENV: &str = "QUICKJUMP_LOG";

static INIT: Once = Once::new();

/// Install the file subscriber. Only the first call has any effect.
pub(crate) fn init(config: &LogConfig) -> Result<()> {
	let mut outcome = Ok(());
	INIT.call_once(|| outcome = install(config));
	outcome
}

fn install(config: &LogConfig) -> Result<()> {
	if let Some(parent) = config.file.parent()
		&& !parent.as_os_str().is_empty()
	{
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&config.file)
		.with_context(|| format!("failed to open log file {}", config.file.display()))?;

	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_ansi(false)
		.with_target(true)
		.with_writer(Mutex::new(file))
		.compact()
		.try_init()
		.map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
	use tempfile::tempdir;

	use super::*;

	#[test]
	fn creates_log_file_and_ignores_repeat_calls() {
		let dir = tempdir().unwrap();
		let config = LogConfig {
			level: "debug".into(),
			file: dir.path().join("nested").join("quickjump.log"),
		};

		init(&config).unwrap();
		assert!(config.file.exists());

		let elsewhere = LogConfig {
			level: "debug".into(),
			file: dir.path().join("other.log"),
		};
		init(&elsewhere).unwrap();
		assert!(!elsewhere.file.exists());
	}
}
