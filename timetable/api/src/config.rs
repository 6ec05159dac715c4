use anyhow::Result;
use timetable_common::config::{AccessConfig, DatabaseConfig, LoggingConfig};

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// The path to the config file
	pub config_file: Option<String>,

	/// Name of this instance
	pub name: String,

	/// The logging config
	pub logging: LoggingConfig,

	/// The database config
	pub database: DatabaseConfig,

	/// The access layer config
	pub access: AccessConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			config_file: Some("config".to_string()),
			name: "timetable-api".to_string(),
			logging: LoggingConfig::default(),
			database: DatabaseConfig::default(),
			access: AccessConfig::default(),
		}
	}
}

impl AppConfig {
	/// Loads the config from an optional TOML file and `TIMETABLE__` prefixed
	/// environment variables, with `__` separating nesting levels. Environment
	/// variables win over the file, the file over the defaults.
	pub fn parse(config_file: Option<&str>) -> Result<Self> {
		let mut builder = config::Config::builder();

		if let Some(config_file) = config_file {
			builder = builder.add_source(config::File::with_name(config_file).required(false));
		}

		let config = builder
			.add_source(
				config::Environment::with_prefix("TIMETABLE")
					.separator("__")
					.try_parsing(true),
			)
			.build()?;

		Ok(config.try_deserialize()?)
	}
}
