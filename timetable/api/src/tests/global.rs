use std::sync::Arc;

use timetable_common::global::{GlobalConfig, GlobalConfigProvider, GlobalDb};
use timetable_common::logging;

use crate::config::AppConfig;

pub struct GlobalState {
	config: AppConfig,
	db: Arc<sqlx::PgPool>,
}

impl GlobalConfigProvider<AppConfig> for GlobalState {
	fn provide_config(&self) -> &AppConfig {
		&self.config
	}
}

impl GlobalConfig for GlobalState {}

impl GlobalDb for GlobalState {
	fn db(&self) -> &Arc<sqlx::PgPool> {
		&self.db
	}
}

pub async fn mock_global_state(config: AppConfig) -> Arc<GlobalState> {
	dotenvy::dotenv().ok();

	let logging_level = std::env::var("LOGGING_LEVEL").unwrap_or_else(|_| "info".to_string());

	logging::init(&logging_level, Default::default()).expect("failed to initialize logging");

	let database_uri = std::env::var("TIMETABLE_DATABASE_URL_TEST").expect("TIMETABLE_DATABASE_URL_TEST must be set");

	let db = Arc::new(
		sqlx::PgPool::connect(&database_uri)
			.await
			.expect("failed to connect to database"),
	);

	crate::MIGRATOR.run(db.as_ref()).await.expect("failed to run migrations");

	Arc::new(GlobalState { config, db })
}
