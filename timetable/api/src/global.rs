use timetable_common::global::{GlobalConfig, GlobalConfigProvider, GlobalDb};

use crate::config::AppConfig;

pub trait ApiGlobal: GlobalConfigProvider<AppConfig> + GlobalConfig + GlobalDb + Send + Sync + 'static {}

impl<T> ApiGlobal for T where T: GlobalConfigProvider<AppConfig> + GlobalConfig + GlobalDb + Send + Sync + 'static {}
