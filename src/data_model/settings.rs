use crate::config::MonitorConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub host: String,
    pub config: MonitorConfig,
    pub log_file: Option<PathBuf>,
    pub json: bool,
}
