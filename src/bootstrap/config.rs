//! # Configuration bootstrap
//!
//! Resolves where things live, then hands off to the layered loader in
//! `ct-infra`. No validation here.

use std::path::PathBuf;

use ct_app::app_paths::AppPaths;
use ct_core::config::AppConfig;
use ct_infra::config::{data_local_root, load_config, CONFIG_PATH_ENV};

/// Application paths under the platform local data directory.
pub fn resolve_app_paths() -> anyhow::Result<AppPaths> {
    Ok(AppPaths::from_data_root(&data_local_root()?))
}

/// `COTALIB_CONFIG` wins over the default location.
pub fn resolve_config_path(paths: &AppPaths, override_path: Option<String>) -> PathBuf {
    match override_path {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => paths.config_path.clone(),
    }
}

pub fn load_app_config(paths: &AppPaths) -> anyhow::Result<AppConfig> {
    let config_path = resolve_config_path(paths, std::env::var(CONFIG_PATH_ENV).ok());
    load_config(Some(&config_path), &paths.session_path)
}
