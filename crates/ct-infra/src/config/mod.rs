//! # Configuration Loader
//!
//! Layers, later wins:
//!
//! 1. built-in defaults
//! 2. optional TOML file
//! 3. `COTALIB_*` environment (`__` separates nested keys, e.g. `COTALIB_SMTP__HOST`)
//! 4. `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS`, `SMTP_FROM`, `SMTP_TO`
//!
//! Environment values stay strings until deserialization, so credentials such
//! as `SMTP_PASS=0123456` arrive exactly as written.
//!
//! No validation happens here: an empty SMTP host is a fact the relay will
//! report when it tries to send.

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, Map};

use ct_core::config::AppConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_RELAY_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "COTALIB_CONFIG";

/// Platform local data directory, the root every application path hangs off.
pub fn data_local_root() -> anyhow::Result<PathBuf> {
    dirs::data_local_dir().context("Failed to resolve the local data directory")
}

/// Load from `config_path` (if any) and the process environment.
pub fn load_config(
    config_path: Option<&Path>,
    default_session_path: &Path,
) -> anyhow::Result<AppConfig> {
    load_config_from(config_path, default_session_path, None)
}

/// Same as [`load_config`], reading variables from `env` instead of the
/// process environment when given.
pub fn load_config_from(
    config_path: Option<&Path>,
    default_session_path: &Path,
    env: Option<Map<String, String>>,
) -> anyhow::Result<AppConfig> {
    let mut builder = defaults(default_session_path)?;

    if let Some(path) = config_path {
        builder = builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    let config = builder
        .add_source(
            Environment::with_prefix("COTALIB")
                .prefix_separator("_")
                .separator("__")
                .source(env.clone()),
        )
        .add_source(
            Environment::with_prefix("SMTP")
                .keep_prefix(true)
                .separator("_")
                .source(env),
        )
        .build()
        .context("Failed to assemble configuration sources")?;

    config
        .try_deserialize::<AppConfig>()
        .context("Failed to map configuration onto AppConfig")
}

fn defaults(
    default_session_path: &Path,
) -> anyhow::Result<ConfigBuilder<config::builder::DefaultState>> {
    let builder = Config::builder()
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("relay_bind_addr", DEFAULT_RELAY_BIND_ADDR)?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
        .set_default(
            "session_store_path",
            default_session_path.to_string_lossy().into_owned(),
        )?
        .set_default("smtp.host", "")?
        .set_default("smtp.port", i64::from(DEFAULT_SMTP_PORT))?
        .set_default("smtp.user", "")?
        .set_default("smtp.pass", "")?
        .set_default("smtp.from", "")?
        .set_default("smtp.to", "")?;
    Ok(builder)
}
