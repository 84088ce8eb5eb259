pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_app_config, resolve_app_paths};
pub use wiring::wire_dependencies;
