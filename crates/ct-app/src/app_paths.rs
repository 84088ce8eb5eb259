use std::path::{Path, PathBuf};

/// Concrete file locations derived from the application data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_path: PathBuf,
    pub session_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub const APP_DIR_NAME: &'static str = "cotalib";

    /// `data_root` is the platform data directory; paths live under `cotalib/`.
    pub fn from_data_root(data_root: &Path) -> Self {
        let app_root = data_root.join(Self::APP_DIR_NAME);
        Self {
            config_path: app_root.join("config.toml"),
            session_path: app_root.join("session.json"),
            logs_dir: app_root.join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_paths_derives_concrete_locations_from_data_root() {
        let paths = AppPaths::from_data_root(Path::new("/tmp/data"));

        assert_eq!(paths.config_path, PathBuf::from("/tmp/data/cotalib/config.toml"));
        assert_eq!(paths.session_path, PathBuf::from("/tmp/data/cotalib/session.json"));
        assert_eq!(paths.logs_dir, PathBuf::from("/tmp/data/cotalib/logs"));
    }
}
