//! Layered CLI configuration
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `hospital.toml` in the working directory (optional)
//! 3. `HOSPITAL_*` environment variables, `__` separating sections
//!    (`HOSPITAL_DATABASE__PATH` sets `database.path`)
//!
//! A `.env` file in the working directory is loaded into the environment
//! first. The `--db` flag overrides `database.path` after loading.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use hospital_core::errors::{ExError, ExErrorKind};
use hospital_core::logging_facility::Profile;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "hospital.toml";
pub const ENV_PREFIX: &str = "HOSPITAL";

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub profile: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Base directory for relative CSV paths
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HospitalConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub export: ExportConfig,
}

fn config_error(err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(err.to_string())
}

impl HospitalConfig {
    /// Load `.env`, then build the layered configuration rooted at `dir`
    pub fn load_with_dotenv(dir: &Path) -> Result<Self, ExError> {
        let env_path = dir.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path).map_err(config_error)?;
        }
        Self::load(dir)
    }

    /// Build the configuration from defaults, `dir/hospital.toml` and the
    /// environment
    ///
    /// # Errors
    ///
    /// `Config` if a source cannot be read or a value has the wrong type.
    pub fn load(dir: &Path) -> Result<Self, ExError> {
        Config::builder()
            .set_default("database.path", ".hospital/hospital.db")
            .and_then(|b| b.set_default("logging.profile", "development"))
            .and_then(|b| b.set_default("export.directory", "."))
            .map_err(config_error)?
            .add_source(File::from(dir.join(CONFIG_FILE)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)
    }

    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database.path = path;
        }
        self
    }

    /// # Errors
    ///
    /// `Config` for an unknown profile name.
    pub fn profile(&self) -> Result<Profile, ExError> {
        self.logging.profile.parse().map_err(config_error)
    }

    /// Absolute paths are kept; relative ones land under `export.directory`
    pub fn export_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.export.directory.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = HospitalConfig::load(dir.path()).unwrap();
        assert_eq!(cfg.logging.profile, "development");
        assert_eq!(cfg.export.directory, PathBuf::from("."));
        assert_eq!(cfg.profile().unwrap(), Profile::Development);
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[database]\npath = \"custom.db\"\n\n[export]\ndirectory = \"exports\"\n",
        )
        .unwrap();

        let cfg = HospitalConfig::load(dir.path()).unwrap();
        assert_eq!(cfg.database.path, PathBuf::from("custom.db"));
        assert_eq!(cfg.export_path(Path::new("a.csv")), PathBuf::from("exports/a.csv"));
        assert_eq!(cfg.logging.profile, "development");
    }

    #[test]
    fn test_flag_overrides_database_path() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = HospitalConfig::load(dir.path())
            .unwrap()
            .with_database_path(Some(PathBuf::from("flag.db")));
        assert_eq!(cfg.database.path, PathBuf::from("flag.db"));
    }

    #[test]
    fn test_unknown_profile_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[logging]\nprofile = \"loud\"\n").unwrap();

        let err = HospitalConfig::load(dir.path()).unwrap().profile().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Config);
    }
}
