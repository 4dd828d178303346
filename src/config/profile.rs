//! User profile: subscription and configured argument defaults.
//!
//! The profile is a small TOML file:
//!
//! ```toml
//! subscription = "00000000-0000-0000-0000-000000000000"
//!
//! [defaults]
//! group = "my-rg"
//! sql-server = "my-server"
//! ```
//!
//! It is located through `AZSQL_CONFIG`, falling back to
//! `~/.azsql/config.toml` when that file exists.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the profile file.
pub const CONFIG_ENV: &str = "AZSQL_CONFIG";

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profile {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    /// Subscription used when building resource ids.
    #[serde(default)]
    pub subscription: Option<String>,

    /// Configured defaults, keyed like `group` or `sql-server`.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the profile named by `AZSQL_CONFIG`, or the per-user file if
    /// present, or an empty profile.
    pub fn load_default() -> Result<Self, ProfileError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        match dirs::home_dir() {
            Some(home) => Self::load_from_home(&home),
            None => Ok(Self::default()),
        }
    }

    /// `~/.azsql/config.toml` under `home`, or an empty profile when that
    /// file does not exist.
    pub fn load_from_home(home: &Path) -> Result<Self, ProfileError> {
        let path = user_profile_path(home);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn default_for(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(String::as_str)
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }
}

fn user_profile_path(home: &Path) -> PathBuf {
    home.join(".azsql").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_profile_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "subscription = \"sub-1\"\n\n[defaults]\ngroup = \"rg\"\nsql-server = \"srv\""
        )
        .unwrap();

        let profile = Profile::load(file.path()).unwrap();
        assert_eq!(profile.subscription.as_deref(), Some("sub-1"));
        assert_eq!(profile.default_for("group"), Some("rg"));
        assert_eq!(profile.default_for("sql-server"), Some("srv"));
        assert_eq!(profile.default_for("sql-job-agent"), None);
    }

    #[test]
    fn test_empty_profile_is_valid() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(Profile::load(file.path()).unwrap(), Profile::default());
    }

    #[test]
    fn test_malformed_profile_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "subscription = ").unwrap();
        let err = Profile::load(file.path()).unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_per_user_profile_under_home() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join(".azsql")).unwrap();
        std::fs::write(
            home.path().join(".azsql").join("config.toml"),
            "subscription = \"s\"\n",
        )
        .unwrap();

        let profile = Profile::load_from_home(home.path()).unwrap();
        assert_eq!(profile.subscription.as_deref(), Some("s"));
    }

    #[test]
    fn test_no_per_user_profile_is_empty() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(Profile::load_from_home(home.path()).unwrap(), Profile::default());
    }

    #[test]
    fn test_missing_profile_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Profile::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ProfileError::Io { .. }));
    }
}
