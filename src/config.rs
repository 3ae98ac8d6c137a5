//! Settings for the dashboard.
//!
//! Layered in increasing precedence: built-in defaults, an optional TOML
//! file, `TEMPWATCH_*` environment variables, and finally the CLI flag.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Default API base URL (the local FastAPI simulation server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Resolved dashboard settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the simulation API; the dashboard queries
    /// `<base_url>/simulate`.
    pub base_url: String,
}

impl Settings {
    /// Load settings, optionally from a config file, with an optional CLI
    /// override for the base URL.
    pub fn load(file: Option<&Path>, base_url_override: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder().set_default("base_url", DEFAULT_BASE_URL)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix("TEMPWATCH"));

        if let Some(url) = base_url_override {
            builder = builder.set_override("base_url", url)?;
        }

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_file_or_override() {
        let settings = Settings::load(None, None).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn cli_override_wins() {
        let settings = Settings::load(None, Some("https://api.example.com")).unwrap();
        assert_eq!(settings.base_url, "https://api.example.com");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"http://sim:9000\"").unwrap();

        let settings = Settings::load(Some(file.path()), None).unwrap();
        assert_eq!(settings.base_url, "http://sim:9000");
    }
}
