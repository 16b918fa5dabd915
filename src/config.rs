//! Journal configuration file parsing
//!
//! The configuration file uses INI format with a `[journal]` section:
//!
//! ```ini
//! [journal]
//! pathname=results/junit.xml
//! hostname=builder-04
//! max_name_level=test
//! systemout_level=group
//! color=yes
//! auto_group_name=suite
//! ```

use crate::error::{Error, Result};
use crate::journal::{Journal, Level};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings applied to a [`Journal`] after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalConfig {
    /// File the report is written to
    pub pathname: Option<PathBuf>,

    /// Hostname reported instead of the local one
    pub hostname: Option<String>,

    /// Whether per-test names are kept
    pub max_name_level: Option<Level>,

    /// Where captured output is attached
    pub systemout_level: Option<Level>,

    /// Colored console output
    pub color: Option<bool>,

    /// Prefix for anonymous group names
    pub auto_group_name: Option<String>,
}

/// Raw `[journal]` section, before value validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSection {
    pathname: Option<String>,
    hostname: Option<String>,
    max_name_level: Option<String>,
    systemout_level: Option<String>,
    color: Option<String>,
    auto_group_name: Option<String>,
}

impl JournalConfig {
    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from a string
    pub fn parse(contents: &str) -> Result<Self> {
        let ini: HashMap<String, HashMap<String, String>> = serde_ini::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse configuration: {}", e)))?;

        let section = ini
            .get("journal")
            .ok_or_else(|| Error::Config("No [journal] section in configuration".to_string()))?;

        let raw = RawSection {
            pathname: section.get("pathname").cloned(),
            hostname: section.get("hostname").cloned(),
            max_name_level: section.get("max_name_level").cloned(),
            systemout_level: section.get("systemout_level").cloned(),
            color: section.get("color").cloned(),
            auto_group_name: section.get("auto_group_name").cloned(),
        };

        Ok(JournalConfig {
            pathname: non_empty(raw.pathname).map(PathBuf::from),
            hostname: non_empty(raw.hostname),
            max_name_level: parse_level("max_name_level", raw.max_name_level)?,
            systemout_level: parse_level("systemout_level", raw.systemout_level)?,
            color: parse_bool("color", raw.color)?,
            auto_group_name: non_empty(raw.auto_group_name),
        })
    }

    /// Applies every configured setting to `journal`.
    pub fn apply(&self, journal: &mut Journal) {
        if let Some(pathname) = &self.pathname {
            journal.set_pathname(pathname);
        }
        if let Some(hostname) = &self.hostname {
            journal.set_hostname(hostname.as_str());
        }
        if let Some(level) = self.max_name_level {
            journal.set_max_name_level(level);
        }
        if let Some(level) = self.systemout_level {
            journal.set_systemout_level(level);
        }
        if let Some(color) = self.color {
            journal.set_color(color);
        }
        if let Some(base) = &self.auto_group_name {
            journal.set_auto_group_name(base.as_str());
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_level(key: &str, value: Option<String>) -> Result<Option<Level>> {
    match non_empty(value) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("{}: {}", key, e))),
    }
}

fn parse_bool(key: &str, value: Option<String>) -> Result<Option<bool>> {
    match non_empty(value).map(|v| v.to_ascii_lowercase()).as_deref() {
        None => Ok(None),
        Some("1" | "yes" | "true" | "on") => Ok(Some(true)),
        Some("0" | "no" | "false" | "off") => Ok(Some(false)),
        Some(other) => Err(Error::Config(format!(
            "{}: expected a boolean, got \"{}\"",
            key, other
        ))),
    }
}
