//! Metadata shared by journals, groups and tests, and default-name generation

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Name, description and timing of a journal, group or test.
#[derive(Debug, Clone)]
pub struct Common {
    name: String,
    description: Option<String>,
    timestamp: DateTime<Local>,
    started: Instant,
    duration: Duration,
}

impl Common {
    /// Creates metadata stamped with the current time.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Common {
            name: name.into(),
            description,
            timestamp: Local::now(),
            started: Instant::now(),
            duration: Duration::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Wall-clock time at which this entity was created.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Duration as of the last call to [`Common::update_duration`].
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Recomputes the duration as the time elapsed since creation.
    pub fn update_duration(&mut self) {
        self.duration = self.started.elapsed();
    }
}

/// Produces locally unique names of the form `<base><number>`.
#[derive(Debug, Clone)]
pub struct Autoname {
    base: String,
    index: u32,
}

impl Autoname {
    pub fn new(base: impl Into<String>) -> Self {
        Autoname {
            base: base.into(),
            index: 0,
        }
    }

    /// Returns the next name and advances the counter.
    pub fn next_name(&mut self) -> String {
        let name = format!("{}{}", self.base, self.index);
        self.index += 1;
        name
    }

    /// Changes the base used for subsequent names; the counter keeps running.
    pub fn set_base(&mut self, base: impl Into<String>) {
        self.base = base.into();
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

/// Ordered key/value pairs; setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(Vec<(String, String)>);

impl Properties {
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
