//! Groups of test cases

use super::common::{Autoname, Common, Properties};
use super::stats::Stats;
use super::test_case::Test;
use crate::xml::Node;
use std::time::Duration;

/// A named collection of tests, reported as one JUnit `testsuite`.
#[derive(Debug, Clone)]
pub struct Group {
    common: Common,
    id: usize,
    hostname: String,
    autoname: Autoname,
    pub(crate) stats: Stats,
    pub(crate) tests: Vec<Test>,
    properties: Properties,
    pub(crate) merged: Option<Node>,
}

impl Group {
    pub(crate) fn new(
        name: impl Into<String>,
        description: Option<String>,
        id: usize,
        hostname: impl Into<String>,
    ) -> Self {
        Group {
            common: Common::new(name, description),
            id,
            hostname: hostname.into(),
            autoname: Autoname::new("test"),
            stats: Stats::default(),
            tests: Vec::new(),
            properties: Properties::default(),
            merged: None,
        }
    }

    /// Fully qualified name, `<journal>.<group>`.
    pub fn name(&self) -> &str {
        self.common.name()
    }

    pub fn description(&self) -> Option<&str> {
        self.common.description()
    }

    /// Position of this group within its journal.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn duration(&self) -> Duration {
        self.common.duration()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Sets a property reported with this group's testsuite.
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.set(key, value);
    }

    /// The externally produced `testsuite` elements that replace this group in the report.
    pub fn merged(&self) -> Option<&Node> {
        self.merged.as_ref()
    }

    pub(crate) fn next_test_tag(&mut self) -> String {
        self.autoname.next_name()
    }

    pub(crate) fn update_duration(&mut self) {
        self.common.update_duration();
    }
}
