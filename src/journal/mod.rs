//! The test journal
//!
//! A [`Journal`] records one test run. Callers begin groups and tests, report
//! outcomes and messages against whatever test is current, and finally write
//! the journal out as a JUnit report.
//!
//! There is at most one current group and one current test. Beginning a new
//! group or test finishes the previous one (as a success if it was still
//! running), so callers that only ever report failures get a complete report.

use crate::error::Result;
use crate::escape::escape_output;
use crate::writer::Writer;
use crate::xml::Document;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub mod common;
pub mod group;
pub mod stats;
pub mod test_case;

pub use common::{Autoname, Common, Properties};
pub use group::Group;
pub use stats::Stats;
pub use test_case::{Info, Severity, Test, TestStatus};

use test_case::Transition;

/// Granularity used for naming and for placing `system-out` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Group,
    Test,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Group => write!(f, "group"),
            Level::Test => write!(f, "test"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "group" => Ok(Level::Group),
            "test" => Ok(Level::Test),
            other => Err(format!("unknown level \"{}\"", other)),
        }
    }
}

/// Root of a recorded test run.
pub struct Journal {
    common: Common,
    pathname: Option<PathBuf>,
    hostname: String,
    stats: Stats,
    groups: Vec<Group>,
    current_group: Option<usize>,
    current_test: Option<usize>,
    autoname: Autoname,
    properties: Properties,
    max_name_level: Level,
    systemout_level: Level,
    use_colors: bool,
    writer: Option<Box<dyn Writer>>,
    closed: bool,
}

impl fmt::Debug for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("name", &self.common.name())
            .field("pathname", &self.pathname)
            .field("hostname", &self.hostname)
            .field("stats", &self.stats)
            .field("groups", &self.groups.len())
            .field("current_group", &self.current_group)
            .field("current_test", &self.current_test)
            .finish()
    }
}

impl Journal {
    /// Creates a journal without live reporting.
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), None)
    }

    /// Creates a journal reporting progress to `writer`.
    pub fn with_writer(name: impl Into<String>, writer: Box<dyn Writer>) -> Self {
        Self::build(name.into(), Some(writer))
    }

    fn build(name: String, writer: Option<Box<dyn Writer>>) -> Self {
        let mut journal = Journal {
            common: Common::new(name, None),
            pathname: None,
            hostname: local_hostname(),
            stats: Stats::default(),
            groups: Vec::new(),
            current_group: None,
            current_test: None,
            autoname: Autoname::new("group"),
            properties: Properties::default(),
            // Tests take their group's name unless raised to Level::Test.
            max_name_level: Level::Group,
            systemout_level: Level::Test,
            use_colors: false,
            writer,
            closed: false,
        };
        journal.notify(|w, j| w.begin_testsuite(j));
        journal
    }

    pub fn name(&self) -> &str {
        self.common.name()
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn duration(&self) -> Duration {
        self.common.duration()
    }

    pub fn pathname(&self) -> Option<&Path> {
        self.pathname.as_deref()
    }

    /// Sets the file the report is written to; without one it goes to stdout.
    pub fn set_pathname(&mut self, pathname: impl Into<PathBuf>) {
        self.pathname = Some(pathname.into());
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Overrides the hostname for groups begun from now on.
    pub fn set_hostname(&mut self, hostname: impl Into<String>) {
        self.hostname = hostname.into();
    }

    pub fn max_name_level(&self) -> Level {
        self.max_name_level
    }

    /// With [`Level::Test`], names passed to [`Journal::begin_test`] are kept.
    pub fn set_max_name_level(&mut self, level: Level) {
        self.max_name_level = level;
    }

    pub fn systemout_level(&self) -> Level {
        self.systemout_level
    }

    pub fn set_systemout_level(&mut self, level: Level) {
        self.systemout_level = level;
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    pub fn set_color(&mut self, enabled: bool) {
        self.use_colors = enabled;
    }

    /// Changes the prefix used to name anonymous groups.
    pub fn set_auto_group_name(&mut self, base: impl Into<String>) {
        self.autoname.set_base(base);
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Sets a property reported with every group that does not override it.
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.set(key, value);
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn current_group(&self) -> Option<&Group> {
        self.current_group.map(|g| &self.groups[g])
    }

    pub fn current_group_mut(&mut self) -> Option<&mut Group> {
        match self.current_group {
            Some(g) => Some(&mut self.groups[g]),
            None => None,
        }
    }

    pub fn current_test(&self) -> Option<&Test> {
        let (g, t) = self.current_indices()?;
        Some(&self.groups[g].tests[t])
    }

    fn current_test_mut(&mut self) -> Option<&mut Test> {
        let (g, t) = self.current_indices()?;
        Some(&mut self.groups[g].tests[t])
    }

    fn current_indices(&self) -> Option<(usize, usize)> {
        self.current_group.zip(self.current_test)
    }

    fn test_running(&self) -> bool {
        self.current_test().is_some_and(Test::is_running)
    }

    /// Runs `hook` against the writer, if any, with read access to the journal.
    fn notify<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut dyn Writer, &Journal),
    {
        if let Some(mut writer) = self.writer.take() {
            hook(writer.as_mut(), self);
            self.writer = Some(writer);
        }
    }

    /// Begins a new group, finishing the current one first.
    ///
    /// Anonymous groups are named `group0`, `group1`, ...; the group's full
    /// name is always prefixed with the journal name.
    pub fn begin_group(&mut self, name: Option<&str>, description: Option<&str>) -> &Group {
        self.finish_group();

        let name = match name {
            Some(name) => name.to_string(),
            None => self.autoname.next_name(),
        };
        let fullname = format!("{}.{}", self.common.name(), name);

        let id = self.groups.len();
        self.groups.push(Group::new(
            fullname,
            description.map(str::to_string),
            id,
            self.hostname.clone(),
        ));
        self.current_group = Some(id);
        self.current_test = None;

        tracing::debug!(group = %self.groups[id].name(), "begin group");
        self.notify(|w, j| w.begin_group(j, &j.groups[id]));
        &self.groups[id]
    }

    /// Finishes the current group and folds its counters into the journal.
    ///
    /// Does nothing if no group is current.
    pub fn finish_group(&mut self) {
        if self.test_running() {
            self.finish_test(TestStatus::Success);
        }
        self.current_test = None;

        if let Some(g) = self.current_group {
            self.stats.aggregate(&self.groups[g].stats);
            self.groups[g].update_duration();
            tracing::debug!(group = %self.groups[g].name(), "end group");
            self.notify(|w, j| w.end_group(j, &j.groups[g]));
        }
        self.current_group = None;
    }

    /// Begins a new test in the current group, creating a group if needed.
    ///
    /// The test name defaults to the group name, so all tests of a group
    /// share one JUnit classname. A given `name` is only appended when the
    /// max name level is [`Level::Test`].
    pub fn begin_test(&mut self, name: Option<&str>, description: Option<&str>) -> &Test {
        let g = match self.current_group {
            Some(g) => g,
            None => self.begin_group(None, None).id(),
        };

        if self.test_running() {
            self.finish_test(TestStatus::Success);
        }

        let per_test_names = self.max_name_level >= Level::Test;
        let group = &mut self.groups[g];
        let tag = group.next_test_tag();
        let name = match name {
            Some(name) if per_test_names => format!("{}.{}", group.name(), name),
            _ => group.name().to_string(),
        };
        group
            .tests
            .push(Test::new(name, tag, description.map(str::to_string)));
        group.stats.num_tests += 1;

        let t = group.tests.len() - 1;
        self.current_test = Some(t);

        tracing::debug!(test = %self.groups[g].tests[t].fullname(), "begin test");
        self.notify(|w, j| w.begin_test(j, &j.groups[g].tests[t]));
        &self.groups[g].tests[t]
    }

    /// Finishes the current test with `status`.
    ///
    /// A test is counted once, when it first leaves running. Finishing it
    /// again with the same status only refreshes its duration; finishing it
    /// with a different status is refused with a warning.
    pub fn finish_test(&mut self, status: TestStatus) {
        if !status.is_terminal() {
            tracing::warn!("refusing to finish a test as {}", status);
            return;
        }
        let Some((g, t)) = self.current_indices() else {
            return;
        };

        match self.groups[g].tests[t].finish(status) {
            Transition::Conflict(current) => {
                let message = format!("conflicting test stati - {} vs {}", current, status);
                tracing::warn!(test = %self.groups[g].tests[t].fullname(), "{}", message);
                self.log(Severity::Warning, &message);
            }
            transition => {
                if transition == Transition::Finished {
                    self.groups[g].stats.update(status);
                }
                self.notify(|w, j| w.end_test(j, &j.groups[g].tests[t]));
            }
        }
    }

    /// Finishes the current group, if any, and updates the journal duration.
    pub fn finish(&mut self) {
        self.finish_group();
        self.common.update_duration();
    }

    /// Reports a message against the current test.
    ///
    /// Without a current test the message is dropped and the writer is not told.
    pub fn log(&mut self, severity: Severity, message: &str) {
        if self.current_test().is_none() {
            return;
        }
        self.notify(|w, j| w.message(j, j.current_test(), severity, message));
        if let Some(test) = self.current_test_mut() {
            test.log(severity, message);
        }
    }

    pub fn success(&mut self) {
        self.finish_test(TestStatus::Success);
    }

    pub fn success_msg(&mut self, message: &str) {
        self.log(Severity::Info, message);
        self.finish_test(TestStatus::Success);
    }

    pub fn skipped(&mut self) {
        self.finish_test(TestStatus::Skipped);
    }

    /// Records an informational message; the test keeps running.
    pub fn info(&mut self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Records a warning; the test keeps running.
    pub fn warning(&mut self, message: &str) {
        self.log(Severity::Warning, message);
    }

    pub fn failure(&mut self, message: &str) {
        self.log(Severity::Failure, message);
        self.finish_test(TestStatus::Failure);
    }

    pub fn error(&mut self, message: &str) {
        self.log(Severity::Error, message);
        self.finish_test(TestStatus::Error);
    }

    /// Records an error, writes the report and terminates the process.
    pub fn fatal(&mut self, message: &str) -> ! {
        self.abort_with_report(message);
        std::process::exit(1);
    }

    /// Everything `fatal` does short of exiting.
    pub(crate) fn abort_with_report(&mut self, message: &str) {
        self.log(Severity::Error, "FATAL ERROR");
        self.log(Severity::Error, message);
        self.finish_test(TestStatus::Error);

        if let Err(e) = self.write() {
            tracing::error!("{}", e);
        }
    }

    /// Attaches captured standard output to the current test.
    pub fn record_stdout(&mut self, data: &[u8]) {
        self.record_output(Severity::Stdout, data);
    }

    /// Attaches captured standard error to the current test.
    pub fn record_stderr(&mut self, data: &[u8]) {
        self.record_output(Severity::Stderr, data);
    }

    /// Attaches an arbitrary buffer to the current test as an info message.
    pub fn record_buffer(&mut self, data: &[u8]) {
        self.record_output(Severity::Info, data);
    }

    fn record_output(&mut self, severity: Severity, data: &[u8]) {
        if let Some(test) = self.current_test_mut() {
            test.log(severity, escape_output(data));
        }
    }

    /// Returns the index of the current group, beginning an anonymous one if needed.
    pub(crate) fn ensure_group(&mut self) -> usize {
        match self.current_group {
            Some(g) => g,
            None => self.begin_group(None, None).id(),
        }
    }

    pub(crate) fn group_mut(&mut self, index: usize) -> &mut Group {
        &mut self.groups[index]
    }

    /// Includes the `testsuite` elements of another JUnit report in place of
    /// the current group.
    pub fn merge(&mut self, path: &Path) -> Result<usize> {
        crate::merge::merge_report(self, path)
    }

    /// Finishes the journal and builds its JUnit document.
    pub fn to_document(&mut self) -> Document {
        self.finish();
        crate::junit::build_document(self)
    }

    pub fn to_xml_string(&mut self) -> Result<String> {
        self.to_document().to_xml_string()
    }

    pub fn write_to<W: Write>(&mut self, out: W) -> Result<()> {
        self.to_document().print(out)
    }

    /// Writes the report to the configured pathname, or to stdout.
    pub fn write(&mut self) -> Result<()> {
        let doc = self.to_document();
        let result = match &self.pathname {
            Some(path) => doc.write(path).map(|()| path.display().to_string()),
            None => {
                let stdout = io::stdout();
                doc.print(stdout.lock()).map(|()| "<stdout>".to_string())
            }
        };

        match result {
            Ok(target) => {
                tracing::info!("Wrote test doc to {}", target);
                Ok(())
            }
            Err(e) => {
                tracing::error!("unable to write test document: {}", e);
                Err(e)
            }
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.finish();
        self.notify(|w, j| w.end_testsuite(j));
        self.closed = true;
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        self.close();
    }
}

fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}
