//! Test case data structures

use super::common::Common;
use std::fmt;
use std::time::Duration;

/// Status of a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    /// Test has begun and not been finished yet.
    Running,
    /// Test passed successfully.
    Success,
    /// Test failed an assertion or expectation.
    Failure,
    /// Test could not be executed properly.
    Error,
    /// Test was skipped.
    Skipped,
}

impl TestStatus {
    /// Returns true for every status other than [`TestStatus::Running`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TestStatus::Running)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Running => write!(f, "running"),
            TestStatus::Success => write!(f, "success"),
            TestStatus::Failure => write!(f, "failure"),
            TestStatus::Error => write!(f, "error"),
            TestStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Severity of a message attached to a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Failure,
    Error,
    Stdout,
    Stderr,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Failure => write!(f, "failure"),
            Severity::Error => write!(f, "error"),
            Severity::Stdout => write!(f, "stdout"),
            Severity::Stderr => write!(f, "stderr"),
        }
    }
}

/// One severity-tagged message recorded on a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub severity: Severity,
    pub message: String,
}

/// Outcome of asking a test to change its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    /// The test left `Running` with this call.
    Finished,
    /// The test already had the requested status.
    Refinished,
    /// The test already has a different terminal status, which was kept.
    Conflict(TestStatus),
}

/// A single test case within a group.
#[derive(Debug, Clone)]
pub struct Test {
    common: Common,
    tag: String,
    status: TestStatus,
    infos: Vec<Info>,
}

impl Test {
    pub(crate) fn new(name: impl Into<String>, tag: String, description: Option<String>) -> Self {
        Test {
            common: Common::new(name, description),
            tag,
            status: TestStatus::Running,
            infos: Vec::new(),
        }
    }

    /// The test name, reported as the JUnit `classname`.
    pub fn name(&self) -> &str {
        self.common.name()
    }

    pub fn description(&self) -> Option<&str> {
        self.common.description()
    }

    /// Name unique within the owning group (`test0`, `test1`, ...).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// `name.tag`, unique within the journal.
    pub fn fullname(&self) -> String {
        format!("{}.{}", self.common.name(), self.tag)
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TestStatus::Running
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn duration(&self) -> Duration {
        self.common.duration()
    }

    /// All recorded messages, in the order they were logged.
    pub fn infos(&self) -> &[Info] {
        &self.infos
    }

    /// Returns the first message recorded with `severity`.
    pub fn get_message(&self, severity: Severity) -> Option<&str> {
        self.infos
            .iter()
            .find(|info| info.severity == severity)
            .map(|info| info.message.as_str())
    }

    /// Iterates over every message recorded with `severity`.
    pub fn messages(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.infos
            .iter()
            .filter(move |info| info.severity == severity)
            .map(|info| info.message.as_str())
    }

    /// Appends a message; never changes the status.
    pub fn log(&mut self, severity: Severity, message: impl Into<String>) {
        self.infos.push(Info {
            severity,
            message: message.into(),
        });
    }

    pub(crate) fn finish(&mut self, status: TestStatus) -> Transition {
        if self.status.is_terminal() && self.status != status {
            return Transition::Conflict(self.status);
        }

        self.common.update_duration();
        let first = self.status == TestStatus::Running;
        self.status = status;
        if first {
            Transition::Finished
        } else {
            Transition::Refinished
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_test() -> Test {
        Test::new("mytest.group0", "test0".to_string(), Some("d".to_string()))
    }

    #[test]
    fn test_new_test_is_running() {
        let test = new_test();
        assert_eq!(test.status(), TestStatus::Running);
        assert!(test.is_running());
        assert_eq!(test.name(), "mytest.group0");
        assert_eq!(test.tag(), "test0");
        assert_eq!(test.fullname(), "mytest.group0.test0");
        assert_eq!(test.description(), Some("d"));
    }

    #[test]
    fn test_finish_transitions() {
        let mut test = new_test();
        assert_eq!(test.finish(TestStatus::Failure), Transition::Finished);
        assert_eq!(test.finish(TestStatus::Failure), Transition::Refinished);
        assert_eq!(
            test.finish(TestStatus::Success),
            Transition::Conflict(TestStatus::Failure)
        );
        assert_eq!(test.status(), TestStatus::Failure);
    }

    #[test]
    fn test_log_preserves_order_and_duplicates() {
        let mut test = new_test();
        test.log(Severity::Failure, "first");
        test.log(Severity::Info, "note");
        test.log(Severity::Failure, "second");
        test.log(Severity::Failure, "first");

        assert_eq!(test.infos().len(), 4);
        assert_eq!(test.get_message(Severity::Failure), Some("first"));
        assert_eq!(test.get_message(Severity::Error), None);
        assert_eq!(
            test.messages(Severity::Failure).collect::<Vec<_>>(),
            vec!["first", "second", "first"]
        );
        assert_eq!(test.status(), TestStatus::Running);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(TestStatus::Running.to_string(), "running");
        assert_eq!(TestStatus::Success.to_string(), "success");
        assert_eq!(TestStatus::Failure.to_string(), "failure");
        assert_eq!(TestStatus::Error.to_string(), "error");
        assert_eq!(TestStatus::Skipped.to_string(), "skipped");
    }

    #[test]
    fn test_is_terminal() {
        assert!(!TestStatus::Running.is_terminal());
        assert!(TestStatus::Success.is_terminal());
        assert!(TestStatus::Skipped.is_terminal());
    }
}
