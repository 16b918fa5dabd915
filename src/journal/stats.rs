//! Per-scope test counters

use super::TestStatus;
use std::ops::AddAssign;

/// Counters for a group or for the whole journal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub num_tests: u32,
    pub num_succeeded: u32,
    pub num_failed: u32,
    pub num_errors: u32,
    pub num_warnings: u32,
    pub num_disabled: u32,
    pub num_skipped: u32,
}

impl Stats {
    /// Counts one test that has reached `status`.
    ///
    /// Only success, failure and error are counted; other statuses are ignored.
    pub fn update(&mut self, status: TestStatus) {
        match status {
            TestStatus::Success => self.num_succeeded += 1,
            TestStatus::Failure => self.num_failed += 1,
            TestStatus::Error => self.num_errors += 1,
            TestStatus::Running | TestStatus::Skipped => {}
        }
    }

    /// Adds every counter of `child` into `self`.
    pub fn aggregate(&mut self, child: &Stats) {
        self.num_tests += child.num_tests;
        self.num_succeeded += child.num_succeeded;
        self.num_failed += child.num_failed;
        self.num_errors += child.num_errors;
        self.num_warnings += child.num_warnings;
        self.num_disabled += child.num_disabled;
        self.num_skipped += child.num_skipped;
    }
}

impl AddAssign<&Stats> for Stats {
    fn add_assign(&mut self, rhs: &Stats) {
        self.aggregate(rhs);
    }
}
