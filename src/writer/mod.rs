//! Live progress reporting
//!
//! A [`Writer`] observes the journal as tests run. Every hook has a no-op
//! default, so an implementation only overrides what it cares about. Writers
//! never influence the recorded data or the JUnit output.

use crate::journal::{Group, Journal, Severity, Test};

pub mod console;

pub use console::ConsoleWriter;

/// Observer invoked at journal lifecycle boundaries.
pub trait Writer {
    /// A journal was created.
    fn begin_testsuite(&mut self, _journal: &Journal) {}

    /// A journal is being closed.
    fn end_testsuite(&mut self, _journal: &Journal) {}

    fn begin_group(&mut self, _journal: &Journal, _group: &Group) {}

    fn end_group(&mut self, _journal: &Journal, _group: &Group) {}

    fn begin_test(&mut self, _journal: &Journal, _test: &Test) {}

    /// A test was finished; called again if it is finished a second time.
    fn end_test(&mut self, _journal: &Journal, _test: &Test) {}

    /// A message was reported, with the current test if there is one.
    fn message(
        &mut self,
        _journal: &Journal,
        _test: Option<&Test>,
        _severity: Severity,
        _message: &str,
    ) {
    }
}
