//! Human readable progress output on standard error

use super::Writer;
use crate::journal::{Group, Journal, Severity, Test, TestStatus};
use console::{style, Color};
use std::io::{self, Write};

const SEPARATOR: &str = "---------------------------------";

/// Writer that prints group and test progress as the journal runs.
pub struct ConsoleWriter {
    out: Box<dyn Write>,
    colors_supported: bool,
}

impl ConsoleWriter {
    /// Creates a writer printing to standard error.
    pub fn new() -> Self {
        ConsoleWriter {
            out: Box::new(io::stderr()),
            colors_supported: console::colors_enabled_stderr(),
        }
    }

    /// Creates a writer printing to `out`, without colors.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        ConsoleWriter {
            out,
            colors_supported: false,
        }
    }

    fn word(&self, journal: &Journal, color: Color, word: &str) -> String {
        if journal.use_colors() && self.colors_supported {
            style(word).fg(color).force_styling(true).to_string()
        } else {
            word.to_string()
        }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            tracing::debug!("console writer: {}", e);
        }
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for ConsoleWriter {
    fn end_testsuite(&mut self, journal: &Journal) {
        let stats = journal.stats();
        let summary = format!(
            "\n\nTest suite finished\n \
             {:7} total tests run\n \
             {:7} tests succeeded\n \
             {:7} tests failed\n \
             {:7} tests skipped\n \
             {:7} test suite errors\n",
            stats.num_tests,
            stats.num_succeeded,
            stats.num_failed,
            stats.num_skipped,
            stats.num_errors,
        );
        self.emit(&summary);
    }

    fn begin_group(&mut self, _journal: &Journal, group: &Group) {
        let name = group.description().unwrap_or(group.name());
        self.emit(&format!("\n=== GROUP: {} ===\n", name));
    }

    fn begin_test(&mut self, journal: &Journal, test: &Test) {
        let label = self.word(journal, Color::Blue, "TEST");
        let title = match test.description() {
            Some(description) => description.to_string(),
            None => test.fullname(),
        };
        self.emit(&format!("\n{}\n{}: {}\n", SEPARATOR, label, title));
    }

    fn end_test(&mut self, journal: &Journal, test: &Test) {
        let (word, msg) = match test.status() {
            TestStatus::Success => (self.word(journal, Color::Green, "SUCCESS"), None),
            TestStatus::Failure => (
                self.word(journal, Color::Red, "FAIL"),
                test.get_message(Severity::Failure),
            ),
            TestStatus::Error => (
                self.word(journal, Color::Red, "ERROR"),
                test.get_message(Severity::Error),
            ),
            TestStatus::Skipped => ("SKIPPED".to_string(), None),
            TestStatus::Running => (
                self.word(journal, Color::Red, "ERROR"),
                Some("unexpected test status running"),
            ),
        };

        let mut line = word;
        if let Some(msg) = msg {
            line.push_str(": ");
            line.push_str(msg);
        }
        self.emit(&format!("{}\n\n{}\n", line, SEPARATOR));
    }

    fn message(
        &mut self,
        _journal: &Journal,
        _test: Option<&Test>,
        severity: Severity,
        message: &str,
    ) {
        let line = match severity {
            Severity::Info | Severity::Stdout | Severity::Stderr => format!("{}\n", message),
            Severity::Warning => format!("Warning: {}\n", message),
            Severity::Failure => format!("Failing: {}\n", message),
            Severity::Error => format!("Testsuite error: {}\n", message),
        };
        self.emit(&line);
    }
}
