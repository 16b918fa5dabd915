//! junit-journal - A journal of test results written as JUnit XML
//!
//! A test program records what it does into a [`Journal`]: groups of tests,
//! the outcome of each test and any messages or captured output along the
//! way. When the program is done, the journal is written out as a JUnit
//! compatible XML report that CI systems can consume.
//!
//! # Architecture
//!
//! - [`journal`]: Journal, groups, tests and their statistics
//! - [`writer`]: Observer hooks fired as the journal progresses, and a console writer
//! - [`junit`]: Mapping of a journal to the JUnit XML tree
//! - [`merge`]: Splicing externally produced reports into a journal
//! - [`xml`]: Owned XML tree with reading and writing through quick-xml
//! - [`config`]: INI configuration of journal settings
//! - [`commands`]: Commands exposed by the command-line tool
//! - [`ui`]: User interface abstraction for command output
//! - [`error`]: Error types and Result alias
//!
//! # Example
//!
//! ```no_run
//! use junit_journal::Journal;
//!
//! # fn main() -> junit_journal::Result<()> {
//! let mut journal = Journal::new("mytest");
//! journal.set_pathname("report.xml");
//!
//! journal.begin_group(Some("net"), Some("network tests"));
//! journal.begin_test(Some("ping"), Some("ping the gateway"));
//! journal.success();
//!
//! journal.begin_test(Some("dns"), None);
//! journal.failure("lookup timed out");
//!
//! journal.write()?;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod escape;
pub mod journal;
pub mod junit;
pub mod merge;
pub mod ui;
pub mod writer;
pub mod xml;

pub use error::{Error, Result};
pub use journal::{Group, Journal, Level, Severity, Stats, Test, TestStatus};
pub use writer::{ConsoleWriter, Writer};
