//! JUnit XML rendering of a journal
//!
//! The document has the shape
//!
//! ```text
//! testsuites            name, time, tests, failures, disabled, errors
//!   testsuite           package, name, timestamp, hostname, time, id, tests, ...
//!     properties/property
//!     testcase          classname, name, time, status
//!       failure | error type, message; text
//!       system-out      text
//!     system-out        (only when output is collected per group)
//! ```
//!
//! A group that has merged an external report contributes that report's
//! `testsuite` elements instead of one of its own.

use crate::journal::{Group, Info, Journal, Level, Properties, Severity, Stats, Test, TestStatus};
use crate::xml::{Document, Node};
use chrono::{DateTime, Local};

/// Builds the JUnit document for `journal` as it currently stands.
///
/// Callers normally go through [`Journal::to_document`], which finishes the
/// journal first so that durations and counters are final.
pub fn build_document(journal: &Journal) -> Document {
    let mut root = Node::new("testsuites");
    root.set_attr("name", journal.name());
    root.set_attr_double("time", journal.duration().as_secs_f64());
    add_stats(&mut root, journal.stats());

    for group in journal.groups() {
        match group.merged() {
            Some(merged) => {
                for suite in merged.children() {
                    root.push(suite.clone());
                }
            }
            None => add_group(&mut root, journal, group),
        }
    }

    let mut doc = Document::new();
    doc.set_root(root);
    doc
}

fn add_group(parent: &mut Node, journal: &Journal, group: &Group) {
    let node = parent.add_child("testsuite");
    node.set_attr("package", group.name());
    node.set_attr("name", group.description().unwrap_or(group.name()));
    node.set_attr("timestamp", format_timestamp(group.common().timestamp()));
    node.set_attr("hostname", group.hostname());
    node.set_attr_double("time", group.duration().as_secs_f64());
    node.set_attr_uint("id", group.id() as u64);
    add_stats(node, group.stats());

    add_properties(node, group.properties(), None);
    add_properties(node, journal.properties(), Some(group.properties()));

    for test in group.tests() {
        let testcase = add_test(node, test);
        if journal.systemout_level() == Level::Test {
            add_test_system_out(testcase, test);
        }
    }

    if journal.systemout_level() == Level::Group {
        add_group_system_out(node, group);
    }
}

fn add_properties(parent: &mut Node, properties: &Properties, except: Option<&Properties>) {
    for (key, value) in properties.iter() {
        if except.is_some_and(|except| except.contains(key)) {
            continue;
        }
        if parent.child("properties").is_none() {
            parent.add_child("properties");
        }
        if let Some(container) = parent.child_mut("properties") {
            let property = container.add_child("property");
            property.set_attr("key", key);
            property.set_attr("value", value);
        }
    }
}

fn add_test<'a>(parent: &'a mut Node, test: &Test) -> &'a mut Node {
    let node = parent.add_child("testcase");
    node.set_attr("classname", test.name());
    node.set_attr("name", test.description().unwrap_or(test.tag()));
    node.set_attr_double("time", test.duration().as_secs_f64());

    let status = match test.status() {
        TestStatus::Success => Some("success"),
        TestStatus::Failure => {
            add_result_element(node, "failure", "randomFailure", test, Severity::Failure);
            Some("failure")
        }
        TestStatus::Error => {
            add_result_element(node, "error", "randomError", test, Severity::Error);
            Some("error")
        }
        TestStatus::Skipped | TestStatus::Running => None,
    };
    if let Some(status) = status {
        node.set_attr("status", status);
    }
    node
}

/// Adds a `failure` or `error` element if the test logged at least one
/// message of `severity`.
fn add_result_element(parent: &mut Node, name: &str, kind: &str, test: &Test, severity: Severity) {
    let Some(first) = test.get_message(severity) else {
        return;
    };

    let mut text = String::new();
    for info in test.infos() {
        if info.severity == severity
            || matches!(info.severity, Severity::Stdout | Severity::Stderr)
        {
            append_info(&mut text, info);
        }
    }

    let node = parent.add_child(name);
    node.set_attr("type", kind);
    node.set_attr("message", first);
    node.set_cdata(text);
}

fn add_test_system_out(parent: &mut Node, test: &Test) {
    let mut text = String::new();
    for info in test.infos() {
        append_info(&mut text, info);
    }
    if !text.is_empty() {
        parent.add_child("system-out").set_cdata(text);
    }
}

fn add_group_system_out(parent: &mut Node, group: &Group) {
    let mut text = String::new();
    for test in group.tests() {
        text.push_str(&format!(
            "# {} ({})\n",
            test.name(),
            test.description().unwrap_or(test.tag())
        ));
        for info in test.infos() {
            append_info(&mut text, info);
        }
    }
    if !text.is_empty() {
        parent.add_child("system-out").set_cdata(text);
    }
}

/// Appends one message, tagged by severity and newline terminated.
fn append_info(text: &mut String, info: &Info) {
    match info.severity {
        Severity::Failure => text.push_str("FAIL: "),
        Severity::Error => text.push_str("ERROR: "),
        Severity::Stdout => text.push_str("standard output:\n"),
        Severity::Stderr => text.push_str("standard error:\n"),
        Severity::Info | Severity::Warning => {}
    }
    text.push_str(&info.message);
    if !info.message.is_empty() && !info.message.ends_with('\n') {
        text.push('\n');
    }
}

fn add_stats(node: &mut Node, stats: &Stats) {
    node.set_attr_uint("tests", stats.num_tests.into());
    node.set_attr_uint("failures", stats.num_failed.into());
    node.set_attr_uint("disabled", stats.num_disabled.into());
    node.set_attr_uint("errors", stats.num_errors.into());
}

/// Local time as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_timestamp(timestamp: DateTime<Local>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}
