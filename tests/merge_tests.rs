//! Merging external reports into a journal

use junit_journal::merge::merge_files;
use junit_journal::xml::Document;
use junit_journal::{Error, Journal};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXTERNAL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<testsuites name="external">
  <testsuite name="alpha" package="ext.alpha" tests="1">
    <testcase classname="ext.alpha" name="one" time="0.5"/>
  </testsuite>
  <testsuite name="beta" package="ext.beta" tests="0"/>
</testsuites>
"#;

fn write_report(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn suite_names(doc: &Document) -> Vec<String> {
    doc.root()
        .child("testsuites")
        .unwrap()
        .children()
        .iter()
        .map(|n| n.attr("name").unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_merged_suites_replace_group() {
    let temp = TempDir::new().unwrap();
    let path = write_report(&temp, "external.xml", EXTERNAL);

    let mut journal = Journal::new("j");
    journal.begin_group(Some("wrapper"), None);
    assert_eq!(journal.merge(&path).unwrap(), 2);

    let doc = Document::parse(&journal.to_xml_string().unwrap()).unwrap();
    assert_eq!(suite_names(&doc), vec!["alpha", "beta"]);

    let spliced = doc.root().child("testsuites").unwrap().children();
    assert_eq!(spliced[0].attr("package"), Some("ext.alpha"));
    assert_eq!(spliced[0].attr("tests"), Some("1"));
    assert_eq!(spliced[1].attr("package"), Some("ext.beta"));
    assert_eq!(spliced[1].attr("tests"), Some("0"));
    // No attributes are added to merged suites.
    assert_eq!(spliced[1].attrs().count(), 3);

    let testcase = spliced[0].child("testcase").unwrap();
    assert_eq!(testcase.attr("name"), Some("one"));
    assert_eq!(testcase.attr("time"), Some("0.5"));
}

#[test]
fn test_merged_attribute_whitespace_survives() {
    let temp = TempDir::new().unwrap();
    let path = write_report(
        &temp,
        "external.xml",
        r#"<testsuites><testsuite name="a&#10;b"/></testsuites>"#,
    );

    let mut journal = Journal::new("j");
    journal.merge(&path).unwrap();

    let text = journal.to_xml_string().unwrap();
    assert!(text.contains(r#"name="a&#10;b""#));
    let doc = Document::parse(&text).unwrap();
    assert_eq!(suite_names(&doc), vec!["a\nb"]);
}

#[test]
fn test_merged_suites_keep_position() {
    let temp = TempDir::new().unwrap();
    let path = write_report(&temp, "external.xml", EXTERNAL);

    let mut journal = Journal::new("j");
    journal.begin_group(Some("before"), Some("before"));
    journal.begin_test(None, None);
    journal.success();

    journal.begin_group(Some("wrapper"), None);
    journal.merge(&path).unwrap();

    journal.begin_group(Some("after"), Some("after"));
    journal.begin_test(None, None);
    journal.success();

    let doc = Document::parse(&journal.to_xml_string().unwrap()).unwrap();
    assert_eq!(suite_names(&doc), vec!["before", "alpha", "beta", "after"]);
}

#[test]
fn test_repeated_merge_accumulates() {
    let temp = TempDir::new().unwrap();
    let path = write_report(&temp, "external.xml", EXTERNAL);

    let mut journal = Journal::new("j");
    journal.merge(&path).unwrap();
    journal.merge(&path).unwrap();

    let doc = Document::parse(&journal.to_xml_string().unwrap()).unwrap();
    assert_eq!(suite_names(&doc).len(), 4);
    assert_eq!(journal.groups().len(), 1);
}

#[test]
fn test_write_can_repeat_after_merge() {
    let temp = TempDir::new().unwrap();
    let path = write_report(&temp, "external.xml", EXTERNAL);

    let mut journal = Journal::new("j");
    journal.merge(&path).unwrap();

    let first = journal.to_xml_string().unwrap();
    let second = journal.to_xml_string().unwrap();
    assert_eq!(
        suite_names(&Document::parse(&first).unwrap()),
        suite_names(&Document::parse(&second).unwrap())
    );
}

#[test]
fn test_unreadable_report() {
    let temp = TempDir::new().unwrap();
    let path = write_report(&temp, "broken.xml", "<testsuites><testsuite>");

    let mut journal = Journal::new("j");
    let err = journal.merge(&path).unwrap_err();
    match err {
        Error::MergeRead { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_merge_files_on_disk() {
    let temp = TempDir::new().unwrap();
    let primary = write_report(
        &temp,
        "primary.xml",
        r#"<testsuites name="main"><testsuite name="local"/></testsuites>"#,
    );
    let secondary = write_report(&temp, "secondary.xml", EXTERNAL);

    assert!(merge_files(&primary, &secondary).unwrap());

    let doc = Document::read(&primary).unwrap();
    assert_eq!(suite_names(&doc), vec!["local", "alpha", "beta"]);
    assert_eq!(
        doc.root().child("testsuites").unwrap().attr("name"),
        Some("main")
    );
}
