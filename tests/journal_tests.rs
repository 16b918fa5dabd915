//! Journal lifecycle tests against the public API

use junit_journal::{Journal, Level, Severity, TestStatus};

#[test]
fn test_default_names_follow_group() {
    let mut journal = Journal::new("mytest");

    let group = journal.begin_group(None, None);
    assert_eq!(group.name(), "mytest.group0");

    let test = journal.begin_test(None, Some("d"));
    assert_eq!(test.name(), "mytest.group0");
    assert_eq!(test.description(), Some("d"));

    journal.success();
    journal.finish();

    let stats = journal.stats();
    assert_eq!(stats.num_tests, 1);
    assert_eq!(stats.num_succeeded, 1);
    assert_eq!(stats.num_failed, 0);
}

#[test]
fn test_named_tests_at_test_level() {
    let mut journal = Journal::new("mytest");
    journal.set_max_name_level(Level::Test);

    journal.begin_group(Some("net"), None);
    assert_eq!(journal.begin_test(Some("ping"), None).name(), "mytest.net.ping");
    assert_eq!(journal.begin_test(None, None).name(), "mytest.net");
}

#[test]
fn test_group_autonames_are_sequential() {
    let mut journal = Journal::new("j");
    let names: Vec<String> = (0..3)
        .map(|_| journal.begin_group(None, None).name().to_string())
        .collect();
    assert_eq!(names, vec!["j.group0", "j.group1", "j.group2"]);
    assert_eq!(journal.groups().len(), 3);
}

#[test]
fn test_tags_are_unique_per_group() {
    let mut journal = Journal::new("j");
    journal.begin_group(Some("a"), None);
    for _ in 0..4 {
        journal.begin_test(None, None);
    }
    journal.finish();

    let tags: Vec<&str> = journal.groups()[0].tests().iter().map(|t| t.tag()).collect();
    assert_eq!(tags, vec!["test0", "test1", "test2", "test3"]);
}

#[test]
fn test_begin_test_finishes_running_test() {
    let mut journal = Journal::new("j");
    journal.begin_test(None, None);
    journal.begin_test(None, None);
    journal.finish();

    let tests = journal.groups()[0].tests();
    assert_eq!(tests[0].status(), TestStatus::Success);
    assert_eq!(tests[1].status(), TestStatus::Success);
    assert_eq!(journal.stats().num_succeeded, 2);
}

#[test]
fn test_conflicting_finish_keeps_first_status() {
    let mut journal = Journal::new("j");
    journal.begin_test(None, None);
    journal.failure("broken");
    journal.success();
    journal.finish();

    let test = &journal.groups()[0].tests()[0];
    assert_eq!(test.status(), TestStatus::Failure);
    let warning = test.get_message(Severity::Warning).unwrap();
    assert_eq!(warning, "conflicting test stati - failure vs success");
    assert_eq!(journal.stats().num_failed, 1);
    assert_eq!(journal.stats().num_succeeded, 0);
}

#[test]
fn test_refinish_with_same_status_counts_once() {
    let mut journal = Journal::new("j");
    journal.begin_test(None, None);
    journal.error("oops");
    journal.finish_test(TestStatus::Error);
    journal.finish();

    assert_eq!(journal.stats().num_errors, 1);
    assert_eq!(journal.stats().num_tests, 1);
}

#[test]
fn test_messages_accumulate_in_order() {
    let mut journal = Journal::new("j");
    journal.begin_test(None, None);
    journal.info("one");
    journal.warning("two");
    journal.failure("three");

    let test = journal.current_test().unwrap();
    let messages: Vec<_> = test
        .infos()
        .iter()
        .map(|i| (i.severity, i.message.as_str()))
        .collect();
    assert_eq!(
        messages,
        vec![
            (Severity::Info, "one"),
            (Severity::Warning, "two"),
            (Severity::Failure, "three"),
        ]
    );
}

#[test]
fn test_journal_stats_sum_groups() {
    let mut journal = Journal::new("j");

    journal.begin_group(Some("a"), None);
    journal.begin_test(None, None);
    journal.success();
    journal.begin_test(None, None);
    journal.failure("f");

    journal.begin_group(Some("b"), None);
    journal.begin_test(None, None);
    journal.error("e");
    journal.begin_test(None, None);
    journal.skipped();
    journal.finish();

    let total = journal.stats();
    assert_eq!(total.num_tests, 4);
    assert_eq!(total.num_succeeded, 1);
    assert_eq!(total.num_failed, 1);
    assert_eq!(total.num_errors, 1);

    let sum: u32 = journal.groups().iter().map(|g| g.stats().num_tests).sum();
    assert_eq!(sum, total.num_tests);
}

#[test]
fn test_finish_group_clears_current() {
    let mut journal = Journal::new("j");
    journal.begin_test(None, None);
    journal.finish_group();

    assert!(journal.current_group().is_none());
    assert!(journal.current_test().is_none());

    // Messages without a test are dropped.
    journal.info("nowhere");
    journal.record_stdout(b"lost");
    assert!(journal.groups()[0].tests()[0].infos().is_empty());
}

#[test]
fn test_record_output_is_escaped() {
    let mut journal = Journal::new("j");
    journal.begin_test(None, None);
    journal.record_stdout(b"line\x01\r\n");
    journal.record_stderr(b"\xffbad");

    let test = journal.current_test().unwrap();
    assert_eq!(test.get_message(Severity::Stdout), Some("line\\001\\r\n"));
    assert_eq!(test.get_message(Severity::Stderr), Some("\\377bad"));
}

#[test]
fn test_settings() {
    let mut journal = Journal::new("j");
    journal.set_hostname("builder");
    journal.set_auto_group_name("suite");
    journal.add_property("arch", "x86_64");
    journal.add_property("arch", "aarch64");

    assert_eq!(journal.hostname(), "builder");
    assert_eq!(journal.properties().get("arch"), Some("aarch64"));
    assert_eq!(journal.properties().len(), 1);

    let group = journal.begin_group(None, None);
    assert_eq!(group.name(), "j.suite0");
    assert_eq!(group.hostname(), "builder");
}
