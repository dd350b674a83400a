//! Suite discovery and execution: skip/only suffixes, shared-directory
//! composition, and reporter interaction.

use std::path::Path;

use goldfile::{RecordingReporter, ReporterEvent, TestSuite};

goldfile::fixture! {
    #[derive(Debug, PartialEq)]
    struct CaseInput {
        input: String => text "input.txt",
        extra: String => text "extra.txt",
    }
}

fn mkdir(root: &Path, name: &str) {
    std::fs::create_dir_all(root.join(name)).expect("mkdir");
}

fn write(root: &Path, rel: &str, contents: &str) {
    std::fs::write(root.join(rel), contents).expect("write fixture");
}

#[test]
fn cases_are_discovered_sorted_with_suffixes_stripped() {
    let root = tempfile::tempdir().expect("tempdir");
    mkdir(root.path(), "beta");
    mkdir(root.path(), "alpha.skip");
    mkdir(root.path(), "gamma.only");
    write(root.path(), "stray-file.txt", "ignored");

    let suite = TestSuite::new(root.path());
    let cases = suite.cases().expect("cases");

    let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);

    let alpha = &cases[0];
    assert!(alpha.skip && !alpha.only);
    assert!(alpha.dir.ends_with("alpha.skip"), "dir keeps the raw name");

    let gamma = &cases[2];
    assert!(gamma.only && !gamma.skip);
}

#[test]
fn only_cases_shut_out_everything_else() {
    let root = tempfile::tempdir().expect("tempdir");
    mkdir(root.path(), "case.only");
    mkdir(root.path(), "case2");

    let mut reporter = RecordingReporter::new();
    let mut executed = Vec::new();
    TestSuite::new(root.path())
        .run(&mut reporter, |_, case| executed.push(case.name.clone()))
        .expect("run");

    assert_eq!(executed, vec!["case".to_owned()]);
    assert_eq!(reporter.skipped_blocks(), vec!["case2"]);
    assert!(
        reporter.events.iter().any(|e| matches!(
            e,
            ReporterEvent::Skipped { reason, .. } if reason.contains(".only")
        )),
        "skip carries a diagnostic reason"
    );
}

#[test]
fn skip_suffix_skips_the_case() {
    let root = tempfile::tempdir().expect("tempdir");
    mkdir(root.path(), "active");
    mkdir(root.path(), "dormant.skip");

    let mut reporter = RecordingReporter::new();
    let mut executed = Vec::new();
    TestSuite::new(root.path())
        .run(&mut reporter, |_, case| executed.push(case.name.clone()))
        .expect("run");

    assert_eq!(executed, vec!["active".to_owned()]);
    assert_eq!(reporter.skipped_blocks(), vec!["dormant"]);
    assert_eq!(reporter.entered_blocks(), vec!["active", "dormant"]);
}

#[test]
fn shared_directory_merges_and_synthesizes_cases() {
    let root = tempfile::tempdir().expect("tempdir");
    let shared = tempfile::tempdir().expect("tempdir");
    mkdir(root.path(), "both");
    mkdir(shared.path(), "both");
    mkdir(shared.path(), "shared-only");

    let suite = TestSuite::new(root.path()).with_shared_dir(shared.path());
    let cases = suite.cases().expect("cases");

    let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["both", "shared-only"]);

    let both = &cases[0];
    assert_eq!(both.dir, root.path().join("both"));
    assert_eq!(both.shared_dir, Some(shared.path().join("both")));

    // A case found only in the shared directory still points at a case dir
    // under the suite root; resolution is deferred to the loader.
    let synthesized = &cases[1];
    assert_eq!(synthesized.dir, root.path().join("shared-only"));
    assert!(!synthesized.dir.exists());
    assert_eq!(
        synthesized.shared_dir,
        Some(shared.path().join("shared-only"))
    );
}

#[test]
fn case_directory_overrides_shared_defaults_on_load() {
    let root = tempfile::tempdir().expect("tempdir");
    let shared = tempfile::tempdir().expect("tempdir");
    mkdir(root.path(), "case");
    mkdir(shared.path(), "case");
    write(shared.path(), "case/input.txt", "from shared");
    write(shared.path(), "case/extra.txt", "shared extra");
    write(root.path(), "case/input.txt", "from case");

    let suite = TestSuite::new(root.path()).with_shared_dir(shared.path());
    let cases = suite.cases().expect("cases");
    assert_eq!(cases.len(), 1);

    let mut input = CaseInput::default();
    cases[0].load(&mut input).expect("load");
    assert_eq!(input.input, "from case", "case dir wins");
    assert_eq!(input.extra, "shared extra", "shared fills the gaps");
}

#[test]
fn synthesized_case_loads_from_shared_alone() {
    let root = tempfile::tempdir().expect("tempdir");
    let shared = tempfile::tempdir().expect("tempdir");
    mkdir(shared.path(), "ghost");
    write(shared.path(), "ghost/input.txt", "shared only");

    let suite = TestSuite::new(root.path()).with_shared_dir(shared.path());
    let cases = suite.cases().expect("cases");
    assert_eq!(cases.len(), 1);

    let mut input = CaseInput::default();
    cases[0].load(&mut input).expect("load tolerates missing case dir");
    assert_eq!(input.input, "shared only");
}

#[test]
fn empty_path_contributes_no_cases() {
    let suite = TestSuite::new("");
    assert!(suite.cases().expect("not configured").is_empty());
}

#[test]
fn unreadable_suite_root_is_a_directory_read_error() {
    let root = tempfile::tempdir().expect("tempdir");
    let file = root.path().join("plain-file");
    std::fs::write(&file, "x").expect("write");

    let err = TestSuite::new(&file).cases().expect_err("file as suite root");
    assert!(matches!(err, goldfile::Error::DirectoryRead { .. }));
}

#[test]
fn failures_reported_inside_cases_do_not_stop_the_run() {
    let root = tempfile::tempdir().expect("tempdir");
    mkdir(root.path(), "bad");
    mkdir(root.path(), "good");

    let mut reporter = RecordingReporter::new();
    TestSuite::new(root.path())
        .run(&mut reporter, |r, case| {
            if case.name == "bad" {
                r.fail("fixture mismatch");
            } else {
                r.log("fine");
            }
        })
        .expect("run");

    assert_eq!(reporter.failed_blocks(), vec!["bad"]);
    assert_eq!(reporter.entered_blocks(), vec!["bad", "good"]);
}
