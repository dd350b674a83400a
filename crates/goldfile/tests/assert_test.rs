//! Golden-file assertion: update mode persists, assert mode compares with a
//! field-level diff.

use goldfile::{Error, GoldenMode};

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
struct Summary {
    passed: u32,
    failed: u32,
    notes: Vec<String>,
}

goldfile::fixture! {
    #[derive(Debug, PartialEq)]
    struct Golden {
        stdout: String => text "stdout.txt",
        summary: Summary => value "summary.json",
    }
}

fn sample() -> Golden {
    Golden {
        stdout: "ok\n".to_owned(),
        summary: Summary {
            passed: 4,
            failed: 0,
            notes: vec!["clean run".to_owned()],
        },
    }
}

#[test]
fn update_then_assert_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut value = sample();

    goldfile::assert_with(GoldenMode::Update, dir.path(), &mut [&mut value]).expect("update");
    assert!(dir.path().join("summary.json").is_file());

    let mut value = sample();
    goldfile::assert_with(GoldenMode::Assert, dir.path(), &mut [&mut value])
        .expect("assert right after update");
}

#[test]
fn mismatch_reports_field_level_divergence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut value = sample();
    goldfile::assert_with(GoldenMode::Update, dir.path(), &mut [&mut value]).expect("update");

    let mut changed = sample();
    changed.summary.failed = 2;
    let err = goldfile::assert_with(GoldenMode::Assert, dir.path(), &mut [&mut changed])
        .expect_err("mismatch");

    let Error::AssertionMismatch { type_name, diff } = &err else {
        panic!("expected AssertionMismatch, got {err:?}");
    };
    assert_eq!(type_name, "Golden");
    assert!(
        diff.contains("summary.failed: expected 0, got 2"),
        "diff should name the diverging field, got:\n{diff}"
    );
    assert!(
        !diff.contains("stdout"),
        "matching fields stay out of the diff:\n{diff}"
    );
}

#[test]
fn raw_text_mismatch_is_reported_too() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut value = sample();
    goldfile::assert_with(GoldenMode::Update, dir.path(), &mut [&mut value]).expect("update");

    let mut changed = sample();
    changed.stdout = "unexpected output\n".to_owned();
    let err = goldfile::assert_with(GoldenMode::Assert, dir.path(), &mut [&mut changed])
        .expect_err("mismatch");
    assert!(err.to_string().contains("stdout"), "got: {err}");
}

#[test]
fn empty_value_batch_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err =
        goldfile::assert_with(GoldenMode::Assert, dir.path(), &mut []).expect_err("empty batch");
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn unregistered_extension_is_fatal_on_save_and_load() {
    goldfile::fixture! {
        #[derive(Debug)]
        struct TomlBacked {
            config: Summary => value "config.toml",
        }
    }

    let dir = tempfile::tempdir().expect("tempdir");

    let mut value = TomlBacked {
        config: Summary {
            passed: 1,
            ..Summary::default()
        },
    };
    let err = goldfile::save(dir.path(), &mut value).expect_err("save without codec");
    assert!(
        matches!(&err, Error::CodecNotFound { extension, .. } if extension == ".toml"),
        "got {err:?}"
    );

    std::fs::write(dir.path().join("config.toml"), "passed = 1\n").expect("write");
    let mut loaded = TomlBacked::default();
    let err = goldfile::load(dir.path(), &mut loaded).expect_err("load without codec");
    assert!(
        matches!(&err, Error::CodecNotFound { extension, .. } if extension == ".toml"),
        "got {err:?}"
    );
    assert!(err.to_string().starts_with("TomlBacked.config:"), "got {err}");
}

#[test]
fn assert_aborts_on_the_first_failing_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut first = sample();
    goldfile::assert_with(GoldenMode::Update, dir.path(), &mut [&mut first]).expect("update");

    let mut bad = sample();
    bad.summary.passed = 99;
    let mut also_bad = sample();
    also_bad.summary.passed = 100;

    let err =
        goldfile::assert_with(GoldenMode::Assert, dir.path(), &mut [&mut bad, &mut also_bad])
            .expect_err("first mismatch aborts");
    assert!(
        err.to_string().contains("expected 4, got 99"),
        "the reported diff belongs to the first failing value: {err}"
    );
}
