//! Directory-driven test suites.
//!
//! A suite turns the immediate subdirectories of a root into named, isolated
//! sub-tests. Directory name suffixes control execution: `.skip` marks a
//! case skipped, `.only` restricts the run to the marked cases. An optional
//! shared directory contributes common fixture defaults that each case
//! directory may override.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::assert::{GoldenMode, assert_fixtures, assert_with};
use crate::error::{Error, Result};
use crate::fixture::Fixture;
use crate::loader::load_many;
use crate::reporter::Reporter;

/// One directory-backed test case. Immutable once discovered.
#[derive(Debug, Clone, Serialize)]
pub struct TestCase {
    /// Base name, with any `.skip`/`.only` suffix stripped.
    pub name: String,
    /// Case directory under the suite root. May not exist for cases
    /// discovered only in the shared directory; the loader treats missing
    /// files as absent, so that is not an error.
    pub dir: PathBuf,
    /// Shared fixture directory for this case, when the suite has one.
    pub shared_dir: Option<PathBuf>,
    /// Marked with a `.skip` directory suffix.
    pub skip: bool,
    /// Marked with a `.only` directory suffix.
    pub only: bool,
}

impl TestCase {
    /// Load fixtures for this case. When a shared directory is configured it
    /// is loaded first, so the case directory overrides shared defaults.
    pub fn load(&self, output: &mut dyn Fixture) -> Result<()> {
        self.load_many(&mut [output])
    }

    /// [`TestCase::load`] for several outputs at once.
    pub fn load_many(&self, outputs: &mut [&mut dyn Fixture]) -> Result<()> {
        match &self.shared_dir {
            Some(shared) => load_many(&[shared.as_path(), self.dir.as_path()], outputs),
            None => load_many(&[self.dir.as_path()], outputs),
        }
    }

    /// Assert (or update, per the process-wide default) golden fixtures in
    /// this case's directory.
    pub fn assert(&self, values: &mut [&mut dyn Fixture]) -> Result<()> {
        assert_fixtures(&self.dir, values)
    }

    /// [`TestCase::assert`] with an explicit mode.
    pub fn assert_with(&self, mode: GoldenMode, values: &mut [&mut dyn Fixture]) -> Result<()> {
        assert_with(mode, &self.dir, values)
    }
}

/// A collection of test cases backed by directories on disk.
#[derive(Debug, Clone, Default)]
pub struct TestSuite {
    /// Suite root; each immediate subdirectory is one case. An empty path
    /// means "not configured" and contributes no cases.
    pub dir: PathBuf,
    /// Optional second root providing shared fixture defaults. Cases found
    /// only here are synthesized with a (possibly nonexistent) directory
    /// under `dir`.
    pub shared_dir: Option<PathBuf>,
}

impl TestSuite {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            shared_dir: None,
        }
    }

    #[must_use]
    pub fn with_shared_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shared_dir = Some(dir.into());
        self
    }

    /// Discover the suite's cases in deterministic (sorted) order.
    pub fn cases(&self) -> Result<Vec<TestCase>> {
        #[derive(Default)]
        struct Seed {
            main: Option<String>,
            shared: Option<String>,
            skip: bool,
            only: bool,
        }

        let shared_root = self
            .shared_dir
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty());

        let mut seeds: BTreeMap<String, Seed> = BTreeMap::new();
        for raw in subdirs(&self.dir)? {
            let (base, skip, only) = parse_case_name(&raw);
            let seed = seeds.entry(base.to_owned()).or_default();
            seed.main = Some(raw);
            seed.skip |= skip;
            seed.only |= only;
        }
        if let Some(shared_root) = shared_root {
            for raw in subdirs(shared_root)? {
                let (base, skip, only) = parse_case_name(&raw);
                let seed = seeds.entry(base.to_owned()).or_default();
                seed.shared = Some(raw);
                seed.skip |= skip;
                seed.only |= only;
            }
        }

        let cases: Vec<TestCase> = seeds
            .into_iter()
            .map(|(base, seed)| TestCase {
                dir: self.dir.join(seed.main.as_deref().unwrap_or(&base)),
                shared_dir: shared_root
                    .map(|root| root.join(seed.shared.as_deref().unwrap_or(&base))),
                skip: seed.skip,
                only: seed.only,
                name: base,
            })
            .collect();

        debug!(suite = %self.dir.display(), count = cases.len(), "discovered suite cases");
        Ok(cases)
    }

    /// Execute the suite: each case runs as a named sub-block on `reporter`.
    ///
    /// When any case carries `.only`, every other case is skipped with a
    /// diagnostic; otherwise `.skip` cases are skipped and the rest invoke
    /// `test_fn`.
    pub fn run<F>(&self, reporter: &mut dyn Reporter, mut test_fn: F) -> Result<()>
    where
        F: FnMut(&mut dyn Reporter, &TestCase),
    {
        let cases = self.cases()?;
        let any_only = cases.iter().any(|case| case.only);

        for case in &cases {
            reporter.sub_block(&case.name, &mut |r| {
                if any_only && !case.only {
                    r.skip("skipped: suite contains .only cases");
                } else if case.skip {
                    r.skip("skipped: case directory marked .skip");
                } else {
                    test_fn(r, case);
                }
            });
        }
        Ok(())
    }
}

/// Split a case directory name into `(base name, skip, only)`.
fn parse_case_name(raw: &str) -> (&str, bool, bool) {
    if let Some(base) = raw.strip_suffix(".skip") {
        (base, true, false)
    } else if let Some(base) = raw.strip_suffix(".only") {
        (base, false, true)
    } else {
        (raw, false, false)
    }
}

/// Names of the immediate subdirectories of `dir`, sorted.
///
/// An empty path is "not configured" and yields nothing; a directory that
/// cannot be enumerated is a [`Error::DirectoryRead`] failure.
pub fn subdirs(dir: &Path) -> Result<Vec<String>> {
    if dir.as_os_str().is_empty() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|source| Error::DirectoryRead {
        path: dir.to_owned(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::DirectoryRead {
            path: dir.to_owned(),
            source,
        })?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => {
                debug!(dir = %dir.display(), ?name, "skipping non-UTF-8 directory name");
            }
        }
    }

    names.sort();
    Ok(names)
}
