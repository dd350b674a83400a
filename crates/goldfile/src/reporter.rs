//! The seam between the suite runner and the host test framework.
//!
//! [`Reporter`] is object-safe so the runner can be driven by a real test
//! binary ([`PanicReporter`]) or inspected under test ([`RecordingReporter`])
//! without touching the filesystem machinery.

/// External test-runner collaborator: named sub-blocks, failure marking, and
/// diagnostic logging.
pub trait Reporter {
    /// Run `body` as a named, isolated sub-block.
    fn sub_block(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn Reporter));

    /// Mark the current block failed. Does not unwind; the runner continues
    /// with the remaining blocks.
    fn fail(&mut self, message: &str);

    /// Mark the current block skipped with a diagnostic reason.
    fn skip(&mut self, reason: &str);

    /// Log a diagnostic message scoped to the current block.
    fn log(&mut self, message: &str);
}

/// Reporter for real test binaries: prints diagnostics to stderr, collects
/// failures, and panics in [`PanicReporter::finish`] so the enclosing
/// `#[test]` fails.
#[derive(Debug, Default)]
pub struct PanicReporter {
    path: Vec<String>,
    failures: Vec<String>,
}

impl PanicReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn scope(&self) -> String {
        if self.path.is_empty() {
            "suite".to_owned()
        } else {
            self.path.join("/")
        }
    }

    /// Failure messages collected so far.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Panic with every collected failure, if any. Call at the end of the
    /// enclosing `#[test]`.
    pub fn finish(self) {
        if !self.failures.is_empty() {
            panic!(
                "{} fixture case(s) failed:\n{}",
                self.failures.len(),
                self.failures.join("\n")
            );
        }
    }
}

impl Reporter for PanicReporter {
    fn sub_block(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn Reporter)) {
        self.path.push(name.to_owned());
        body(self);
        self.path.pop();
    }

    fn fail(&mut self, message: &str) {
        let line = format!("{}: {message}", self.scope());
        eprintln!("FAIL {line}");
        self.failures.push(line);
    }

    fn skip(&mut self, reason: &str) {
        eprintln!("SKIP {}: {reason}", self.scope());
    }

    fn log(&mut self, message: &str) {
        eprintln!("     {}: {message}", self.scope());
    }
}

/// Everything a reporter was told, for asserting on runner behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReporterEvent {
    Entered { block: String },
    Failed { block: String, message: String },
    Skipped { block: String, reason: String },
    Logged { block: String, message: String },
}

/// Reporter test double that records events instead of printing.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    path: Vec<String>,
    pub events: Vec<ReporterEvent>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn scope(&self) -> String {
        self.path.join("/")
    }

    /// Block names that were skipped, in order.
    #[must_use]
    pub fn skipped_blocks(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReporterEvent::Skipped { block, .. } => Some(block.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Block names that were entered, in order.
    #[must_use]
    pub fn entered_blocks(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReporterEvent::Entered { block } => Some(block.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Block names that were failed, in order.
    #[must_use]
    pub fn failed_blocks(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReporterEvent::Failed { block, .. } => Some(block.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn sub_block(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn Reporter)) {
        self.path.push(name.to_owned());
        self.events.push(ReporterEvent::Entered {
            block: self.scope(),
        });
        body(self);
        self.path.pop();
    }

    fn fail(&mut self, message: &str) {
        self.events.push(ReporterEvent::Failed {
            block: self.scope(),
            message: message.to_owned(),
        });
    }

    fn skip(&mut self, reason: &str) {
        self.events.push(ReporterEvent::Skipped {
            block: self.scope(),
            reason: reason.to_owned(),
        });
    }

    fn log(&mut self, message: &str) {
        self.events.push(ReporterEvent::Logged {
            block: self.scope(),
            message: message.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_reporter_scopes_nested_blocks() {
        let mut reporter = RecordingReporter::new();
        reporter.sub_block("outer", &mut |r| {
            r.log("starting");
            r.sub_block("inner", &mut |r| r.fail("boom"));
        });

        assert_eq!(
            reporter.events,
            vec![
                ReporterEvent::Entered {
                    block: "outer".to_owned()
                },
                ReporterEvent::Logged {
                    block: "outer".to_owned(),
                    message: "starting".to_owned()
                },
                ReporterEvent::Entered {
                    block: "outer/inner".to_owned()
                },
                ReporterEvent::Failed {
                    block: "outer/inner".to_owned(),
                    message: "boom".to_owned()
                },
            ]
        );
    }

    #[test]
    fn panic_reporter_collects_failures_without_unwinding() {
        let mut reporter = PanicReporter::new();
        reporter.sub_block("case", &mut |r| r.fail("mismatch"));
        assert_eq!(reporter.failures(), ["case: mismatch"]);
    }

    #[test]
    #[should_panic(expected = "1 fixture case(s) failed")]
    fn panic_reporter_finish_panics_on_failure() {
        let mut reporter = PanicReporter::new();
        reporter.sub_block("case", &mut |r| r.fail("mismatch"));
        reporter.finish();
    }

    #[test]
    fn panic_reporter_finish_is_quiet_when_clean() {
        let mut reporter = PanicReporter::new();
        reporter.sub_block("case", &mut |r| r.log("fine"));
        reporter.finish();
    }
}
