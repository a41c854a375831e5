use std::sync::{Arc, Mutex};

use colored::Colorize;

/// Warning/info channel used by tasks for user-facing text.
///
/// Distinct from the `log` facade so that embedding applications can route
/// task diagnostics wherever they like; [`LogSink`] bridges the two and is
/// the default when a task is built without an explicit sink.
pub trait DiagnosticSink: Send + Sync {
    fn warning(&self, msg: &str);

    fn info(&self, msg: &str) {
        let _ = msg;
    }
}

/// Sinks are shared between tasks, so hand them around in an `Arc`.
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// Default sink: forwards to the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warning(&self, msg: &str) {
        log::warn!("{msg}");
    }

    fn info(&self, msg: &str) {
        log::info!("{msg}");
    }
}

/// Prints straight to stderr, for command-line drivers.
#[derive(Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn warning(&self, msg: &str) {
        eprintln!("{} {msg}", "Warning:".yellow());
    }

    fn info(&self, msg: &str) {
        eprintln!("{msg}");
    }
}

/// Swallows everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warning(&self, _msg: &str) {}
}

/// Records messages for later inspection. Mostly useful in tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    warnings: Mutex<Vec<String>>,
    infos: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }
}

impl DiagnosticSink for BufferSink {
    fn warning(&self, msg: &str) {
        self.warnings.lock().unwrap().push(msg.to_owned());
    }

    fn info(&self, msg: &str) {
        self.infos.lock().unwrap().push(msg.to_owned());
    }
}
