/// Calculation engine capability and opaque structure/results snapshots
mod calculator;
pub use calculator::{Calculator, CalculatorHandle, Results, Structure};

/// Warning/info message channel with a log-backed default
mod diagnostics;
pub use diagnostics::{BufferSink, DiagnosticSink, LogSink, NullSink, SharedSink, StderrSink};

/// Shared mapping of system names to engine handles
mod registry;
pub use registry::SystemsRegistry;

/// Per-invocation key-value settings with extract-and-remove semantics
mod settings;
pub use settings::{TaskSettings, Value};

/// The task contract and the concrete task kinds
mod task;
pub use task::{
    create_task, false_task_settings_error_message, EnergyDifferenceTask, ObserverFn,
    SinglePointTask, Task, TaskCore,
};

/// In-memory engine for tests and embedding consumers' tests
pub mod mock;

pub type Hasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;
pub type HashMap<K, V> = std::collections::HashMap<K, V, Hasher>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No input systems specified")]
    NoInputSystems,
    #[error("System name '{system}' is missing in {task}")]
    MissingSystem { system: String, task: String },
    #[error("{0}")]
    UnexpectedSettings(String),
    #[error("Setting '{key}' is not a {expected}")]
    SettingType { key: String, expected: &'static str },
    #[error("{task} requires at least {needed} input systems, but {got} were given")]
    TooFewInputs {
        task: String,
        needed: usize,
        got: usize,
    },
    #[error("Unknown task kind '{0}'")]
    UnknownTaskKind(String),
}
