use std::sync::Arc;

use anyhow::Result;

use crate::calculator::{Results, Structure};
use crate::diagnostics::{LogSink, SharedSink};
use crate::registry::SystemsRegistry;
use crate::settings::TaskSettings;
use crate::Error;

mod single_point;
pub use single_point::SinglePointTask;

mod energy_difference;
pub use energy_difference::EnergyDifferenceTask;

mod factory;
pub use factory::create_task;

/// Progress callback: (cycle index, structure snapshot, results snapshot, label).
/// Invoked synchronously, zero or more times, while a task runs.
pub type ObserverFn = Box<dyn Fn(u32, &Structure, &Results, &str)>;

/// One step in a workflow chain.
///
/// A task reads the systems named in `input()` from the registry, works on
/// independent copies of their engines, and on success writes entries back
/// under the names in `output()`. Each `run` call is one-shot; no state
/// persists across calls.
pub trait Task {
    /// Stable identifier, used in diagnostics and error text.
    fn name(&self) -> &str;

    /// Execute the task against `systems`.
    ///
    /// With `test_mode` set, only validates that the inputs are well-formed
    /// and returns without calculating or touching the registry.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` on a calculation
    /// failure tolerated by the resolved stop-on-error policy; in the
    /// latter case the registry is left in whatever partial state the task
    /// produced. `Err` is reserved for precondition violations (missing
    /// system, unrecognized settings, structural misconfiguration) and for
    /// calculation failures the policy escalates.
    fn run(
        &self,
        systems: &mut SystemsRegistry,
        settings: TaskSettings,
        test_mode: bool,
        observers: &[ObserverFn],
    ) -> Result<bool>;

    /// Names of the systems this task expects as inputs.
    fn input(&self) -> &[String];

    /// Names of the systems this task produces as outputs.
    fn output(&self) -> &[String];
}

/// Shared state and helpers embedded by every concrete task kind.
pub struct TaskCore {
    input: Vec<String>,
    output: Vec<String>,
    sink: SharedSink,
}

impl TaskCore {
    /// Build a core with the default log-backed sink.
    pub fn new(input: Vec<String>, output: Vec<String>) -> Result<Self, Error> {
        Self::with_sink(input, output, Arc::new(LogSink))
    }

    pub fn with_sink(
        input: Vec<String>,
        output: Vec<String>,
        sink: SharedSink,
    ) -> Result<Self, Error> {
        if input.is_empty() {
            return Err(Error::NoInputSystems);
        }
        Ok(Self {
            input,
            output,
            sink,
        })
    }

    pub fn input(&self) -> &[String] {
        &self.input
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn sink(&self) -> &dyn crate::DiagnosticSink {
        self.sink.as_ref()
    }

    /// For tasks that conceptually read exactly one system.
    /// Warns, but never changes which name is actually used.
    pub fn warning_if_multiple_inputs_given(&self) {
        if self.input.len() > 1 {
            self.sink.warning(
                "More than one input system was specified. \
                 Only taking the first and ignoring all others.",
            );
        }
    }

    /// For tasks that conceptually write exactly one system.
    pub fn warning_if_multiple_outputs_given(&self) {
        if self.output.len() > 1 {
            self.sink.warning(
                "More than one output system was specified. \
                 Only taking the first and ignoring all others.",
            );
        }
    }

    /// Check that every declared input resolves against the registry,
    /// including the ones a task ends up ignoring.
    pub fn require_all_inputs(
        &self,
        systems: &SystemsRegistry,
        task_name: &str,
    ) -> Result<(), Error> {
        for name in &self.input {
            if !systems.contains(name) {
                return Err(Error::MissingSystem {
                    system: name.clone(),
                    task: task_name.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Resolve whether a calculation failure aborts the run.
    ///
    /// The deprecated `allow_unconverged` key, if present, feeds its negation
    /// in as the default; the canonical `stop_on_error` key overrides it.
    /// Both keys are removed from `settings`.
    pub fn stop_on_error_extraction(&self, settings: &mut TaskSettings) -> Result<bool, Error> {
        let mut stop_on_error = true;
        if settings.contains("allow_unconverged") {
            self.sink.warning(
                "The option 'allow_unconverged' is deprecated. \
                 It has been replaced with 'stop_on_error', \
                 which is available for all tasks and defaults to 'true'.",
            );
            stop_on_error = !settings.extract_bool("allow_unconverged", false)?;
        }
        settings.extract_bool("stop_on_error", stop_on_error)
    }
}

/// Error text for a task that accepts no task-specific settings
/// yet received some.
pub fn false_task_settings_error_message(name: &str) -> String {
    format!(
        "Task settings were given for the {name}, but the only settings \
         recognized by this task are 'stop_on_error', which controls whether \
         a failed calculation aborts the whole run or just returns false, \
         and 'silent_stdout_calculator', which controls whether the standard \
         output of the calculator is printed. Settings meant for the \
         calculation itself belong in the systems section."
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diagnostics::BufferSink;

    fn core_with_sink(input: &[&str], output: &[&str]) -> (TaskCore, Arc<BufferSink>) {
        let sink = Arc::new(BufferSink::default());
        let core = TaskCore::with_sink(
            input.iter().map(|s| s.to_string()).collect(),
            output.iter().map(|s| s.to_string()).collect(),
            sink.clone(),
        )
        .unwrap();
        (core, sink)
    }

    #[test]
    fn test_empty_input_list_fails() {
        let res = TaskCore::new(vec![], vec![String::from("out")]);
        assert!(matches!(res, Err(Error::NoInputSystems)));
    }

    #[test]
    fn test_empty_output_list_is_fine() {
        assert!(TaskCore::new(vec![String::from("in")], vec![]).is_ok());
    }

    #[test]
    fn test_stop_on_error_default() -> Result<(), Error> {
        let (core, sink) = core_with_sink(&["a"], &[]);
        let mut settings = TaskSettings::new();
        assert!(core.stop_on_error_extraction(&mut settings)?);
        assert!(sink.warnings().is_empty());
        Ok(())
    }

    #[test]
    fn test_stop_on_error_deprecated_key_inverts() -> Result<(), Error> {
        let (core, sink) = core_with_sink(&["a"], &[]);
        let mut settings = TaskSettings::new();
        settings.insert("allow_unconverged", true);

        assert!(!core.stop_on_error_extraction(&mut settings)?);
        assert_eq!(sink.warnings().len(), 1);
        assert!(sink.warnings()[0].contains("deprecated"));
        assert!(settings.is_empty(), "both keys must be removed");

        let mut settings = TaskSettings::new();
        settings.insert("allow_unconverged", false);
        assert!(core.stop_on_error_extraction(&mut settings)?);
        Ok(())
    }

    #[test]
    fn test_stop_on_error_canonical_key_wins() -> Result<(), Error> {
        let (core, sink) = core_with_sink(&["a"], &[]);
        let mut settings = TaskSettings::new();
        settings.insert("allow_unconverged", true);
        settings.insert("stop_on_error", true);

        assert!(core.stop_on_error_extraction(&mut settings)?);
        // deprecation warning fires regardless:
        assert_eq!(sink.warnings().len(), 1);
        assert!(settings.is_empty());
        Ok(())
    }

    #[test]
    fn test_multiplicity_warnings() {
        let (core, sink) = core_with_sink(&["a"], &["b"]);
        core.warning_if_multiple_inputs_given();
        core.warning_if_multiple_outputs_given();
        assert!(sink.warnings().is_empty());

        let (core, sink) = core_with_sink(&["a", "b"], &["c", "d", "e"]);
        core.warning_if_multiple_inputs_given();
        assert_eq!(sink.warnings().len(), 1);
        core.warning_if_multiple_outputs_given();
        assert_eq!(sink.warnings().len(), 2);
    }

    #[test]
    fn test_false_task_settings_error_message() {
        let msg = false_task_settings_error_message("single point task");
        assert!(msg.contains("single point task"));
        assert!(msg.contains("stop_on_error"));
        assert!(msg.contains("silent_stdout_calculator"));
    }
}
