use anyhow::{Context, Result};

use crate::diagnostics::SharedSink;
use crate::registry::SystemsRegistry;
use crate::settings::TaskSettings;
use crate::Error;

use super::{false_task_settings_error_message, ObserverFn, Task, TaskCore};

/// Runs one energy evaluation on a single system.
///
/// Takes the first input system, calculates it on an independent copy of its
/// engine, and stores that engine (now carrying results) under the first
/// output name, or back under the input name when no output was declared.
/// Accepts no task-specific settings beyond the universal keys.
pub struct SinglePointTask {
    core: TaskCore,
}

impl SinglePointTask {
    pub fn new(input: Vec<String>, output: Vec<String>) -> Result<Self, Error> {
        Ok(Self {
            core: TaskCore::new(input, output)?,
        })
    }

    pub fn with_sink(
        input: Vec<String>,
        output: Vec<String>,
        sink: SharedSink,
    ) -> Result<Self, Error> {
        Ok(Self {
            core: TaskCore::with_sink(input, output, sink)?,
        })
    }
}

impl Task for SinglePointTask {
    fn name(&self) -> &str {
        "single point task"
    }

    fn input(&self) -> &[String] {
        self.core.input()
    }

    fn output(&self) -> &[String] {
        self.core.output()
    }

    fn run(
        &self,
        systems: &mut SystemsRegistry,
        mut settings: TaskSettings,
        test_mode: bool,
        observers: &[ObserverFn],
    ) -> Result<bool> {
        self.core.warning_if_multiple_inputs_given();
        self.core.warning_if_multiple_outputs_given();

        let stop_on_error = self.core.stop_on_error_extraction(&mut settings)?;
        let silent = settings.extract_bool("silent_stdout_calculator", true)?;
        settings.require_empty(|| false_task_settings_error_message(self.name()))?;

        self.core.require_all_inputs(systems, self.name())?;
        let input_name = &self.core.input()[0];
        let mut calc = systems
            .copy_calculator(input_name, self.name())
            .context("while resolving input systems")?;
        calc.set_silent_output(silent);

        if test_mode {
            return Ok(true);
        }

        log::debug!("running single point calculation on '{input_name}'");
        match calc.calculate() {
            Ok(results) => {
                for observer in observers {
                    observer(0, calc.structure(), &results, input_name);
                }
                if let Some(energy) = results.energy {
                    self.core
                        .sink()
                        .info(&format!("Energy [hartree]: {energy:.12}"));
                }
                let target = self.core.output().first().unwrap_or(input_name);
                systems.insert(target.clone(), calc);
                Ok(true)
            }
            Err(e) => {
                if stop_on_error {
                    Err(e.context(format!(
                        "single point calculation on '{input_name}' failed"
                    )))
                } else {
                    self.core.sink().warning(&format!(
                        "single point calculation on '{input_name}' failed: {e:#}"
                    ));
                    Ok(false)
                }
            }
        }
    }
}
