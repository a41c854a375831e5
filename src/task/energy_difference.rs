use anyhow::{Context, Result};

use crate::calculator::{CalculatorHandle, Results};
use crate::diagnostics::SharedSink;
use crate::registry::SystemsRegistry;
use crate::settings::TaskSettings;
use crate::Error;

use super::{false_task_settings_error_message, ObserverFn, Task, TaskCore};

/// Calculates two systems and reports the energy difference between them.
///
/// Uses the first two input systems; fewer than two is a structural
/// misconfiguration. Writes nothing back to the registry, so any declared
/// output names are ignored (with a warning). Accepts no task-specific
/// settings beyond the universal keys.
pub struct EnergyDifferenceTask {
    core: TaskCore,
}

impl EnergyDifferenceTask {
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

    fn calculate_pair(
        &self,
        a: &mut CalculatorHandle,
        b: &mut CalculatorHandle,
    ) -> Result<(Results, Results)> {
        let first = a.calculate()?;
        let second = b.calculate()?;
        Ok((first, second))
    }
}

impl Task for EnergyDifferenceTask {
    fn name(&self) -> &str {
        "energy difference task"
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
        if !self.core.output().is_empty() {
            self.core.sink().warning(
                "This task produces no output systems. \
                 The declared output names will be ignored.",
            );
        }

        let stop_on_error = self.core.stop_on_error_extraction(&mut settings)?;
        let silent = settings.extract_bool("silent_stdout_calculator", true)?;
        settings.require_empty(|| false_task_settings_error_message(self.name()))?;

        if self.core.input().len() < 2 {
            return Err(Error::TooFewInputs {
                task: self.name().to_owned(),
                needed: 2,
                got: self.core.input().len(),
            }
            .into());
        }
        self.core.require_all_inputs(systems, self.name())?;
        let first_name = &self.core.input()[0];
        let second_name = &self.core.input()[1];

        let mut first = systems
            .copy_calculator(first_name, self.name())
            .context("while resolving input systems")?;
        let mut second = systems
            .copy_calculator(second_name, self.name())
            .context("while resolving input systems")?;
        first.set_silent_output(silent);
        second.set_silent_output(silent);

        if test_mode {
            return Ok(true);
        }

        log::debug!("calculating energy difference of '{first_name}' and '{second_name}'");
        match self.calculate_pair(&mut first, &mut second) {
            Ok((res_a, res_b)) => {
                for observer in observers {
                    observer(0, first.structure(), &res_a, first_name);
                    observer(1, second.structure(), &res_b, second_name);
                }
                match (res_a.energy, res_b.energy) {
                    (Some(e_a), Some(e_b)) => {
                        self.core.sink().info(&format!(
                            "Energy difference '{first_name}' - '{second_name}' [hartree]: {:.12}",
                            e_a - e_b
                        ));
                        Ok(true)
                    }
                    _ => {
                        let msg = "an engine returned no energy".to_owned();
                        if stop_on_error {
                            Err(anyhow::anyhow!(msg)
                                .context(format!("{} failed", self.name())))
                        } else {
                            self.core.sink().warning(&format!("{} failed: {msg}", self.name()));
                            Ok(false)
                        }
                    }
                }
            }
            Err(e) => {
                if stop_on_error {
                    Err(e.context(format!("{} failed", self.name())))
                } else {
                    self.core
                        .sink()
                        .warning(&format!("{} failed: {e:#}", self.name()));
                    Ok(false)
                }
            }
        }
    }
}
