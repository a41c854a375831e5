use crate::diagnostics::SharedSink;
use crate::Error;

use super::{EnergyDifferenceTask, SinglePointTask, Task};

/// Build a task from its kind string, as it appears in a workflow file.
///
/// Kind matching is case-insensitive; each kind also has a short alias.
pub fn create_task(
    kind: &str,
    input: Vec<String>,
    output: Vec<String>,
    sink: SharedSink,
) -> Result<Box<dyn Task>, Error> {
    let normalized = kind.to_lowercase();
    match normalized.as_str() {
        "single_point" | "sp" => Ok(Box::new(SinglePointTask::with_sink(input, output, sink)?)),
        "energy_difference" | "ediff" => Ok(Box::new(EnergyDifferenceTask::with_sink(
            input, output, sink,
        )?)),
        _ => Err(Error::UnknownTaskKind(kind.to_owned())),
    }
}
