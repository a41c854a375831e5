use anyhow::Result;

/// Snapshot of an atomic structure.
///
/// The core never interprets this; it exists so observers and engines have a
/// concrete type to exchange. `elements` and `positions` are index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub elements: Vec<String>,
    pub positions: Vec<[f64; 3]>,
}

impl Structure {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Results of one calculation, passed to observers as an opaque snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Results {
    /// Total energy in hartree, if the engine produced one.
    pub energy: Option<f64>,
    pub converged: bool,
}

/// Capability the core requires of a calculation engine.
///
/// Engines live in the systems registry under their system's name and are
/// never mutated in place there; a task that wants to do work takes a deep
/// copy via [`crate::SystemsRegistry::copy_calculator`] first.
pub trait Calculator: Send {
    /// Deep copy: the clone must share no mutable state with `self`.
    fn clone_calculator(&self) -> CalculatorHandle;

    /// Snapshot of the structure this engine is configured for.
    fn structure(&self) -> &Structure;

    /// Run the computation. An `Err` here is a soft calculation failure,
    /// subject to the task's resolved stop-on-error policy.
    fn calculate(&mut self) -> Result<Results>;

    /// Results of the most recent calculation, if any.
    fn results(&self) -> Option<&Results>;

    /// Consumes the `silent_stdout_calculator` setting; the core forwards
    /// the value verbatim and never interprets it.
    fn set_silent_output(&mut self, silent: bool) {
        let _ = silent;
    }
}

/// Owned handle to one configured engine.
pub type CalculatorHandle = Box<dyn Calculator>;
