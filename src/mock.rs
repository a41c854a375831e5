//! A trivial in-memory calculation engine.
//!
//! Real engines live outside this crate; this one exists so the task kinds
//! can be exercised in tests, both here and in embedding crates.

use anyhow::Result;

use crate::calculator::{Calculator, CalculatorHandle, Results, Structure};

/// Engine that "calculates" a preset energy, or fails on demand.
#[derive(Debug, Clone)]
pub struct MockCalculator {
    structure: Structure,
    energy: f64,
    fail: bool,
    silent: bool,
    calculations: u32,
    results: Option<Results>,
}

impl MockCalculator {
    pub fn new(energy: f64) -> Self {
        Self {
            structure: Structure {
                elements: vec![String::from("H")],
                positions: vec![[0.0, 0.0, 0.0]],
            },
            energy,
            fail: false,
            silent: false,
            calculations: 0,
            results: None,
        }
    }

    /// An engine whose every calculation fails.
    pub fn failing() -> Self {
        let mut calc = Self::new(0.0);
        calc.fail = true;
        calc
    }

    pub fn with_structure(mut self, structure: Structure) -> Self {
        self.structure = structure;
        self
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn set_energy(&mut self, energy: f64) {
        self.energy = energy;
    }

    /// How many times `calculate` ran on this handle.
    pub fn calculations(&self) -> u32 {
        self.calculations
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }
}

impl Calculator for MockCalculator {
    fn clone_calculator(&self) -> CalculatorHandle {
        Box::new(self.clone())
    }

    fn structure(&self) -> &Structure {
        &self.structure
    }

    fn calculate(&mut self) -> Result<Results> {
        self.calculations += 1;
        if self.fail {
            anyhow::bail!("mock calculation failed");
        }
        let results = Results {
            energy: Some(self.energy),
            converged: true,
        };
        self.results = Some(results.clone());
        Ok(results)
    }

    fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    fn set_silent_output(&mut self, silent: bool) {
        self.silent = silent;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clone_shares_no_state() {
        let original = MockCalculator::new(-1.5);
        let mut copy = original.clone_calculator();
        copy.calculate().unwrap();

        assert!(original.results().is_none());
        assert!(copy.results().is_some());
    }

    #[test]
    fn test_failing_engine() {
        let mut calc = MockCalculator::failing();
        assert!(calc.calculate().is_err());
        assert!(calc.results().is_none());
        assert_eq!(calc.calculations(), 1);
    }
}
