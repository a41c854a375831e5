use crate::calculator::{Calculator, CalculatorHandle};
use crate::{Error, HashMap};

/// Shared mapping of system names to calculation engine handles.
///
/// One registry instance is threaded through a whole task chain by the
/// orchestrator: each task reads its inputs from it and writes its outputs
/// back into it. Names are unique; inserting under an existing name replaces
/// the entry. There is no locking here, sequencing is the caller's job.
#[derive(Default)]
pub struct SystemsRegistry {
    systems: HashMap<String, CalculatorHandle>,
}

impl SystemsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, handle: CalculatorHandle) {
        self.systems.insert(name.into(), handle);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.systems.contains_key(name)
    }

    /// Read-only access to a stored engine.
    pub fn get(&self, name: &str) -> Option<&dyn Calculator> {
        self.systems.get(name).map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.keys().map(String::as_str)
    }

    /// The only sanctioned way for a task to obtain a working copy of a
    /// stored engine. Entries are never handed out for in-place mutation;
    /// that would corrupt every later task's view of the same system.
    pub fn copy_calculator(&self, name: &str, task_name: &str) -> Result<CalculatorHandle, Error> {
        let handle = self.systems.get(name).ok_or_else(|| Error::MissingSystem {
            system: name.to_owned(),
            task: task_name.to_owned(),
        })?;
        Ok(handle.clone_calculator())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mock::MockCalculator;

    #[test]
    fn test_copy_calculator_missing_name() {
        let registry = SystemsRegistry::new();
        let res = registry.copy_calculator("ethene", "single point task");
        match res {
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("ethene"));
                assert!(msg.contains("single point task"));
            }
            Ok(_) => panic!("lookup of an absent system must fail"),
        }
    }

    #[test]
    fn test_copy_is_independent() -> Result<(), Error> {
        let mut registry = SystemsRegistry::new();
        registry.insert("water", Box::new(MockCalculator::new(-76.0)));

        let mut copy = registry.copy_calculator("water", "test")?;
        copy.calculate().unwrap();

        // the stored engine never ran:
        let original = registry.get("water").unwrap();
        assert!(original.results().is_none());
        Ok(())
    }
}
