use crate::{Error, HashMap};

/// A single settings value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Key-value settings scoped to one task invocation.
///
/// Extraction removes the key, so after a task has pulled out everything it
/// recognizes it can assert that nothing unknown is left over with
/// [`TaskSettings::require_empty`].
#[derive(Debug, Clone, Default)]
pub struct TaskSettings {
    values: HashMap<String, Value>,
}

impl TaskSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of the keys not yet extracted, for error text.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Remove `key` and return it as a bool, or `default` if absent.
    pub fn extract_bool(&mut self, key: &str, default: bool) -> Result<bool, Error> {
        match self.values.remove(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(b),
            Some(_) => Err(Error::SettingType {
                key: key.to_owned(),
                expected: "bool",
            }),
        }
    }

    /// Remove `key` and return it as an integer, or `default` if absent.
    pub fn extract_int(&mut self, key: &str, default: i64) -> Result<i64, Error> {
        match self.values.remove(key) {
            None => Ok(default),
            Some(Value::Int(i)) => Ok(i),
            Some(_) => Err(Error::SettingType {
                key: key.to_owned(),
                expected: "integer",
            }),
        }
    }

    /// Remove `key` and return it as a float, or `default` if absent.
    /// Integer values are widened, since config files rarely distinguish.
    pub fn extract_float(&mut self, key: &str, default: f64) -> Result<f64, Error> {
        match self.values.remove(key) {
            None => Ok(default),
            Some(Value::Float(f)) => Ok(f),
            Some(Value::Int(i)) => Ok(i as f64),
            Some(_) => Err(Error::SettingType {
                key: key.to_owned(),
                expected: "float",
            }),
        }
    }

    /// Remove `key` and return it as a string, or `default` if absent.
    pub fn extract_str(&mut self, key: &str, default: &str) -> Result<String, Error> {
        match self.values.remove(key) {
            None => Ok(default.to_owned()),
            Some(Value::Str(s)) => Ok(s),
            Some(_) => Err(Error::SettingType {
                key: key.to_owned(),
                expected: "string",
            }),
        }
    }

    /// Fail with `Error::UnexpectedSettings` if any keys remain.
    pub fn require_empty(&self, message: impl FnOnce() -> String) -> Result<(), Error> {
        if self.values.is_empty() {
            Ok(())
        } else {
            Err(Error::UnexpectedSettings(message()))
        }
    }
}
