use std::collections::HashMap;

use super::value::Value;

/// Global variable bindings. Entries are only ever created or overwritten.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    vars: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.vars.get(name).copied()
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.vars.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// All bindings ordered by name.
    pub fn bindings(&self) -> Vec<(&str, Value)> {
        let mut bindings: Vec<(&str, Value)> = self
            .vars
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();

        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings
    }
}
