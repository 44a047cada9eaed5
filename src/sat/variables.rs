//! Variable registry for DIMACS numbering

use super::literal::{Literal, NEGATION_MARKER};
use crate::error::{Result, SatError};
use std::collections::HashMap;

/// Interns variable names as dense DIMACS codes starting from 1
#[derive(Debug, Default, Clone)]
pub struct VariableRegistry {
    /// Map from variable name to its code
    codes: HashMap<String, i32>,
    /// Names in code order; the code of `names[i]` is `i + 1`
    names: Vec<String>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable and return its code
    ///
    /// Declaring a name twice keeps the code it was first given. Names starting with
    /// [`NEGATION_MARKER`] are accepted here but cannot be referenced in textual form.
    pub fn declare(&mut self, name: impl Into<String>) -> i32 {
        let name = name.into();
        if let Some(&code) = self.codes.get(&name) {
            return code;
        }

        let code = self.next_code();
        self.names.push(name.clone());
        self.codes.insert(name, code);
        code
    }

    /// Code assigned to `name`
    pub fn code_of(&self, name: &str) -> Result<i32> {
        self.codes
            .get(name)
            .copied()
            .ok_or_else(|| SatError::UndeclaredVariable(name.to_string()))
    }

    /// Textual form of a raw literal: `0` for the terminator, `-name` for negative codes
    pub fn name_of(&self, code: i32) -> Option<String> {
        if code == 0 {
            return Some("0".to_string());
        }

        let name = self.variable_name(code.unsigned_abs())?;
        if code < 0 {
            Some(format!("{}{}", NEGATION_MARKER, name))
        } else {
            Some(name.to_string())
        }
    }

    /// Decode a raw non-zero literal into a named literal
    pub fn literal_of(&self, code: i32) -> Option<Literal> {
        if code == 0 {
            return None;
        }
        let name = self.variable_name(code.unsigned_abs())?;
        Some(Literal::new(name, code < 0))
    }

    fn variable_name(&self, code: u32) -> Option<&str> {
        let index = (code as usize).checked_sub(1)?;
        self.names.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    /// Number of declared variables, which is also the highest code
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Declared names in code order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Forget every variable; the next declaration gets code 1 again
    pub fn clear(&mut self) {
        self.codes.clear();
        self.names.clear();
    }

    fn next_code(&self) -> i32 {
        self.names.len() as i32 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_declaration_order() {
        let mut registry = VariableRegistry::new();

        assert_eq!(registry.declare("a"), 1);
        assert_eq!(registry.declare("b"), 2);
        assert_eq!(registry.declare("c"), 3);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_redeclaration_is_noop() {
        let mut registry = VariableRegistry::new();
        registry.declare("x");
        registry.declare("y");

        assert_eq!(registry.declare("x"), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.code_of("x").unwrap(), 1);
        assert_eq!(registry.declare("z"), 3);
    }

    #[test]
    fn test_round_trip_naming() {
        let mut registry = VariableRegistry::new();
        let names = ["p", "q", "r_1", "state[2]", "longer name"];
        for name in names {
            registry.declare(name);
        }

        let mut codes: Vec<i32> = names.iter().map(|n| registry.code_of(n).unwrap()).collect();
        for name in names {
            let code = registry.code_of(name).unwrap();
            assert_eq!(registry.name_of(code).as_deref(), Some(name));
        }

        codes.sort();
        assert_eq!(codes, (1..=names.len() as i32).collect::<Vec<_>>());
    }

    #[test]
    fn test_name_of_signed_codes() {
        let mut registry = VariableRegistry::new();
        registry.declare("x");

        assert_eq!(registry.name_of(0).as_deref(), Some("0"));
        assert_eq!(registry.name_of(1).as_deref(), Some("x"));
        assert_eq!(registry.name_of(-1).as_deref(), Some("-x"));
        assert_eq!(registry.name_of(2), None);
        assert_eq!(registry.name_of(i32::MIN), None);
    }

    #[test]
    fn test_literal_of() {
        let mut registry = VariableRegistry::new();
        registry.declare("x");

        assert_eq!(registry.literal_of(-1), Some(Literal::negative("x")));
        assert_eq!(registry.literal_of(1), Some(Literal::positive("x")));
        assert_eq!(registry.literal_of(0), None);
        assert_eq!(registry.literal_of(5), None);
    }

    #[test]
    fn test_undeclared_lookup_fails() {
        let registry = VariableRegistry::new();
        match registry.code_of("ghost") {
            Err(SatError::UndeclaredVariable(name)) => assert_eq!(name, "ghost"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_clear_restarts_numbering() {
        let mut registry = VariableRegistry::new();
        registry.declare("a");
        registry.declare("b");
        registry.clear();

        assert!(registry.is_empty());
        assert!(!registry.contains("a"));
        assert_eq!(registry.declare("b"), 1);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b"]);
    }
}
