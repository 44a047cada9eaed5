//! Named literals
//!
//! A literal is a variable name paired with a polarity. The `-` prefix only exists in
//! the textual form used by callers, problem files and printed models.

use crate::error::{Result, SatError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;
use std::str::FromStr;

/// Prefix marking a negated literal in textual form
///
/// Variable names must not start with it: `-x` always reads as the negation of `x`.
pub const NEGATION_MARKER: char = '-';

/// A variable together with its polarity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Literal {
    name: String,
    negated: bool,
}

impl Literal {
    pub fn new(name: impl Into<String>, negated: bool) -> Self {
        Self {
            name: name.into(),
            negated,
        }
    }

    /// The variable itself
    pub fn positive(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// The negation of the variable
    pub fn negative(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Name of the underlying variable, without the negation marker
    pub fn variable_name(&self) -> &str {
        &self.name
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Flip the polarity
    pub fn negate(&self) -> Self {
        Self {
            name: self.name.clone(),
            negated: !self.negated,
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(mut self) -> Self::Output {
        self.negated = !self.negated;
        self
    }
}

impl Not for &Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl FromStr for Literal {
    type Err = SatError;

    fn from_str(text: &str) -> Result<Self> {
        let (name, negated) = match text.strip_prefix(NEGATION_MARKER) {
            Some(rest) => (rest, true),
            None => (text, false),
        };

        if name.is_empty() || name.starts_with(NEGATION_MARKER) {
            return Err(SatError::InvalidLiteral(text.to_string()));
        }

        Ok(Self::new(name, negated))
    }
}

impl TryFrom<String> for Literal {
    type Error = SatError;

    fn try_from(text: String) -> Result<Self> {
        text.parse()
    }
}

impl From<Literal> for String {
    fn from(literal: Literal) -> Self {
        literal.to_string()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "{}{}", NEGATION_MARKER, self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Anything a caller can hand to the session as a literal
pub trait ToLiteral {
    fn to_literal(&self) -> Result<Literal>;
}

impl ToLiteral for Literal {
    fn to_literal(&self) -> Result<Literal> {
        Ok(self.clone())
    }
}

impl ToLiteral for str {
    fn to_literal(&self) -> Result<Literal> {
        self.parse()
    }
}

impl ToLiteral for String {
    fn to_literal(&self) -> Result<Literal> {
        self.parse()
    }
}

impl<T: ToLiteral + ?Sized> ToLiteral for &T {
    fn to_literal(&self) -> Result<Literal> {
        (**self).to_literal()
    }
}
