//! Problem files: variables and constraints described as data

pub mod definition;

pub use definition::ProblemDefinition;
