//! Parsing of SAT engine output
//!
//! Engines report their verdict on an `s` line and the assignment on the `v` line(s)
//! that follow it:
//!
//! ```text
//! c comments
//! s SATISFIABLE
//! v 1 -2 3 0
//! ```

/// Verdict line for a satisfiable formula
pub const SATISFIABLE_MARKER: &str = "s SATISFIABLE";
/// Verdict line for an unsatisfiable formula
pub const UNSATISFIABLE_MARKER: &str = "s UNSATISFIABLE";

/// Width of the tag preceding the assignment values (`v `)
const VALUE_TAG_WIDTH: usize = 2;

/// What an engine reported, in raw DIMACS literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineVerdict {
    /// Satisfiable, with the assignment in the order the engine printed it
    Satisfiable(Vec<i32>),
    Unsatisfiable,
    /// No usable verdict; the reason says what was missing or malformed
    Indeterminate(String),
}

/// Scan engine output for a verdict and, when satisfiable, the assignment
pub fn parse_solver_output(output: &str) -> EngineVerdict {
    let mut lines = output.lines().map(|line| line.trim_end_matches('\r'));

    while let Some(line) = lines.next() {
        if line == SATISFIABLE_MARKER {
            return parse_assignment(&mut lines);
        }
        if line == UNSATISFIABLE_MARKER {
            return EngineVerdict::Unsatisfiable;
        }
    }

    EngineVerdict::Indeterminate("no verdict line in solver output".to_string())
}

fn parse_assignment<'a>(lines: &mut impl Iterator<Item = &'a str>) -> EngineVerdict {
    let Some(first) = lines.next() else {
        return EngineVerdict::Indeterminate("missing model line after verdict".to_string());
    };

    let mut assignment = Vec::new();
    let mut values = first.get(VALUE_TAG_WIDTH..).unwrap_or("");

    loop {
        for token in values.split_whitespace() {
            match token.parse::<i32>() {
                Ok(0) => return EngineVerdict::Satisfiable(assignment),
                Ok(literal) => assignment.push(literal),
                Err(_) => {
                    return EngineVerdict::Indeterminate(format!(
                        "malformed model value `{}`",
                        token
                    ))
                }
            }
        }

        // Models without a terminator may continue on further `v` lines
        match lines.find(|line| !is_comment(line)) {
            Some(next) if next.starts_with("v ") => values = &next[VALUE_TAG_WIDTH..],
            _ => return EngineVerdict::Satisfiable(assignment),
        }
    }
}

fn is_comment(line: &str) -> bool {
    line == "c" || line.starts_with("c ")
}
