//! Display and output formatting utilities

use crate::sat::{Literal, SatSession, SolveOutcome};
use serde::Serialize;

/// Space-separated textual literals, e.g. `a -b -c`
pub fn format_model(model: &[Literal]) -> String {
    model
        .iter()
        .map(Literal::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Machine-readable summary of a solve
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub outcome: SolveOutcome,
    pub variables: usize,
    pub clauses: usize,
    pub model: Vec<Literal>,
    pub solve_time_ms: u64,
}

impl SolveReport {
    pub fn from_session(session: &SatSession, outcome: SolveOutcome) -> Self {
        Self {
            outcome,
            variables: session.variable_count(),
            clauses: session.clause_count(),
            model: session.model().to_vec(),
            solve_time_ms: session
                .statistics()
                .map(|stats| stats.solve_time.as_millis() as u64)
                .unwrap_or(0),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable form, one verdict line followed by the model
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("s {}\n", self.outcome));
        if !self.model.is_empty() {
            output.push_str(&format!("v {} 0\n", format_model(&self.model)));
        }
        output.push_str(&format!(
            "c {} variables, {} clauses, {} ms\n",
            self.variables, self.clauses, self.solve_time_ms
        ));
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    fn paint(text: &str, code: u8) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map(|term| term != "dumb").unwrap_or(false)
    }

    pub fn success(text: &str) -> String {
        Self::paint(text, 32)
    }

    pub fn error(text: &str) -> String {
        Self::paint(text, 31)
    }

    pub fn warning(text: &str) -> String {
        Self::paint(text, 33)
    }

    /// Verdict colored by outcome
    pub fn outcome(outcome: &SolveOutcome) -> String {
        let text = outcome.to_string();
        match outcome {
            SolveOutcome::Satisfiable => Self::success(&text),
            SolveOutcome::Unsatisfiable => Self::error(&text),
            SolveOutcome::Indeterminate(_) => Self::warning(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: SolveOutcome, model: Vec<Literal>) -> SolveReport {
        SolveReport {
            outcome,
            variables: 3,
            clauses: 4,
            model,
            solve_time_ms: 7,
        }
    }

    #[test]
    fn test_format_model() {
        let model = vec![
            Literal::positive("a"),
            Literal::negative("b"),
            Literal::negative("c"),
        ];
        assert_eq!(format_model(&model), "a -b -c");
        assert_eq!(format_model(&[]), "");
    }

    #[test]
    fn test_text_report() {
        let text = report(
            SolveOutcome::Satisfiable,
            vec![Literal::positive("a"), Literal::negative("b")],
        )
        .to_text();
        assert_eq!(text, "s SATISFIABLE\nv a -b 0\nc 3 variables, 4 clauses, 7 ms\n");

        let text = report(SolveOutcome::Unsatisfiable, vec![]).to_text();
        assert!(text.starts_with("s UNSATISFIABLE\nc "));
    }

    #[test]
    fn test_json_report() {
        let json = report(SolveOutcome::Indeterminate("no verdict".to_string()), vec![])
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcome"]["status"], "indeterminate");
        assert_eq!(value["outcome"]["reason"], "no verdict");
        assert_eq!(value["clauses"], 4);

        let json = report(SolveOutcome::Satisfiable, vec![Literal::negative("x")])
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model"][0], "-x");
    }

    #[test]
    fn test_color_output_keeps_text() {
        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::outcome(&SolveOutcome::Unsatisfiable).contains("UNSATISFIABLE"));
    }
}
