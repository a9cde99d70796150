//! Diagnostic messages handed to the host compiler.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A host-model diagnostic: one line of text positioned in the file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: DiagnosticSeverity,
    /// First byte covered by the diagnostic.
    pub start: i32,
    /// Last byte covered by the diagnostic (inclusive, never before `start`).
    pub end: i32,
    /// One-based line of `start`; zero when unknown.
    pub line: i32,
    pub column: i32,
    pub phase: CompilationPhase,
}

/// Severity level of a diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

/// Front-end compilation phases, numbered the way the front-end numbers them.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CompilationPhase {
    Initialization = 1,
    Parsing = 2,
    Conversion = 3,
    SemanticAnalysis = 4,
    Canonicalization = 5,
    InstructionSelection = 6,
    ClassGeneration = 7,
    Output = 8,
    Finalization = 9,
}

impl CompilationPhase {
    /// Process every phase.
    pub const ALL: CompilationPhase = CompilationPhase::Finalization;

    const ORDER: [CompilationPhase; 9] = [
        CompilationPhase::Initialization,
        CompilationPhase::Parsing,
        CompilationPhase::Conversion,
        CompilationPhase::SemanticAnalysis,
        CompilationPhase::Canonicalization,
        CompilationPhase::InstructionSelection,
        CompilationPhase::ClassGeneration,
        CompilationPhase::Output,
        CompilationPhase::Finalization,
    ];

    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Every phase after `self` up to and including `target`, in order.
    pub fn steps_to(self, target: CompilationPhase) -> impl Iterator<Item = CompilationPhase> {
        Self::ORDER
            .into_iter()
            .filter(move |phase| *phase > self && *phase <= target)
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "ERROR"),
            DiagnosticSeverity::Warning => write!(f, "WARNING"),
            DiagnosticSeverity::Info => write!(f, "INFO"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}..{} (line {}, col {}): {}",
            self.severity, self.start, self.end, self.line, self.column, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_single_line() {
        let diag = Diagnostic {
            message: "Groovy:unexpected token: }".to_string(),
            severity: DiagnosticSeverity::Error,
            start: 14,
            end: 14,
            line: 2,
            column: 3,
            phase: CompilationPhase::Conversion,
        };
        insta::assert_snapshot!(diag.to_string(), @"ERROR 14..14 (line 2, col 3): Groovy:unexpected token: }");
    }

    #[test]
    fn test_phase_steps() {
        let steps: Vec<_> = CompilationPhase::Parsing
            .steps_to(CompilationPhase::SemanticAnalysis)
            .collect();
        assert_eq!(
            steps,
            vec![
                CompilationPhase::Conversion,
                CompilationPhase::SemanticAnalysis
            ]
        );
        assert_eq!(
            CompilationPhase::ALL
                .steps_to(CompilationPhase::Conversion)
                .count(),
            0
        );
        assert_eq!(CompilationPhase::ALL.number(), 9);
    }
}
