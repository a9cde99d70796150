//! Shared building blocks for the AST bridge: packed positions, diagnostics,
//! compilation phases, access flags, options and the source database.

pub mod database;
pub mod diagnostic;
pub mod modifiers;
pub mod options;
pub mod position;

pub use database::{BridgeDatabase, SourceFile, line_separator_positions, source_end};
pub use diagnostic::{CompilationPhase, Diagnostic, DiagnosticSeverity};
pub use modifiers::Modifiers;
pub use options::{BridgeOptions, TaskTagOptions};
pub use position::{Position, positions_for, split_dotted};
