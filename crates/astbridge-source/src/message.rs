//! Problems the front-end reports, and the faults it raises.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::module::ModuleId;

/// An entry in a module's error collector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    Simple { text: String },
    Syntax(SyntaxFault),
    Exception(ExceptionFault),
}

impl Message {
    pub fn simple(text: impl Into<String>) -> Self {
        Message::Simple { text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxFault {
    pub message: String,
    /// One-based line.
    pub line: i32,
    pub start_column: i32,
    /// Column just past the offending text.
    pub end_column: i32,
    /// Exact offsets, when the parser knew them.
    #[serde(default)]
    pub precise: Option<PreciseRange>,
}

impl SyntaxFault {
    pub fn new(message: impl Into<String>, line: i32, start_column: i32, end_column: i32) -> Self {
        Self {
            message: message.into(),
            line,
            start_column,
            end_column,
            precise: None,
        }
    }

    #[must_use]
    pub fn precisely(mut self, start: i32, end: i32) -> Self {
        self.precise = Some(PreciseRange { start, end });
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreciseRange {
    pub start: i32,
    pub end: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "exception", rename_all = "snake_case")]
pub enum ExceptionFault {
    /// Parsing failed in `module`.
    Parser {
        message: String,
        module: ModuleId,
        start: i32,
        end: i32,
    },
    /// The front-end observed a cancellation request.
    Abort,
    Other { message: String },
}

/// A fault raised out of [`FrontEnd::compile`](crate::FrontEnd::compile).
#[derive(Clone, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum CompileFault {
    #[display("{} compilation error(s)", messages.len())]
    MultipleErrors { messages: Vec<Message> },
    #[display("internal compiler error: {message}")]
    Bug { message: String },
    #[display("compilation aborted")]
    Aborted,
}

impl CompileFault {
    /// True when the fault only signals that compilation was cancelled.
    pub fn is_cancellation(&self) -> bool {
        match self {
            CompileFault::Aborted => true,
            CompileFault::MultipleErrors { messages } => matches!(
                messages.as_slice(),
                [Message::Exception(ExceptionFault::Abort)]
            ),
            CompileFault::Bug { .. } => false,
        }
    }
}
