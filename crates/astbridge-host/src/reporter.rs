//! The host's problem-reporting sink.

use std::fmt;

use astbridge_core::Diagnostic;
use derive_more::{Display, Error};
use serde::Serialize;

/// The host asked for compilation to stop.
#[derive(Copy, Clone, Debug, Display, Error, PartialEq, Eq)]
#[display("compilation aborted")]
pub struct Aborted;

/// A task-tag occurrence found in a comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskMarker {
    pub tag: String,
    pub message: String,
    pub priority: Option<String>,
    pub start: i32,
    pub end: i32,
}

impl fmt::Display for TaskMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        if let Some(priority) = &self.priority {
            write!(f, "[{priority}]")?;
        }
        write!(f, " {}..{}: {}", self.start, self.end, self.message)
    }
}

/// Bytecode recorded for a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassFile {
    pub name: String,
    /// `name` with `.` replaced by `/`.
    pub path: String,
    pub binding: String,
    pub bytes: Vec<u8>,
}

pub trait ProblemReporter {
    fn record(&mut self, diagnostic: Diagnostic) -> Result<(), Aborted>;

    fn task(&mut self, marker: TaskMarker) -> Result<(), Aborted>;

    fn record_class_file(&mut self, class_file: ClassFile);

    /// True once any error has been recorded.
    fn has_problems(&self) -> bool;
}

/// Collects everything reported for one unit.
#[derive(Debug, Default)]
pub struct CompilationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub tasks: Vec<TaskMarker>,
    pub class_files: Vec<ClassFile>,
    cancelled: bool,
}

impl CompilationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every later `record` or `task` call fails with [`Aborted`].
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn check_cancel(&self) -> Result<(), Aborted> {
        if self.cancelled { Err(Aborted) } else { Ok(()) }
    }
}

impl ProblemReporter for CompilationResult {
    fn record(&mut self, diagnostic: Diagnostic) -> Result<(), Aborted> {
        self.check_cancel()?;
        self.diagnostics.push(diagnostic);
        Ok(())
    }

    fn task(&mut self, marker: TaskMarker) -> Result<(), Aborted> {
        self.check_cancel()?;
        self.tasks.push(marker);
        Ok(())
    }

    fn record_class_file(&mut self, class_file: ClassFile) {
        self.class_files.push(class_file);
    }

    fn has_problems(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
