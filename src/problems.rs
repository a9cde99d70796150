//! Translating front-end error-collector messages into host diagnostics.

use astbridge_core::{CompilationPhase, Diagnostic, DiagnosticSeverity};
use astbridge_host::{Aborted, ProblemReporter};
use astbridge_source::{ExceptionFault, Message, ModuleId, SyntaxFault};
use tracing::debug;

/// Marks a diagnostic as coming from the scripting front-end.
pub const ORIGIN_PREFIX: &str = "Groovy:";

/// Translates the messages of one module, given its line-separator table.
#[derive(Clone, Debug)]
pub struct DiagnosticTranslator {
    module: ModuleId,
    line_separators: Vec<i32>,
    source_end: i32,
    phase: CompilationPhase,
}

impl DiagnosticTranslator {
    pub fn new(
        module: ModuleId,
        line_separators: Vec<i32>,
        source_end: i32,
        phase: CompilationPhase,
    ) -> Self {
        Self {
            module,
            line_separators,
            source_end,
            phase,
        }
    }

    /// The diagnostic for `message`, or `None` when it is not ours to report.
    pub fn translate(&self, message: &Message) -> Option<Diagnostic> {
        let (text, line, column, start, end) = match message {
            Message::Simple { text } => (text.as_str(), 0, 0, 0, 0),
            Message::Syntax(fault) => {
                let (line, start, end) = self.syntax_range(fault);
                (fault.message.as_str(), line, fault.start_column, start, end)
            }
            Message::Exception(ExceptionFault::Parser {
                message,
                module,
                start,
                end,
            }) => {
                // the front-end batches every file of the build, so a fault
                // can surface in another module's collector
                if *module != self.module {
                    return None;
                }
                (message.as_str(), self.line_of(*start), 0, *start, *end)
            }
            Message::Exception(ExceptionFault::Abort | ExceptionFault::Other { .. }) => {
                return None;
            }
        };

        let mut end = end.max(start);
        let start = start.min(self.source_end);
        end = end.min(self.source_end);

        Some(Diagnostic {
            message: one_line(text),
            severity: DiagnosticSeverity::Error,
            start,
            end,
            line,
            column,
            phase: self.phase,
        })
    }

    /// `(line, start, end)` of a syntax fault.
    fn syntax_range(&self, fault: &SyntaxFault) -> (i32, i32, i32) {
        match fault.precise {
            // the reported line may be wrong; trust the offsets
            Some(precise) => (self.line_of(precise.start), precise.start, precise.end),
            None => (
                fault.line,
                self.offset(fault.line, fault.start_column),
                self.offset(fault.line, fault.end_column - 1),
            ),
        }
    }

    /// One-based line containing `offset`.
    fn line_of(&self, offset: i32) -> i32 {
        self.line_separators
            .iter()
            .take_while(|separator| **separator < offset)
            .count() as i32
            + 1
    }

    fn offset(&self, line: i32, column: i32) -> i32 {
        if line > 1
            && let Some(separator) = self.line_separators.get((line - 2) as usize)
        {
            separator + column
        } else {
            column
        }
    }

    /// Record every translatable message and remove it from `messages`.
    ///
    /// Messages that are not translated stay behind. If the reporter aborts,
    /// the messages recorded so far are still removed before the abort is
    /// passed on.
    pub fn record_problems<R: ProblemReporter>(
        &self,
        messages: &mut Vec<Message>,
        reporter: &mut R,
    ) -> Result<Vec<Diagnostic>, Aborted> {
        let mut recorded = vec![false; messages.len()];
        let mut diagnostics = Vec::new();
        let mut outcome = Ok(());
        for (index, message) in messages.iter().enumerate() {
            let Some(diagnostic) = self.translate(message) else {
                continue;
            };
            if let Err(aborted) = reporter.record(diagnostic.clone()) {
                outcome = Err(aborted);
                break;
            }
            debug!(module = %self.module, line = diagnostic.line, message = %diagnostic.message, "recorded problem");
            recorded[index] = true;
            diagnostics.push(diagnostic);
        }

        let mut recorded = recorded.into_iter();
        messages.retain(|_| !recorded.next().unwrap_or(false));
        outcome.map(|()| diagnostics)
    }
}

fn one_line(text: &str) -> String {
    let first = text.split('\n').next().unwrap_or_default();
    format!("{ORIGIN_PREFIX}{first}")
}
