//! Per-file declaration and the phase callbacks the host drives it with.

use std::collections::HashMap;

use astbridge_core::{CompilationPhase, Diagnostic, SourceFile, line_separator_positions, source_end};
use astbridge_host::{
    Aborted, CommentRange, CompilationResult, HostDeclarationTree, LookupEnvironment,
    ProblemReporter, TypeBinding, TypeDeclaration,
};
use astbridge_source::{CompileFault, FrontEnd, ModuleId};
use tracing::{debug, error, warn};

use crate::codegen::correlate;
use crate::declarations::DeclarationBuilder;
use crate::error::BridgeError;
use crate::problems::DiagnosticTranslator;
use crate::session::BuildSession;
use crate::tasks::scan_tasks;

/// Result of one phase callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhaseOutcome {
    Success,
    /// The phase ran but the front-end reported problems; they have been
    /// recorded.
    RecoverableErrors(Vec<Diagnostic>),
    /// Compilation was cancelled. Always passed on to the host.
    Cancelled,
    Fatal(BridgeError),
}

impl PhaseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PhaseOutcome::Success)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Stage {
    Populate,
    Resolve,
    Analyse,
    Generate,
}

/// What the host calls on a unit as its own pipeline advances.
pub trait UnitHooks<F: FrontEnd> {
    /// Parse and convert, then build the declaration tree.
    fn populate(&mut self, session: &mut BuildSession<F>) -> PhaseOutcome;

    /// Attach a binding to every type and register it with the session's
    /// lookup environment.
    fn build_scope(&mut self, session: &mut BuildSession<F>);

    fn resolve(&mut self, session: &mut BuildSession<F>) -> PhaseOutcome;

    fn analyse_code(&mut self, session: &mut BuildSession<F>) -> PhaseOutcome;

    fn generate_code(&mut self, session: &mut BuildSession<F>) -> PhaseOutcome;

    /// Record the messages waiting in this unit's collector.
    fn record_diagnostics(
        &mut self,
        session: &mut BuildSession<F>,
        phase: CompilationPhase,
    ) -> Result<Vec<Diagnostic>, Aborted>;
}

/// One source file's view of the build.
///
/// Owns the host tree built for the file and the reporter its problems go
/// to. Each callback runs at most once; asking again returns the first
/// outcome. Cancelled callbacks may be retried.
pub struct SourceUnitDeclaration<R: ProblemReporter = CompilationResult> {
    module: ModuleId,
    file: SourceFile,
    tree: HostDeclarationTree,
    reporter: R,
    completed: HashMap<Stage, PhaseOutcome>,
}

impl<R: ProblemReporter> SourceUnitDeclaration<R> {
    pub(crate) fn new(module: ModuleId, file: SourceFile, reporter: R) -> Self {
        Self {
            module,
            file,
            tree: HostDeclarationTree::default(),
            reporter,
            completed: HashMap::new(),
        }
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    pub fn file(&self) -> SourceFile {
        self.file
    }

    pub fn tree(&self) -> &HostDeclarationTree {
        &self.tree
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn into_parts(self) -> (HostDeclarationTree, R) {
        (self.tree, self.reporter)
    }

    /// Advance the shared front-end to `phase` and record what it reported
    /// for this file.
    pub fn process_to_phase<F: FrontEnd>(
        &mut self,
        session: &mut BuildSession<F>,
        phase: CompilationPhase,
    ) -> PhaseOutcome {
        let already_had_problems = self.reporter.has_problems();
        match session.front_end.compile(phase) {
            Ok(()) => {
                debug!(module = %self.module, ?phase, "front-end advanced");
                let pending = session
                    .front_end
                    .error_collector(self.module)
                    .is_some_and(|collector| !collector.is_empty());
                if !pending {
                    return PhaseOutcome::Success;
                }
                match self.record_diagnostics(session, phase) {
                    Ok(diagnostics) => PhaseOutcome::RecoverableErrors(diagnostics),
                    Err(Aborted) => PhaseOutcome::Cancelled,
                }
            }
            Err(fault) if fault.is_cancellation() => PhaseOutcome::Cancelled,
            Err(CompileFault::MultipleErrors { mut messages }) => {
                let translator = self.translator(session, phase);
                match translator.record_problems(&mut messages, &mut self.reporter) {
                    Ok(diagnostics) => PhaseOutcome::RecoverableErrors(diagnostics),
                    Err(Aborted) => PhaseOutcome::Cancelled,
                }
            }
            Err(CompileFault::Bug { message }) => {
                // after reported problems a crash is treated as their cascade
                if already_had_problems {
                    warn!(module = %self.module, ?phase, "front-end failed after earlier problems: {message}");
                    return PhaseOutcome::RecoverableErrors(Vec::new());
                }
                error!(module = %self.module, ?phase, "front-end bug: {message}");
                PhaseOutcome::Fatal(BridgeError::FrontEndBug { message })
            }
            Err(CompileFault::Aborted) => PhaseOutcome::Cancelled,
        }
    }

    fn translator<F: FrontEnd>(
        &self,
        session: &BuildSession<F>,
        phase: CompilationPhase,
    ) -> DiagnosticTranslator {
        let db = session.db();
        DiagnosticTranslator::new(
            self.module,
            line_separator_positions(db, self.file),
            source_end(db, self.file),
            phase,
        )
    }

    fn run_stage<F: FrontEnd>(
        &mut self,
        session: &mut BuildSession<F>,
        stage: Stage,
        run: impl FnOnce(&mut Self, &mut BuildSession<F>) -> PhaseOutcome,
    ) -> PhaseOutcome {
        if let Some(outcome) = self.completed.get(&stage) {
            return outcome.clone();
        }
        let outcome = run(self, session);
        if outcome != PhaseOutcome::Cancelled {
            self.completed.insert(stage, outcome.clone());
        }
        outcome
    }
}

impl<F: FrontEnd, R: ProblemReporter> UnitHooks<F> for SourceUnitDeclaration<R> {
    fn populate(&mut self, session: &mut BuildSession<F>) -> PhaseOutcome {
        self.run_stage(session, Stage::Populate, |unit, session| {
            let outcome = unit.process_to_phase(session, CompilationPhase::Conversion);
            if !outcome.is_success() {
                return outcome;
            }
            let Some(module) = session.front_end().module(unit.module) else {
                return PhaseOutcome::Fatal(BridgeError::UnknownModule {
                    module: unit.module,
                });
            };
            let types = session.type_references();
            match DeclarationBuilder::new(module, &types).build() {
                Ok(tree) => {
                    unit.tree = tree;
                    PhaseOutcome::Success
                }
                Err(err) => {
                    error!(module = %unit.module, "cannot build declarations: {err}");
                    PhaseOutcome::Fatal(err)
                }
            }
        })
    }

    fn build_scope(&mut self, session: &mut BuildSession<F>) {
        fn bind(
            types: &mut [TypeDeclaration],
            package: &[String],
            outer: Option<&str>,
            environment: &mut LookupEnvironment,
        ) {
            for declaration in types {
                let binary_name = match outer {
                    Some(outer) => format!("{outer}${}", declaration.name),
                    None => declaration.name.clone(),
                };
                let mut compound_name = package.to_vec();
                compound_name.push(binary_name.clone());
                let binding = TypeBinding::new(compound_name);
                environment.register(binding.clone());
                declaration.binding = Some(binding);
                bind(
                    &mut declaration.member_types,
                    package,
                    Some(&binary_name),
                    environment,
                );
            }
        }

        let package = self.tree.package_segments();
        bind(&mut self.tree.types, &package, None, session.environment_mut());
    }

    fn resolve(&mut self, session: &mut BuildSession<F>) -> PhaseOutcome {
        self.run_stage(session, Stage::Resolve, |unit, session| {
            let outcome = unit.process_to_phase(session, CompilationPhase::SemanticAnalysis);
            if outcome == PhaseOutcome::Cancelled {
                return outcome;
            }
            let Some(module) = session.front_end().module(unit.module) else {
                return outcome;
            };
            for marker in scan_tasks(&module.comments, &session.options().task_tags) {
                if unit.reporter.task(marker).is_err() {
                    return PhaseOutcome::Cancelled;
                }
            }
            unit.tree.comments = module
                .comments
                .iter()
                .map(|comment| CommentRange {
                    start: comment.start,
                    end: comment.end,
                })
                .collect();
            outcome
        })
    }

    fn analyse_code(&mut self, session: &mut BuildSession<F>) -> PhaseOutcome {
        self.run_stage(session, Stage::Analyse, |unit, session| {
            unit.process_to_phase(session, CompilationPhase::Canonicalization)
        })
    }

    fn generate_code(&mut self, session: &mut BuildSession<F>) -> PhaseOutcome {
        self.run_stage(session, Stage::Generate, |unit, session| {
            let outcome = unit.process_to_phase(session, CompilationPhase::ALL);
            if outcome.is_success()
                && let Some(module) = session.front_end().module(unit.module)
            {
                let recorded = correlate(
                    module,
                    &unit.tree,
                    session.front_end().generated_classes(),
                    &mut unit.reporter,
                );
                debug!(module = %unit.module, recorded, "recorded class files");
            }
            outcome
        })
    }

    fn record_diagnostics(
        &mut self,
        session: &mut BuildSession<F>,
        phase: CompilationPhase,
    ) -> Result<Vec<Diagnostic>, Aborted> {
        let translator = self.translator(session, phase);
        match session.front_end.error_collector(self.module) {
            Some(collector) => translator.record_problems(collector, &mut self.reporter),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use astbridge_core::BridgeOptions;
    use astbridge_source::{ClassNode, Message, Module, NodeSpan, RecordedFrontEnd, SyntaxFault};

    use super::*;

    const TEXT: &str = "class A {\n  int x\n}\n";

    fn session(front_end: RecordedFrontEnd) -> BuildSession<RecordedFrontEnd> {
        BuildSession::new(front_end, BridgeOptions::default())
    }

    fn module() -> Module {
        Module::new(ModuleId(0)).with_class(ClassNode::new("A", NodeSpan::new(0, 19).on_line(1)))
    }

    #[test]
    fn test_populate_builds_tree_once() {
        let mut session = session(RecordedFrontEnd::new().with_unit("A.groovy", TEXT, module()));
        let mut unit = session.open_unit(ModuleId(0), "A.groovy", TEXT).unwrap();
        assert_eq!(unit.populate(&mut session), PhaseOutcome::Success);
        assert_eq!(unit.tree().types.len(), 1);
        assert_eq!(unit.populate(&mut session), PhaseOutcome::Success);
        assert_eq!(unit.tree().types.len(), 1);
    }

    #[test]
    fn test_collector_errors_are_recoverable() {
        let front_end = RecordedFrontEnd::new()
            .with_unit("A.groovy", TEXT, module())
            .with_message(
                ModuleId(0),
                CompilationPhase::Parsing,
                Message::Syntax(SyntaxFault::new("unexpected token: int", 2, 3, 6)),
            );
        let mut session = session(front_end);
        let mut unit = session.open_unit(ModuleId(0), "A.groovy", TEXT).unwrap();
        let PhaseOutcome::RecoverableErrors(diagnostics) = unit.populate(&mut session) else {
            panic!("expected recoverable errors");
        };
        insta::assert_snapshot!(diagnostics[0].to_string(), @"ERROR 12..14 (line 2, col 3): Groovy:unexpected token: int");
        // no tree for a file that failed to convert
        assert!(unit.tree().types.is_empty());
        assert!(unit.reporter().has_problems());
    }

    #[test]
    fn test_unknown_module() {
        let session = session(RecordedFrontEnd::new());
        assert!(matches!(
            session.open_unit(ModuleId(3), "X.groovy", ""),
            Err(BridgeError::UnknownModule { module: ModuleId(3) })
        ));
    }

    #[test]
    fn test_build_scope_binds_nested_types() {
        let module = Module::new(ModuleId(0))
            .with_package(astbridge_source::PackageNode::new("p.", 8, 9))
            .with_class(ClassNode::new("p.Outer", NodeSpan::new(11, 60)))
            .with_class(ClassNode::new("p.Outer$Inner", NodeSpan::new(25, 50)).nested_in("p.Outer"));
        let text = "package p\nclass Outer { class Inner {} }";
        let mut session = session(RecordedFrontEnd::new().with_unit("Outer.groovy", text, module));
        let mut unit = session.open_unit(ModuleId(0), "Outer.groovy", text).unwrap();
        assert!(unit.populate(&mut session).is_success());
        unit.build_scope(&mut session);

        let inner = &unit.tree().types[0].member_types[0];
        assert_eq!(
            inner.binding.as_ref().map(TypeBinding::qualified_name),
            Some("p.Outer$Inner".to_string())
        );
        assert!(session.environment().lookup("p.Outer").is_some());
        assert_eq!(session.environment().len(), 2);
    }
}
