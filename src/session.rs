//! The build session: state shared by every file of one build.

use std::path::Path;

use astbridge_core::{BridgeDatabase, BridgeOptions};
use astbridge_host::{CompilationResult, LookupEnvironment, ProblemReporter};
use astbridge_source::{FrontEnd, ModuleId};
use tracing::debug;

use crate::error::{BridgeError, BridgeResult};
use crate::type_refs::{PrimitiveTables, TypeReferenceBuilder};
use crate::unit::SourceUnitDeclaration;

/// Owns the front-end compilation unit that every file of the build shares.
///
/// Advancing the front-end on behalf of one file advances all of them: a
/// later file may find its phase already reached, and messages for it may
/// already be waiting in its collector.
pub struct BuildSession<F: FrontEnd> {
    pub(crate) front_end: F,
    db: BridgeDatabase,
    options: BridgeOptions,
    tables: PrimitiveTables,
    environment: LookupEnvironment,
}

impl<F: FrontEnd> BuildSession<F> {
    pub fn new(front_end: F, options: BridgeOptions) -> Self {
        Self {
            front_end,
            db: BridgeDatabase::default(),
            options,
            tables: PrimitiveTables::new(),
            environment: LookupEnvironment::new(),
        }
    }

    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    pub fn db(&self) -> &BridgeDatabase {
        &self.db
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    pub fn environment(&self) -> &LookupEnvironment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut LookupEnvironment {
        &mut self.environment
    }

    pub fn type_references(&self) -> TypeReferenceBuilder<'_> {
        TypeReferenceBuilder::new(&self.tables, &self.options)
    }

    /// Open the unit for `module`, reporting into a fresh [`CompilationResult`].
    pub fn open_unit(
        &self,
        module: ModuleId,
        path: impl AsRef<Path>,
        text: impl Into<String>,
    ) -> BridgeResult<SourceUnitDeclaration> {
        self.open_unit_with(module, path, text, CompilationResult::new())
    }

    pub fn open_unit_with<R: ProblemReporter>(
        &self,
        module: ModuleId,
        path: impl AsRef<Path>,
        text: impl Into<String>,
        reporter: R,
    ) -> BridgeResult<SourceUnitDeclaration<R>> {
        if self.front_end.module(module).is_none() {
            return Err(BridgeError::UnknownModule { module });
        }
        let path = path.as_ref();
        let file = self.db.input(path, text);
        debug!(%module, path = %path.display(), "opened unit");
        Ok(SourceUnitDeclaration::new(module, file, reporter))
    }
}
