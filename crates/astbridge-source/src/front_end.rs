use std::path::Path;

use astbridge_core::CompilationPhase;
use serde::{Deserialize, Serialize};

use crate::message::{CompileFault, Message};
use crate::module::{Module, ModuleId};

/// Bytecode the front-end produced for one class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedClass {
    /// Fully qualified name, nested classes joined with `$`.
    pub name: String,
    #[serde(default)]
    pub bytes: Vec<u8>,
}

/// The compilation unit shared by every source file in a build.
///
/// Compiling is cumulative: once a phase has been reached, asking for it (or
/// an earlier one) again does nothing.
pub trait FrontEnd {
    /// Advance every module to `target`.
    fn compile(&mut self, target: CompilationPhase) -> Result<(), CompileFault>;

    /// Last phase reached.
    fn current_phase(&self) -> CompilationPhase;

    fn module(&self, id: ModuleId) -> Option<&Module>;

    /// The module's error collector. Reported messages are removed from it
    /// by the caller.
    fn error_collector(&mut self, id: ModuleId) -> Option<&mut Vec<Message>>;

    fn generated_classes(&self) -> &[GeneratedClass];

    fn path(&self, id: ModuleId) -> Option<&Path>;
}
