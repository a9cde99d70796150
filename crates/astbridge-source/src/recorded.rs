//! A front-end that replays recorded results.
//!
//! Modules, collector messages, faults and generated classes are loaded up
//! front (usually from a JSON fixture) and released as compilation advances
//! through the phases they are scheduled for.

use std::path::{Path, PathBuf};

use astbridge_core::CompilationPhase;
use serde::{Deserialize, Serialize};

use crate::front_end::{FrontEnd, GeneratedClass};
use crate::message::{CompileFault, Message};
use crate::module::{Module, ModuleId};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordedFrontEnd {
    #[serde(default)]
    pub units: Vec<RecordedUnit>,
    /// Each fault is raised once, when its phase is first reached.
    #[serde(default)]
    pub faults: Vec<ScheduledFault>,
    #[serde(default)]
    pub generated: Vec<GeneratedClass>,
    #[serde(skip)]
    reached: Option<CompilationPhase>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedUnit {
    pub path: PathBuf,
    #[serde(default)]
    pub text: String,
    pub module: Module,
    /// Messages not yet released into the collector.
    #[serde(default)]
    pub messages: Vec<ScheduledMessage>,
    #[serde(skip)]
    collector: Vec<Message>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledMessage {
    pub phase: CompilationPhase,
    pub message: Message,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledFault {
    pub phase: CompilationPhase,
    pub fault: CompileFault,
}

impl RecordedFrontEnd {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unit(mut self, path: impl Into<PathBuf>, text: impl Into<String>, module: Module) -> Self {
        self.units.push(RecordedUnit {
            path: path.into(),
            text: text.into(),
            module,
            messages: Vec::new(),
            collector: Vec::new(),
        });
        self
    }

    /// Release `message` into the collector of `id` when `phase` is reached.
    #[must_use]
    pub fn with_message(mut self, id: ModuleId, phase: CompilationPhase, message: Message) -> Self {
        if let Some(unit) = self.units.iter_mut().find(|unit| unit.module.id == id) {
            unit.messages.push(ScheduledMessage { phase, message });
        }
        self
    }

    #[must_use]
    pub fn with_fault(mut self, phase: CompilationPhase, fault: CompileFault) -> Self {
        self.faults.push(ScheduledFault { phase, fault });
        self
    }

    #[must_use]
    pub fn with_generated(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.generated.push(GeneratedClass {
            name: name.into(),
            bytes,
        });
        self
    }

    fn unit(&self, id: ModuleId) -> Option<&RecordedUnit> {
        self.units.iter().find(|unit| unit.module.id == id)
    }

    fn release_messages(&mut self, phase: CompilationPhase) {
        for unit in &mut self.units {
            let (ready, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut unit.messages)
                .into_iter()
                .partition(|scheduled| scheduled.phase <= phase);
            unit.messages = pending;
            unit.collector
                .extend(ready.into_iter().map(|scheduled| scheduled.message));
        }
    }
}

impl FrontEnd for RecordedFrontEnd {
    fn compile(&mut self, target: CompilationPhase) -> Result<(), CompileFault> {
        let current = self.current_phase();
        let steps: Vec<_> = current.steps_to(target).collect();
        for step in steps {
            self.reached = Some(step);
            self.release_messages(step);
            if let Some(index) = self.faults.iter().position(|f| f.phase == step) {
                return Err(self.faults.remove(index).fault);
            }
        }
        Ok(())
    }

    fn current_phase(&self) -> CompilationPhase {
        self.reached.unwrap_or(CompilationPhase::Initialization)
    }

    fn module(&self, id: ModuleId) -> Option<&Module> {
        self.unit(id).map(|unit| &unit.module)
    }

    fn error_collector(&mut self, id: ModuleId) -> Option<&mut Vec<Message>> {
        self.units
            .iter_mut()
            .find(|unit| unit.module.id == id)
            .map(|unit| &mut unit.collector)
    }

    fn generated_classes(&self) -> &[GeneratedClass] {
        &self.generated
    }

    fn path(&self, id: ModuleId) -> Option<&Path> {
        self.unit(id).map(|unit| unit.path.as_path())
    }
}
