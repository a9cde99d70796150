//! Bridges a dynamic-language front-end into a static host compiler.
//!
//! The front-end parses and analyses every file of a build in one shared
//! compilation unit. For each file the bridge builds the host's declaration
//! tree from the front-end's module, translates the front-end's problems into
//! host diagnostics, and drives the front-end's phases from the host's
//! pipeline callbacks.

pub mod annotations;
pub mod codegen;
pub mod declarations;
pub mod error;
pub mod fixup;
pub mod problems;
pub mod session;
pub mod tasks;
pub mod type_refs;
pub mod unit;
pub mod variants;

pub use annotations::{AnnotationShape, translate_annotations};
pub use declarations::DeclarationBuilder;
pub use error::{BridgeError, BridgeResult};
pub use problems::DiagnosticTranslator;
pub use session::BuildSession;
pub use type_refs::{PrimitiveTables, TypeReferenceBuilder};
pub use unit::{PhaseOutcome, SourceUnitDeclaration, UnitHooks};
