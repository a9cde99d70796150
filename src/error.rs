//! Error types for the bridge.

use astbridge_source::ModuleId;
use derive_more::{Display, Error};

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Faults that stop a unit's translation. None of these is a user-facing
/// diagnostic.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[display("Unable to convert signature to reference. Signature was '{signature}'")]
    MalformedSignature { signature: String },

    #[display("Type reference '{token}' has malformed range {start}..{end}")]
    MalformedTypeReference { token: String, start: i32, end: i32 },

    #[display("Outer type '{outer}' of '{inner}' has not been built")]
    MissingOuterType { inner: String, outer: String },

    #[display("Unknown module: {module}")]
    UnknownModule { module: ModuleId },

    #[display("Front-end bug: {message}")]
    FrontEndBug { message: String },
}

impl BridgeError {
    pub fn malformed_signature(signature: impl Into<String>) -> Self {
        BridgeError::MalformedSignature {
            signature: signature.into(),
        }
    }
}
