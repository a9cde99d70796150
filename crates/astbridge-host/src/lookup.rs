//! Host type bindings and the environment they are registered in.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

/// The host's resolved identity for a declared type.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeBinding {
    /// Package segments followed by the binary simple name (`Outer$Inner`).
    pub compound_name: Vec<String>,
}

impl TypeBinding {
    pub fn new(compound_name: Vec<String>) -> Self {
        Self { compound_name }
    }

    /// Dotted form of the compound name.
    pub fn qualified_name(&self) -> String {
        self.compound_name.join(".")
    }
}

impl fmt::Debug for TypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeBinding({})", self.qualified_name())
    }
}

#[derive(Debug, Default)]
pub struct LookupEnvironment {
    types: BTreeMap<String, TypeBinding>,
}

impl LookupEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `binding` visible to other units. Returns false when a type of
    /// the same name was already registered; the first registration stays.
    pub fn register(&mut self, binding: TypeBinding) -> bool {
        let name = binding.qualified_name();
        if self.types.contains_key(&name) {
            return false;
        }
        debug!("registered type {name}");
        self.types.insert(name, binding);
        true
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<&TypeBinding> {
        self.types.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
