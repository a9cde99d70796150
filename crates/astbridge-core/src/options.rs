//! Options controlling the translation.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeOptions {
    pub task_tags: TaskTagOptions,
    /// Leave raw-type checking enabled on translated type references.
    pub check_generics: bool,
    /// Verify every plain single type reference as it is built.
    pub check_type_references: bool,
}

/// Marker tags recognized inside comments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskTagOptions {
    pub tags: Vec<String>,
    /// Priority of each tag, by index. Missing entries mean no priority.
    pub priorities: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            task_tags: TaskTagOptions::default(),
            check_generics: false,
            check_type_references: false,
        }
    }
}

impl Default for TaskTagOptions {
    fn default() -> Self {
        Self {
            tags: vec!["TODO".into(), "FIXME".into(), "XXX".into()],
            priorities: vec!["NORMAL".into(), "HIGH".into(), "NORMAL".into()],
            case_sensitive: true,
        }
    }
}

impl TaskTagOptions {
    pub fn priority_of(&self, index: usize) -> Option<&str> {
        self.priorities.get(index).map(String::as_str)
    }
}
