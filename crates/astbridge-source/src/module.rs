//! The parsed source file as the front-end hands it over.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::class::{ClassDescriptor, ClassNode};

/// Identity of a module within the shared compilation unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}

/// Offsets the front-end records for a node.
///
/// Offsets are byte offsets into the file; `end` is exclusive. A node the
/// front-end invented reports zeros. `line` is one-based.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSpan {
    pub start: i32,
    pub end: i32,
    pub name_start: i32,
    pub name_end: i32,
    pub line: i32,
}

impl NodeSpan {
    pub const fn new(start: i32, end: i32) -> Self {
        Self {
            start,
            end,
            name_start: 0,
            name_end: 0,
            line: 0,
        }
    }

    #[must_use]
    pub const fn with_name(mut self, name_start: i32, name_end: i32) -> Self {
        self.name_start = name_start;
        self.name_end = name_end;
        self
    }

    #[must_use]
    pub const fn on_line(mut self, line: i32) -> Self {
        self.line = line;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    #[serde(default)]
    pub package: Option<PackageNode>,
    #[serde(default)]
    pub imports: Vec<ImportNode>,
    /// Wildcard package imports; these arrive separately from `imports`.
    #[serde(default)]
    pub star_imports: Vec<StarImport>,
    /// Every class the front-end knows about for this file, outer classes
    /// before the classes nested in them.
    #[serde(default)]
    pub classes: Vec<ClassNode>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Module {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            package: None,
            imports: Vec::new(),
            star_imports: Vec::new(),
            classes: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_package(mut self, package: PackageNode) -> Self {
        self.package = Some(package);
        self
    }

    #[must_use]
    pub fn with_import(mut self, import: ImportNode) -> Self {
        self.imports.push(import);
        self
    }

    #[must_use]
    pub fn with_star_import(mut self, import: StarImport) -> Self {
        self.star_imports.push(import);
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: ClassNode) -> Self {
        self.classes.push(class);
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    pub fn class(&self, name: &str) -> Option<&ClassNode> {
        self.classes.iter().find(|class| class.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageNode {
    /// Dotted package name, possibly with a trailing `.`.
    pub name: String,
    pub start: i32,
    pub end: i32,
}

impl PackageNode {
    pub fn new(name: impl Into<String>, start: i32, end: i32) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }
}

/// A single-type import, optionally aliased (`import a.B as C`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImportNode {
    pub class_name: String,
    #[serde(default)]
    pub alias: Option<String>,
    /// The imported type; only its offsets are reliable.
    pub ty: ClassDescriptor,
}

impl ImportNode {
    pub fn new(class_name: impl Into<String>, start: i32, end: i32) -> Self {
        let class_name = class_name.into();
        Self {
            ty: ClassDescriptor::named(class_name.clone()).at(start, end),
            class_name,
            alias: None,
        }
    }

    #[must_use]
    pub fn aliased(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// A wildcard import (`import a.b.*`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarImport {
    /// Package name including its trailing `.`.
    pub package_name: String,
    #[serde(default)]
    pub start: i32,
    #[serde(default)]
    pub end: i32,
}

impl StarImport {
    pub fn new(package_name: impl Into<String>, start: i32, end: i32) -> Self {
        Self {
            package_name: package_name.into(),
            start,
            end,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    Line,
    Block,
    Javadoc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    /// Full comment text, delimiters included.
    pub text: String,
    /// Offset of the first byte of the comment.
    pub start: i32,
    /// Offset of the last byte of the comment.
    pub end: i32,
    pub first_line: i32,
    pub last_line: i32,
}

impl Comment {
    pub fn new(kind: CommentKind, text: impl Into<String>, start: i32, first_line: i32) -> Self {
        let text = text.into();
        let end = start + text.len() as i32 - 1;
        let last_line = first_line + text.matches('\n').count() as i32;
        Self {
            kind,
            text,
            start,
            end,
            first_line,
            last_line,
        }
    }

    pub fn is_javadoc(&self) -> bool {
        self.kind == CommentKind::Javadoc
    }
}
