//! The host declaration tree built for one source file.
//!
//! Offsets follow the host conventions: `source_*` covers a declaration's
//! name, `declaration_source_*` the whole declaration including its doc
//! comment, and every end offset is inclusive.

use astbridge_core::{Modifiers, Position};
use serde::Serialize;

use crate::annotation::Annotation;
use crate::lookup::TypeBinding;
use crate::type_ref::TypeReference;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HostDeclarationTree {
    pub package: Option<ImportReference>,
    pub imports: Vec<ImportReference>,
    pub types: Vec<TypeDeclaration>,
    /// Ranges of every comment in the file, in source order.
    pub comments: Vec<CommentRange>,
}

impl HostDeclarationTree {
    /// Depth-first walk: each type, then its member types.
    pub fn walk_types(&self) -> Vec<&TypeDeclaration> {
        fn visit<'a>(types: &'a [TypeDeclaration], out: &mut Vec<&'a TypeDeclaration>) {
            for ty in types {
                out.push(ty);
                visit(&ty.member_types, out);
            }
        }
        let mut out = Vec::new();
        visit(&self.types, &mut out);
        out
    }

    pub fn package_segments(&self) -> Vec<String> {
        self.package
            .as_ref()
            .map(|package| package.tokens.clone())
            .unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentRange {
    pub start: i32,
    pub end: i32,
}

/// A package declaration or an import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportReference {
    pub tokens: Vec<String>,
    pub positions: Vec<Position>,
    /// Package declarations and wildcard imports.
    pub on_demand: bool,
    pub alias: Option<String>,
    pub modifiers: Modifiers,
    pub source_start: i32,
    pub source_end: i32,
    pub declaration_source_start: i32,
    pub declaration_source_end: i32,
    pub declaration_end: i32,
}

impl ImportReference {
    pub fn new(tokens: Vec<String>, positions: Vec<Position>, on_demand: bool) -> Self {
        let source_start = positions.first().map_or(0, |p| p.start());
        let source_end = positions.last().map_or(0, |p| p.end());
        Self {
            tokens,
            positions,
            on_demand,
            alias: None,
            modifiers: Modifiers::empty(),
            source_start,
            source_end,
            declaration_source_start: source_start,
            declaration_source_end: source_end,
            declaration_end: source_end,
        }
    }

    pub fn qualified_name(&self) -> String {
        self.tokens.join(".")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Javadoc {
    pub source_start: i32,
    pub source_end: i32,
}

/// Source ranges shared by types, methods and fields.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeclarationRange {
    pub source_start: i32,
    pub source_end: i32,
    pub declaration_source_start: i32,
    pub declaration_source_end: i32,
    pub modifiers_source_start: i32,
    pub body_start: i32,
    pub body_end: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeDeclaration {
    /// Simple name; nested types drop their outer prefix.
    pub name: String,
    pub modifiers: Modifiers,
    /// Visible to other files' lookups even though it is not the file's
    /// main type.
    pub is_secondary: bool,
    pub annotations: Vec<Annotation>,
    pub type_parameters: Vec<TypeParameter>,
    pub super_class: Option<TypeReference>,
    pub super_interfaces: Vec<TypeReference>,
    pub fields: Vec<FieldDeclaration>,
    /// Constructors first, then methods.
    pub methods: Vec<MethodDeclaration>,
    pub member_types: Vec<TypeDeclaration>,
    pub javadoc: Option<Javadoc>,
    pub range: DeclarationRange,
    /// Set when the host builds its scope.
    pub binding: Option<TypeBinding>,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
            is_secondary: false,
            annotations: Vec::new(),
            type_parameters: Vec::new(),
            super_class: None,
            super_interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            member_types: Vec::new(),
            javadoc: None,
            range: DeclarationRange::default(),
            binding: None,
        }
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.methods.iter().filter(|m| m.is_constructor())
    }

    pub fn method(&self, selector: &str) -> Option<&MethodDeclaration> {
        self.methods.iter().find(|m| m.selector == selector)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn member_type(&self, name: &str) -> Option<&TypeDeclaration> {
        self.member_types.iter().find(|t| t.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeParameter {
    pub name: String,
    /// First declared bound.
    pub ty: Option<TypeReference>,
    /// Remaining bounds.
    pub bounds: Vec<TypeReference>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodKind {
    Method { return_type: TypeReference },
    Constructor { is_default: bool },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodDeclaration {
    pub selector: String,
    pub modifiers: Modifiers,
    pub kind: MethodKind,
    pub arguments: Vec<Argument>,
    pub annotations: Vec<Annotation>,
    pub javadoc: Option<Javadoc>,
    pub range: DeclarationRange,
}

impl MethodDeclaration {
    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, MethodKind::Constructor { .. })
    }

    pub fn is_default_constructor(&self) -> bool {
        matches!(self.kind, MethodKind::Constructor { is_default: true })
    }

    pub fn return_type(&self) -> Option<&TypeReference> {
        match &self.kind {
            MethodKind::Method { return_type } => Some(return_type),
            MethodKind::Constructor { .. } => None,
        }
    }

    /// Parameter type names in order, without type arguments.
    pub fn parameter_type_names(&self) -> Vec<String> {
        self.arguments.iter().map(|a| a.ty.type_name()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    pub ty: TypeReference,
    pub position: Position,
    pub declaration_source_start: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldDeclaration {
    pub name: String,
    pub modifiers: Modifiers,
    pub ty: TypeReference,
    pub annotations: Vec<Annotation>,
    pub javadoc: Option<Javadoc>,
    pub range: DeclarationRange,
    /// End of the whole declaration, terminator included.
    pub declaration_end: i32,
    /// End of the type part (`int` in `int x, y`).
    pub end_part1_position: i32,
    /// Just before the next fragment.
    pub end_part2_position: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_reference_spans_segments() {
        let reference = ImportReference::new(
            vec!["a".into(), "bc".into()],
            vec![Position::new(7, 7), Position::new(9, 10)],
            false,
        );
        assert_eq!(reference.source_start, 7);
        assert_eq!(reference.source_end, 10);
        assert_eq!(reference.declaration_end, 10);
        assert_eq!(reference.qualified_name(), "a.bc");
    }

    #[test]
    fn test_walk_visits_members_after_owner() {
        let mut outer = TypeDeclaration::new("Outer", Modifiers::PUBLIC);
        outer
            .member_types
            .push(TypeDeclaration::new("Inner", Modifiers::empty()));
        let tree = HostDeclarationTree {
            types: vec![outer, TypeDeclaration::new("Other", Modifiers::empty())],
            ..HostDeclarationTree::default()
        };
        let names: Vec<_> = tree.walk_types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Outer", "Inner", "Other"]);
    }
}
