use serde::Serialize;

use crate::type_ref::TypeReference;

/// An annotation usage attached to a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub type_ref: TypeReference,
    pub source_start: i32,
    pub declaration_source_end: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationKind {
    Marker,
    SingleMember { value: MemberValue },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberValue {
    /// `X.class`, ending at `source_end`.
    ClassLiteral {
        source_end: i32,
        type_ref: TypeReference,
    },
    StringLiteral(StringLiteral),
    /// `{ "a", "b" }`.
    ArrayInitializer { elements: Vec<StringLiteral> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StringLiteral {
    pub value: String,
    pub source_start: i32,
    pub source_end: i32,
}

impl Annotation {
    pub fn marker(type_ref: TypeReference, source_start: i32, declaration_source_end: i32) -> Self {
        Self {
            kind: AnnotationKind::Marker,
            type_ref,
            source_start,
            declaration_source_end,
        }
    }

    pub fn single_member(
        type_ref: TypeReference,
        value: MemberValue,
        source_start: i32,
        declaration_source_end: i32,
    ) -> Self {
        Self {
            kind: AnnotationKind::SingleMember { value },
            type_ref,
            source_start,
            declaration_source_end,
        }
    }

    pub fn member_value(&self) -> Option<&MemberValue> {
        match &self.kind {
            AnnotationKind::Marker => None,
            AnnotationKind::SingleMember { value } => Some(value),
        }
    }
}
