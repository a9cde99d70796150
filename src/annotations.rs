//! Annotation translation.
//!
//! Only a handful of annotation shapes are carried over to the host; every
//! other usage is dropped. The recognized shapes cover marker annotations,
//! `@X(Y.class)`, the test-runner idiom `@RunWith(Y)`, and string-valued
//! warning suppression.

use astbridge_core::{Position, positions_for, split_dotted};
use astbridge_host::{
    Annotation, MemberValue, PrimitiveType, StringLiteral, TypeReference, TypeReferenceKind,
};
use astbridge_source::{AnnotationNode, ConstantValue, Expression};

use crate::error::BridgeResult;
use crate::type_refs::TypeReferenceBuilder;

const RUNNER_SUFFIX: &str = "RunWith";
const TEST_MARKER: &str = "Test";
const SUPPRESS_WARNINGS: &str = "SuppressWarnings";

/// How an annotation usage is carried over.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationShape<'a> {
    /// No member values.
    Marker,
    /// `value = X.class`; holds the whole `X.class` expression.
    ClassLiteral { literal: &'a Expression },
    /// `@RunWith(X)`: a bare identifier standing for `X.class`.
    IdentifierAsClass { name: String, value_end: i32 },
    StringLiteral { value: &'a str, start: i32, end: i32 },
    StringList { elements: Vec<(&'a str, i32, i32)> },
    /// A test annotation with arbitrary members, kept as a marker.
    TestMarker,
    Unsupported,
}

impl<'a> AnnotationShape<'a> {
    pub fn classify(node: &'a AnnotationNode) -> Self {
        if node.members.is_empty() {
            return AnnotationShape::Marker;
        }
        if let [member] = node.members.as_slice()
            && member.name == "value"
            && let Some(shape) = Self::single_value(node, &member.value)
        {
            return shape;
        }
        if node.class.name_without_package() == TEST_MARKER {
            return AnnotationShape::TestMarker;
        }
        AnnotationShape::Unsupported
    }

    fn single_value(node: &AnnotationNode, value: &'a Expression) -> Option<Self> {
        let suppresses = node.class.name == SUPPRESS_WARNINGS;
        match value {
            Expression::Property { property, .. } if property == "class" => {
                Some(AnnotationShape::ClassLiteral { literal: value })
            }
            Expression::Variable { name, end, .. } if node.class.name.ends_with(RUNNER_SUFFIX) => {
                Some(AnnotationShape::IdentifierAsClass {
                    name: name.clone(),
                    value_end: *end,
                })
            }
            Expression::Constant {
                value: ConstantValue::String(text),
                start,
                end,
            } if suppresses => Some(AnnotationShape::StringLiteral {
                value: text,
                start: *start,
                end: *end,
            }),
            Expression::List { elements, .. } if suppresses => elements
                .iter()
                .map(|element| match element {
                    Expression::Constant {
                        value: ConstantValue::String(text),
                        start,
                        end,
                    } => Some((text.as_str(), *start, *end)),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(|elements| AnnotationShape::StringList { elements }),
            _ => None,
        }
    }
}

/// Translate the annotations of one declaration, dropping unsupported ones.
pub fn translate_annotations(
    types: &TypeReferenceBuilder<'_>,
    nodes: &[AnnotationNode],
) -> BridgeResult<Vec<Annotation>> {
    let mut annotations = Vec::new();
    for node in nodes {
        if let Some(annotation) = translate_annotation(types, node)? {
            annotations.push(annotation);
        }
    }
    Ok(annotations)
}

fn translate_annotation(
    types: &TypeReferenceBuilder<'_>,
    node: &AnnotationNode,
) -> BridgeResult<Option<Annotation>> {
    let simple_name_len = node.class.name_without_package().len() as i32;
    let full_name_len = node.class.name.len() as i32;
    let annotation = match AnnotationShape::classify(node) {
        AnnotationShape::Marker | AnnotationShape::TestMarker => {
            let type_ref = annotation_type(types, node, node.end)?;
            Annotation::marker(type_ref, node.start, node.end)
        }
        AnnotationShape::ClassLiteral { literal } => {
            let type_ref = annotation_type(types, node, node.end)?;
            let value = MemberValue::ClassLiteral {
                source_end: literal.end(),
                type_ref: class_literal_type(literal),
            };
            Annotation::single_member(type_ref, value, node.start, node.start + simple_name_len)
        }
        AnnotationShape::IdentifierAsClass { name, value_end } => {
            let type_ref = annotation_type(types, node, node.end)?;
            let (start, end) = (type_ref.source_start, type_ref.source_end);
            let reference = if name.contains('.') {
                let tokens = split_dotted(&name);
                let positions = positions_for(&tokens, start, end - 2);
                TypeReference::spanning(
                    TypeReferenceKind::Qualified {
                        tokens,
                        positions: positions.clone(),
                    },
                    &positions,
                )
            } else {
                let position = Position::spanning(start, end - 1);
                TypeReference::new(
                    TypeReferenceKind::Single {
                        token: name,
                        position,
                    },
                    position,
                )
            };
            let value = MemberValue::ClassLiteral {
                source_end: value_end,
                type_ref: reference,
            };
            Annotation::single_member(type_ref, value, node.start, node.start + simple_name_len)
        }
        AnnotationShape::StringLiteral { value, start, end } => {
            let type_ref = annotation_type(types, node, node.end - 1)?;
            let declaration_source_end = node.start
                + if value.contains('.') {
                    full_name_len
                } else {
                    simple_name_len
                }
                - 1;
            let literal = StringLiteral {
                value: value.to_string(),
                source_start: start,
                source_end: end - 1,
            };
            Annotation::single_member(
                type_ref,
                MemberValue::StringLiteral(literal),
                node.start,
                declaration_source_end,
            )
        }
        AnnotationShape::StringList { elements } => {
            let type_ref = annotation_type(types, node, node.end - 1)?;
            let mut declaration_source_end = type_ref.source_end;
            let mut literals = Vec::with_capacity(elements.len());
            for (value, start, end) in elements {
                declaration_source_end = node.start
                    + if value.contains('.') {
                        full_name_len
                    } else {
                        simple_name_len
                    }
                    - 1;
                literals.push(StringLiteral {
                    value: value.to_string(),
                    source_start: start,
                    source_end: end - 1,
                });
            }
            Annotation::single_member(
                type_ref,
                MemberValue::ArrayInitializer { elements: literals },
                node.start,
                declaration_source_end,
            )
        }
        AnnotationShape::Unsupported => return Ok(None),
    };
    Ok(Some(annotation))
}

/// The annotation's own type, spanning the whole usage.
fn annotation_type(
    types: &TypeReferenceBuilder<'_>,
    node: &AnnotationNode,
    end: i32,
) -> BridgeResult<TypeReference> {
    let mut type_ref = types.build(&node.class)?;
    type_ref.source_start = node.start;
    type_ref.source_end = end;
    Ok(type_ref)
}

/// The `X` of `X.class`, as a single or qualified reference.
fn class_literal_type(literal: &Expression) -> TypeReference {
    let Expression::Property { object, .. } = literal else {
        return TypeReference::base_type(PrimitiveType::Void, 0);
    };
    let mut parts = Vec::new();
    let mut candidate: &Expression = object;
    while let Expression::Property {
        object, property, ..
    } = candidate
    {
        parts.push(property.clone());
        candidate = object;
    }
    if let Expression::Variable { name, .. } = candidate {
        parts.push(name.clone());
    }
    parts.reverse();

    let positions = positions_for(&parts, object.start(), object.end());
    match parts.len() {
        0 => TypeReference::base_type(PrimitiveType::Void, 0),
        1 => {
            let token = parts.remove(0);
            TypeReference::new(
                TypeReferenceKind::Single {
                    token,
                    position: positions[0],
                },
                positions[0],
            )
        }
        _ => TypeReference::spanning(
            TypeReferenceKind::Qualified {
                tokens: parts,
                positions: positions.clone(),
            },
            &positions,
        ),
    }
}
