//! Building host type references from front-end class descriptors.

use std::collections::HashMap;

use astbridge_core::{BridgeOptions, Position, positions_for, split_dotted};
use astbridge_host::{PrimitiveType, TypeReference, TypeReferenceKind, WildcardKind};
use astbridge_source::{ClassDescriptor, GenericsType};

use crate::error::{BridgeError, BridgeResult};

/// Primitive lookups: descriptor character (`I`, `Z`, ...) and keyword.
#[derive(Debug)]
pub struct PrimitiveTables {
    by_descriptor: HashMap<char, PrimitiveType>,
    by_name: HashMap<&'static str, PrimitiveType>,
}

impl PrimitiveTables {
    pub fn new() -> Self {
        let by_descriptor = HashMap::from([
            ('D', PrimitiveType::Double),
            ('I', PrimitiveType::Int),
            ('F', PrimitiveType::Float),
            ('J', PrimitiveType::Long),
            ('Z', PrimitiveType::Boolean),
            ('B', PrimitiveType::Byte),
            ('C', PrimitiveType::Char),
            ('S', PrimitiveType::Short),
        ]);
        let by_name = [
            PrimitiveType::Double,
            PrimitiveType::Int,
            PrimitiveType::Float,
            PrimitiveType::Long,
            PrimitiveType::Boolean,
            PrimitiveType::Byte,
            PrimitiveType::Char,
            PrimitiveType::Short,
            PrimitiveType::Void,
        ]
        .into_iter()
        .map(|primitive| (primitive.keyword(), primitive))
        .collect();
        Self {
            by_descriptor,
            by_name,
        }
    }

    pub fn from_descriptor(&self, descriptor: char) -> Option<PrimitiveType> {
        self.by_descriptor.get(&descriptor).copied()
    }

    pub fn from_name(&self, name: &str) -> Option<PrimitiveType> {
        self.by_name.get(name).copied()
    }
}

impl Default for PrimitiveTables {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TypeReferenceBuilder<'a> {
    tables: &'a PrimitiveTables,
    options: &'a BridgeOptions,
}

impl<'a> TypeReferenceBuilder<'a> {
    pub fn new(tables: &'a PrimitiveTables, options: &'a BridgeOptions) -> Self {
        Self { tables, options }
    }

    pub fn build(&self, descriptor: &ClassDescriptor) -> BridgeResult<TypeReference> {
        let start = descriptor.start.max(0);
        let end = descriptor.end.max(0);

        let mut type_arguments = Vec::new();
        if descriptor.is_using_generics() {
            for generics in &descriptor.generics {
                if let Some(argument) = self.build_argument(generics)? {
                    type_arguments.push(argument);
                }
            }
        }

        let name = descriptor.name.as_str();
        if name == "?" {
            return Ok(TypeReference::new(
                TypeReferenceKind::Wildcard {
                    wildcard: WildcardKind::Unbound,
                    bound: None,
                },
                Position::new(0, 0),
            ));
        }
        if name.starts_with('[') {
            return self.build_array(name, start, end);
        }
        if let Some(primitive) = self.tables.from_name(name) {
            return Ok(TypeReference::base_type(primitive, 0));
        }

        if !name.contains('.') {
            let position = Position::spanning(start, end - 1);
            if type_arguments.is_empty() {
                let mut reference = self.verify(TypeReference::new(
                    TypeReferenceKind::Single {
                        token: name.to_string(),
                        position,
                    },
                    position,
                ))?;
                reference.flags.ignore_raw_type_check = !self.options.check_generics;
                Ok(reference)
            } else {
                Ok(TypeReference::new(
                    TypeReferenceKind::ParameterizedSingle {
                        token: name.to_string(),
                        position,
                        type_arguments,
                    },
                    position,
                ))
            }
        } else {
            let tokens = split_dotted(name);
            let positions = positions_for(&tokens, start, end);
            if type_arguments.is_empty() {
                let mut reference = TypeReference::spanning(
                    TypeReferenceKind::Qualified {
                        tokens,
                        positions: positions.clone(),
                    },
                    &positions,
                );
                reference.flags.ignore_raw_type_check = !self.options.check_generics;
                Ok(reference)
            } else {
                let mut per_segment = vec![None; tokens.len()];
                if let Some(last) = per_segment.last_mut() {
                    *last = Some(type_arguments);
                }
                Ok(TypeReference::spanning(
                    TypeReferenceKind::ParameterizedQualified {
                        tokens,
                        positions: positions.clone(),
                        type_arguments: per_segment,
                    },
                    &positions,
                ))
            }
        }
    }

    /// A type argument, or `None` for an unfilled type variable.
    pub fn build_argument(&self, generics: &GenericsType) -> BridgeResult<Option<TypeReference>> {
        if generics.wildcard {
            let upper = generics
                .upper_bounds
                .as_ref()
                .and_then(|bounds| bounds.first());
            let (wildcard, bound) = match (upper, &generics.lower_bound) {
                (Some(upper), _) => (WildcardKind::Extends, Some(self.build(upper)?)),
                (None, Some(lower)) => (WildcardKind::Super, Some(self.build(lower)?)),
                (None, None) => (WildcardKind::Unbound, None),
            };
            let source_end = bound
                .as_ref()
                .map_or(generics.start, |bound| bound.source_end);
            let mut reference = TypeReference::new(
                TypeReferenceKind::Wildcard {
                    wildcard,
                    bound: bound.map(Box::new),
                },
                Position::new(generics.start, source_end),
            );
            reference.source_start = generics.start;
            reference.source_end = source_end;
            Ok(Some(reference))
        } else if !generics.is_placeholder() {
            self.build(&generics.ty).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Decode a descriptor such as `[[Z` or `[Ljava.lang.String;`.
    fn build_array(&self, signature: &str, start: i32, end: i32) -> BridgeResult<TypeReference> {
        let dimensions = signature.bytes().take_while(|b| *b == b'[').count();
        let element = &signature[dimensions..];
        let dims = dimensions as u32;

        let mut chars = element.chars();
        if let (Some(descriptor), None) = (chars.next(), chars.next()) {
            return self
                .tables
                .from_descriptor(descriptor)
                .map(|primitive| TypeReference::base_type(primitive, dims))
                .ok_or_else(|| BridgeError::malformed_signature(signature));
        }

        let component = element
            .strip_prefix('L')
            .and_then(|rest| rest.strip_suffix(';'))
            .filter(|component| !component.is_empty())
            .ok_or_else(|| BridgeError::malformed_signature(signature))?;

        if !component.contains('.') {
            let position = Position::spanning(start, end - 1);
            Ok(TypeReference::new(
                TypeReferenceKind::Array {
                    token: component.to_string(),
                    dimensions: dims,
                    position,
                    original_source_end: position.start() + component.len() as i32 - 1,
                },
                position,
            ))
        } else {
            let tokens = split_dotted(component);
            let positions = positions_for(&tokens, start, end - dims as i32 * 2);
            let mut reference = TypeReference::spanning(
                TypeReferenceKind::ArrayQualified {
                    tokens,
                    dimensions: dims,
                    positions: positions.clone(),
                },
                &positions,
            );
            reference.source_end = end - 1;
            Ok(reference)
        }
    }

    fn verify(&self, reference: TypeReference) -> BridgeResult<TypeReference> {
        if !self.options.check_type_references {
            return Ok(reference);
        }
        let malformed = if reference.source_start == -1 {
            reference.source_end != -2
        } else {
            reference.source_end < reference.source_start
        };
        if malformed {
            return Err(BridgeError::MalformedTypeReference {
                token: reference.type_name(),
                start: reference.source_start,
                end: reference.source_end,
            });
        }
        Ok(reference)
    }
}
