//! Type references in the host model.

use std::fmt;

use astbridge_core::Position;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardKind {
    Unbound,
    Extends,
    Super,
}

/// Marker bits the host attaches to a reference.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TypeReferenceFlags {
    /// Type of a trailing array parameter.
    pub var_args: bool,
    /// Additional bound of a type parameter.
    pub super_type: bool,
    /// Raw use that should not be reported.
    pub ignore_raw_type_check: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeReferenceKind {
    Wildcard {
        wildcard: WildcardKind,
        bound: Option<Box<TypeReference>>,
    },
    BaseType {
        primitive: PrimitiveType,
        dimensions: u32,
    },
    Single {
        token: String,
        position: Position,
    },
    ParameterizedSingle {
        token: String,
        position: Position,
        type_arguments: Vec<TypeReference>,
    },
    Qualified {
        tokens: Vec<String>,
        positions: Vec<Position>,
    },
    /// Type arguments are held per segment; only the last one carries any.
    ParameterizedQualified {
        tokens: Vec<String>,
        positions: Vec<Position>,
        type_arguments: Vec<Option<Vec<TypeReference>>>,
    },
    Array {
        token: String,
        dimensions: u32,
        position: Position,
        original_source_end: i32,
    },
    ArrayQualified {
        tokens: Vec<String>,
        dimensions: u32,
        positions: Vec<Position>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeReference {
    #[serde(flatten)]
    pub kind: TypeReferenceKind,
    pub source_start: i32,
    pub source_end: i32,
    pub flags: TypeReferenceFlags,
}

impl TypeReference {
    /// A reference spanning the packed `position`.
    pub fn new(kind: TypeReferenceKind, position: Position) -> Self {
        Self {
            kind,
            source_start: position.start(),
            source_end: position.end(),
            flags: TypeReferenceFlags::default(),
        }
    }

    /// A reference spanning the first to the last of `positions`.
    pub fn spanning(kind: TypeReferenceKind, positions: &[Position]) -> Self {
        let source_start = positions.first().map_or(0, |p| p.start());
        let source_end = positions.last().map_or(0, |p| p.end());
        Self {
            kind,
            source_start,
            source_end,
            flags: TypeReferenceFlags::default(),
        }
    }

    pub fn base_type(primitive: PrimitiveType, dimensions: u32) -> Self {
        Self {
            kind: TypeReferenceKind::BaseType {
                primitive,
                dimensions,
            },
            source_start: 0,
            source_end: 0,
            flags: TypeReferenceFlags::default(),
        }
    }

    pub fn dimensions(&self) -> u32 {
        match &self.kind {
            TypeReferenceKind::BaseType { dimensions, .. }
            | TypeReferenceKind::Array { dimensions, .. }
            | TypeReferenceKind::ArrayQualified { dimensions, .. } => *dimensions,
            _ => 0,
        }
    }

    /// Printable type name without type arguments, e.g. `java.lang.String[]`.
    ///
    /// Two overloads with the same selector are duplicates when their
    /// parameter type names agree.
    pub fn type_name(&self) -> String {
        let base = match &self.kind {
            TypeReferenceKind::Wildcard { wildcard, bound } => match (wildcard, bound) {
                (WildcardKind::Extends, Some(bound)) => format!("? extends {}", bound.type_name()),
                (WildcardKind::Super, Some(bound)) => format!("? super {}", bound.type_name()),
                _ => "?".to_string(),
            },
            TypeReferenceKind::BaseType { primitive, .. } => primitive.keyword().to_string(),
            TypeReferenceKind::Single { token, .. }
            | TypeReferenceKind::ParameterizedSingle { token, .. }
            | TypeReferenceKind::Array { token, .. } => token.clone(),
            TypeReferenceKind::Qualified { tokens, .. }
            | TypeReferenceKind::ParameterizedQualified { tokens, .. }
            | TypeReferenceKind::ArrayQualified { tokens, .. } => tokens.join("."),
        };
        let mut name = base;
        for _ in 0..self.dimensions() {
            name.push_str("[]");
        }
        name
    }

    pub fn is_array(&self) -> bool {
        self.dimensions() > 0
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())?;
        match &self.kind {
            TypeReferenceKind::ParameterizedSingle { type_arguments, .. } => {
                write_arguments(f, type_arguments)
            }
            TypeReferenceKind::ParameterizedQualified { type_arguments, .. } => {
                match type_arguments.last() {
                    Some(Some(arguments)) => write_arguments(f, arguments),
                    _ => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &[TypeReference]) -> fmt::Result {
    write!(f, "<")?;
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{argument}")?;
    }
    write!(f, ">")
}
