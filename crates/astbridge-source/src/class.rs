//! Classes, members and type descriptors of a front-end module.

use astbridge_core::Modifiers;
use serde::{Deserialize, Serialize};

use crate::module::NodeSpan;

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const ENUM: &str = "java.lang.Enum";

fn primary_by_default() -> bool {
    true
}

/// Reference to a type as written (or inferred) at some use site.
///
/// Array types use the JVM descriptor form, e.g. `[I` or
/// `[[Ljava.lang.String;`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    #[serde(default)]
    pub start: i32,
    #[serde(default)]
    pub end: i32,
    /// Type arguments; empty when the use site carries none.
    #[serde(default)]
    pub generics: Vec<GenericsType>,
    /// A type variable standing in for a real type.
    #[serde(default)]
    pub placeholder: bool,
}

impl ClassDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn object() -> Self {
        Self::named(OBJECT)
    }

    #[must_use]
    pub fn at(mut self, start: i32, end: i32) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    #[must_use]
    pub fn with_generics(mut self, generics: Vec<GenericsType>) -> Self {
        self.generics = generics;
        self
    }

    #[must_use]
    pub fn as_placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }

    pub fn is_using_generics(&self) -> bool {
        !self.generics.is_empty()
    }

    pub fn is_array(&self) -> bool {
        self.name.starts_with('[')
    }

    pub fn name_without_package(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) => &self.name[dot + 1..],
            None => &self.name,
        }
    }
}

/// One entry of a type-argument or type-parameter list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericsType {
    /// Variable name for type parameters, `?` for wildcards, otherwise the
    /// argument type's name.
    pub name: String,
    /// The argument type; for type parameters, the variable itself.
    #[serde(default)]
    pub ty: ClassDescriptor,
    #[serde(default)]
    pub wildcard: bool,
    #[serde(default)]
    pub upper_bounds: Option<Vec<ClassDescriptor>>,
    #[serde(default)]
    pub lower_bound: Option<ClassDescriptor>,
    #[serde(default)]
    pub start: i32,
    #[serde(default)]
    pub end: i32,
}

impl GenericsType {
    pub fn of(ty: ClassDescriptor) -> Self {
        Self {
            name: ty.name.clone(),
            start: ty.start,
            end: ty.end,
            ty,
            ..Self::default()
        }
    }

    pub fn wildcard(start: i32, end: i32) -> Self {
        Self {
            name: "?".to_string(),
            ty: ClassDescriptor::object().at(start, end),
            wildcard: true,
            start,
            end,
            ..Self::default()
        }
    }

    /// A declared type variable such as `T extends Number`.
    pub fn parameter(name: impl Into<String>, start: i32, end: i32) -> Self {
        let name = name.into();
        Self {
            ty: ClassDescriptor::named(name.clone())
                .at(start, end)
                .as_placeholder(),
            name,
            start,
            end,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn extends(mut self, bounds: Vec<ClassDescriptor>) -> Self {
        self.upper_bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn super_of(mut self, bound: ClassDescriptor) -> Self {
        self.lower_bound = Some(bound);
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.ty.placeholder
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    /// Fully qualified name; nested classes use `Outer$Inner`.
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// False for classes the front-end produced as a by-product
    /// (closures, generated helpers).
    #[serde(default = "primary_by_default")]
    pub primary: bool,
    #[serde(default)]
    pub super_class: Option<ClassDescriptor>,
    #[serde(default)]
    pub interfaces: Vec<ClassDescriptor>,
    /// Declared type parameters.
    #[serde(default)]
    pub generics: Vec<GenericsType>,
    #[serde(default)]
    pub fields: Vec<FieldNode>,
    #[serde(default)]
    pub methods: Vec<MethodNode>,
    #[serde(default)]
    pub constructors: Vec<MethodNode>,
    /// Name of the enclosing class, for nested classes.
    #[serde(default)]
    pub outer: Option<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationNode>,
    #[serde(default)]
    pub span: NodeSpan,
}

impl ClassNode {
    pub fn new(name: impl Into<String>, span: NodeSpan) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            primary: true,
            super_class: Some(ClassDescriptor::object()),
            interfaces: Vec::new(),
            generics: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            outer: None,
            annotations: Vec::new(),
            span,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_super_class(mut self, super_class: Option<ClassDescriptor>) -> Self {
        self.super_class = super_class;
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: ClassDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    #[must_use]
    pub fn with_type_parameter(mut self, parameter: GenericsType) -> Self {
        self.generics.push(parameter);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldNode) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, constructor: MethodNode) -> Self {
        self.constructors.push(constructor);
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationNode) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn nested_in(mut self, outer: impl Into<String>) -> Self {
        self.outer = Some(outer.into());
        self
    }

    #[must_use]
    pub fn secondary(mut self) -> Self {
        self.primary = false;
        self
    }

    pub fn is_interface(&self) -> bool {
        self.modifiers.contains(Modifiers::INTERFACE)
    }

    pub fn is_enum(&self) -> bool {
        self.modifiers.contains(Modifiers::ENUM)
    }

    pub fn name_without_package(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) => &self.name[dot + 1..],
            None => &self.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: ClassDescriptor,
    #[serde(default)]
    pub annotations: Vec<AnnotationNode>,
    #[serde(default)]
    pub span: NodeSpan,
}

impl FieldNode {
    pub fn new(name: impl Into<String>, ty: ClassDescriptor, span: NodeSpan) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::PRIVATE,
            ty,
            annotations: Vec::new(),
            span,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationNode) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn is_synthetic(&self) -> bool {
        self.modifiers.contains(Modifiers::SYNTHETIC)
    }
}

/// A method or constructor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default = "ClassDescriptor::object")]
    pub return_type: ClassDescriptor,
    #[serde(default)]
    pub annotations: Vec<AnnotationNode>,
    /// Generated by the front-end rather than written in source.
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub span: NodeSpan,
}

impl MethodNode {
    pub fn new(name: impl Into<String>, span: NodeSpan) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            parameters: Vec::new(),
            return_type: ClassDescriptor::object(),
            annotations: Vec::new(),
            synthetic: false,
            span,
        }
    }

    pub fn constructor(span: NodeSpan) -> Self {
        Self::new("<init>", span)
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn returning(mut self, return_type: ClassDescriptor) -> Self {
        self.return_type = return_type;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationNode) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    pub fn has_default_value(&self) -> bool {
        self.parameters.iter().any(|p| p.has_initial_expression)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: ClassDescriptor,
    /// The parameter declares a default value (`int x = 1`).
    #[serde(default)]
    pub has_initial_expression: bool,
    #[serde(default)]
    pub start: i32,
    #[serde(default)]
    pub end: i32,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: ClassDescriptor, start: i32, end: i32) -> Self {
        Self {
            name: name.into(),
            ty,
            has_initial_expression: false,
            start,
            end,
        }
    }

    #[must_use]
    pub fn defaulted(mut self) -> Self {
        self.has_initial_expression = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationNode {
    pub class: ClassDescriptor,
    #[serde(default)]
    pub members: Vec<AnnotationMember>,
    #[serde(default)]
    pub start: i32,
    #[serde(default)]
    pub end: i32,
}

impl AnnotationNode {
    pub fn new(class: ClassDescriptor, start: i32, end: i32) -> Self {
        Self {
            class,
            members: Vec::new(),
            start,
            end,
        }
    }

    #[must_use]
    pub fn with_member(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.members.push(AnnotationMember {
            name: name.into(),
            value,
        });
        self
    }

    pub fn member(&self, name: &str) -> Option<&Expression> {
        self.members
            .iter()
            .find(|member| member.name == name)
            .map(|member| &member.value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationMember {
    pub name: String,
    pub value: Expression,
}

/// Annotation member values, reduced to the shapes the bridge inspects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// `object.property`, e.g. `String.class` or `org.junit.Runner`.
    Property {
        object: Box<Expression>,
        property: String,
        start: i32,
        end: i32,
    },
    Variable {
        name: String,
        start: i32,
        end: i32,
    },
    Constant {
        value: ConstantValue,
        start: i32,
        end: i32,
    },
    List {
        elements: Vec<Expression>,
        start: i32,
        end: i32,
    },
    /// Anything else.
    Other { start: i32, end: i32 },
}

impl Expression {
    pub fn string(value: impl Into<String>, start: i32, end: i32) -> Self {
        Expression::Constant {
            value: ConstantValue::String(value.into()),
            start,
            end,
        }
    }

    pub fn variable(name: impl Into<String>, start: i32, end: i32) -> Self {
        Expression::Variable {
            name: name.into(),
            start,
            end,
        }
    }

    pub fn property(object: Expression, property: impl Into<String>, start: i32, end: i32) -> Self {
        Expression::Property {
            object: Box::new(object),
            property: property.into(),
            start,
            end,
        }
    }

    pub fn start(&self) -> i32 {
        match self {
            Expression::Property { start, .. }
            | Expression::Variable { start, .. }
            | Expression::Constant { start, .. }
            | Expression::List { start, .. }
            | Expression::Other { start, .. } => *start,
        }
    }

    pub fn end(&self) -> i32 {
        match self {
            Expression::Property { end, .. }
            | Expression::Variable { end, .. }
            | Expression::Constant { end, .. }
            | Expression::List { end, .. }
            | Expression::Other { end, .. } => *end,
        }
    }

    /// Source text of a property chain or variable, e.g. `a.b.C`.
    pub fn text(&self) -> Option<String> {
        match self {
            Expression::Variable { name, .. } => Some(name.clone()),
            Expression::Property {
                object, property, ..
            } => object.text().map(|prefix| format!("{prefix}.{property}")),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_shape() {
        let list = ClassDescriptor::named("java.util.List")
            .with_generics(vec![GenericsType::of(ClassDescriptor::named(STRING))]);
        assert!(list.is_using_generics());
        assert!(!list.is_array());
        assert_eq!(list.name_without_package(), "List");
        assert!(ClassDescriptor::named("[I").is_array());
    }

    #[test]
    fn test_expression_text() {
        let expr = Expression::property(
            Expression::property(Expression::variable("org", 0, 3), "junit", 0, 9),
            "Runner",
            0,
            16,
        );
        assert_eq!(expr.text().as_deref(), Some("org.junit.Runner"));
        assert_eq!(Expression::string("x", 0, 3).text(), None);
    }

    #[test]
    fn test_class_defaults_from_json() {
        let class: ClassNode = serde_json::from_str(r#"{"name": "p.A"}"#).unwrap();
        assert!(class.primary);
        assert_eq!(class.modifiers, Modifiers::empty());
        assert_eq!(class.name_without_package(), "A");
        assert!(class.super_class.is_none());
    }

    #[test]
    fn test_member_lookup() {
        let anno = AnnotationNode::new(ClassDescriptor::named("SuppressWarnings"), 0, 30)
            .with_member("value", Expression::string("unchecked", 18, 29));
        assert!(anno.member("value").is_some());
        assert!(anno.member("other").is_none());
    }
}
