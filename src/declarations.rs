//! Populating a host declaration tree from a front-end module.

use std::collections::HashMap;

use astbridge_core::{Modifiers, Position, positions_for, split_dotted};
use astbridge_host::{
    Argument, FieldDeclaration, HostDeclarationTree, ImportReference, MethodDeclaration,
    MethodKind, PrimitiveType, TypeDeclaration, TypeParameter, TypeReference, TypeReferenceKind,
};
use astbridge_source::{
    ClassNode, ENUM, FieldNode, MethodNode, Module, OBJECT, Parameter, STRING,
};
use tracing::debug;

use crate::annotations::translate_annotations;
use crate::error::{BridgeError, BridgeResult};
use crate::fixup::{field_range, find_javadoc, method_range, type_range};
use crate::type_refs::TypeReferenceBuilder;
use crate::variants::{add_unless_duplicate, variants_allowing_for_defaulting};

/// Length of `package `, which precedes the package name.
const PACKAGE_KEYWORD_LEN: i32 = 8;

const HIDDEN_VISIBILITY: Modifiers = Modifiers::PRIVATE.union(Modifiers::PROTECTED);
const HIDDEN_METHOD_BITS: Modifiers = Modifiers::SYNTHETIC.union(Modifiers::TRANSIENT);

pub struct DeclarationBuilder<'a> {
    module: &'a Module,
    types: &'a TypeReferenceBuilder<'a>,
}

impl<'a> DeclarationBuilder<'a> {
    pub fn new(module: &'a Module, types: &'a TypeReferenceBuilder<'a>) -> Self {
        Self { module, types }
    }

    /// Build the package, imports and types of the module.
    ///
    /// Comment ranges are left empty; they are filled in during resolution.
    pub fn build(&self) -> BridgeResult<HostDeclarationTree> {
        let mut tree = HostDeclarationTree {
            package: self.package(),
            imports: self.imports(),
            ..HostDeclarationTree::default()
        };

        // index path of every type built so far, for attaching nested types
        let mut paths: HashMap<&str, Vec<usize>> = HashMap::new();
        for class in self.module.classes.iter().filter(|class| class.primary) {
            let declaration = self.type_declaration(class)?;
            let path = match &class.outer {
                None => {
                    tree.types.push(declaration);
                    vec![tree.types.len() - 1]
                }
                Some(outer) => {
                    let missing = || BridgeError::MissingOuterType {
                        inner: class.name.clone(),
                        outer: outer.clone(),
                    };
                    let outer_path = paths.get(outer.as_str()).ok_or_else(missing)?;
                    let owner = member_at(&mut tree.types, outer_path).ok_or_else(missing)?;
                    owner.member_types.push(declaration);
                    let mut path = outer_path.clone();
                    path.push(owner.member_types.len() - 1);
                    path
                }
            };
            paths.insert(class.name.as_str(), path);
        }

        debug!(
            module = %self.module.id,
            types = tree.types.len(),
            imports = tree.imports.len(),
            "built declaration tree"
        );
        Ok(tree)
    }

    fn package(&self) -> Option<ImportReference> {
        let package = self.module.package.as_ref()?;
        let tokens = split_dotted(package.name.trim_end_matches('.'));
        let positions = positions_for(&tokens, package.start, package.end);
        let mut reference = ImportReference::new(tokens, positions, true);
        reference.declaration_source_start = reference.source_start - PACKAGE_KEYWORD_LEN;
        Some(reference)
    }

    /// Single and wildcard imports in source order.
    fn imports(&self) -> Vec<ImportReference> {
        let single = self.module.imports.iter().map(|import| {
            let tokens = split_dotted(&import.class_name);
            let positions = positions_for(&tokens, import.ty.start.max(0), import.ty.end.max(0));
            let mut reference = ImportReference::new(tokens, positions, false);
            reference.alias = import.alias.clone();
            reference
        });
        let on_demand = self.module.star_imports.iter().map(|import| {
            let tokens = split_dotted(import.package_name.trim_end_matches('.'));
            let positions = positions_for(&tokens, import.start, import.end);
            ImportReference::new(tokens, positions, true)
        });
        let mut imports: Vec<_> = single.chain(on_demand).collect();
        imports.sort_by_key(|import| import.source_start);
        imports
    }

    fn type_declaration(&self, class: &ClassNode) -> BridgeResult<TypeDeclaration> {
        let is_enum = class.is_enum();
        let mut modifiers = class.modifiers.without(HIDDEN_VISIBILITY);
        if is_enum {
            modifiers = modifiers.without(Modifiers::FINAL);
        }
        if class.is_interface() {
            modifiers = modifiers.without(Modifiers::ABSTRACT);
        }

        let mut declaration = TypeDeclaration::new(simple_name(class), modifiers);
        declaration.is_secondary = true;
        declaration.annotations = translate_annotations(self.types, &class.annotations)?;

        for generics in &class.generics {
            let bounds = generics.upper_bounds.as_deref().unwrap_or_default();
            let mut parameter = TypeParameter {
                name: generics.name.clone(),
                ty: None,
                bounds: Vec::new(),
            };
            if let Some((first, rest)) = bounds.split_first() {
                parameter.ty = Some(self.types.build(first)?);
                for bound in rest {
                    let mut bound = self.types.build(bound)?;
                    bound.flags.super_type = true;
                    parameter.bounds.push(bound);
                }
            }
            declaration.type_parameters.push(parameter);
        }

        declaration.super_class = match &class.super_class {
            Some(super_class) if is_enum && super_class.name == ENUM => None,
            // implicit, never written in source
            Some(super_class) if super_class.start == 0 && super_class.name == OBJECT => None,
            Some(super_class) => Some(self.types.build(super_class)?),
            None => None,
        };
        declaration.super_interfaces = class
            .interfaces
            .iter()
            .map(|interface| self.types.build(interface))
            .collect::<BridgeResult<_>>()?;

        declaration.fields = class
            .fields
            .iter()
            .filter(|field| !field.is_synthetic())
            .map(|field| self.field(field))
            .collect::<BridgeResult<_>>()?;

        self.constructors(class, &declaration.name, &mut declaration.methods)?;
        self.methods(class, &mut declaration.methods)?;

        declaration.javadoc = find_javadoc(&self.module.comments, class.span.line);
        declaration.range = type_range(&class.span, declaration.javadoc);
        Ok(declaration)
    }

    fn field(&self, field: &FieldNode) -> BridgeResult<FieldDeclaration> {
        let javadoc = find_javadoc(&self.module.comments, field.span.line);
        let (range, declaration_end, end_part1_position, end_part2_position) =
            field_range(&field.span, javadoc);
        Ok(FieldDeclaration {
            name: field.name.clone(),
            modifiers: field.modifiers.without(Modifiers::ENUM),
            ty: self.types.build(&field.ty)?,
            annotations: translate_annotations(self.types, &field.annotations)?,
            javadoc,
            range,
            declaration_end,
            end_part1_position,
            end_part2_position,
        })
    }

    fn constructors(
        &self,
        class: &ClassNode,
        selector: &str,
        out: &mut Vec<MethodDeclaration>,
    ) -> BridgeResult<()> {
        if class.constructors.is_empty() {
            if !class.is_interface() {
                out.push(MethodDeclaration {
                    selector: selector.to_string(),
                    modifiers: if class.is_enum() {
                        Modifiers::PRIVATE
                    } else {
                        Modifiers::PUBLIC
                    },
                    kind: MethodKind::Constructor { is_default: true },
                    arguments: Vec::new(),
                    annotations: Vec::new(),
                    javadoc: None,
                    range: Default::default(),
                });
            }
            return Ok(());
        }

        for constructor in &class.constructors {
            let declaration = MethodDeclaration {
                selector: selector.to_string(),
                modifiers: if class.is_enum() {
                    Modifiers::PRIVATE
                } else {
                    Modifiers::PUBLIC
                },
                kind: MethodKind::Constructor { is_default: false },
                arguments: self.arguments(&constructor.parameters)?,
                annotations: translate_annotations(self.types, &constructor.annotations)?,
                javadoc: find_javadoc(&self.module.comments, constructor.span.line),
                range: Default::default(),
            };
            self.add_with_variants(constructor, declaration, out);
        }
        Ok(())
    }

    fn methods(&self, class: &ClassNode, out: &mut Vec<MethodDeclaration>) -> BridgeResult<()> {
        for method in &class.methods {
            if class.is_enum() && is_enum_membership_method(method) {
                continue;
            }

            let (arguments, return_type) = if is_script_entry_point(method) {
                let mut arguments = self.arguments(&method.parameters)?;
                if let Some(argument) = arguments.first_mut() {
                    argument.ty = string_array();
                    argument.ty.flags.var_args = true;
                }
                let return_type = if method.return_type.name == OBJECT {
                    TypeReference::base_type(PrimitiveType::Void, 0)
                } else {
                    self.types.build(&method.return_type)?
                };
                (arguments, return_type)
            } else {
                (
                    self.arguments(&method.parameters)?,
                    self.types.build(&method.return_type)?,
                )
            };

            let declaration = MethodDeclaration {
                selector: method.name.clone(),
                modifiers: method.modifiers.without(HIDDEN_METHOD_BITS),
                kind: MethodKind::Method { return_type },
                arguments,
                annotations: translate_annotations(self.types, &method.annotations)?,
                javadoc: find_javadoc(&self.module.comments, method.span.line),
                range: Default::default(),
            };
            self.add_with_variants(method, declaration, out);
        }
        Ok(())
    }

    /// Fix up ranges, then add the declaration and one overload per
    /// defaulted arity.
    ///
    /// Only the overloads are checked for duplicates; a declared method is
    /// always added, so the host sees a clash the user wrote.
    fn add_with_variants(
        &self,
        method: &MethodNode,
        mut declaration: MethodDeclaration,
        out: &mut Vec<MethodDeclaration>,
    ) {
        declaration.range = method_range(&method.span, declaration.javadoc);
        if !method.has_default_value() {
            out.push(declaration);
            return;
        }
        for arguments in variants_allowing_for_defaulting(&method.parameters, &declaration.arguments)
        {
            let variant = MethodDeclaration {
                arguments,
                ..declaration.clone()
            };
            if !add_unless_duplicate(out, variant) {
                debug!(selector = %declaration.selector, "dropped duplicate overload");
            }
        }
    }

    fn arguments(&self, parameters: &[Parameter]) -> BridgeResult<Vec<Argument>> {
        let mut arguments = parameters
            .iter()
            .map(|parameter| {
                Ok(Argument {
                    name: parameter.name.clone(),
                    ty: self.types.build(&parameter.ty)?,
                    position: Position::spanning(parameter.start, parameter.end - 1),
                    declaration_source_start: parameter.start,
                })
            })
            .collect::<BridgeResult<Vec<_>>>()?;
        if let (Some(last), Some(argument)) = (parameters.last(), arguments.last_mut())
            && last.ty.is_array()
        {
            argument.ty.flags.var_args = true;
        }
        Ok(arguments)
    }
}

/// Name as the host sees it: nested types drop the `Outer$` prefix.
fn simple_name(class: &ClassNode) -> String {
    let name = class.name_without_package();
    class
        .outer
        .as_deref()
        .map(|outer| outer.rsplit('.').next().unwrap_or(outer))
        .and_then(|outer| name.strip_prefix(outer))
        .and_then(|rest| rest.strip_prefix('$'))
        .unwrap_or(name)
        .to_string()
}

/// `values()` and `valueOf(String)`, which the host synthesizes itself.
fn is_enum_membership_method(method: &MethodNode) -> bool {
    if !method.synthetic {
        return false;
    }
    match method.name.as_str() {
        "values" => method.parameters.is_empty(),
        "valueOf" => matches!(method.parameters.as_slice(), [p] if p.ty.name == STRING),
        _ => false,
    }
}

/// `static main(args)` with an untyped parameter.
fn is_script_entry_point(method: &MethodNode) -> bool {
    method.modifiers.contains(Modifiers::STATIC)
        && method.name == "main"
        && matches!(method.parameters.as_slice(), [p] if p.ty.name == OBJECT)
}

fn string_array() -> TypeReference {
    let tokens = split_dotted(STRING);
    let positions = vec![Position::new(0, 0); tokens.len()];
    TypeReference::spanning(
        TypeReferenceKind::ArrayQualified {
            tokens,
            dimensions: 1,
            positions: positions.clone(),
        },
        &positions,
    )
}

fn member_at<'t>(types: &'t mut [TypeDeclaration], path: &[usize]) -> Option<&'t mut TypeDeclaration> {
    let (first, rest) = path.split_first()?;
    let mut current = types.get_mut(*first)?;
    for index in rest {
        current = current.member_types.get_mut(*index)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use astbridge_core::BridgeOptions;
    use astbridge_source::{
        AnnotationNode, ClassDescriptor, Comment, CommentKind, GenericsType, ImportNode,
        ModuleId, NodeSpan, PackageNode, StarImport,
    };

    use super::*;
    use crate::type_refs::PrimitiveTables;

    fn build(module: &Module) -> BridgeResult<HostDeclarationTree> {
        let tables = PrimitiveTables::new();
        let options = BridgeOptions::default();
        let types = TypeReferenceBuilder::new(&tables, &options);
        DeclarationBuilder::new(module, &types).build()
    }

    fn span(start: i32, end: i32, line: i32) -> NodeSpan {
        NodeSpan::new(start, end).on_line(line)
    }

    #[test]
    fn test_package_declaration_start() {
        // "package a.b.c;"
        let module = Module::new(ModuleId(0)).with_package(PackageNode::new("a.b.c.", 8, 13));
        let tree = build(&module).unwrap();
        let package = tree.package.unwrap();
        assert_eq!(package.tokens, ["a", "b", "c"]);
        assert_eq!(package.source_start, 8);
        assert_eq!(package.source_end, 12);
        assert_eq!(package.declaration_source_start, 0);
    }

    #[test]
    fn test_imports_merged_in_source_order() {
        let module = Module::new(ModuleId(0))
            .with_import(ImportNode::new("java.util.List", 60, 74))
            .with_star_import(StarImport::new("java.io.", 20, 27))
            .with_import(ImportNode::new("java.util.Map", 40, 53).aliased("M"));
        let tree = build(&module).unwrap();
        let names: Vec<_> = tree.imports.iter().map(|i| i.qualified_name()).collect();
        assert_eq!(names, ["java.io", "java.util.Map", "java.util.List"]);
        assert!(tree.imports[0].on_demand);
        assert_eq!(tree.imports[1].alias.as_deref(), Some("M"));
    }

    #[test]
    fn test_class_shape() {
        let class = ClassNode::new("p.Foo", span(10, 200, 3).with_name(23, 26))
            .with_modifiers(Modifiers::PUBLIC | Modifiers::PROTECTED | Modifiers::ABSTRACT)
            .with_super_class(Some(ClassDescriptor::named("p.Base").at(35, 41)))
            .with_interface(ClassDescriptor::named("Runnable").at(53, 61))
            .with_type_parameter(GenericsType::parameter("T", 27, 28).extends(vec![
                ClassDescriptor::named("Number").at(37, 43),
                ClassDescriptor::named("Comparable").at(46, 56),
            ]))
            .with_type_parameter(GenericsType::parameter("U", 58, 59));
        let module = Module::new(ModuleId(0))
            .with_comment(Comment::new(CommentKind::Javadoc, "/** Foo */", 0, 2))
            .with_class(class);
        let tree = build(&module).unwrap();
        let foo = &tree.types[0];

        assert_eq!(foo.name, "Foo");
        assert_eq!(foo.modifiers, Modifiers::PUBLIC | Modifiers::ABSTRACT);
        assert!(foo.is_secondary);
        assert_eq!(foo.super_class.as_ref().unwrap().type_name(), "p.Base");
        assert_eq!(foo.super_interfaces[0].type_name(), "Runnable");

        let t = &foo.type_parameters[0];
        assert_eq!(t.ty.as_ref().unwrap().type_name(), "Number");
        assert_eq!(t.bounds.len(), 1);
        assert!(t.bounds[0].flags.super_type);
        assert!(foo.type_parameters[1].ty.is_none());

        assert_eq!(foo.javadoc.map(|doc| doc.source_start), Some(0));
        assert_eq!(foo.range.declaration_source_start, 0);
        assert_eq!(foo.range.declaration_source_end, 199);

        let constructor = foo.constructors().next().unwrap();
        assert!(constructor.is_default_constructor());
        assert_eq!(constructor.modifiers, Modifiers::PUBLIC);
        assert_eq!(constructor.selector, "Foo");
    }

    #[test]
    fn test_implicit_object_supertype_dropped() {
        let class = ClassNode::new("Plain", span(0, 20, 1));
        let written = ClassNode::new("Explicit", span(30, 80, 3))
            .with_super_class(Some(ClassDescriptor::object().at(55, 71)));
        let module = Module::new(ModuleId(0)).with_class(class).with_class(written);
        let tree = build(&module).unwrap();
        assert!(tree.types[0].super_class.is_none());
        assert_eq!(
            tree.types[1].super_class.as_ref().unwrap().type_name(),
            OBJECT
        );
    }

    #[test]
    fn test_enum_rules() {
        let color = ClassNode::new("Color", span(0, 120, 1))
            .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::ENUM)
            .with_super_class(Some(ClassDescriptor::named(ENUM)))
            .with_field(
                FieldNode::new("RED", ClassDescriptor::named("Color"), span(14, 17, 1).with_name(14, 17))
                    .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL | Modifiers::ENUM),
            )
            .with_field(
                FieldNode::new("$VALUES", ClassDescriptor::named("[LColor;"), NodeSpan::default())
                    .with_modifiers(Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::SYNTHETIC),
            )
            .with_method(
                MethodNode::new("values", NodeSpan::default())
                    .returning(ClassDescriptor::named("[LColor;"))
                    .synthetic(),
            )
            .with_method(
                MethodNode::new("valueOf", NodeSpan::default())
                    .with_parameter(Parameter::new("name", ClassDescriptor::named(STRING), 0, 0))
                    .returning(ClassDescriptor::named("Color"))
                    .synthetic(),
            )
            .with_method(
                MethodNode::new("next", span(40, 100, 3).with_name(44, 48))
                    .returning(ClassDescriptor::named("Color").at(30, 35)),
            );
        let module = Module::new(ModuleId(0)).with_class(color);
        let tree = build(&module).unwrap();
        let color = &tree.types[0];

        assert_eq!(color.modifiers, Modifiers::PUBLIC | Modifiers::ENUM);
        assert!(color.super_class.is_none());
        assert_eq!(color.fields.len(), 1);
        assert_eq!(
            color.fields[0].modifiers,
            Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL
        );

        let selectors: Vec<_> = color.methods.iter().map(|m| m.selector.as_str()).collect();
        assert_eq!(selectors, ["Color", "next"]);
        assert!(color.methods[0].is_default_constructor());
        assert_eq!(color.methods[0].modifiers, Modifiers::PRIVATE);
    }

    #[test]
    fn test_declared_enum_constructor_is_private() {
        let class = ClassNode::new("Planet", span(0, 90, 1))
            .with_modifiers(Modifiers::PUBLIC | Modifiers::ENUM)
            .with_constructor(
                MethodNode::constructor(span(20, 60, 2).with_name(20, 26))
                    .with_modifiers(Modifiers::PUBLIC)
                    .with_parameter(Parameter::new("mass", ClassDescriptor::named("double"), 27, 38)),
            );
        let module = Module::new(ModuleId(0)).with_class(class);
        let tree = build(&module).unwrap();
        let constructor = tree.types[0].constructors().next().unwrap();
        assert_eq!(constructor.modifiers, Modifiers::PRIVATE);
        assert!(!constructor.is_default_constructor());
        assert_eq!(constructor.parameter_type_names(), ["double"]);
    }

    #[test]
    fn test_interface_has_no_default_constructor() {
        let class = ClassNode::new("Shape", span(0, 40, 1))
            .with_modifiers(Modifiers::PUBLIC | Modifiers::INTERFACE | Modifiers::ABSTRACT)
            .with_super_class(None);
        let module = Module::new(ModuleId(0)).with_class(class);
        let tree = build(&module).unwrap();
        assert!(tree.types[0].methods.is_empty());
        assert_eq!(
            tree.types[0].modifiers,
            Modifiers::PUBLIC | Modifiers::INTERFACE
        );
    }

    #[test]
    fn test_script_entry_point_rewritten() {
        let main = MethodNode::new("main", span(0, 50, 1))
            .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
            .with_parameter(Parameter::new("args", ClassDescriptor::object(), 0, 0));
        let class = ClassNode::new("script1", span(0, 50, 1)).with_method(main);
        let module = Module::new(ModuleId(0)).with_class(class);
        let tree = build(&module).unwrap();
        let main = tree.types[0].method("main").unwrap();
        assert_eq!(main.parameter_type_names(), ["java.lang.String[]"]);
        assert_eq!(main.return_type().unwrap().type_name(), "void");
        assert!(main.arguments[0].ty.flags.var_args);
        assert_eq!((main.range.source_start, main.range.source_end), (0, 0));
    }

    #[test]
    fn test_varargs_and_argument_positions() {
        let method = MethodNode::new("format", span(10, 80, 2).with_name(17, 23))
            .with_modifiers(Modifiers::PUBLIC | Modifiers::SYNTHETIC)
            .with_parameter(Parameter::new("pattern", ClassDescriptor::named(STRING).at(24, 30), 24, 38))
            .with_parameter(Parameter::new(
                "args",
                ClassDescriptor::named("[Ljava.lang.Object;").at(40, 48),
                40,
                55,
            ));
        let class = ClassNode::new("Fmt", span(0, 100, 1)).with_method(method);
        let module = Module::new(ModuleId(0)).with_class(class);
        let tree = build(&module).unwrap();
        let format = tree.types[0].method("format").unwrap();
        assert_eq!(format.modifiers, Modifiers::PUBLIC);
        assert!(!format.arguments[0].ty.flags.var_args);
        assert!(format.arguments[1].ty.flags.var_args);
        assert_eq!(format.arguments[0].position, Position::new(24, 37));
        assert_eq!(format.arguments[0].declaration_source_start, 24);
        assert_eq!(format.range.source_start, 17);
        assert_eq!(format.range.body_end, 80);
    }

    #[test]
    fn test_defaulted_constructor_overloads() {
        let constructor = MethodNode::constructor(span(20, 70, 2).with_name(20, 26))
            .with_parameter(Parameter::new("a", ClassDescriptor::named("int"), 27, 32))
            .with_parameter(Parameter::new("b", ClassDescriptor::named("int"), 34, 43).defaulted())
            .with_parameter(Parameter::new("c", ClassDescriptor::named("int"), 45, 54).defaulted());
        let class = ClassNode::new("Point", span(0, 90, 1)).with_constructor(constructor);
        let module = Module::new(ModuleId(0)).with_class(class);
        let tree = build(&module).unwrap();
        let arities: Vec<_> = tree.types[0]
            .constructors()
            .map(|c| c.arguments.iter().map(|a| a.name.as_str()).collect::<Vec<_>>())
            .collect();
        assert_eq!(arities, vec![vec!["a", "b", "c"], vec!["a", "b"], vec!["a"]]);
    }

    #[test]
    fn test_declared_constructor_is_public() {
        let class = ClassNode::new("Secret", span(0, 60, 1)).with_constructor(
            MethodNode::constructor(span(15, 40, 2).with_name(23, 29))
                .with_modifiers(Modifiers::PRIVATE),
        );
        let module = Module::new(ModuleId(0)).with_class(class);
        let tree = build(&module).unwrap();
        let constructor = tree.types[0].constructors().next().unwrap();
        assert_eq!(constructor.modifiers, Modifiers::PUBLIC);
        assert!(!constructor.is_default_constructor());
    }

    #[test]
    fn test_every_declared_method_is_emitted() {
        let int = || ClassDescriptor::named("int");
        let foo = |start| {
            MethodNode::new("foo", span(start, start + 20, 2).with_name(start, start + 3))
                .with_parameter(Parameter::new("x", int(), start + 4, start + 9))
        };
        let twice = ClassNode::new("Twice", span(0, 100, 1))
            .with_method(foo(10))
            .with_method(foo(40));
        let tree = build(&Module::new(ModuleId(0)).with_class(twice)).unwrap();
        let signatures: Vec<_> = tree.types[0]
            .methods
            .iter()
            .filter(|m| !m.is_constructor())
            .map(|m| format!("{}({})", m.selector, m.parameter_type_names().join(",")))
            .collect();
        assert_eq!(signatures, ["foo(int)", "foo(int)"]);

        // an overload already produced from a default does not hide a
        // declared method with the same signature
        let defaulted = MethodNode::new("foo", span(10, 30, 2).with_name(10, 13))
            .with_parameter(Parameter::new("x", int(), 14, 19))
            .with_parameter(Parameter::new("y", int(), 21, 28).defaulted());
        let mixed = ClassNode::new("Mixed", span(0, 100, 1))
            .with_method(defaulted)
            .with_method(foo(40));
        let tree = build(&Module::new(ModuleId(0)).with_class(mixed)).unwrap();
        let signatures: Vec<_> = tree.types[0]
            .methods
            .iter()
            .filter(|m| !m.is_constructor())
            .map(|m| m.parameter_type_names().join(","))
            .collect();
        assert_eq!(signatures, ["int,int", "int", "int"]);
    }

    #[test]
    fn test_nested_types_attach_to_outer() {
        let module = Module::new(ModuleId(0))
            .with_class(ClassNode::new("p.Outer", span(0, 200, 1)))
            .with_class(ClassNode::new("p.Outer$Inner", span(20, 100, 2)).nested_in("p.Outer"))
            .with_class(
                ClassNode::new("p.Outer$Inner$Deep", span(40, 90, 3)).nested_in("p.Outer$Inner"),
            )
            .with_class(ClassNode::new("p.Outer$_closure1", span(0, 0, 0)).secondary());
        let tree = build(&module).unwrap();
        assert_eq!(tree.types.len(), 1);
        let inner = tree.types[0].member_type("Inner").unwrap();
        assert!(inner.member_type("Deep").is_some());
        let names: Vec<_> = tree.walk_types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Outer", "Inner", "Deep"]);
    }

    #[test]
    fn test_missing_outer_type() {
        let module = Module::new(ModuleId(0))
            .with_class(ClassNode::new("Lonely$Inner", span(0, 10, 1)).nested_in("Lonely"));
        assert_eq!(
            build(&module),
            Err(BridgeError::MissingOuterType {
                inner: "Lonely$Inner".to_string(),
                outer: "Lonely".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_signature_is_fatal() {
        let class = ClassNode::new("Bad", span(0, 10, 1)).with_field(FieldNode::new(
            "x",
            ClassDescriptor::named("[Q"),
            span(2, 8, 1),
        ));
        let module = Module::new(ModuleId(0)).with_class(class);
        assert_eq!(
            build(&module),
            Err(BridgeError::malformed_signature("[Q"))
        );
    }

    #[test]
    fn test_field_annotations_translated() {
        let field = FieldNode::new("name", ClassDescriptor::named(STRING), span(30, 60, 3).with_name(49, 53))
            .with_annotation(AnnotationNode::new(ClassDescriptor::named("Deprecated"), 30, 41));
        let class = ClassNode::new("Person", span(0, 100, 1)).with_field(field);
        let module = Module::new(ModuleId(0)).with_class(class);
        let tree = build(&module).unwrap();
        let name = tree.types[0].field("name").unwrap();
        assert_eq!(name.annotations.len(), 1);
        assert_eq!(name.range.source_start, 49);
        assert_eq!(name.modifiers, Modifiers::PRIVATE);
    }
}
