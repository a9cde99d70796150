//! Overloads implied by parameters with default values.
//!
//! A method `m(a, b = 1, c = 2)` can be called as `m(a, b, c)`, `m(a, b)` and
//! `m(a)`. The host has no default arguments, so each callable arity becomes
//! its own declaration.

use astbridge_host::{Argument, MethodDeclaration};
use astbridge_source::Parameter;

/// The argument lists for every arity, longest first.
///
/// Each step drops the latest remaining parameter that has a default; the
/// walk stops once none is left. Only that one chain is produced, so
/// `(a, b = 1, c = 2)` never yields `(a, c)`.
pub fn variants_allowing_for_defaulting(
    parameters: &[Parameter],
    arguments: &[Argument],
) -> Vec<Vec<Argument>> {
    let mut remaining = vec![true; parameters.len()];
    let mut variants = Vec::new();
    loop {
        let mut variant = Vec::new();
        let mut next_to_default = None;
        for (index, (parameter, argument)) in parameters.iter().zip(arguments).enumerate() {
            if remaining[index] {
                variant.push(argument.clone());
                if parameter.has_initial_expression {
                    next_to_default = Some(index);
                }
            }
        }
        variants.push(variant);
        match next_to_default {
            Some(index) => remaining[index] = false,
            None => return variants,
        }
    }
}

/// Append `declaration` unless one with the same selector and parameter type
/// names is already present. Returns whether it was added.
pub fn add_unless_duplicate(
    declarations: &mut Vec<MethodDeclaration>,
    declaration: MethodDeclaration,
) -> bool {
    let duplicate = declarations.iter().any(|existing| {
        existing.selector == declaration.selector
            && existing.arguments.len() == declaration.arguments.len()
            && existing
                .arguments
                .iter()
                .zip(&declaration.arguments)
                .all(|(a, b)| a.ty.type_name() == b.ty.type_name())
    });
    if !duplicate {
        declarations.push(declaration);
    }
    !duplicate
}

#[cfg(test)]
mod tests {
    use astbridge_core::{Modifiers, Position};
    use astbridge_host::{DeclarationRange, MethodKind, TypeReference, TypeReferenceKind};
    use astbridge_source::ClassDescriptor;

    use super::*;

    fn argument(name: &str, ty: &str) -> Argument {
        let position = Position::new(0, 0);
        Argument {
            name: name.to_string(),
            ty: TypeReference::new(
                TypeReferenceKind::Single {
                    token: ty.to_string(),
                    position,
                },
                position,
            ),
            position,
            declaration_source_start: 0,
        }
    }

    fn parameter(name: &str, defaulted: bool) -> Parameter {
        let parameter = Parameter::new(name, ClassDescriptor::object(), 0, 0);
        if defaulted {
            parameter.defaulted()
        } else {
            parameter
        }
    }

    fn names(variant: &[Argument]) -> Vec<&str> {
        variant.iter().map(|a| a.name.as_str()).collect()
    }

    fn method(selector: &str, arguments: Vec<Argument>) -> MethodDeclaration {
        MethodDeclaration {
            selector: selector.to_string(),
            modifiers: Modifiers::PUBLIC,
            kind: MethodKind::Constructor { is_default: false },
            arguments,
            annotations: Vec::new(),
            javadoc: None,
            range: DeclarationRange::default(),
        }
    }

    #[test]
    fn test_single_descending_chain() {
        let parameters = [
            parameter("a", false),
            parameter("b", true),
            parameter("c", true),
        ];
        let arguments = [
            argument("a", "Object"),
            argument("b", "Object"),
            argument("c", "Object"),
        ];
        let variants = variants_allowing_for_defaulting(&parameters, &arguments);
        let variants: Vec<_> = variants.iter().map(|v| names(v)).collect();
        assert_eq!(variants, vec![vec!["a", "b", "c"], vec!["a", "b"], vec!["a"]]);
    }

    #[test]
    fn test_gaps_in_defaulting() {
        let parameters = [
            parameter("a", true),
            parameter("b", false),
            parameter("c", true),
        ];
        let arguments = [
            argument("a", "int"),
            argument("b", "int"),
            argument("c", "int"),
        ];
        let variants = variants_allowing_for_defaulting(&parameters, &arguments);
        let variants: Vec<_> = variants.iter().map(|v| names(v)).collect();
        assert_eq!(variants, vec![vec!["a", "b", "c"], vec!["a", "b"], vec!["b"]]);
    }

    #[test]
    fn test_no_defaults_yields_full_arity_only() {
        let parameters = [parameter("a", false)];
        let arguments = [argument("a", "String")];
        assert_eq!(
            variants_allowing_for_defaulting(&parameters, &arguments).len(),
            1
        );
        assert_eq!(variants_allowing_for_defaulting(&[], &[]), vec![Vec::new()]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let mut methods = Vec::new();
        assert!(add_unless_duplicate(
            &mut methods,
            method("foo", vec![argument("a", "String")])
        ));
        assert!(!add_unless_duplicate(
            &mut methods,
            method("foo", vec![argument("b", "String")])
        ));
        assert!(add_unless_duplicate(
            &mut methods,
            method("foo", vec![argument("a", "Integer")])
        ));
        assert!(add_unless_duplicate(
            &mut methods,
            method("bar", vec![argument("a", "String")])
        ));
        assert!(add_unless_duplicate(&mut methods, method("foo", Vec::new())));
        assert_eq!(methods.len(), 4);
    }
}
