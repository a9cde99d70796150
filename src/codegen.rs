//! Matching the front-end's generated classes to declared types.

use astbridge_host::{ClassFile, HostDeclarationTree, ProblemReporter, TypeBinding};
use astbridge_source::{GeneratedClass, Module};
use tracing::{error, warn};

/// The module class a generated class belongs to: the class itself or the
/// class it is nested in (`Outer$1`, `Outer$Inner`). The last match wins.
pub fn related_class_name<'m>(module: &'m Module, generated: &str) -> Option<&'m str> {
    module
        .classes
        .iter()
        .map(|class| class.name.as_str())
        .filter(|name| {
            generated == *name
                || generated
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with('$'))
        })
        .last()
}

/// First binding, depth first, whose name is `class_name` or ends with it.
pub fn find_binding<'t>(tree: &'t HostDeclarationTree, class_name: &str) -> Option<&'t TypeBinding> {
    tree.walk_types().into_iter().find_map(|declaration| {
        let Some(binding) = &declaration.binding else {
            warn!(declaration = %declaration.name, "declaration has no binding");
            return None;
        };
        let name = binding.qualified_name();
        (name == class_name || name.ends_with(class_name)).then_some(binding)
    })
}

/// Record a class file for every generated class that belongs to this
/// module. Classes without a matching binding are skipped.
pub fn correlate<R: ProblemReporter>(
    module: &Module,
    tree: &HostDeclarationTree,
    generated: &[GeneratedClass],
    reporter: &mut R,
) -> usize {
    let mut recorded = 0;
    for class in generated {
        let Some(related) = related_class_name(module, &class.name) else {
            continue;
        };
        let Some(binding) = find_binding(tree, related) else {
            error!(class = %class.name, related, "no binding for generated class");
            continue;
        };
        reporter.record_class_file(ClassFile {
            name: class.name.clone(),
            path: class.name.replace('.', "/"),
            binding: binding.qualified_name(),
            bytes: class.bytes.clone(),
        });
        recorded += 1;
    }
    recorded
}
