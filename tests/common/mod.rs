//! Common fixtures for the pipeline and CLI tests.

use astbridge::{BuildSession, SourceUnitDeclaration};
use astbridge_core::{BridgeOptions, Modifiers};
use astbridge_source::{
    ClassDescriptor, ClassNode, Comment, CommentKind, FieldNode, ImportNode, MethodNode, Module,
    ModuleId, NodeSpan, PackageNode, Parameter, RecordedFrontEnd, STRING,
};

pub const POINT: ModuleId = ModuleId(0);
pub const COLOR: ModuleId = ModuleId(1);

pub const POINT_PATH: &str = "demo/Point.groovy";
pub const COLOR_PATH: &str = "demo/Color.groovy";

pub const POINT_TEXT: &str = "package demo\n\
import java.util.List\n\
/** A point. */\n\
class Point {\n  \
// TODO add z\n  \
int x\n  \
Point(int x, int y = 0) {}\n\
}\n";

pub const COLOR_TEXT: &str = "package demo\nenum Color { RED, GREEN }\n";

/// `demo/Point.groovy`: a javadoc'd class with a field, a constructor with a
/// defaulted parameter and a task comment.
pub fn point_module() -> Module {
    let int = |start, end| ClassDescriptor::named("int").at(start, end);
    let constructor = MethodNode::constructor(NodeSpan::new(91, 117).with_name(91, 96).on_line(7))
        .with_parameter(Parameter::new("x", int(97, 100), 97, 102))
        .with_parameter(Parameter::new("y", int(104, 107), 104, 113).defaulted());
    let point = ClassNode::new("demo.Point", NodeSpan::new(51, 119).with_name(57, 62).on_line(4))
        .with_field(FieldNode::new(
            "x",
            int(83, 86),
            NodeSpan::new(83, 88).with_name(87, 88).on_line(6),
        ))
        .with_constructor(constructor);

    Module::new(POINT)
        .with_package(PackageNode::new("demo.", 8, 12))
        .with_import(ImportNode::new("java.util.List", 20, 34))
        .with_comment(Comment::new(CommentKind::Javadoc, "/** A point. */", 35, 3))
        .with_comment(Comment::new(CommentKind::Line, "// TODO add z", 67, 5))
        .with_class(point)
}

/// `demo/Color.groovy`: an enum carrying the members the front-end adds to
/// every enum.
pub fn color_module() -> Module {
    let color = || ClassDescriptor::named("demo.Color");
    let constant = |name: &str, start| {
        FieldNode::new(
            name,
            color(),
            NodeSpan::new(start, start + name.len() as i32)
                .with_name(start, start + name.len() as i32)
                .on_line(2),
        )
        .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL | Modifiers::ENUM)
    };
    let class = ClassNode::new("demo.Color", NodeSpan::new(13, 38).with_name(18, 23).on_line(2))
        .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::ENUM)
        .with_super_class(Some(ClassDescriptor::named("java.lang.Enum")))
        .with_field(constant("RED", 26))
        .with_field(constant("GREEN", 31))
        .with_field(
            FieldNode::new("$VALUES", ClassDescriptor::named("[Ldemo.Color;"), NodeSpan::default())
                .with_modifiers(Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::SYNTHETIC),
        )
        .with_method(
            MethodNode::new("values", NodeSpan::default())
                .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
                .returning(ClassDescriptor::named("[Ldemo.Color;"))
                .synthetic(),
        )
        .with_method(
            MethodNode::new("valueOf", NodeSpan::default())
                .with_modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
                .with_parameter(Parameter::new("name", ClassDescriptor::named(STRING), 0, 0))
                .returning(color())
                .synthetic(),
        );

    Module::new(COLOR)
        .with_package(PackageNode::new("demo.", 8, 12))
        .with_class(class)
}

/// Both files, with class files for `Point`, a closure of `Point`, and
/// `Color`.
pub fn demo_front_end() -> RecordedFrontEnd {
    RecordedFrontEnd::new()
        .with_unit(POINT_PATH, POINT_TEXT, point_module())
        .with_unit(COLOR_PATH, COLOR_TEXT, color_module())
        .with_generated("demo.Point", vec![0xCA, 0xFE, 0xBA, 0xBE])
        .with_generated("demo.Point$_closure1", vec![0xCA, 0xFE])
        .with_generated("demo.Color", vec![0xCA])
}

#[allow(dead_code)]
pub fn session(front_end: RecordedFrontEnd) -> BuildSession<RecordedFrontEnd> {
    BuildSession::new(front_end, BridgeOptions::default())
}

#[allow(dead_code)]
pub fn open_point(session: &BuildSession<RecordedFrontEnd>) -> SourceUnitDeclaration {
    session
        .open_unit(POINT, POINT_PATH, POINT_TEXT)
        .expect("Point module is registered")
}

#[allow(dead_code)]
pub fn open_color(session: &BuildSession<RecordedFrontEnd>) -> SourceUnitDeclaration {
    session
        .open_unit(COLOR, COLOR_PATH, COLOR_TEXT)
        .expect("Color module is registered")
}
