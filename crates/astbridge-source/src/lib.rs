//! Model of what the scripting-language front-end produces: module trees,
//! the messages in its error collector, and the faults it raises.

pub mod class;
pub mod front_end;
pub mod message;
pub mod module;
pub mod recorded;

pub use class::{
    AnnotationMember, AnnotationNode, ClassDescriptor, ClassNode, ConstantValue, Expression,
    ENUM, FieldNode, GenericsType, MethodNode, OBJECT, Parameter, STRING,
};
pub use front_end::{FrontEnd, GeneratedClass};
pub use message::{CompileFault, ExceptionFault, Message, PreciseRange, SyntaxFault};
pub use module::{
    Comment, CommentKind, ImportNode, Module, ModuleId, NodeSpan, PackageNode, StarImport,
};
pub use recorded::{RecordedFrontEnd, RecordedUnit, ScheduledFault, ScheduledMessage};
