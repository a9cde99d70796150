//! The declaration model of the statically-typed host compiler.
//!
//! The bridge fills a [`HostDeclarationTree`] per source file; the host
//! resolves it, attaching a [`TypeBinding`] to each type, and reports
//! problems through a [`ProblemReporter`].

pub mod annotation;
pub mod lookup;
pub mod reporter;
pub mod tree;
pub mod type_ref;

pub use annotation::{Annotation, AnnotationKind, MemberValue, StringLiteral};
pub use lookup::{LookupEnvironment, TypeBinding};
pub use reporter::{Aborted, ClassFile, CompilationResult, ProblemReporter, TaskMarker};
pub use tree::{
    Argument, CommentRange, DeclarationRange, FieldDeclaration, HostDeclarationTree,
    ImportReference, Javadoc, MethodDeclaration, MethodKind, TypeDeclaration, TypeParameter,
};
pub use type_ref::{
    PrimitiveType, TypeReference, TypeReferenceFlags, TypeReferenceKind, WildcardKind,
};
