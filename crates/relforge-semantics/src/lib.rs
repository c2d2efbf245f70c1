//! Semantic graph primitives: nodes, edges, and the typed annotation store
//! that `#pragma db` directives populate before the rest of the pipeline
//! runs.

mod annotation;
mod graph;
mod ids;
mod loc;
mod qname;
mod scope;

pub use annotation::{AnnotationError, AnnotationStore, AnnotationTable, AnnotationValue};
pub use graph::{
    class_kind, Access, Class, ClassKind, Inheritance, Member, Namespace, ScopeBinding,
    SemanticUnit, Type,
};
pub use ids::{ClassId, InheritanceId, MemberId, NamespaceId, TypeId};
pub use loc::SourceLoc;
pub use qname::QName;
pub use scope::Scope;
