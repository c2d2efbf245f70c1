//! Traversal framework: walks the semantic graph in the two shapes the
//! rest of the pipeline needs — by member (for C++ code generation) and
//! by flattened column (for table/statement generation).

mod columns;
mod members;

pub use columns::{ColumnRef, ColumnTraversal, ColumnVisitor};
pub use members::{MemberTraversal, MemberVisitor};
