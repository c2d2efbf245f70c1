//! The relational model graph (tables, columns, keys) and the changelog
//! file format layered on top of it.

mod changeset;
mod model;
mod xml;

pub use changeset::{Changelog, Changeset, Directive};
pub use model::{Column, Deferrable, ForeignKey, Index, Model, PrimaryKey, Referenced, Referer, Table};
pub use xml::{check_header, deserialize, serialize, ChangelogError};
