//! Options, C++ identifier escaping, and name derivation: turning semantic
//! graph nodes into schema, table, and column names.

mod context;
mod convention;
mod keywords;
mod options;

pub use context::{NamePrefix, NamingContext};
pub use convention::public_name;
pub use keywords::{escape, is_keyword};
pub use options::{Database, MultiDatabase, Options, RewriteRule, RewriteRules, SchemaFormat};
