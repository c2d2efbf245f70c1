//! Projects a validated semantic graph into the relational model that the
//! changelog differ and the SQL/code emitters consume.

mod builder;
mod types;

pub use builder::build_model;
pub use types::default_sql_type;
