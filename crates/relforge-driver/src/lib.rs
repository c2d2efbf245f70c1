//! Orchestrates the full pipeline — validate, build the relational model,
//! diff and write the changelog, render migration scripts — behind a single
//! entry point the CLI layer calls into.

mod context;
mod error;
mod pipeline;

pub use context::{GenerationContext, StreamGuard};
pub use error::PipelineError;
pub use pipeline::{run, PipelineInputs, PipelineReport};
