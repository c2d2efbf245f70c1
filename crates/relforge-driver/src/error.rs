//! The error taxonomy surfaced to callers: everything the validator finds
//! is reported through `Diagnostics`, and everything else that can fail
//! an invocation gets its own variant so a caller can match on it instead
//! of parsing strings.

use relforge_changelog::StoreError;
use relforge_relational::ChangelogError;
use relforge_validate::DiagnosticSink;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("{} validation error(s) found", .0.error_count())]
    Validation(DiagnosticSink),

    #[error("inconsistent command-line options: {0}")]
    Option(String),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error writing `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
