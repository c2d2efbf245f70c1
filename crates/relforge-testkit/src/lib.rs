//! Fixture builders, a golden-file comparer, and a comparability-oracle
//! stub used by the scenario tests, kept out of the library crates so
//! none of them pulls test-only code into a release build.

pub mod fixtures;
pub mod golden;
pub mod oracle;

pub use golden::matches_golden;
pub use oracle::FixedOracle;
