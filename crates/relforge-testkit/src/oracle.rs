//! A comparability-oracle stub for tests that need session-mode id
//! validation without relying on the conservative built-in default.

use relforge_semantics::{SemanticUnit, TypeId};
use relforge_validate::ComparabilityOracle;

/// Always answers the same way, regardless of the type asked about.
pub struct FixedOracle(pub bool);

impl ComparabilityOracle for FixedOracle {
    fn is_comparable(&self, _unit: &SemanticUnit, _ty: TypeId) -> bool {
        self.0
    }
}
