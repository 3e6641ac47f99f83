//! Structural self-checks for the topology types.
//!
//! [`Topology`](crate::topology::Topology), [`Traversal`](crate::topology::Traversal)
//! and [`LightweightGraph`](crate::topology::LightweightGraph) can all
//! describe what a consistent state looks like. Mutators call
//! [`debug_invariants!`](crate::debug_invariants) so violations panic close
//! to their cause in debug and strict builds, and cost nothing otherwise.

use crate::diva_error::DivaError;

/// Types that can check their own structural consistency.
pub trait DebugInvariants {
    /// Panic on the first violation when invariant checking is compiled in.
    fn debug_assert_invariants(&self);

    /// Return the first violation found.
    fn validate_invariants(&self) -> Result<(), DivaError>;

    #[inline]
    fn is_consistent(&self) -> bool {
        self.validate_invariants().is_ok()
    }
}

/// Runs `$target.validate_invariants()` and panics with `$ctx` on error,
/// but only in debug builds or with `strict-invariants`/`check-invariants`.
#[macro_export]
macro_rules! debug_invariants {
    ($target:expr, $ctx:literal) => {{
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        {
            if let Err(e) = $crate::debug_invariants::DebugInvariants::validate_invariants($target) {
                panic!(concat!("[invariants] ", $ctx, ": {}"), e);
            }
        }
    }};
}
