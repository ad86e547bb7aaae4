//! Recursion guard for the importer, exporter and lowering walks.
//!
//! # Design
//!
//! `RecursionGuard` is the identity tracker of one top-level conversion.
//! It combines three safety mechanisms:
//! 1. **Cycle detection** via a visiting set (`FxHashSet<K>`)
//! 2. **Depth limiting** to prevent stack overflow
//! 3. **Iteration bounding** to cap total work on huge graphs
//!
//! Guards are created per call and dropped with it; nothing is shared
//! between conversions, so concurrent calls never see each other's
//! in-progress keys.
//!
//! # Safety
//!
//! - **Debug leak detection**: In debug builds, dropping a guard with active
//!   entries panics, catching forgotten `leave()` calls.
//! - **Debug double-leave detection**: Leaving a key that isn't in the
//!   visiting set panics in debug builds.

use rustc_hash::FxHashSet;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// RecursionProfile
// ---------------------------------------------------------------------------

/// Named recursion limit presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Importing a checker type graph, keyed by `TypeId`.
    ///
    /// depth = 500, iterations = 100,000
    Import,

    /// Exporting a schema tree, keyed by node address.
    ///
    /// depth = 500, iterations = 100,000
    Export,

    /// Lowering syntax declarations into a `TypeStore`.
    ///
    /// depth = 500
    Lowering,

    /// Custom limits for one-off or test scenarios.
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::Import | Self::Export | Self::Lowering => 500,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::Import | Self::Export | Self::Lowering => 100_000,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

// ---------------------------------------------------------------------------
// RecursionResult
// ---------------------------------------------------------------------------

/// Result of attempting to enter a recursive computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    /// Proceed with the computation.
    Entered,
    /// This key is already being visited: cycle detected.
    Cycle,
    /// Maximum recursion depth exceeded.
    DepthExceeded,
    /// Maximum iteration count exceeded.
    IterationExceeded,
}

// ---------------------------------------------------------------------------
// RecursionGuard
// ---------------------------------------------------------------------------

/// Tracks in-progress keys, nesting depth and total work of one walk.
///
/// ```ignore
/// let mut guard = RecursionGuard::with_profile(RecursionProfile::Import);
///
/// match guard.enter(type_id) {
///     RecursionResult::Entered => {
///         let result = import_structure(type_id);
///         guard.leave(type_id);
///         result
///     }
///     RecursionResult::Cycle => back_reference(type_id),
///     RecursionResult::DepthExceeded
///     | RecursionResult::IterationExceeded => depth_error(type_id),
/// }
/// ```
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    depth: u32,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            iterations: 0,
            max_depth,
            max_iterations,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth(), profile.max_iterations())
    }

    /// Try to enter a recursive computation for `key`.
    ///
    /// On [`RecursionResult::Entered`] the caller **must** call
    /// [`leave`](Self::leave) with the same key when done, on every path
    /// including errors.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);

        if self.iterations > self.max_iterations {
            return RecursionResult::IterationExceeded;
        }
        if self.visiting.contains(&key) {
            return RecursionResult::Cycle;
        }
        if self.depth >= self.max_depth {
            return RecursionResult::DepthExceeded;
        }

        self.visiting.insert(key);
        self.depth += 1;
        RecursionResult::Entered
    }

    /// Leave a recursive computation for `key`.
    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);

        debug_assert!(
            was_present,
            "RecursionGuard::leave() called with a key that is not in the visiting set. \
             This indicates a double-leave or a leave without a matching enter()."
        );

        self.depth = self.depth.saturating_sub(1);
    }

    /// Number of keys currently entered.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.visiting.is_empty() {
            panic!(
                "RecursionGuard dropped with {} active entries still in the visiting set. \
                 This indicates leaked enter() calls without matching leave() calls.",
                self.visiting.len(),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// DepthCounter
// ---------------------------------------------------------------------------

/// Depth-only guard for walks where the same key may legitimately repeat
/// (lowering syntax trees, printing).
pub struct DepthCounter {
    depth: u32,
    max_depth: u32,
}

impl DepthCounter {
    pub fn new(max_depth: u32) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self::new(profile.max_depth())
    }

    /// Returns `false` (without incrementing) once the limit is reached; do
    /// not call `leave()` in that case.
    #[inline]
    pub fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    #[inline]
    pub fn leave(&mut self) {
        debug_assert!(
            self.depth > 0,
            "DepthCounter::leave() called at depth 0. \
             This indicates a leave without a matching enter()."
        );
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

#[cfg(debug_assertions)]
impl Drop for DepthCounter {
    fn drop(&mut self) {
        if !std::thread::panicking() && self.depth > 0 {
            panic!(
                "DepthCounter dropped with depth {}. \
                 This indicates leaked enter() calls without matching leave() calls.",
                self.depth,
            );
        }
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
