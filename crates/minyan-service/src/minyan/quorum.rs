//! The quorum rule: a minyan exists once enough confirmed "yes" responses
//! are in.

use minyan_core::constants::MINYAN_THRESHOLD;
use minyan_store::model::building::Building;

/// Threshold predicate consumed by the attendance aggregator and the UI.
///
/// Defaults to the traditional ten; a building may carry an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuorumPolicy {
    pub threshold: u32,
}

impl Default for QuorumPolicy {
    fn default() -> Self {
        Self {
            threshold: MINYAN_THRESHOLD,
        }
    }
}

impl QuorumPolicy {
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// Policy for a building, honoring its override when present.
    #[must_use]
    pub fn for_building(building: &Building) -> Self {
        building
            .quorum_threshold
            .map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub const fn has_minyan(self, yes_count: u32) -> bool {
        yes_count >= self.threshold
    }
}
