use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_POSTINGS: usize = 5;
pub const DEFAULT_MAX_PENDING_APPLICATIONS: usize = 3;
pub const DEFAULT_MAX_SLOTS: u32 = 10;

/// Caps enforced by the lifecycle managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPolicy {
    /// Postings a single representative may own at once.
    pub max_postings_per_representative: usize,
    /// Applications a student may have waiting in PENDING simultaneously.
    pub max_pending_applications: usize,
    /// Upper bound for `slots` on a posting; the lower bound is always 1.
    pub max_slots: u32,
}

impl PlacementPolicy {
    pub fn slots_in_range(&self, slots: u32) -> bool {
        (1..=self.max_slots).contains(&slots)
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            max_postings_per_representative: DEFAULT_MAX_POSTINGS,
            max_pending_applications: DEFAULT_MAX_PENDING_APPLICATIONS,
            max_slots: DEFAULT_MAX_SLOTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slot_range_is_one_to_ten() {
        let policy = PlacementPolicy::default();
        assert!(!policy.slots_in_range(0));
        assert!(policy.slots_in_range(1));
        assert!(policy.slots_in_range(10));
        assert!(!policy.slots_in_range(11));
    }
}
