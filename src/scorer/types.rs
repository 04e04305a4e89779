use serde::Serialize;

/// Breakdown of the mismatch at one shift.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchDetails {
    pub shift_buckets: i64,

    // Set sizes
    pub reference_buckets: usize,
    pub target_buckets: usize,
    pub overlap: usize,

    // Symmetric difference, split by side
    pub uncovered_reference: usize,
    pub stray_target: usize,
}

impl MismatchDetails {
    pub fn total(&self) -> usize {
        self.uncovered_reference + self.stray_target
    }
}
