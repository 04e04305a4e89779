pub mod types;

pub use self::types::MismatchDetails;
use crate::error::{RetimeError, RtResult};
use crate::events::Event;
use crate::timeline;
use std::collections::HashSet;

/// Scores a candidate shift of the target track against the reference track.
///
/// Both tracks are reduced to bucket sets once; scoring a shift is the size
/// of the symmetric difference between the reference set and the shifted
/// target set.
#[derive(Debug, Clone)]
pub struct MismatchScorer {
    unit: i64,
    reference: HashSet<i64>,
    target: Vec<i64>,
}

impl MismatchScorer {
    pub fn new(reference: &[Event], target: &[Event], unit: i64) -> RtResult<Self> {
        Self::with_comments(reference, target, unit, false)
    }

    pub fn with_comments(
        reference: &[Event],
        target: &[Event],
        unit: i64,
        include_comments: bool,
    ) -> RtResult<Self> {
        if unit <= 0 {
            return Err(RetimeError::Config(format!(
                "unit must be positive, got {}",
                unit
            )));
        }

        let reference = timeline::bucket_set(reference, unit, include_comments);
        let mut target: Vec<i64> = timeline::bucket_set(target, unit, include_comments)
            .into_iter()
            .collect();
        // Keeps iteration order independent of hasher state.
        target.sort_unstable();

        Ok(Self {
            unit,
            reference,
            target,
        })
    }

    pub fn unit(&self) -> i64 {
        self.unit
    }

    pub fn reference_len(&self) -> usize {
        self.reference.len()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    /// Whole-bucket offset for a shift in ms, rounded toward negative infinity.
    ///
    /// Subtracting the euclidean remainder first keeps tiny negative shifts
    /// from collapsing to `-0.0` and landing in bucket 0.
    #[inline(always)]
    pub fn shift_buckets(&self, delta_ms: f64) -> i64 {
        let unit = self.unit as f64;
        ((delta_ms - delta_ms.rem_euclid(unit)) / unit).round() as i64
    }

    /// Mismatch at `delta_ms`; lower is better, `score(0.0)` is the baseline.
    pub fn score(&self, delta_ms: f64) -> usize {
        self.details(delta_ms).total()
    }

    pub fn baseline(&self) -> usize {
        self.score(0.0)
    }

    pub fn details(&self, delta_ms: f64) -> MismatchDetails {
        let shift = self.shift_buckets(delta_ms);
        // Shifting is injective, so |A ^ B| = |A| + |B| - 2|A & B|.
        let overlap = self
            .target
            .iter()
            .filter(|&&t| {
                t.checked_add(shift)
                    .is_some_and(|shifted| self.reference.contains(&shifted))
            })
            .count();

        MismatchDetails {
            shift_buckets: shift,
            reference_buckets: self.reference.len(),
            target_buckets: self.target.len(),
            overlap,
            uncovered_reference: self.reference.len() - overlap,
            stray_target: self.target.len() - overlap,
        }
    }
}
