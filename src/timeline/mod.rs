//! Interval clustering and time discretization for event tracks.

pub mod cluster;
pub mod discretize;

pub use self::cluster::{clusters, Cluster, Clusters};
pub use self::discretize::{bucket_of, discretize};

use crate::events::Event;
use std::collections::HashSet;

/// Occupied buckets of a whole track.
pub fn bucket_set(events: &[Event], unit: i64, include_comments: bool) -> HashSet<i64> {
    discretize(clusters(events, include_comments), unit)
        .into_iter()
        .collect()
}
