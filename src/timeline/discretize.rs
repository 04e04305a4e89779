use super::cluster::Cluster;

/// Bucket index of `time` for buckets of width `unit` (floor division).
#[inline(always)]
pub fn bucket_of(time: i64, unit: i64) -> i64 {
    time.div_euclid(unit)
}

/// Flattens every cluster into the buckets `[start/unit, end/unit)` it covers.
///
/// The result is a multiset: overlapping input spans produce repeated
/// buckets, and callers that need a set deduplicate afterwards.
pub fn discretize<'a, I>(clusters: I, unit: i64) -> Vec<i64>
where
    I: IntoIterator<Item = Cluster<'a>>,
{
    let mut times = Vec::new();
    for cluster in clusters {
        times.extend(bucket_of(cluster.start, unit)..bucket_of(cluster.end, unit));
    }
    times
}
