use crate::events::Event;
use std::iter::FusedIterator;
use std::vec::IntoIter;

/// A maximal run of overlapping or touching events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster<'a> {
    pub start: i64,
    pub end: i64,
    pub members: Vec<&'a Event>,
}

impl<'a> Cluster<'a> {
    /// A cluster with a span but no recorded members.
    pub fn span(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            members: Vec::new(),
        }
    }
}

/// Lazily merges events into clusters, in ascending start order.
pub struct Clusters<'a> {
    lines: std::iter::Peekable<IntoIter<&'a Event>>,
}

/// Comment events are dropped unless `include_comments` is set.
pub fn clusters(events: &[Event], include_comments: bool) -> Clusters<'_> {
    let mut lines: Vec<&Event> = events
        .iter()
        .filter(|e| include_comments || !e.is_comment)
        .collect();
    lines.sort_by_key(|e| (e.start, e.end));

    Clusters {
        lines: lines.into_iter().peekable(),
    }
}

impl<'a> Iterator for Clusters<'a> {
    type Item = Cluster<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.lines.next()?;
        let mut cluster = Cluster {
            start: first.start,
            end: first.end,
            members: vec![first],
        };

        // Touching counts as overlap.
        while let Some(line) = self.lines.next_if(|l| l.start <= cluster.end) {
            cluster.end = cluster.end.max(line.end);
            cluster.members.push(line);
        }

        Some(cluster)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.lines.size_hint();
        (lo.min(1), hi)
    }
}

impl FusedIterator for Clusters<'_> {}
