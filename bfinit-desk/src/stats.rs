//! Summary counters for the active collection

use crate::status::StatusBucket;

/// Order counts shown above the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
}

impl OrderStats {
    /// Count buckets in a single pass
    pub fn tally<I>(buckets: I) -> Self
    where
        I: IntoIterator<Item = StatusBucket>,
    {
        buckets
            .into_iter()
            .fold(Self::default(), |mut stats, bucket| {
                stats.total += 1;
                match bucket {
                    StatusBucket::Pending => stats.pending += 1,
                    StatusBucket::Processing => stats.processing += 1,
                    StatusBucket::Completed => stats.completed += 1,
                    StatusBucket::Cancelled => {}
                }
                stats
            })
    }
}
