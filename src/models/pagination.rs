use serde::{Deserialize, Serialize};

/// Slice of the update feed, newest first.
///
/// `count` is an end index rather than a page size: the feed returns
/// `updates[start..count]`, or everything from `start` when it is absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdatesQuery {
    #[serde(default)]
    pub start: usize,
    pub count: Option<usize>,
}

impl UpdatesQuery {
    /// Number of items to take after skipping `start`, `None` for no bound.
    pub fn limit(&self) -> Option<usize> {
        self.count.map(|count| count.saturating_sub(self.start))
    }
}
