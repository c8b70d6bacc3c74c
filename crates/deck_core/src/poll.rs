use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{List, ListId};

/// Cadence of the poll loop while at least one list is presumed processing.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Staleness window for the processing classifier. A zero-count list older
/// than this is treated as settled even though the backend never reported
/// anything, so a silently failed job surfaces as "0 profiles" instead of
/// hanging in "Processing" forever.
pub const PROCESSING_WINDOW_MINUTES: i64 = 10;

/// Classifies whether a list's population job is presumed still running.
///
/// The backend exposes no job-status endpoint, so this is a heuristic:
/// a list is processing iff its known count is zero and its creation
/// timestamp is strictly within the staleness window. A list with an
/// unknown creation time is never classified processing.
pub fn is_processing(list: &List, now: DateTime<Utc>) -> bool {
    if list.profile_count != 0 {
        return false;
    }
    match list.created_at {
        Some(created) => {
            let age = now.signed_duration_since(created);
            age < chrono::Duration::minutes(PROCESSING_WINDOW_MINUTES)
        }
        None => false,
    }
}

/// One active poll loop: the snapshot of list ids that were classified
/// processing when the loop started. At most one session exists at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSession {
    watched: Vec<ListId>,
}

impl PollSession {
    /// Builds a session from the lists currently classified processing,
    /// or `None` when nothing is processing (no timer is started at all).
    pub fn from_lists(lists: &[List], now: DateTime<Utc>) -> Option<Self> {
        let watched: Vec<ListId> = lists
            .iter()
            .filter(|list| is_processing(list, now))
            .map(|list| list.id.clone())
            .collect();
        if watched.is_empty() {
            None
        } else {
            Some(Self { watched })
        }
    }

    pub fn watched(&self) -> &[ListId] {
        &self.watched
    }

    /// True while any originally-watched list is still classified
    /// processing in the freshly fetched collection. A list that vanished
    /// counts as settled.
    pub fn any_still_processing(&self, fetched: &[List], now: DateTime<Utc>) -> bool {
        self.watched.iter().any(|id| {
            fetched
                .iter()
                .find(|list| &list.id == id)
                .is_some_and(|list| is_processing(list, now))
        })
    }
}
