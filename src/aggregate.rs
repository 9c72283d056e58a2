//! Per-consumer merging, filtering and new-item detection.
//!
//! Each consumer keeps a [`ConsumerView`]: its filter policy, the sources it
//! registered, and the visible list it was last shown.  Every aggregation
//! pass rebuilds the visible list from the sources' current batches and
//! reports which items were not visible before.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::item::{newest_first, Item};

/// How a consumer trims the merged item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Maximum visible items; `0` means unlimited.
    pub max_items: usize,
    /// Whether to drop items older than [`max_age_ms`](Self::max_age_ms).
    pub ignore_old_items: bool,
    pub max_age_ms: u64,
    /// Whether the consumer wants update-delta notifications.
    pub broadcast_updates: bool,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Newest-first, filtered, capped.
    pub visible: Vec<Item>,
    /// Items in `visible` that were not in the previous visible list.
    pub delta: Vec<Item>,
}

impl Aggregation {
    /// Whether an update-delta event should go out for this pass.
    pub fn should_notify(&self, policy: &FilterPolicy) -> bool {
        policy.broadcast_updates && !self.delta.is_empty()
    }
}

/// Derived state for one consumer.
#[derive(Debug, Clone)]
pub struct ConsumerView {
    name: String,
    policy: FilterPolicy,
    sources: Vec<String>,
    visible: Vec<Item>,
}

impl ConsumerView {
    pub fn new(name: impl Into<String>, policy: FilterPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
            sources: Vec::new(),
            visible: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Last visible list produced by [`aggregate`](Self::aggregate).
    pub fn visible(&self) -> &[Item] {
        &self.visible
    }

    /// Subscribe to a source.  Subscribing twice is a no-op.
    pub fn watch(&mut self, source_id: impl Into<String>) {
        let source_id = source_id.into();
        if !self.watches(&source_id) {
            self.sources.push(source_id);
        }
    }

    pub fn watches(&self, source_id: &str) -> bool {
        self.sources.iter().any(|s| s == source_id)
    }

    /// Rebuild the visible list from `batches` and compute the delta.
    ///
    /// The stored visible list is replaced on every pass, even when the
    /// delta is empty.
    pub fn aggregate<'a>(
        &mut self,
        batches: impl IntoIterator<Item = &'a [Item]>,
        now: DateTime<Utc>,
    ) -> Aggregation {
        let mut visible: Vec<Item> = merge_items(batches)
            .into_iter()
            .filter(|item| !self.is_too_old(item, now))
            .collect();
        visible.sort_by(newest_first);
        if self.policy.max_items > 0 {
            visible.truncate(self.policy.max_items);
        }

        let previous: HashSet<&Item> = self.visible.iter().collect();
        let delta: Vec<Item> = visible
            .iter()
            .filter(|item| !previous.contains(item))
            .cloned()
            .collect();

        self.visible = visible.clone();
        Aggregation { visible, delta }
    }

    fn is_too_old(&self, item: &Item, now: DateTime<Utc>) -> bool {
        if !self.policy.ignore_old_items {
            return false;
        }
        let max_age = i64::try_from(self.policy.max_age_ms).unwrap_or(i64::MAX);
        (now - item.published_at).num_milliseconds() > max_age
    }
}

/// Concatenate batches, keeping the first of any structurally equal items.
///
/// Relative order is preserved so a later stable sort breaks ties by
/// arrival order.
pub fn merge_items<'a>(batches: impl IntoIterator<Item = &'a [Item]>) -> Vec<Item> {
    let mut seen: HashSet<&'a Item> = HashSet::new();
    let mut merged = Vec::new();
    for item in batches.into_iter().flatten() {
        if seen.insert(item) {
            merged.push(item.clone());
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
