//! Ordered views over a student's snapshots
//!
//! The store's listing order is never trusted. A [`Timeline`] owns the
//! snapshots together with the calendar zone, and every ordered view takes an
//! explicit [`SortOrder`].

use super::filter::{filter_snapshots, FilterSelection};
use crate::core::models::Snapshot;
use chrono::{Datelike, FixedOffset, NaiveDateTime};
use std::collections::BTreeSet;

/// Direction of an ordered view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending timestamps (trend, comparison)
    OldestFirst,
    /// Descending timestamps (history table, history report)
    NewestFirst,
}

/// Snapshots of one student, read in a fixed calendar zone
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    zone: FixedOffset,
}

impl Timeline {
    /// Wrap snapshots in any order
    #[must_use]
    pub const fn new(snapshots: Vec<Snapshot>, zone: FixedOffset) -> Self {
        Self { snapshots, zone }
    }

    /// Calendar zone used for dates and ordering
    #[must_use]
    pub const fn zone(&self) -> &FixedOffset {
        &self.zone
    }

    /// Number of snapshots
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if there are no snapshots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots as received from the store
    #[must_use]
    pub fn as_received(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// New timeline restricted to `selection`
    #[must_use]
    pub fn filter(&self, selection: FilterSelection) -> Self {
        Self {
            snapshots: filter_snapshots(&self.snapshots, selection, &self.zone),
            zone: self.zone,
        }
    }

    /// Borrowed snapshots sorted by timestamp
    ///
    /// The sort is stable, so equal timestamps keep their received order.
    #[must_use]
    pub fn sorted(&self, order: SortOrder) -> Vec<&Snapshot> {
        let mut view: Vec<&Snapshot> = self.snapshots.iter().collect();
        view.sort_by_key(|s| self.local_time(s));
        if order == SortOrder::NewestFirst {
            view.reverse();
        }
        view
    }

    /// Second-most-recent and most recent snapshots, if there are two
    #[must_use]
    pub fn latest_pair(&self) -> Option<(&Snapshot, &Snapshot)> {
        let ordered = self.sorted(SortOrder::OldestFirst);
        match ordered.as_slice() {
            [.., previous, current] => Some((*previous, *current)),
            _ => None,
        }
    }

    /// Distinct snapshot years, most recent first
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self
            .snapshots
            .iter()
            .map(|s| self.local_time(s).year())
            .collect();
        years.into_iter().rev().collect()
    }

    /// Zone-adjusted wall-clock time of `snapshot`
    #[must_use]
    pub fn local_time(&self, snapshot: &Snapshot) -> NaiveDateTime {
        snapshot.taken_at.in_zone(&self.zone)
    }

    /// `dd/mm` label used on chart axes
    #[must_use]
    pub fn short_date(&self, snapshot: &Snapshot) -> String {
        self.local_time(snapshot).format("%d/%m").to_string()
    }

    /// `dd/mm/yyyy` label used in reports and tables
    #[must_use]
    pub fn long_date(&self, snapshot: &Snapshot) -> String {
        self.local_time(snapshot).format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Measurements, Timestamp};

    fn snap(id: i64, ts: &str) -> Snapshot {
        Snapshot::new(id, Timestamp::parse(ts).unwrap(), Measurements::default())
    }

    fn timeline(list: &[(i64, &str)]) -> Timeline {
        let zone = FixedOffset::west_opt(3 * 3600).unwrap();
        Timeline::new(list.iter().map(|(id, ts)| snap(*id, ts)).collect(), zone)
    }

    fn ids(view: &[&Snapshot]) -> Vec<String> {
        view.iter().map(|s| s.id.to_string()).collect()
    }

    #[test]
    fn test_sorted_ignores_received_order() {
        let t = timeline(&[(2, "2024-02-15"), (3, "2024-03-20"), (1, "2024-01-10")]);
        assert_eq!(ids(&t.sorted(SortOrder::OldestFirst)), ["1", "2", "3"]);
        assert_eq!(ids(&t.sorted(SortOrder::NewestFirst)), ["3", "2", "1"]);
        // received order is preserved
        assert_eq!(t.as_received()[0].id.as_str(), "2");
    }

    #[test]
    fn test_latest_pair() {
        let t = timeline(&[(3, "2024-03-20"), (1, "2024-01-10"), (2, "2024-02-15")]);
        let (prev, cur) = t.latest_pair().unwrap();
        assert_eq!((prev.id.as_str(), cur.id.as_str()), ("2", "3"));
        assert!(timeline(&[(1, "2024-01-10")]).latest_pair().is_none());
    }

    #[test]
    fn test_years_descending_unique() {
        let t = timeline(&[(1, "2023-05-01"), (2, "2024-01-01"), (3, "2023-09-09")]);
        assert_eq!(t.years(), [2024, 2023]);
    }

    #[test]
    fn test_instant_ordering_uses_zone() {
        // both land on Jan 31st local time; the instant is later in the day
        let t = timeline(&[(1, "2024-02-01T01:30:00Z"), (2, "2024-01-31T08:00:00")]);
        assert_eq!(ids(&t.sorted(SortOrder::OldestFirst)), ["2", "1"]);
        assert_eq!(t.long_date(&t.as_received()[0]), "31/01/2024");
        assert_eq!(t.years(), [2024]);
    }
}
