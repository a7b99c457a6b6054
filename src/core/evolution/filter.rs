//! Month/year narrowing of a snapshot sequence

use crate::core::models::Snapshot;
use chrono::{Datelike, FixedOffset};
use std::fmt;

/// Portuguese month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Month outside 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("month must be between 1 and 12, got {0}")]
pub struct InvalidMonth(pub u32);

/// Optional month and year; an unset component matches everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelection {
    month: Option<u32>,
    year: Option<i32>,
}

impl FilterSelection {
    /// Match-all selection
    #[must_use]
    pub const fn all() -> Self {
        Self {
            month: None,
            year: None,
        }
    }

    /// Build a selection, validating the month
    ///
    /// # Errors
    /// Returns [`InvalidMonth`] when `month` is outside 1-12
    pub fn new(month: Option<u32>, year: Option<i32>) -> Result<Self, InvalidMonth> {
        match month {
            Some(m) if !(1..=12).contains(&m) => Err(InvalidMonth(m)),
            _ => Ok(Self { month, year }),
        }
    }

    /// Selected month (1-12)
    #[must_use]
    pub const fn month(&self) -> Option<u32> {
        self.month
    }

    /// Selected year
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    /// True when neither component is set
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.month.is_none() && self.year.is_none()
    }

    /// Whether `snapshot` falls in the selection, read in `zone`
    #[must_use]
    pub fn matches(&self, snapshot: &Snapshot, zone: &FixedOffset) -> bool {
        let date = snapshot.taken_at.date_in(zone);
        self.month.is_none_or(|m| date.month() == m) && self.year.is_none_or(|y| date.year() == y)
    }

    /// `Março, 2024` / `Todos os meses, Todos os anos`
    #[must_use]
    pub fn describe(&self) -> String {
        let month = self
            .month
            .and_then(|m| MONTH_NAMES.get(usize::try_from(m).ok()? - 1))
            .copied()
            .unwrap_or("Todos os meses");
        let year = self
            .year
            .map_or_else(|| "Todos os anos".to_string(), |y| y.to_string());
        format!("{month}, {year}")
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Snapshots matching `selection`, in their input order
///
/// The input is left untouched; an empty input yields an empty output.
#[must_use]
pub fn filter_snapshots(
    snapshots: &[Snapshot],
    selection: FilterSelection,
    zone: &FixedOffset,
) -> Vec<Snapshot> {
    if selection.is_identity() {
        return snapshots.to_vec();
    }
    snapshots
        .iter()
        .filter(|s| selection.matches(s, zone))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Measurements, Timestamp};

    fn snap(id: i64, ts: &str) -> Snapshot {
        Snapshot::new(id, Timestamp::parse(ts).unwrap(), Measurements::default())
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_month_validation() {
        assert!(FilterSelection::new(Some(0), None).is_err());
        assert!(FilterSelection::new(Some(13), Some(2024)).is_err());
        assert!(FilterSelection::new(Some(12), None).is_ok());
    }

    #[test]
    fn test_identity_returns_input() {
        let input = vec![snap(1, "2024-01-10"), snap(2, "2023-07-01")];
        let out = filter_snapshots(&input, FilterSelection::all(), &utc());
        assert_eq!(out, input);
    }

    #[test]
    fn test_year_only_and_month_only() {
        let input = vec![
            snap(1, "2023-03-01"),
            snap(2, "2024-03-05"),
            snap(3, "2024-04-01"),
        ];
        let by_year = filter_snapshots(&input, FilterSelection::new(None, Some(2024)).unwrap(), &utc());
        let by_month = filter_snapshots(&input, FilterSelection::new(Some(3), None).unwrap(), &utc());

        let ids = |v: &[Snapshot]| v.iter().map(|s| s.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&by_year), ["2", "3"]);
        assert_eq!(ids(&by_month), ["1", "2"]);
    }

    #[test]
    fn test_empty_input() {
        let sel = FilterSelection::new(Some(2), Some(2024)).unwrap();
        assert!(filter_snapshots(&[], sel, &utc()).is_empty());
    }

    #[test]
    fn test_describe() {
        assert_eq!(FilterSelection::all().describe(), "Todos os meses, Todos os anos");
        assert_eq!(
            FilterSelection::new(Some(3), Some(2024)).unwrap().describe(),
            "Março, 2024"
        );
        assert_eq!(
            FilterSelection::new(None, Some(2023)).unwrap().to_string(),
            "Todos os meses, 2023"
        );
    }
}
