//! Per-metric trend series for charting

use super::timeline::{SortOrder, Timeline};
use crate::core::models::MeasurementField;
use std::fmt;

/// Metrics charted on the evolution screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedMetric {
    /// `peso`
    Weight,
    /// `gorduraCorporal`
    BodyFat,
    /// `musculatura`
    Muscle,
}

impl TrackedMetric {
    /// All tracked metrics in display order
    pub const ALL: [Self; 3] = [Self::Weight, Self::BodyFat, Self::Muscle];

    /// Underlying measurement
    #[must_use]
    pub const fn field(self) -> MeasurementField {
        match self {
            Self::Weight => MeasurementField::Weight,
            Self::BodyFat => MeasurementField::BodyFat,
            Self::Muscle => MeasurementField::Muscle,
        }
    }
}

impl fmt::Display for TrackedMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().label())
    }
}

/// One chart point
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// `dd/mm`
    pub label: String,
    /// Reading, absent when the snapshot lacks it
    pub value: Option<f64>,
}

/// Chronological values of one metric
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    /// Charted metric
    pub metric: TrackedMetric,
    /// One point per snapshot, oldest first
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Series for `metric` over every snapshot of `timeline`
    #[must_use]
    pub fn build(timeline: &Timeline, metric: TrackedMetric) -> Self {
        let field = metric.field();
        let points = timeline
            .sorted(SortOrder::OldestFirst)
            .into_iter()
            .map(|s| TrendPoint {
                label: timeline.short_date(s),
                value: s.measurements.get(field),
            })
            .collect();
        Self { metric, points }
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Series for every [`TrackedMetric`]
#[must_use]
pub fn trend_series(timeline: &Timeline) -> Vec<TrendSeries> {
    TrackedMetric::ALL
        .into_iter()
        .map(|m| TrendSeries::build(timeline, m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Measurements, Snapshot, Timestamp};
    use chrono::{FixedOffset, NaiveDate};

    #[test]
    fn test_series_per_metric_oldest_first() {
        let mut late = Measurements::default();
        late.weight = Some(77.0);
        late.muscle = Some(41.5);
        let mut early = Measurements::default();
        early.weight = Some(79.0);
        let snaps = vec![
            Snapshot::new(2, Timestamp::from(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()), late),
            Snapshot::new(1, Timestamp::from(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()), early),
        ];
        let timeline = Timeline::new(snaps, FixedOffset::east_opt(0).unwrap());

        let series = trend_series(&timeline);
        assert_eq!(
            series.iter().map(|s| s.metric).collect::<Vec<_>>(),
            TrackedMetric::ALL.to_vec()
        );
        let muscle = &series[2];
        assert_eq!(muscle.points[0], TrendPoint { label: "05/03".into(), value: None });
        assert_eq!(muscle.points[1].value, Some(41.5));
        assert_eq!(TrackedMetric::BodyFat.to_string(), "Gordura Corporal");
    }
}
