//! Previous-versus-current comparison of the two latest snapshots

use super::timeline::Timeline;
use super::trend::TrackedMetric;

/// One labelled comparison value
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPoint {
    /// `Anterior (15/02)` or `Atual (20/03)`
    pub label: String,
    /// Reading at that snapshot
    pub value: f64,
}

/// Comparison of one metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricComparison {
    /// Compared metric
    pub metric: TrackedMetric,
    /// Second-most-recent snapshot
    pub previous: ComparisonPoint,
    /// Most recent snapshot
    pub current: ComparisonPoint,
}

impl MetricComparison {
    /// `current - previous`
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.current.value - self.previous.value
    }
}

/// Result of comparing a timeline
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonView {
    /// Fewer than two snapshots
    InsufficientData,
    /// Metrics present in both snapshots; the others are omitted
    Available(Vec<MetricComparison>),
}

impl ComparisonView {
    /// Compare the two most recent snapshots of `timeline`
    #[must_use]
    pub fn build(timeline: &Timeline) -> Self {
        let Some((previous, current)) = timeline.latest_pair() else {
            return Self::InsufficientData;
        };
        let prev_label = format!("Anterior ({})", timeline.short_date(previous));
        let cur_label = format!("Atual ({})", timeline.short_date(current));

        let comparisons = TrackedMetric::ALL
            .into_iter()
            .filter_map(|metric| {
                let field = metric.field();
                let before = previous.measurements.get(field)?;
                let after = current.measurements.get(field)?;
                Some(MetricComparison {
                    metric,
                    previous: ComparisonPoint {
                        label: prev_label.clone(),
                        value: before,
                    },
                    current: ComparisonPoint {
                        label: cur_label.clone(),
                        value: after,
                    },
                })
            })
            .collect();
        Self::Available(comparisons)
    }

    /// Comparison for `metric`, if available
    #[must_use]
    pub fn get(&self, metric: TrackedMetric) -> Option<&MetricComparison> {
        match self {
            Self::InsufficientData => None,
            Self::Available(list) => list.iter().find(|c| c.metric == metric),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Measurements, Snapshot, Timestamp};
    use chrono::{FixedOffset, NaiveDate};

    fn snap(id: i64, day: u32, weight: f64, fat: Option<f64>) -> Snapshot {
        let mut m = Measurements::default();
        m.weight = Some(weight);
        m.body_fat = fat;
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        Snapshot::new(id, Timestamp::from(date), m)
    }

    #[test]
    fn test_latest_two_regardless_of_input_order() {
        let timeline = Timeline::new(
            vec![snap(3, 20, 70.0, Some(18.0)), snap(1, 1, 74.0, Some(21.0)), snap(2, 10, 72.0, None)],
            FixedOffset::east_opt(0).unwrap(),
        );
        let view = ComparisonView::build(&timeline);

        let weight = view.get(TrackedMetric::Weight).unwrap();
        assert_eq!(weight.previous.label, "Anterior (10/03)");
        assert_eq!(weight.current.label, "Atual (20/03)");
        assert!((weight.delta() + 2.0).abs() < f64::EPSILON);
        // body fat missing on 10/03
        assert!(view.get(TrackedMetric::BodyFat).is_none());
        assert!(view.get(TrackedMetric::Muscle).is_none());
    }

    #[test]
    fn test_empty_timeline_is_insufficient() {
        let timeline = Timeline::new(Vec::new(), FixedOffset::east_opt(0).unwrap());
        assert_eq!(ComparisonView::build(&timeline), ComparisonView::InsufficientData);
        assert!(ComparisonView::build(&timeline).get(TrackedMetric::Weight).is_none());
    }
}
