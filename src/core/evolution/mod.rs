//! Evolution-history pipeline: fetch, filter, aggregate
//!
//! Fetching is the only asynchronous step. Everything after
//! [`load_history`] is pure and recomputed from the snapshot list on
//! each call.

pub mod comparison;
pub mod filter;
pub mod timeline;
pub mod trend;

pub use comparison::{ComparisonPoint, ComparisonView, MetricComparison};
pub use filter::{filter_snapshots, FilterSelection, InvalidMonth, MONTH_NAMES};
pub use timeline::{SortOrder, Timeline};
pub use trend::{trend_series, TrackedMetric, TrendPoint, TrendSeries};

use crate::core::api::{ApiError, Session, SnapshotStore};
use crate::core::models::{RecordId, Student};
use chrono::FixedOffset;

/// A student together with every snapshot the store holds for them
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionHistory {
    /// Owner of the snapshots
    pub student: Student,
    /// Snapshots in the configured calendar zone
    pub timeline: Timeline,
}

impl EvolutionHistory {
    /// Trend series for every tracked metric over `selection`
    #[must_use]
    pub fn trend(&self, selection: FilterSelection) -> Vec<TrendSeries> {
        trend_series(&self.timeline.filter(selection))
    }

    /// Latest-two comparison over `selection`
    #[must_use]
    pub fn comparison(&self, selection: FilterSelection) -> ComparisonView {
        ComparisonView::build(&self.timeline.filter(selection))
    }
}

/// Fetch a student's snapshots and record
///
/// # Errors
/// Propagates the first [`ApiError`]; a 401 has already cleared `session`
pub async fn load_history<S: SnapshotStore + ?Sized>(
    store: &S,
    session: &Session,
    student_id: &RecordId,
    zone: FixedOffset,
) -> Result<EvolutionHistory, ApiError> {
    let snapshots = store.list_snapshots(session, student_id).await?;
    let student = store.get_student(session, student_id).await?;
    logger::debug!(
        "Loaded {} snapshot(s) for student {student_id}",
        snapshots.len()
    );
    Ok(EvolutionHistory {
        student,
        timeline: Timeline::new(snapshots, zone),
    })
}
