//! End-to-end scenarios for the evolution pipeline: filter, trend,
//! comparison and the history report, fed through the in-memory store.

use chrono::{FixedOffset, NaiveDate};
use gym_evolution::api::{ApiError, MemoryStore, Session};
use gym_evolution::evolution::{
    filter_snapshots, load_history, ComparisonView, FilterSelection, SortOrder, Timeline,
    TrackedMetric, TrendSeries,
};
use gym_evolution::models::{MeasurementField, Measurements, RecordId, Snapshot, Student, Timestamp};
use gym_evolution::report::{HistoryReport, DEFAULT_PAGE_HEIGHT, EMPTY_NOTICE, MISSING_VALUE};

fn brt() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

fn snapshot(id: i64, date: (i32, u32, u32), weight: f64, muscle: Option<f64>) -> Snapshot {
    let mut m = Measurements::default();
    m.weight = Some(weight);
    m.body_fat = Some(20.0);
    m.muscle = muscle;
    let day = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
    Snapshot::new(id, Timestamp::from(day), m)
}

/// Three monthly snapshots, deliberately out of order
fn three_snapshots() -> Vec<Snapshot> {
    vec![
        snapshot(2, (2024, 2, 15), 78.0, Some(40.0)),
        snapshot(3, (2024, 3, 20), 76.0, Some(41.0)),
        snapshot(1, (2024, 1, 10), 80.0, Some(39.5)),
    ]
}

fn student() -> Student {
    serde_json::from_value(serde_json::json!({
        "id": 9, "nome": "Maria Silva", "telefone": "11 99999-0000"
    }))
    .unwrap()
}

#[test]
fn filter_by_month_and_year_keeps_only_february() {
    let input = three_snapshots();
    let selection = FilterSelection::new(Some(2), Some(2024)).unwrap();

    let out = filter_snapshots(&input, selection, &brt());

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, RecordId::from(2));
    assert_eq!(input.len(), 3, "input is not mutated");
}

#[test]
fn unset_filter_is_identity() {
    let input = three_snapshots();
    let out = filter_snapshots(&input, FilterSelection::all(), &brt());
    assert_eq!(out, input);
}

#[test]
fn filtered_elements_match_selected_year() {
    let mut input = three_snapshots();
    input.push(snapshot(4, (2023, 2, 1), 82.0, None));

    let out = filter_snapshots(&input, FilterSelection::new(None, Some(2023)).unwrap(), &brt());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].taken_at.date_in(&brt()), NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());

    let feb_any_year = filter_snapshots(&input, FilterSelection::new(Some(2), None).unwrap(), &brt());
    assert_eq!(feb_any_year.len(), 2);
}

#[test]
fn weight_trend_is_chronological() {
    let timeline = Timeline::new(three_snapshots(), brt());

    let series = TrendSeries::build(&timeline, TrackedMetric::Weight);
    let points: Vec<(&str, Option<f64>)> = series
        .points
        .iter()
        .map(|p| (p.label.as_str(), p.value))
        .collect();

    assert_eq!(
        points,
        vec![("10/01", Some(80.0)), ("15/02", Some(78.0)), ("20/03", Some(76.0))]
    );
    for metric in TrackedMetric::ALL {
        assert_eq!(TrendSeries::build(&timeline, metric).len(), timeline.len());
    }
}

#[test]
fn comparison_uses_last_two_snapshots() {
    let timeline = Timeline::new(three_snapshots(), brt());

    let view = ComparisonView::build(&timeline);
    let weight = view.get(TrackedMetric::Weight).expect("weight comparison");

    assert_eq!(weight.previous.label, "Anterior (15/02)");
    assert!((weight.previous.value - 78.0).abs() < f64::EPSILON);
    assert_eq!(weight.current.label, "Atual (20/03)");
    assert!((weight.current.value - 76.0).abs() < f64::EPSILON);
    assert!((weight.delta() + 2.0).abs() < f64::EPSILON);
}

#[test]
fn single_snapshot_has_no_comparison_and_one_trend_point() {
    let timeline = Timeline::new(vec![snapshot(1, (2024, 1, 10), 80.0, None)], brt());

    assert_eq!(ComparisonView::build(&timeline), ComparisonView::InsufficientData);
    assert_eq!(TrendSeries::build(&timeline, TrackedMetric::Weight).len(), 1);
}

#[test]
fn empty_input_gives_notice_and_empty_trends() {
    let timeline = Timeline::new(Vec::new(), brt());
    let selection = FilterSelection::new(Some(5), Some(2024)).unwrap();

    let doc = HistoryReport::new(&student(), &timeline, selection, DEFAULT_PAGE_HEIGHT).build(today());

    assert_eq!(doc.notices(), vec![EMPTY_NOTICE]);
    assert!(doc.headings().is_empty());
    assert!(doc.tables().is_empty());
    for metric in TrackedMetric::ALL {
        assert!(TrendSeries::build(&timeline.filter(selection), metric).is_empty());
    }
}

#[test]
fn missing_muscle_reads_na_and_suppresses_comparison() {
    let snaps = vec![
        snapshot(1, (2024, 1, 10), 80.0, Some(39.5)),
        snapshot(2, (2024, 2, 15), 78.0, None),
    ];
    let timeline = Timeline::new(snaps, brt());

    let doc = HistoryReport::new(&student(), &timeline, FilterSelection::all(), DEFAULT_PAGE_HEIGHT)
        .build(today());
    let newest = doc.tables()[0];
    assert_eq!(
        newest.value_of(&MeasurementField::Muscle.label_with_unit()),
        Some(MISSING_VALUE)
    );
    assert_eq!(newest.entries().count(), MeasurementField::ALL.len());

    let view = ComparisonView::build(&timeline);
    assert!(view.get(TrackedMetric::Muscle).is_none());
    assert!(view.get(TrackedMetric::Weight).is_some());
}

#[test]
fn report_sections_follow_newest_first() {
    let timeline = Timeline::new(three_snapshots(), brt());
    let doc = HistoryReport::new(&student(), &timeline, FilterSelection::all(), DEFAULT_PAGE_HEIGHT)
        .build(today());

    assert_eq!(
        doc.headings(),
        vec![
            "Avaliação de 20/03/2024 (Mais Recente)",
            "Avaliação de 15/02/2024",
            "Avaliação de 10/01/2024",
        ]
    );
    let sorted: Vec<_> = timeline
        .sorted(SortOrder::NewestFirst)
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(sorted, vec![RecordId::from(3), RecordId::from(2), RecordId::from(1)]);
}

#[tokio::test]
async fn history_loads_through_store_and_feeds_pipeline() {
    let store = MemoryStore::new("tok");
    store.insert_student(student());
    for snap in three_snapshots() {
        store.insert_snapshot(&RecordId::from(9), snap);
    }
    let session = Session::new(Some("tok".into()));

    let history = load_history(&store, &session, &RecordId::from(9), brt())
        .await
        .unwrap();

    assert_eq!(history.student.name, "Maria Silva");
    let feb = FilterSelection::new(Some(2), Some(2024)).unwrap();
    assert_eq!(history.comparison(feb), ComparisonView::InsufficientData);
    assert_eq!(history.trend(FilterSelection::all())[0].len(), 3);
}

#[tokio::test]
async fn missing_credential_short_circuits() {
    let store = MemoryStore::new("tok");
    let session = Session::anonymous();

    let err = load_history(&store, &session, &RecordId::from(9), brt())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));
}

#[tokio::test]
async fn rejected_credential_clears_session() {
    let store = MemoryStore::new("tok");
    store.insert_student(student());
    let session = Session::new(Some("stale".into()));

    let err = load_history(&store, &session, &RecordId::from(9), brt())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!session.is_authenticated());
}
