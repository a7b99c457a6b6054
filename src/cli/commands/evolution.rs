//! `evolution` handlers: history table, trends, comparison, new snapshots

use super::students::assignments;
use super::{record_id, selection, App, CommandError};
use crate::args::EvolutionSubcommand;
use gym_evolution::api::SnapshotStore;
use gym_evolution::evolution::{
    load_history, ComparisonView, SortOrder, Timeline, TrendSeries,
};
use gym_evolution::forms::SnapshotForm;
use gym_evolution::models::{format_number, MeasurementField};

/// Dispatch evolution subcommands
///
/// # Errors
/// Any [`CommandError`] from input validation or the store
pub async fn run(app: &App, subcommand: EvolutionSubcommand) -> Result<(), CommandError> {
    match subcommand {
        EvolutionSubcommand::List { id, filter } => {
            let selection = selection(filter)?;
            let history = load_history(&app.store, &app.session, &record_id(&id), app.zone).await?;
            println!("{} - {}\n", history.student.name, selection.describe());
            print_table(&history.timeline.filter(selection));
            Ok(())
        }
        EvolutionSubcommand::Trend { id, filter } => {
            let selection = selection(filter)?;
            let history = load_history(&app.store, &app.session, &record_id(&id), app.zone).await?;
            println!("{} - {}", history.student.name, selection.describe());
            for series in history.trend(selection) {
                print_series(&series);
            }
            Ok(())
        }
        EvolutionSubcommand::Compare { id, filter } => {
            let selection = selection(filter)?;
            let history = load_history(&app.store, &app.session, &record_id(&id), app.zone).await?;
            print_comparison(&history.comparison(selection));
            Ok(())
        }
        EvolutionSubcommand::Add { id, date, values } => {
            let form = SnapshotForm {
                taken_at: date,
                values: assignments(&values)?,
            };
            let snapshot = form.into_snapshot()?;
            let id = record_id(&id);
            app.store
                .create_snapshot(&app.session, &id, &snapshot)
                .await?;
            println!(
                "✓ Snapshot recorded for student {id} ({} value(s))",
                snapshot.measurements.present().count()
            );
            Ok(())
        }
        EvolutionSubcommand::Years { id } => {
            let history = load_history(&app.store, &app.session, &record_id(&id), app.zone).await?;
            let years = history.timeline.years();
            if years.is_empty() {
                println!("No snapshots recorded");
            }
            for year in years {
                println!("{year}");
            }
            Ok(())
        }
    }
}

/// Newest-first summary table; absent readings show as 0 here only
fn print_table(timeline: &Timeline) {
    if timeline.is_empty() {
        println!("{}", gym_evolution::report::EMPTY_NOTICE);
        return;
    }
    let columns = MeasurementField::HISTORY_TABLE;
    let mut header = format!("{:<10}", "Data");
    for field in columns {
        header.push_str(&format!("  {:>10}", short_label(field)));
    }
    println!("{header}");
    for snapshot in timeline.sorted(SortOrder::NewestFirst) {
        let mut line = format!("{:<10}", timeline.long_date(snapshot));
        for field in columns {
            let value = format_number(snapshot.measurements.value_or_zero(field));
            line.push_str(&format!("  {value:>10}"));
        }
        println!("{line}");
    }
}

/// Column heading trimmed to fit the table
fn short_label(field: MeasurementField) -> String {
    field.label().chars().take(10).collect()
}

fn print_series(series: &TrendSeries) {
    println!("\n{}", series.metric);
    if series.is_empty() {
        println!("  (sem dados)");
        return;
    }
    let unit = series.metric.field().unit().suffix();
    for point in &series.points {
        let value = point
            .value
            .map_or_else(|| "-".to_string(), |v| format!("{} {unit}", format_number(v)));
        println!("  {:<6} {}", point.label, value.trim_end());
    }
}

fn print_comparison(view: &ComparisonView) {
    match view {
        ComparisonView::InsufficientData => {
            println!("Dados insuficientes para comparação (mínimo de 2 avaliações).");
        }
        ComparisonView::Available(metrics) => {
            if metrics.is_empty() {
                println!("Nenhuma medida em comum entre as duas últimas avaliações.");
            }
            for m in metrics {
                let field = m.metric.field();
                println!(
                    "{:<18} {}: {:<10} {}: {:<10} Δ {:+.2}",
                    m.metric.to_string(),
                    m.previous.label,
                    field.format_value(m.previous.value),
                    m.current.label,
                    field.format_value(m.current.value),
                    m.delta()
                );
            }
        }
    }
}
