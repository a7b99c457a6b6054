//! Report command handler
//!
//! Exports the evolution history or the detail sheet of one student as
//! Markdown, HTML or PDF.

use super::{record_id, selection, App, CommandError};
use crate::args::{ReportArgs, ReportSubcommand};
use gym_evolution::api::SnapshotStore;
use gym_evolution::evolution::load_history;
use gym_evolution::report::{
    build_detail, generator_for, output_path, Document, HistoryReport, ReportFormat,
};
use logger::{error, info};
use std::path::{Path, PathBuf};

/// Dispatch report subcommands
///
/// # Errors
/// Any [`CommandError`] from the store or from writing the report
pub async fn run(app: &App, subcommand: ReportSubcommand) -> Result<(), CommandError> {
    let today = app.today();
    let page_height = app.config.page_height();
    match subcommand {
        ReportSubcommand::History { id, filter, output } => {
            let selection = selection(filter)?;
            let history = load_history(&app.store, &app.session, &record_id(&id), app.zone).await?;
            let doc = HistoryReport::new(&history.student, &history.timeline, selection, page_height)
                .build(today);
            write(app, &doc, &output)
        }
        ReportSubcommand::Student { id, output } => {
            let student = app.store.get_student(&app.session, &record_id(&id)).await?;
            let doc = build_detail(&student, page_height, today);
            write(app, &doc, &output)
        }
    }
}

/// Resolve the format: explicit flag, then the output extension, then config
fn resolve_format(app: &App, args: &ReportArgs) -> Result<ReportFormat, CommandError> {
    let from_extension = args
        .output
        .as_ref()
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse::<ReportFormat>().ok());

    match (&args.format, from_extension) {
        (Some(flag), _) => flag.parse().map_err(CommandError::Report),
        (None, Some(format)) => Ok(format),
        (None, None) => app
            .config
            .report
            .format
            .parse()
            .map_err(CommandError::Config),
    }
}

fn write(app: &App, doc: &Document, args: &ReportArgs) -> Result<(), CommandError> {
    let format = resolve_format(app, args)?;
    let path = match &args.output {
        Some(path) => path.clone(),
        None => {
            let dir = PathBuf::from(&app.config.paths.reports_dir);
            std::fs::create_dir_all(&dir)?;
            output_path(&dir, doc, format)
        }
    };
    generate(doc, format, args.pdf_converter.as_deref(), &path)?;
    println!("✓ Report generated: {}", path.display());
    Ok(())
}

fn generate(
    doc: &Document,
    format: ReportFormat,
    pdf_converter: Option<&str>,
    path: &Path,
) -> Result<(), CommandError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    generator_for(format, pdf_converter)
        .generate(doc, path)
        .map_err(|e| {
            error!("Failed to generate {format} report {}: {e}", path.display());
            CommandError::Report(e.to_string())
        })?;
    info!("{format} report written to {}", path.display());
    Ok(())
}
