//! `dashboard` handler

use super::{App, CommandError};
use gym_evolution::dashboard::load_dashboard;

/// Print membership counts and this month's cash flow
///
/// # Errors
/// Any [`CommandError`] from the store
pub async fn run(app: &App) -> Result<(), CommandError> {
    let summary = load_dashboard(&app.store, &app.session, app.today()).await?;
    println!("{summary}");
    Ok(())
}
