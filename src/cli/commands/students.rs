//! `students` handlers

use super::{confirm, record_id, App, CommandError};
use crate::args::StudentsSubcommand;
use gym_evolution::api::SnapshotStore;
use gym_evolution::forms::{parse_assignment, FormError, StudentForm};
use gym_evolution::models::{sort_by_name, FieldGroup, MeasurementField, Student};

/// Dispatch students subcommands
///
/// # Errors
/// Any [`CommandError`] from input validation or the store
pub async fn run(app: &App, subcommand: StudentsSubcommand) -> Result<(), CommandError> {
    match subcommand {
        StudentsSubcommand::List => list(app).await,
        StudentsSubcommand::Show { id } => show(app, &id).await,
        StudentsSubcommand::Add {
            name,
            phone,
            inactive,
            values,
        } => {
            let mut form = StudentForm::new(name, phone);
            form.active = !inactive;
            form.values = assignments(&values)?;
            app.store
                .create_student(&app.session, &form.into_payload()?)
                .await?;
            println!("✓ Student registered");
            Ok(())
        }
        StudentsSubcommand::Edit {
            id,
            name,
            phone,
            active,
            values,
        } => {
            let id = record_id(&id);
            let current = app.store.get_student(&app.session, &id).await?;
            let mut form = StudentForm::editing(&current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(phone) = phone {
                form.phone = phone;
            }
            if let Some(active) = active {
                form.active = active;
            }
            form.values = assignments(&values)?;
            app.store
                .update_student(&app.session, &id, &form.into_payload()?)
                .await?;
            println!("✓ Student {id} updated");
            Ok(())
        }
        StudentsSubcommand::Delete { id, yes } => {
            let id = record_id(&id);
            if !yes && !confirm(&format!("Delete student {id}?")) {
                println!("✗ Delete cancelled");
                return Ok(());
            }
            app.store.delete_student(&app.session, &id).await?;
            println!("✓ Student {id} deleted");
            Ok(())
        }
    }
}

/// Parse every `field=value` argument
///
/// # Errors
/// The first malformed assignment
pub fn assignments(raw: &[String]) -> Result<Vec<(MeasurementField, String)>, FormError> {
    raw.iter().map(|r| parse_assignment(r)).collect()
}

async fn list(app: &App) -> Result<(), CommandError> {
    let mut students = app.store.list_students(&app.session).await?;
    sort_by_name(&mut students);
    if students.is_empty() {
        println!("No students registered");
        return Ok(());
    }

    let width = students
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    println!("{:>6}  {:<width$}  {:<16}  Status", "ID", "Nome", "Telefone");
    for student in &students {
        println!(
            "{:>6}  {:<width$}  {:<16}  {}",
            student.id.as_str(),
            student.name,
            student.phone,
            student.status_label()
        );
    }
    Ok(())
}

async fn show(app: &App, id: &str) -> Result<(), CommandError> {
    let student = app.store.get_student(&app.session, &record_id(id)).await?;
    print_student(&student);
    Ok(())
}

fn print_student(student: &Student) {
    println!("{} (#{})", student.name, student.id);
    println!("  Telefone: {}", student.phone);
    println!("  Status:   {}", student.status_label());
    for group in FieldGroup::ALL {
        println!("\n{}", group.title());
        for field in group.fields() {
            let value = student
                .measurements
                .get(*field)
                .map_or_else(|| "N/A".to_string(), |v| field.format_value(v));
            println!("  {:<28} {value}", field.label());
        }
    }
}
