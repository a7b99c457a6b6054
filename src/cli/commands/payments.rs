//! `payments` handlers

use super::{App, CommandError};
use crate::args::PaymentsSubcommand;
use gym_evolution::forms::PaymentForm;

/// Dispatch payments subcommands
///
/// # Errors
/// Any [`CommandError`] from input validation or the store
pub async fn run(app: &App, subcommand: PaymentsSubcommand) -> Result<(), CommandError> {
    match subcommand {
        PaymentsSubcommand::List => {
            let payments = app.store.list_payments(&app.session).await?;
            if payments.is_empty() {
                println!("No payments recorded");
                return Ok(());
            }
            println!("{:<28}  {:>12}  Data", "Aluno", "Valor");
            for payment in &payments {
                println!(
                    "{:<28}  {:>12}  {}",
                    payment.student_name(),
                    payment.amount_label(),
                    payment.date_label(&app.zone)
                );
            }
            Ok(())
        }
        PaymentsSubcommand::Add {
            student,
            amount,
            date,
        } => {
            let form = PaymentForm {
                student_name: student,
                amount,
                date,
            };
            let students = app.store.list_students(&app.session).await?;
            let payment = form.resolve(&students)?;
            app.store.create_payment(&app.session, &payment).await?;
            println!("✓ Payment recorded for {}", form.student_name.trim());
            Ok(())
        }
    }
}
