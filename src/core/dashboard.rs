//! Membership and cash-flow summary

use crate::core::api::{ApiError, HttpStore, Session};
use crate::core::models::{format_brl, RevenueSummary, Student};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Shown when no student is registered
pub const NO_STUDENT: &str = "Nenhum";

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Registered students
    pub total: usize,
    /// Students with an active membership
    pub active: usize,
    /// Students with an inactive membership
    pub inactive: usize,
    /// Name of the last student in store order
    pub last_student: String,
    /// Received this month
    pub revenue: f64,
    /// Outgoing this month (not tracked by the store)
    pub expenses: f64,
}

impl DashboardSummary {
    /// Summarise `students` and the month's `revenue`
    #[must_use]
    pub fn build(students: &[Student], revenue: RevenueSummary) -> Self {
        let active = students.iter().filter(|s| s.active).count();
        Self {
            total: students.len(),
            active,
            inactive: students.len() - active,
            last_student: students
                .last()
                .map_or_else(|| NO_STUDENT.to_string(), |s| s.name.clone()),
            revenue: revenue.total_received.unwrap_or(0.0),
            expenses: 0.0,
        }
    }

    /// `revenue - expenses`
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.revenue - self.expenses
    }
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Alunos")?;
        writeln!(f, "  Total:        {}", self.total)?;
        writeln!(f, "  Ativos:       {}", self.active)?;
        writeln!(f, "  Inativos:     {}", self.inactive)?;
        writeln!(f, "  Último aluno: {}", self.last_student)?;
        writeln!(f, "Caixa do mês")?;
        writeln!(f, "  Entradas:     {}", format_brl(self.revenue))?;
        writeln!(f, "  Saídas:       {}", format_brl(self.expenses))?;
        write!(f, "  Saldo:        {}", format_brl(self.balance()))
    }
}

/// Fetch students and the revenue of the month containing `today`
///
/// # Errors
/// Propagates the first [`ApiError`]
pub async fn load_dashboard(
    store: &HttpStore,
    session: &Session,
    today: NaiveDate,
) -> Result<DashboardSummary, ApiError> {
    let students = store.list_students(session).await?;
    let revenue = store.revenue(session, today.month(), today.year()).await?;
    Ok(DashboardSummary::build(&students, revenue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let students: Vec<Student> = serde_json::from_value(serde_json::json!([
            {"nome": "Ana", "ativo": true},
            {"nome": "Bruno", "ativo": false},
            {"nome": "Carla"}
        ]))
        .unwrap();
        let summary = DashboardSummary::build(
            &students,
            RevenueSummary {
                total_received: Some(350.5),
            },
        );
        // no flag counts as inactive
        assert_eq!((summary.total, summary.active, summary.inactive), (3, 1, 2));
        assert_eq!(summary.last_student, "Carla");
        assert!((summary.balance() - 350.5).abs() < f64::EPSILON);
        assert!(summary.to_string().contains("Saldo:        R$ 350,50"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = DashboardSummary::build(&[], RevenueSummary::default());
        assert_eq!(summary.last_student, NO_STUDENT);
        assert!((summary.revenue).abs() < f64::EPSILON);
    }
}
