//! Input validation for student, snapshot and payment submissions
//!
//! All measurement input goes through the same rule: blank or non-numeric
//! text is left out of the payload, never sent as zero.

use crate::core::models::{
    parse_decimal, MeasurementField, Measurements, NewPayment, NewSnapshot, Student,
    StudentPayload, Timestamp,
};
use chrono::NaiveDate;
use thiserror::Error;

/// Rejected form input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field is blank
    #[error("field '{0}' is required")]
    MissingField(&'static str),
    /// Amount missing, non-numeric or not positive
    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),
    /// Date or timestamp that cannot be parsed
    #[error("invalid date: '{0}' (use YYYY-MM-DD or DD/MM/YYYY)")]
    InvalidDate(String),
    /// No student with that exact name
    #[error("no student named '{0}'; use the exact name from `gymevo students list`")]
    UnknownStudent(String),
    /// `field=value` pair naming no known measurement
    #[error("{0}")]
    UnknownField(String),
    /// Text that is not of the form `field=value`
    #[error("expected field=value, got '{0}'")]
    InvalidAssignment(String),
}

/// Split `peso=80,5` into the field and its raw text
///
/// # Errors
/// [`FormError::InvalidAssignment`] without `=`, [`FormError::UnknownField`]
/// for an unrecognised field name
pub fn parse_assignment(raw: &str) -> Result<(MeasurementField, String), FormError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| FormError::InvalidAssignment(raw.to_string()))?;
    let field = key.parse::<MeasurementField>().map_err(FormError::UnknownField)?;
    Ok((field, value.trim().to_string()))
}

/// Apply raw `(field, text)` pairs onto `base`
///
/// Readable numbers are set; blank or unreadable text clears the field.
fn apply_values(base: &mut Measurements, values: &[(MeasurementField, String)]) {
    for (field, text) in values {
        let parsed = parse_decimal(text);
        if parsed.is_none() && !text.trim().is_empty() {
            logger::warn!("Ignoring non-numeric value '{text}' for {}", field.key());
        }
        base.set(*field, parsed);
    }
}

/// Parse `YYYY-MM-DD` or `DD/MM/YYYY`
///
/// # Errors
/// [`FormError::InvalidDate`] for anything else
pub fn parse_date(raw: &str) -> Result<NaiveDate, FormError> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| FormError::InvalidDate(raw.to_string()))
}

/// Registration or edit form for a student
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentForm {
    /// Full name
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// Membership flag, `true` for new registrations
    pub active: bool,
    /// Starting measurements (edits start from the stored record)
    pub base: Measurements,
    /// Raw measurement input
    pub values: Vec<(MeasurementField, String)>,
}

impl StudentForm {
    /// Empty registration form; new students are active
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            active: true,
            ..Self::default()
        }
    }

    /// Edit form pre-filled from the stored record
    #[must_use]
    pub fn editing(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            phone: student.phone.clone(),
            active: student.active,
            base: student.measurements,
            values: Vec::new(),
        }
    }

    /// Validate and build the request body
    ///
    /// # Errors
    /// [`FormError::MissingField`] when name or phone is blank
    pub fn into_payload(self) -> Result<StudentPayload, FormError> {
        let name = self.name.trim().to_string();
        let phone = self.phone.trim().to_string();
        if name.is_empty() {
            return Err(FormError::MissingField("nome"));
        }
        if phone.is_empty() {
            return Err(FormError::MissingField("telefone"));
        }
        let mut measurements = self.base;
        apply_values(&mut measurements, &self.values);
        Ok(StudentPayload {
            name,
            phone,
            active: self.active,
            measurements,
        })
    }
}

/// New evolution snapshot form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotForm {
    /// Explicit timestamp; the store assigns one when absent
    pub taken_at: Option<String>,
    /// Raw measurement input
    pub values: Vec<(MeasurementField, String)>,
}

impl SnapshotForm {
    /// Build the request body, keeping only readable values
    ///
    /// # Errors
    /// [`FormError::InvalidDate`] for an unreadable timestamp,
    /// [`FormError::MissingField`] when no value is readable
    pub fn into_snapshot(self) -> Result<NewSnapshot, FormError> {
        let taken_at = self
            .taken_at
            .filter(|t| !t.trim().is_empty())
            .map(|t| match parse_date(&t) {
                Ok(date) => Ok(Timestamp::from(date)),
                Err(_) => Timestamp::parse(&t).map_err(|_| FormError::InvalidDate(t.clone())),
            })
            .transpose()?;

        let mut measurements = Measurements::default();
        apply_values(&mut measurements, &self.values);
        if measurements.is_empty() {
            return Err(FormError::MissingField("medidas"));
        }
        Ok(NewSnapshot {
            taken_at,
            measurements,
        })
    }
}

/// New payment form; the student is picked by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    /// Student name as typed
    pub student_name: String,
    /// Amount, comma or dot decimal
    pub amount: String,
    /// Payment date
    pub date: String,
}

impl PaymentForm {
    /// Validate against the current student list and build the body
    ///
    /// # Errors
    /// Any [`FormError`] for blank, invalid or unmatched input
    pub fn resolve(&self, students: &[Student]) -> Result<NewPayment, FormError> {
        if self.amount.trim().is_empty() {
            return Err(FormError::MissingField("valor"));
        }
        if self.date.trim().is_empty() {
            return Err(FormError::MissingField("dataPagamento"));
        }
        let amount = parse_decimal(&self.amount)
            .filter(|v| *v > 0.0)
            .ok_or_else(|| FormError::InvalidAmount(self.amount.clone()))?;
        let paid_on = parse_date(&self.date)?;

        let wanted = self.student_name.trim();
        let student = students
            .iter()
            .find(|s| s.name == wanted)
            .ok_or_else(|| FormError::UnknownStudent(wanted.to_string()))?;

        Ok(NewPayment {
            amount,
            paid_on,
            student_id: student.id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Vec<Student> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "nome": "Ana Souza"},
            {"id": 2, "nome": "Bruno"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("peso=80,5").unwrap(),
            (MeasurementField::Weight, "80,5".to_string())
        );
        assert!(matches!(parse_assignment("peso"), Err(FormError::InvalidAssignment(_))));
        assert!(matches!(parse_assignment("asa=1"), Err(FormError::UnknownField(_))));
    }

    #[test]
    fn test_student_form_requires_name_and_phone() {
        assert_eq!(
            StudentForm::new("  ", "119").into_payload(),
            Err(FormError::MissingField("nome"))
        );
        assert_eq!(
            StudentForm::new("Ana", "").into_payload(),
            Err(FormError::MissingField("telefone"))
        );
    }

    #[test]
    fn test_student_form_omits_blank_and_garbage() {
        let mut form = StudentForm::new("Ana", "1199");
        form.values = vec![
            (MeasurementField::Weight, "61,5".into()),
            (MeasurementField::Height, String::new()),
            (MeasurementField::Waist, "abc".into()),
            (MeasurementField::Hip, "0".into()),
        ];
        let payload = form.into_payload().unwrap();
        assert!(payload.active);
        assert_eq!(payload.measurements.weight, Some(61.5));
        assert_eq!(payload.measurements.height, None);
        assert_eq!(payload.measurements.waist, None);
        assert_eq!(payload.measurements.hip, Some(0.0));
    }

    #[test]
    fn test_edit_form_keeps_and_clears() {
        let student: Student = serde_json::from_value(serde_json::json!({
            "id": 1, "nome": "Ana", "telefone": "1", "ativo": false, "peso": 60, "altura": 1.6
        }))
        .unwrap();
        let mut form = StudentForm::editing(&student);
        form.values = vec![(MeasurementField::Height, String::new())];
        let payload = form.into_payload().unwrap();
        assert!(!payload.active);
        assert_eq!(payload.measurements.weight, Some(60.0));
        assert_eq!(payload.measurements.height, None);
    }

    #[test]
    fn test_snapshot_form() {
        let form = SnapshotForm {
            taken_at: Some("20/03/2024".into()),
            values: vec![
                (MeasurementField::Weight, "76".into()),
                (MeasurementField::Muscle, " ".into()),
            ],
        };
        let snap = form.into_snapshot().unwrap();
        assert_eq!(
            serde_json::to_value(&snap).unwrap(),
            serde_json::json!({"createdAt": "2024-03-20T00:00:00", "peso": 76.0})
        );

        let empty = SnapshotForm {
            taken_at: None,
            values: vec![(MeasurementField::Weight, "x".into())],
        };
        assert_eq!(empty.into_snapshot(), Err(FormError::MissingField("medidas")));

        let bad_date = SnapshotForm {
            taken_at: Some("ontem".into()),
            values: vec![(MeasurementField::Weight, "70".into())],
        };
        assert!(matches!(bad_date.into_snapshot(), Err(FormError::InvalidDate(_))));
    }

    #[test]
    fn test_payment_form_resolves_exact_trimmed_name() {
        let form = PaymentForm {
            student_name: "  Ana Souza ".into(),
            amount: "150,00".into(),
            date: "2024-06-05".into(),
        };
        let payment = form.resolve(&students()).unwrap();
        assert_eq!(payment.student_id.as_str(), "1");
        assert!((payment.amount - 150.0).abs() < f64::EPSILON);

        let wrong_case = PaymentForm {
            student_name: "ana souza".into(),
            ..form.clone()
        };
        assert!(matches!(
            wrong_case.resolve(&students()),
            Err(FormError::UnknownStudent(_))
        ));

        let bad_amount = PaymentForm {
            amount: "-3".into(),
            ..form
        };
        assert!(matches!(
            bad_amount.resolve(&students()),
            Err(FormError::InvalidAmount(_))
        ));
    }
}
