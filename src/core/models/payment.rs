//! Payments and revenue

use super::measurement::lenient_number;
use super::{RecordId, Timestamp};
use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Shown when a payment carries no student reference
pub const UNKNOWN_STUDENT_NAME: &str = "Nome Indisponível";

/// A recorded payment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawPayment")]
pub struct Payment {
    /// Store-assigned id
    pub id: RecordId,
    /// Amount in BRL; absent when the store sent none
    pub amount: Option<f64>,
    /// Payment date
    pub paid_on: Option<Timestamp>,
    /// Name of the paying student
    pub student_name: Option<String>,
}

impl Payment {
    /// Student name, or a placeholder
    #[must_use]
    pub fn student_name(&self) -> &str {
        self.student_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_STUDENT_NAME)
    }

    /// Amount as `R$ 12,50`
    #[must_use]
    pub fn amount_label(&self) -> String {
        format_brl(self.amount.unwrap_or(0.0))
    }

    /// Date as `dd/mm/yyyy` in `zone`, or `N/A`
    #[must_use]
    pub fn date_label(&self, zone: &FixedOffset) -> String {
        self.paid_on.map_or_else(
            || "N/A".to_string(),
            |ts| ts.date_in(zone).format("%d/%m/%Y").to_string(),
        )
    }
}

#[derive(Deserialize)]
struct NamedRef {
    #[serde(default)]
    nome: Option<String>,
}

#[derive(Deserialize)]
struct RawPayment {
    #[serde(default)]
    id: RecordId,
    #[serde(default, deserialize_with = "lenient_number")]
    valor: Option<f64>,
    #[serde(rename = "dataPagamento", default)]
    data_pagamento: Option<String>,
    #[serde(default)]
    usuario: Option<NamedRef>,
    #[serde(default)]
    aluno: Option<NamedRef>,
}

impl From<RawPayment> for Payment {
    fn from(raw: RawPayment) -> Self {
        Self {
            id: raw.id,
            amount: raw.valor,
            paid_on: raw.data_pagamento.and_then(|d| Timestamp::parse(&d).ok()),
            student_name: raw
                .usuario
                .and_then(|u| u.nome)
                .or_else(|| raw.aluno.and_then(|a| a.nome)),
        }
    }
}

/// Body of a payment-creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPayment {
    /// Amount in BRL
    #[serde(rename = "valor")]
    pub amount: f64,
    /// Payment date, sent as `YYYY-MM-DD`
    #[serde(rename = "dataPagamento")]
    pub paid_on: NaiveDate,
    /// Paying student
    #[serde(rename = "usuarioId")]
    pub student_id: RecordId,
}

/// Monthly revenue summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RevenueSummary {
    /// Sum of payments received in the month
    #[serde(
        rename = "totalRecebido",
        default,
        deserialize_with = "lenient_number"
    )]
    pub total_received: Option<f64>,
}

/// Format a BRL amount with two decimals and a comma separator
#[must_use]
pub fn format_brl(amount: f64) -> String {
    format!("R$ {amount:.2}").replace('.', ",")
}
