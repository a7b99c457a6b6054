//! Evolution snapshots
//!
//! A snapshot is an immutable point-in-time copy of a student's measurements.
//! The store is free to return them in any order, so every consumer sorts
//! through [`crate::core::evolution::Timeline`].

use super::{Measurements, RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// One measurement session for a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct Snapshot {
    /// Store-assigned id
    pub id: RecordId,
    /// Owning student
    #[serde(rename = "alunoId")]
    pub student_id: RecordId,
    /// When the measurements were taken
    #[serde(rename = "createdAt")]
    pub taken_at: Timestamp,
    /// Readings; absent fields stay absent
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl Snapshot {
    /// Build a snapshot directly (tests and offline fixtures)
    #[must_use]
    pub fn new(id: impl Into<RecordId>, taken_at: Timestamp, measurements: Measurements) -> Self {
        Self {
            id: id.into(),
            student_id: RecordId::default(),
            taken_at,
            measurements,
        }
    }
}

/// Wire shape, tolerating the alternate key names older stores use
#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    id: RecordId,
    #[serde(rename = "alunoId", default)]
    aluno_id: Option<RecordId>,
    #[serde(rename = "studentId", default)]
    student_id: Option<RecordId>,
    #[serde(rename = "usuarioId", default)]
    usuario_id: Option<RecordId>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<Timestamp>,
    #[serde(default)]
    data: Option<Timestamp>,
    #[serde(flatten)]
    measurements: Measurements,
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = String;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        let taken_at = raw
            .created_at
            .or(raw.data)
            .ok_or_else(|| format!("snapshot '{}' has no createdAt or data field", raw.id))?;
        Ok(Self {
            id: raw.id,
            student_id: raw
                .aluno_id
                .or(raw.student_id)
                .or(raw.usuario_id)
                .unwrap_or_default(),
            taken_at,
            measurements: raw.measurements,
        })
    }
}

/// Body of a snapshot-creation request
///
/// Only present readings are serialized; the store assigns the timestamp
/// when `taken_at` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewSnapshot {
    /// Explicit timestamp, if the caller has one
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<Timestamp>,
    /// Readings to record
    #[serde(flatten)]
    pub measurements: Measurements,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_prefers_created_at() {
        let s: Snapshot = serde_json::from_str(
            r#"{"id": 3, "alunoId": 9, "createdAt": "2024-03-20T13:45:00Z", "data": "2024-01-01", "peso": 76}"#,
        )
        .unwrap();
        assert!(matches!(s.taken_at, Timestamp::Instant(_)));
        assert_eq!(s.student_id.as_str(), "9");
        assert_eq!(s.measurements.weight, Some(76.0));
    }

    #[test]
    fn test_decode_falls_back_to_data_and_usuario_id() {
        let s: Snapshot =
            serde_json::from_str(r#"{"id": "a1", "usuarioId": 4, "data": "2024-02-15"}"#).unwrap();
        assert_eq!(s.student_id.as_str(), "4");
        assert!(s.measurements.is_empty());
    }

    #[test]
    fn test_decode_without_timestamp_fails() {
        let err = serde_json::from_str::<Snapshot>(r#"{"id": 1, "peso": 70}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_new_snapshot_payload_is_partial() {
        let mut m = Measurements::default();
        m.weight = Some(0.0);
        m.waist = Some(81.5);
        let body = NewSnapshot {
            taken_at: None,
            measurements: m,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"peso": 0.0, "cintura": 81.5})
        );
    }
}
