//! Student records

use super::{Measurements, RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// A registered student as returned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Store-assigned id
    #[serde(default)]
    pub id: RecordId,
    /// Full name
    #[serde(rename = "nome")]
    pub name: String,
    /// Contact phone
    #[serde(rename = "telefone", default)]
    pub phone: String,
    /// Whether the membership is active; a record without the flag is inactive
    #[serde(rename = "ativo", default)]
    pub active: bool,
    /// Registration time, when the store reports it
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Measurements taken at registration or last edit
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl Student {
    /// `Ativo` / `Inativo`
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.active {
            "Ativo"
        } else {
            "Inativo"
        }
    }

    /// Name with every whitespace character replaced by `_`, for file names
    #[must_use]
    pub fn file_stem_name(&self) -> String {
        self.name
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect()
    }
}

/// Body of create and full-replace requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentPayload {
    /// Full name (required, non-blank)
    #[serde(rename = "nome")]
    pub name: String,
    /// Contact phone (required, non-blank)
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Membership flag
    #[serde(rename = "ativo")]
    pub active: bool,
    /// Only present readings are sent
    #[serde(flatten)]
    pub measurements: Measurements,
}

impl From<&Student> for StudentPayload {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            phone: student.phone.clone(),
            active: student.active,
            measurements: student.measurements,
        }
    }
}

/// Sort students by name for list display, case-insensitively
pub fn sort_by_name(students: &mut [Student]) {
    students.sort_by_key(|s| s.name.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_defaults() {
        let s: Student =
            serde_json::from_str(r#"{"id": 7, "nome": "Ana Souza", "peso": "61.2"}"#).unwrap();
        assert_eq!(s.id.as_str(), "7");
        assert!(!s.active);
        assert_eq!(s.phone, "");
        assert_eq!(s.measurements.weight, Some(61.2));
        assert_eq!(s.status_label(), "Inativo");
    }

    #[test]
    fn test_file_stem_replaces_each_whitespace() {
        let s: Student = serde_json::from_str(r#"{"nome": "Ana  Maria Souza"}"#).unwrap();
        assert_eq!(s.file_stem_name(), "Ana__Maria_Souza");
    }

    #[test]
    fn test_payload_omits_absent_measurements() {
        let s: Student = serde_json::from_str(
            r#"{"id": 1, "nome": "Rui", "telefone": "1199", "ativo": false, "altura": 1.8}"#,
        )
        .unwrap();
        let json = serde_json::to_value(StudentPayload::from(&s)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"nome": "Rui", "telefone": "1199", "ativo": false, "altura": 1.8})
        );
    }

    #[test]
    fn test_sort_by_name() {
        let mut list: Vec<Student> = ["carla", "Bruno", "ana"]
            .iter()
            .map(|n| serde_json::from_value(serde_json::json!({ "nome": n })).unwrap())
            .collect();
        sort_by_name(&mut list);
        let names: Vec<_> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["ana", "Bruno", "carla"]);
    }
}
