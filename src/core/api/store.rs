//! The snapshot store boundary consumed by the evolution pipeline

use super::error::ApiError;
use super::session::Session;
use crate::core::models::{NewSnapshot, RecordId, Snapshot, Student};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Read students and their snapshots, append new snapshots
///
/// Implementations must check `session` before doing any work and clear it
/// when the backend rejects the credential.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Fetch one student
    async fn get_student(&self, session: &Session, id: &RecordId) -> Result<Student, ApiError>;

    /// Every snapshot of a student, in no guaranteed order
    async fn list_snapshots(
        &self,
        session: &Session,
        id: &RecordId,
    ) -> Result<Vec<Snapshot>, ApiError>;

    /// Append a snapshot
    async fn create_snapshot(
        &self,
        session: &Session,
        id: &RecordId,
        snapshot: &NewSnapshot,
    ) -> Result<(), ApiError>;
}

/// In-process store backed by maps, for offline use and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: String,
    students: Mutex<HashMap<RecordId, Student>>,
    snapshots: Mutex<HashMap<RecordId, Vec<Snapshot>>>,
}

impl MemoryStore {
    /// Store accepting only `token`
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Add a student
    pub fn insert_student(&self, student: Student) {
        if let Ok(mut map) = self.students.lock() {
            map.insert(student.id.clone(), student);
        }
    }

    /// Add an existing snapshot
    pub fn insert_snapshot(&self, student: &RecordId, snapshot: Snapshot) {
        if let Ok(mut map) = self.snapshots.lock() {
            map.entry(student.clone()).or_default().push(snapshot);
        }
    }

    fn authorize(&self, session: &Session) -> Result<(), ApiError> {
        if session.token()? == self.token {
            Ok(())
        } else {
            session.clear();
            Err(ApiError::Unauthorized)
        }
    }

    fn not_found(id: &RecordId) -> ApiError {
        ApiError::Status {
            status: 404,
            url: format!("memory://students/{id}"),
            message: "Aluno não encontrado".to_string(),
        }
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn get_student(&self, session: &Session, id: &RecordId) -> Result<Student, ApiError> {
        self.authorize(session)?;
        self.students
            .lock()
            .ok()
            .and_then(|map| map.get(id).cloned())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn list_snapshots(
        &self,
        session: &Session,
        id: &RecordId,
    ) -> Result<Vec<Snapshot>, ApiError> {
        self.authorize(session)?;
        Ok(self
            .snapshots
            .lock()
            .ok()
            .and_then(|map| map.get(id).cloned())
            .unwrap_or_default())
    }

    async fn create_snapshot(
        &self,
        session: &Session,
        id: &RecordId,
        snapshot: &NewSnapshot,
    ) -> Result<(), ApiError> {
        self.authorize(session)?;
        let mut map = self.snapshots.lock().map_err(|_| Self::not_found(id))?;
        let list = map.entry(id.clone()).or_default();
        let taken_at = snapshot
            .taken_at
            .unwrap_or_else(|| chrono::Utc::now().into());
        let mut created = Snapshot::new(
            i64::try_from(list.len() + 1).unwrap_or(i64::MAX),
            taken_at,
            snapshot.measurements,
        );
        created.student_id = id.clone();
        list.push(created);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Measurements;

    #[tokio::test]
    async fn test_created_snapshots_are_listed() {
        let store = MemoryStore::new("tok");
        let session = Session::new(Some("tok".into()));
        let id = RecordId::from(4);
        let mut measurements = Measurements::default();
        measurements.waist = Some(82.0);

        store
            .create_snapshot(&session, &id, &NewSnapshot { taken_at: None, measurements })
            .await
            .unwrap();

        let listed = store.list_snapshots(&session, &id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].student_id, id);
        assert_eq!(listed[0].measurements.waist, Some(82.0));
    }

    #[tokio::test]
    async fn test_unknown_student_is_not_found() {
        let store = MemoryStore::new("tok");
        let session = Session::new(Some("tok".into()));
        let err = store.get_student(&session, &RecordId::from(1)).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert!(session.is_authenticated());
    }
}
