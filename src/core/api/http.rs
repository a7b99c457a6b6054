//! REST client for the gym store

use super::error::{extract_message, ApiError};
use super::session::Session;
use super::store::SnapshotStore;
use crate::core::models::{
    NewPayment, NewSnapshot, Payment, RecordId, RevenueSummary, Snapshot, Student, StudentPayload,
};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    senha: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Store reached over HTTP with bearer authentication
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base: Url,
}

impl HttpStore {
    /// Client rooted at `endpoint`
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidEndpoint`] if `endpoint` is not an absolute URL
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        let trimmed = endpoint.trim();
        let with_slash = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        let base =
            Url::parse(&with_slash).map_err(|_| ApiError::InvalidEndpoint(endpoint.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidEndpoint(endpoint.to_string()));
        }
        let client = Client::builder()
            .user_agent(concat!("gymevo/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base })
    }

    /// Base URL, always ending in `/`
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Exchange e-mail and password for a token and store it in `session`
    ///
    /// # Errors
    /// Returns [`ApiError::Status`] when the credentials are rejected
    pub async fn login(&self, session: &Session, email: &str, password: &str) -> Result<(), ApiError> {
        let url = self.url(&["auth", "login"])?;
        logger::debug!("POST {url}");
        let response = self
            .client
            .post(url.clone())
            .json(&Credentials {
                email,
                senha: password,
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &url, &body));
        }
        let LoginResponse { token } = decode(&url, &body)?;
        session.set(token);
        logger::info!("Logged in as {email}");
        Ok(())
    }

    /// Send an authenticated request and return the raw body
    async fn execute<B: Serialize + Sync + ?Sized>(
        &self,
        session: &Session,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<(Url, String), ApiError> {
        let token = session.token()?;
        logger::debug!("{method} {url}");

        let mut request = self
            .client
            .request(method, url.clone())
            .bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.inspect_err(|e| {
            logger::warn!("Request to {url} failed: {e}");
        })?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            logger::warn!("{url} rejected the credential; clearing session");
            session.clear();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let err = status_error(status, &url, &text);
            logger::warn!("{err}");
            return Err(err);
        }
        Ok((url, text))
    }

    async fn get_json<T: DeserializeOwned>(&self, session: &Session, url: Url) -> Result<T, ApiError> {
        let (url, body) = self
            .execute::<()>(session, Method::GET, url, None)
            .await?;
        decode(&url, &body)
    }

    /// All students, in store order
    ///
    /// # Errors
    /// Any [`ApiError`]
    pub async fn list_students(&self, session: &Session) -> Result<Vec<Student>, ApiError> {
        self.get_json(session, self.url(&["students"])?).await
    }

    /// Register a student
    ///
    /// # Errors
    /// Any [`ApiError`]
    pub async fn create_student(
        &self,
        session: &Session,
        student: &StudentPayload,
    ) -> Result<(), ApiError> {
        self.execute(session, Method::POST, self.url(&["students"])?, Some(student))
            .await
            .map(drop)
    }

    /// Replace a student record
    ///
    /// # Errors
    /// Any [`ApiError`]
    pub async fn update_student(
        &self,
        session: &Session,
        id: &RecordId,
        student: &StudentPayload,
    ) -> Result<(), ApiError> {
        let url = self.url(&["students", id.as_str()])?;
        self.execute(session, Method::PUT, url, Some(student))
            .await
            .map(drop)
    }

    /// Delete a student
    ///
    /// # Errors
    /// Any [`ApiError`]
    pub async fn delete_student(&self, session: &Session, id: &RecordId) -> Result<(), ApiError> {
        let url = self.url(&["students", id.as_str()])?;
        self.execute::<()>(session, Method::DELETE, url, None)
            .await
            .map(drop)
    }

    /// Every recorded payment
    ///
    /// # Errors
    /// Any [`ApiError`]
    pub async fn list_payments(&self, session: &Session) -> Result<Vec<Payment>, ApiError> {
        self.get_json(session, self.url(&["payments"])?).await
    }

    /// Record a payment
    ///
    /// # Errors
    /// Any [`ApiError`]
    pub async fn create_payment(
        &self,
        session: &Session,
        payment: &NewPayment,
    ) -> Result<(), ApiError> {
        self.execute(session, Method::POST, self.url(&["payments"])?, Some(payment))
            .await
            .map(drop)
    }

    /// Revenue received in `month`/`year`
    ///
    /// # Errors
    /// Any [`ApiError`]
    pub async fn revenue(
        &self,
        session: &Session,
        month: u32,
        year: i32,
    ) -> Result<RevenueSummary, ApiError> {
        let mut url = self.url(&["payments", "revenue"])?;
        url.query_pairs_mut()
            .append_pair("month", &month.to_string())
            .append_pair("year", &year.to_string());
        self.get_json(session, url).await
    }
}

#[async_trait]
impl SnapshotStore for HttpStore {
    async fn get_student(&self, session: &Session, id: &RecordId) -> Result<Student, ApiError> {
        self.get_json(session, self.url(&["students", id.as_str()])?)
            .await
    }

    async fn list_snapshots(
        &self,
        session: &Session,
        id: &RecordId,
    ) -> Result<Vec<Snapshot>, ApiError> {
        let url = self.url(&["students", id.as_str(), "evolution"])?;
        let records: Vec<serde_json::Value> = self.get_json(session, url).await?;
        let total = records.len();
        let snapshots: Vec<Snapshot> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                serde_json::from_value::<Snapshot>(record)
                    .inspect_err(|e| {
                        logger::warn!("Skipping evolution record {index} of student {id}: {e}");
                    })
                    .ok()
            })
            .collect();
        if snapshots.len() < total {
            logger::info!(
                "Loaded {} of {total} evolution records for student {id}",
                snapshots.len()
            );
        }
        Ok(snapshots)
    }

    async fn create_snapshot(
        &self,
        session: &Session,
        id: &RecordId,
        snapshot: &NewSnapshot,
    ) -> Result<(), ApiError> {
        let url = self.url(&["students", id.as_str(), "evolution"])?;
        self.execute(session, Method::POST, url, Some(snapshot))
        .await
        .map(drop)
    }
}

fn status_error(status: StatusCode, url: &Url, body: &str) -> ApiError {
    ApiError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        message: extract_message(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("erro").to_string()),
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_gets_trailing_slash() {
        let store = HttpStore::new("http://localhost:3000/api").unwrap();
        assert_eq!(store.base().as_str(), "http://localhost:3000/api/");
        assert_eq!(
            store.url(&["students", "4", "evolution"]).unwrap().as_str(),
            "http://localhost:3000/api/students/4/evolution"
        );
    }

    #[test]
    fn test_ids_are_escaped_as_one_segment() {
        let store = HttpStore::new("http://localhost:3000/api/").unwrap();
        let id = RecordId::from("1/evolution?x=");
        assert_eq!(
            store.url(&["students", id.as_str()]).unwrap().as_str(),
            "http://localhost:3000/api/students/1%2Fevolution%3Fx="
        );
    }

    #[test]
    fn test_rejects_relative_endpoint() {
        assert!(matches!(
            HttpStore::new("localhost"),
            Err(ApiError::InvalidEndpoint(_))
        ));
    }
}
