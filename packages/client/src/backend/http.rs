use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    backend::{BackendError, DuelBackend},
    models::{MatchId, MatchResult, Profile, Question},
};

/// JSON-over-HTTP implementation of [`DuelBackend`].
///
/// Endpoints, relative to the base URL:
/// - `POST /login` with `{"name": ...}`
/// - `GET /profile`
/// - `POST /match`, answering `{"matchId": "..."} | {"matchId": null}`
/// - `GET /match/{id}/questions`
/// - `POST /match/{id}/answers` with `{"answers": [...]}`
/// - `GET /match/{id}/result`, answering the result object or `null`
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindMatchResponse {
    match_id: Option<MatchId>,
}

#[derive(Serialize)]
struct SubmitAnswersRequest<'a> {
    answers: &'a [i64],
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        HttpBackend {
            client: Client::new(),
            base_url,
        }
    }

    /// Reads the base URL from the `DUEL_BACKEND_URL` environment variable.
    pub fn from_env() -> Self {
        let base_url = std::env::var("DUEL_BACKEND_URL")
            .expect("DUEL_BACKEND_URL environment variable must be set");
        Self::new(base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(BackendError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl DuelBackend for HttpBackend {
    async fn login(&self, name: &str) -> Result<(), BackendError> {
        debug!("POST /login as {}", name);
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest { name })
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn get_profile(&self) -> Result<Profile, BackendError> {
        debug!("GET /profile");
        let response = self.client.get(self.url("/profile")).send().await?;
        let profile = Self::check(response)?.json().await?;
        Ok(profile)
    }

    async fn find_match(&self) -> Result<Option<MatchId>, BackendError> {
        debug!("POST /match");
        let response = self.client.post(self.url("/match")).send().await?;
        let body: FindMatchResponse = Self::check(response)?.json().await?;
        Ok(body.match_id)
    }

    async fn get_questions(&self, id: &MatchId) -> Result<Vec<Question>, BackendError> {
        debug!("GET /match/{}/questions", id);
        let response = self
            .client
            .get(self.url(&format!("/match/{}/questions", id)))
            .send()
            .await?;
        let questions = Self::check(response)?.json().await?;
        Ok(questions)
    }

    async fn submit_answers(&self, id: &MatchId, answers: &[i64]) -> Result<(), BackendError> {
        debug!("POST /match/{}/answers ({} answers)", id, answers.len());
        let response = self
            .client
            .post(self.url(&format!("/match/{}/answers", id)))
            .json(&SubmitAnswersRequest { answers })
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn get_result(&self, id: &MatchId) -> Result<Option<MatchResult>, BackendError> {
        debug!("GET /match/{}/result", id);
        let response = self
            .client
            .get(self.url(&format!("/match/{}/result", id)))
            .send()
            .await?;
        let result = Self::check(response)?.json().await?;
        Ok(result)
    }
}
