//! HttpGateway - reqwest implementation of the gateway contract.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::RwLock;

use jobscope_core::account::{AccountDetail, AccountUpdate, PasswordChange};
use jobscope_core::alumnus::AlumnusSummary;
use jobscope_core::assessment::AssessmentSubmission;
use jobscope_core::distribution::JobDistribution;
use jobscope_core::error::{JobscopeError, Result};
use jobscope_core::graph::CompetencyGraph;
use jobscope_core::student::{AssessmentStatus, ProfilePayload, StudentSummary};
use jobscope_core::timeline::GrowthTimeline;

use crate::api::{CareerApi, LoginGrant};

/// Gateway client that talks to the career-analytics REST backend.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    /// Bearer token attached to outbound requests while a session is active
    auth: RwLock<Option<String>>,
}

impl HttpGateway {
    /// Creates a gateway rooted at `base_url` (e.g. `https://host/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            auth: RwLock::new(None),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.auth.read().expect("auth lock poisoned").clone();
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self
            .with_auth(builder)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        response.json().await.map_err(|err| {
            JobscopeError::gateway(None, format!("Failed to parse gateway response: {err}"))
        })
    }

    async fn send_unit(&self, builder: RequestBuilder) -> Result<()> {
        let response = self
            .with_auth(builder)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }
        Ok(())
    }
}

#[async_trait]
impl CareerApi for HttpGateway {
    fn install_auth(&self, token: &str) {
        *self.auth.write().expect("auth lock poisoned") = Some(token.to_string());
    }

    fn clear_auth(&self) {
        *self.auth.write().expect("auth lock poisoned") = None;
    }

    async fn login(&self, identifier: &str, secret: &str) -> Result<LoginGrant> {
        let request = LoginRequest {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        };
        let builder = self.client.post(self.url("/auth/login")).json(&request);
        self.send_json(builder).await
    }

    async fn student_list(&self) -> Result<Vec<StudentSummary>> {
        self.send_json(self.client.get(self.url("/students/list")))
            .await
    }

    async fn alumni_list(&self) -> Result<Vec<AlumnusSummary>> {
        self.send_json(self.client.get(self.url("/alumni/all")))
            .await
    }

    async fn student_status(&self, student_id: &str) -> Result<AssessmentStatus> {
        let url = self.url(&format!("/students/{student_id}/status"));
        self.send_json(self.client.get(url)).await
    }

    async fn student_profile(&self, student_id: &str) -> Result<ProfilePayload> {
        let url = self.url(&format!("/students/{student_id}/profile"));
        self.send_json(self.client.get(url)).await
    }

    async fn submit_assessment(
        &self,
        student_id: &str,
        submission: &AssessmentSubmission,
    ) -> Result<()> {
        let url = self.url(&format!("/students/{student_id}/assessment/submit"));
        self.send_unit(self.client.post(url).json(submission)).await
    }

    async fn save_assessment(
        &self,
        student_id: &str,
        submission: &AssessmentSubmission,
    ) -> Result<()> {
        let url = self.url(&format!("/students/{student_id}/assessment/save"));
        self.send_unit(self.client.post(url).json(submission)).await
    }

    async fn job_list(&self) -> Result<Vec<String>> {
        self.send_json(self.client.get(self.url("/jobs/list"))).await
    }

    async fn job_graph(&self, job_role: &str, student_id: &str) -> Result<CompetencyGraph> {
        let builder = self
            .client
            .get(self.url("/jobs/graph"))
            .query(&[("jobRole", job_role), ("studentId", student_id)]);
        self.send_json(builder).await
    }

    async fn job_distribution(&self) -> Result<JobDistribution> {
        self.send_json(self.client.get(self.url("/jobs/distribution")))
            .await
    }

    async fn alumnus_timeline(&self, alumnus_id: &str) -> Result<GrowthTimeline> {
        let url = self.url(&format!("/alumni/{alumnus_id}/timeline"));
        self.send_json(self.client.get(url)).await
    }

    async fn chat_ask(&self, message: &str) -> Result<String> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        let builder = self.client.post(self.url("/chat/ask")).json(&request);
        let response: ChatResponse = self.send_json(builder).await?;
        Ok(response.response)
    }

    async fn account_detail(&self) -> Result<AccountDetail> {
        self.send_json(self.client.get(self.url("/users/profile")))
            .await
    }

    async fn update_account(&self, update: &AccountUpdate) -> Result<()> {
        self.send_unit(self.client.post(self.url("/users/update")).json(update))
            .await
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        self.send_unit(self.client.post(self.url("/users/password")).json(change))
            .await
    }

    async fn create_student(&self, student: &StudentSummary) -> Result<()> {
        self.send_unit(self.client.post(self.url("/students")).json(student))
            .await
    }

    async fn update_student(&self, student: &StudentSummary) -> Result<()> {
        self.send_unit(self.client.put(self.url("/students")).json(student))
            .await
    }

    async fn delete_student(&self, student_id: &str) -> Result<()> {
        let url = self.url(&format!("/students/{student_id}"));
        self.send_unit(self.client.delete(url)).await
    }

    async fn create_alumnus(&self, alumnus: &AlumnusSummary) -> Result<()> {
        self.send_unit(self.client.post(self.url("/alumni")).json(alumnus))
            .await
    }

    async fn update_alumnus(&self, alumnus: &AlumnusSummary) -> Result<()> {
        self.send_unit(self.client.put(self.url("/alumni")).json(alumnus))
            .await
    }

    async fn delete_alumnus(&self, alumnus_id: &str) -> Result<()> {
        let url = self.url(&format!("/alumni/{alumnus_id}"));
        self.send_unit(self.client.delete(url)).await
    }
}

#[derive(Serialize)]
struct LoginRequest {
    identifier: String,
    secret: String,
}

#[derive(Serialize)]
struct ChatRequest {
    message: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

fn map_transport_error(err: reqwest::Error) -> JobscopeError {
    if err.is_connect() || err.is_timeout() {
        JobscopeError::unreachable(err.to_string())
    } else {
        JobscopeError::gateway(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &str) -> JobscopeError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                format!("Gateway returned {status}")
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => JobscopeError::auth(message),
        _ => JobscopeError::gateway(Some(status.as_u16()), message),
    }
}
