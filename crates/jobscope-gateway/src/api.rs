//! The remote data gateway contract.
//!
//! Everything the dashboard knows about the backend goes through this
//! trait; the store depends on it, never on a concrete HTTP client, so
//! tests can substitute an in-memory implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use jobscope_core::account::{AccountDetail, AccountUpdate, PasswordChange};
use jobscope_core::alumnus::AlumnusSummary;
use jobscope_core::assessment::AssessmentSubmission;
use jobscope_core::distribution::JobDistribution;
use jobscope_core::error::Result;
use jobscope_core::graph::CompetencyGraph;
use jobscope_core::session::Role;
use jobscope_core::student::{AssessmentStatus, ProfilePayload, StudentSummary};
use jobscope_core::timeline::GrowthTimeline;

/// Fields granted by a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    pub token: String,
    pub role: Role,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub assessment_completed: bool,
}

/// Client for the career-analytics backend.
#[async_trait]
pub trait CareerApi: Send + Sync {
    /// Attaches the bearer token to all subsequent outbound requests.
    fn install_auth(&self, token: &str);

    /// Removes the outbound auth attachment.
    fn clear_auth(&self);

    async fn login(&self, identifier: &str, secret: &str) -> Result<LoginGrant>;

    async fn student_list(&self) -> Result<Vec<StudentSummary>>;

    async fn alumni_list(&self) -> Result<Vec<AlumnusSummary>>;

    async fn student_status(&self, student_id: &str) -> Result<AssessmentStatus>;

    async fn student_profile(&self, student_id: &str) -> Result<ProfilePayload>;

    async fn submit_assessment(
        &self,
        student_id: &str,
        submission: &AssessmentSubmission,
    ) -> Result<()>;

    async fn save_assessment(
        &self,
        student_id: &str,
        submission: &AssessmentSubmission,
    ) -> Result<()>;

    async fn job_list(&self) -> Result<Vec<String>>;

    async fn job_graph(&self, job_role: &str, student_id: &str) -> Result<CompetencyGraph>;

    async fn job_distribution(&self) -> Result<JobDistribution>;

    async fn alumnus_timeline(&self, alumnus_id: &str) -> Result<GrowthTimeline>;

    async fn chat_ask(&self, message: &str) -> Result<String>;

    async fn account_detail(&self) -> Result<AccountDetail>;

    async fn update_account(&self, update: &AccountUpdate) -> Result<()>;

    async fn change_password(&self, change: &PasswordChange) -> Result<()>;

    async fn create_student(&self, student: &StudentSummary) -> Result<()>;

    async fn update_student(&self, student: &StudentSummary) -> Result<()>;

    async fn delete_student(&self, student_id: &str) -> Result<()>;

    async fn create_alumnus(&self, alumnus: &AlumnusSummary) -> Result<()>;

    async fn update_alumnus(&self, alumnus: &AlumnusSummary) -> Result<()>;

    async fn delete_alumnus(&self, alumnus_id: &str) -> Result<()>;
}
