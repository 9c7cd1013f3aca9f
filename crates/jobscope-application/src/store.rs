//! The shared application store.
//!
//! `AppStore` is the single mutable owner of all cross-widget state. Widgets
//! read slices through [`AppStore::read`] and request changes through the
//! named actions below; they never write fields directly.
//!
//! Every derived fetch (profile, graph, timeline) carries a monotonically
//! increasing sequence tag captured at issue time. A result is applied only
//! if its tag is still current when it arrives, so the visible resource
//! always corresponds to the most recently *initiated* selection, not the
//! most recently completed fetch.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, RwLockReadGuard, broadcast};

use jobscope_core::account::{AccountUpdate, PasswordChange};
use jobscope_core::alumnus::AlumnusSummary;
use jobscope_core::assessment::AssessmentDraft;
use jobscope_core::chat::{self, ChatEntry};
use jobscope_core::error::{JobscopeError, Result};
use jobscope_core::route::{self, Route};
use jobscope_core::session::Session;
use jobscope_core::student::{StudentProfile, StudentSummary};
use jobscope_core::vault::SessionVault;
use jobscope_gateway::CareerApi;

use crate::state::{DashboardState, Slice};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// The shared store coordinating all dashboard widgets.
pub struct AppStore {
    state: RwLock<DashboardState>,
    gateway: Arc<dyn CareerApi>,
    vault: Arc<dyn SessionVault>,
    changes: broadcast::Sender<Slice>,
    /// Staleness guards, one per derived resource
    profile_seq: AtomicU64,
    graph_seq: AtomicU64,
    timeline_seq: AtomicU64,
}

impl AppStore {
    /// Creates a store over the given gateway and vault.
    pub fn new(gateway: Arc<dyn CareerApi>, vault: Arc<dyn SessionVault>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(DashboardState::new()),
            gateway,
            vault,
            changes,
            profile_seq: AtomicU64::new(0),
            graph_seq: AtomicU64::new(0),
            timeline_seq: AtomicU64::new(0),
        }
    }

    /// Wires the store to the default HTTP gateway and file vault.
    pub fn bootstrap(base_url: impl Into<String>) -> Result<Arc<Self>> {
        let gateway = Arc::new(jobscope_gateway::HttpGateway::new(base_url));
        let vault = Arc::new(jobscope_infrastructure::FileSessionVault::default_location()?);
        Ok(Arc::new(Self::new(gateway, vault)))
    }

    /// Read access to the current state.
    pub async fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().await
    }

    /// Subscribes to slice-change notifications.
    ///
    /// A lagged receiver should simply re-read the state; notifications
    /// carry no payload beyond the slice identity.
    pub fn subscribe(&self) -> broadcast::Receiver<Slice> {
        self.changes.subscribe()
    }

    fn notify(&self, slices: &[Slice]) {
        for slice in slices {
            // No receivers is fine; widgets may not have mounted yet.
            let _ = self.changes.send(*slice);
        }
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Rehydrates a persisted session before the first render.
    ///
    /// Installs the auth attachment immediately so a returning user never
    /// sees an unauthenticated flash. Returns `true` if a session was
    /// restored.
    pub async fn restore(&self) -> Result<bool> {
        let Some(session) = self.vault.load()? else {
            return Ok(false);
        };

        tracing::info!("Restored session for '{}'", session.username);
        self.gateway.install_auth(&session.auth_token);

        let own_id = session.is_student().then(|| own_student_id(&session)).flatten();
        {
            let mut state = self.state.write().await;
            state.session = Some(session);
        }
        self.notify(&[Slice::Session]);

        if let Some(id) = own_id {
            self.select_student(Some(&id)).await;
        }
        Ok(true)
    }

    /// Authenticates against the gateway.
    ///
    /// On success the session is persisted, the auth attachment installed,
    /// and (for students) the own student record selected. On failure the
    /// session is untouched and the message is surfaced via the error
    /// slice. Returns the route to land on.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Route> {
        {
            let mut state = self.state.write().await;
            state.loading.auth = true;
            state.last_error = None;
        }
        self.notify(&[Slice::Loading, Slice::Error]);

        let outcome = self.gateway.login(identifier, secret).await;

        let grant = match outcome {
            Ok(grant) => grant,
            Err(err) => {
                let mut state = self.state.write().await;
                state.loading.auth = false;
                state.last_error = Some(err.user_message());
                drop(state);
                self.notify(&[Slice::Loading, Slice::Error]);
                return Err(err);
            }
        };

        let session = Session {
            username: identifier.to_string(),
            role: grant.role,
            student_id: grant.student_id,
            assessment_completed: grant.assessment_completed,
            auth_token: grant.token,
        };

        // A failed snapshot write must not block the login itself.
        if let Err(err) = self.vault.save(&session).await {
            tracing::warn!("Failed to persist session snapshot: {}", err);
        }
        self.gateway.install_auth(&session.auth_token);

        let is_student = session.is_student();
        let assessment_completed = session.assessment_completed;
        let own_id = own_student_id(&session);
        {
            let mut state = self.state.write().await;
            state.session = Some(session);
            state.loading.auth = false;
        }
        self.notify(&[Slice::Session, Slice::Loading]);

        // Students are pinned to their own record.
        if is_student {
            if let Some(id) = own_id {
                self.select_student(Some(&id)).await;
            }
        }

        Ok(route::post_login_route(is_student, assessment_completed))
    }

    /// Destroys the session and resets every identity-scoped slice.
    pub async fn logout(&self) {
        if let Err(err) = self.vault.clear().await {
            tracing::warn!("Failed to clear session snapshot: {}", err);
        }
        self.gateway.clear_auth();

        // Invalidate anything still in flight.
        self.profile_seq.fetch_add(1, Ordering::SeqCst);
        self.graph_seq.fetch_add(1, Ordering::SeqCst);
        self.timeline_seq.fetch_add(1, Ordering::SeqCst);

        {
            let mut state = self.state.write().await;
            *state = DashboardState::new();
        }
        self.notify(&[
            Slice::Session,
            Slice::Selection,
            Slice::Profile,
            Slice::Graph,
            Slice::Timeline,
            Slice::StudentList,
            Slice::AlumniList,
            Slice::Chat,
            Slice::Loading,
            Slice::Error,
        ]);
    }

    // ========================================================================
    // Selection and derived fetches
    // ========================================================================

    /// Selects a student (or clears the selection with `None`).
    ///
    /// Stale profile and graph data are cleared synchronously before any
    /// fetch is issued, so no render can show the previous student's data
    /// under the new id.
    pub async fn select_student(&self, id: Option<&str>) {
        let id = id.map(str::trim).filter(|s| !s.is_empty());

        let Some(id) = id.map(str::to_string) else {
            // Clearing never issues a network call.
            self.profile_seq.fetch_add(1, Ordering::SeqCst);
            self.graph_seq.fetch_add(1, Ordering::SeqCst);
            {
                let mut state = self.state.write().await;
                state.selected_student_id = None;
                state.student_profile = None;
                state.competency_graph = None;
                state.loading.student_profile = false;
                state.loading.graph = false;
            }
            self.notify(&[Slice::Selection, Slice::Profile, Slice::Graph, Slice::Loading]);
            return;
        };

        let seq = self.profile_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.graph_seq.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.state.write().await;
            state.selected_student_id = Some(id.clone());
            state.student_profile = None;
            state.competency_graph = None;
            state.loading.student_profile = true;
            state.loading.graph = false;
            state.last_error = None;
        }
        self.notify(&[
            Slice::Selection,
            Slice::Profile,
            Slice::Graph,
            Slice::Loading,
            Slice::Error,
        ]);

        let outcome = self.load_profile(&id).await;

        let applied_complete = {
            let mut state = self.state.write().await;
            let current = self.profile_seq.load(Ordering::SeqCst) == seq
                && state.selected_student_id.as_deref() == Some(id.as_str());
            if !current {
                // A newer selection owns the profile slot (and its
                // loading flag) now.
                tracing::debug!("Discarding stale profile result for student '{}'", id);
                false
            } else {
                state.loading.student_profile = false;
                match outcome {
                    Ok(profile) => {
                        let complete = !profile.is_incomplete();
                        state.student_profile = Some(profile);
                        complete
                    }
                    Err(err) => {
                        tracing::warn!("Profile fetch failed for '{}': {}", id, err);
                        state.last_error = Some(err.user_message());
                        false
                    }
                }
            }
        };
        self.notify(&[Slice::Profile, Slice::Loading, Slice::Error]);

        if applied_complete {
            self.maybe_fetch_graph().await;
        }
    }

    /// Status check first; an incomplete assessment is a terminal expected
    /// state and skips the profile fetch entirely.
    async fn load_profile(&self, id: &str) -> Result<StudentProfile> {
        let status = self.gateway.student_status(id).await?;
        if !status.is_complete {
            return Ok(StudentProfile::Incomplete {
                status: status
                    .redirect_url
                    .unwrap_or_else(|| "assessment_required".to_string()),
            });
        }

        let payload = self.gateway.student_profile(id).await?;
        Ok(StudentProfile::Complete(payload))
    }

    /// Selects an alumnus (or clears the selection with `None`).
    ///
    /// The job role is derived by looking the alumnus up in the loaded
    /// list. A missing record or missing job title is a degraded state,
    /// not an error: the id is kept so id-keyed widgets still work.
    pub async fn select_alumnus(&self, id: Option<&str>) {
        let id = id.map(str::trim).filter(|s| !s.is_empty());

        let Some(id) = id.map(str::to_string) else {
            self.graph_seq.fetch_add(1, Ordering::SeqCst);
            self.timeline_seq.fetch_add(1, Ordering::SeqCst);
            {
                let mut state = self.state.write().await;
                state.selected_alumnus_id = None;
                state.selected_job_role = None;
                state.competency_graph = None;
                state.timeline = None;
                state.loading.graph = false;
                state.loading.timeline = false;
            }
            self.notify(&[Slice::Selection, Slice::Graph, Slice::Timeline, Slice::Loading]);
            return;
        };

        self.graph_seq.fetch_add(1, Ordering::SeqCst);
        let job_role = {
            let mut state = self.state.write().await;
            state.selected_alumnus_id = Some(id.clone());

            let job_role = jobscope_core::alumnus::find_alumnus(&state.alumni_list, &id)
                .and_then(|alumnus| alumnus.job_title.clone());
            state.selected_job_role = job_role.clone();
            state.competency_graph = None;
            state.loading.graph = false;
            job_role
        };
        self.notify(&[Slice::Selection, Slice::Graph, Slice::Loading]);

        if job_role.is_none() {
            tracing::debug!("Alumnus '{}' has no resolvable job title; degraded mode", id);
        } else {
            self.maybe_fetch_graph().await;
        }

        self.fetch_timeline(&id).await;
    }

    /// Sets the target job role directly (graph widget dropdown).
    pub async fn select_job_role(&self, job_role: Option<&str>) {
        let job_role = job_role.map(str::trim).filter(|s| !s.is_empty());

        self.graph_seq.fetch_add(1, Ordering::SeqCst);
        {
            let mut state = self.state.write().await;
            state.selected_job_role = job_role.map(str::to_string);
            state.competency_graph = None;
            state.loading.graph = false;
        }
        self.notify(&[Slice::Selection, Slice::Graph, Slice::Loading]);

        if job_role.is_some() {
            self.maybe_fetch_graph().await;
        }
    }

    /// Fetches the competency graph when both selections are present.
    ///
    /// No-op otherwise; the graph widget shows a waiting placeholder, not
    /// an error. Last-initiated-wins under concurrent triggers.
    async fn maybe_fetch_graph(&self) {
        let selection = {
            let state = self.state.read().await;
            match (&state.selected_student_id, &state.selected_job_role) {
                (Some(student), Some(role)) => Some((student.clone(), role.clone())),
                _ => None,
            }
        };
        let Some((student_id, job_role)) = selection else {
            return;
        };

        let seq = self.graph_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.competency_graph = None;
            state.loading.graph = true;
            state.last_error = None;
        }
        self.notify(&[Slice::Graph, Slice::Loading, Slice::Error]);

        let outcome = self.gateway.job_graph(&job_role, &student_id).await;

        {
            let mut state = self.state.write().await;
            let current = self.graph_seq.load(Ordering::SeqCst) == seq
                && state.selected_student_id.as_deref() == Some(student_id.as_str())
                && state.selected_job_role.as_deref() == Some(job_role.as_str());
            if !current {
                tracing::debug!(
                    "Discarding stale graph result for ({}, {})",
                    student_id,
                    job_role
                );
            } else {
                state.loading.graph = false;
                match outcome {
                    Ok(graph) => state.competency_graph = Some(graph),
                    Err(err) => {
                        tracing::warn!("Graph fetch failed: {}", err);
                        state.last_error = Some(err.user_message());
                    }
                }
            }
        }
        self.notify(&[Slice::Graph, Slice::Loading, Slice::Error]);
    }

    async fn fetch_timeline(&self, alumnus_id: &str) {
        let seq = self.timeline_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.timeline = None;
            state.loading.timeline = true;
        }
        self.notify(&[Slice::Timeline, Slice::Loading]);

        let outcome = self.gateway.alumnus_timeline(alumnus_id).await;

        {
            let mut state = self.state.write().await;
            let current = self.timeline_seq.load(Ordering::SeqCst) == seq
                && state.selected_alumnus_id.as_deref() == Some(alumnus_id);
            if !current {
                tracing::debug!("Discarding stale timeline for alumnus '{}'", alumnus_id);
            } else {
                state.loading.timeline = false;
                match outcome {
                    Ok(timeline) => state.timeline = Some(timeline),
                    Err(err) => {
                        tracing::warn!("Timeline fetch failed for '{}': {}", alumnus_id, err);
                        state.last_error = Some(err.user_message());
                    }
                }
            }
        }
        self.notify(&[Slice::Timeline, Slice::Loading, Slice::Error]);
    }

    // ========================================================================
    // List loaders and reference data
    // ========================================================================

    /// Replaces the student list with a fresh fetch.
    pub async fn fetch_student_list(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading.student_list = true;
            state.last_error = None;
        }
        self.notify(&[Slice::Loading, Slice::Error]);

        let outcome = self.gateway.student_list().await;

        let result = {
            let mut state = self.state.write().await;
            state.loading.student_list = false;
            match outcome {
                Ok(list) => {
                    state.student_list = list;
                    Ok(())
                }
                Err(err) => {
                    state.last_error = Some(err.user_message());
                    Err(err)
                }
            }
        };
        self.notify(&[Slice::StudentList, Slice::Loading, Slice::Error]);
        result
    }

    /// Replaces the alumnus list with a fresh fetch.
    pub async fn fetch_alumni_list(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading.alumni_list = true;
            state.last_error = None;
        }
        self.notify(&[Slice::Loading, Slice::Error]);

        let outcome = self.gateway.alumni_list().await;

        let result = {
            let mut state = self.state.write().await;
            state.loading.alumni_list = false;
            match outcome {
                Ok(list) => {
                    state.alumni_list = list;
                    Ok(())
                }
                Err(err) => {
                    state.last_error = Some(err.user_message());
                    Err(err)
                }
            }
        };
        self.notify(&[Slice::AlumniList, Slice::Loading, Slice::Error]);
        result
    }

    /// Loads the available job roles.
    pub async fn fetch_job_list(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading.job_list = true;
            state.last_error = None;
        }
        self.notify(&[Slice::Loading, Slice::Error]);

        let outcome = self.gateway.job_list().await;

        let result = {
            let mut state = self.state.write().await;
            state.loading.job_list = false;
            match outcome {
                Ok(list) => {
                    state.job_list = list;
                    Ok(())
                }
                Err(err) => {
                    state.last_error = Some(err.user_message());
                    Err(err)
                }
            }
        };
        self.notify(&[Slice::JobList, Slice::Loading, Slice::Error]);
        result
    }

    /// Loads the geographic distribution aggregates.
    pub async fn fetch_distribution(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.loading.map = true;
            state.last_error = None;
        }
        self.notify(&[Slice::Loading, Slice::Error]);

        let outcome = self.gateway.job_distribution().await;

        let result = {
            let mut state = self.state.write().await;
            state.loading.map = false;
            match outcome {
                Ok(distribution) => {
                    state.distribution = Some(distribution);
                    Ok(())
                }
                Err(err) => {
                    state.last_error = Some(err.user_message());
                    Err(err)
                }
            }
        };
        self.notify(&[Slice::Distribution, Slice::Loading, Slice::Error]);
        result
    }

    // ========================================================================
    // Conversational assistant
    // ========================================================================

    /// Sends a user message through the assistant.
    ///
    /// The context preamble (loaded profile, resolvable alumnus) is bound
    /// into the outgoing request only; the transcript shows the raw
    /// message. A gateway failure degrades to a static apology entry and
    /// never escapes this method.
    pub async fn send_chat(&self, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            return;
        }

        let bound = {
            let mut state = self.state.write().await;
            let context =
                chat::compose_context(state.student_profile.as_ref(), state.selected_alumnus());
            state.chat_transcript.push(ChatEntry::user(message));
            state.loading.chat = true;
            chat::bind_message(context.as_deref(), message)
        };
        self.notify(&[Slice::Chat, Slice::Loading]);

        let outcome = self.gateway.chat_ask(&bound).await;

        {
            let mut state = self.state.write().await;
            state.loading.chat = false;
            let reply = match outcome {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::warn!("Chat request failed: {}", err);
                    chat::APOLOGY.to_string()
                }
            };
            state.chat_transcript.push(ChatEntry::assistant(reply));
        }
        self.notify(&[Slice::Chat, Slice::Loading]);
    }

    // ========================================================================
    // Assessment
    // ========================================================================

    /// Submits the finished wizard draft for the logged-in student, then
    /// refreshes the own profile so the dashboard reflects the new scores.
    pub async fn submit_assessment(&self, draft: &AssessmentDraft) -> Result<()> {
        if !draft.is_submittable() {
            return Err(JobscopeError::internal(
                "Assessment draft has no target direction",
            ));
        }
        let student_id = self.require_own_student_id().await?;

        self.gateway
            .submit_assessment(&student_id, &draft.to_submission())
            .await?;

        let session = {
            let mut state = self.state.write().await;
            if let Some(session) = state.session.as_mut() {
                session.assessment_completed = true;
            }
            state.session.clone()
        };
        if let Some(session) = session {
            if let Err(err) = self.vault.save(&session).await {
                tracing::warn!("Failed to refresh session snapshot: {}", err);
            }
        }
        self.notify(&[Slice::Session]);

        self.select_student(Some(&student_id)).await;
        Ok(())
    }

    /// Saves an in-progress draft without marking completion.
    pub async fn save_assessment_draft(&self, draft: &AssessmentDraft) -> Result<()> {
        let student_id = self.require_own_student_id().await?;
        self.gateway
            .save_assessment(&student_id, &draft.to_submission())
            .await
    }

    async fn require_own_student_id(&self) -> Result<String> {
        let state = self.state.read().await;
        state
            .session
            .as_ref()
            .and_then(own_student_id)
            .ok_or_else(|| JobscopeError::internal("No student id bound to this session"))
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Fetches the account detail for the profile view.
    pub async fn account_detail(&self) -> Result<jobscope_core::account::AccountDetail> {
        self.gateway.account_detail().await
    }

    /// Updates mutable account fields and refreshes the persisted snapshot.
    pub async fn update_account(&self, update: &AccountUpdate) -> Result<()> {
        self.gateway.update_account(update).await?;

        let session = self.state.read().await.session.clone();
        if let Some(session) = session {
            if let Err(err) = self.vault.save(&session).await {
                tracing::warn!("Failed to refresh session snapshot: {}", err);
            }
        }
        Ok(())
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        self.gateway.change_password(change).await
    }

    // ========================================================================
    // Admin CRUD
    // ========================================================================
    //
    // Every successful mutation reloads the affected list; full reload is
    // the simplest strategy that keeps all widgets consistent.

    pub async fn create_student(&self, student: &StudentSummary) -> Result<()> {
        self.gateway.create_student(student).await?;
        self.fetch_student_list().await
    }

    pub async fn update_student(&self, student: &StudentSummary) -> Result<()> {
        self.gateway.update_student(student).await?;
        self.fetch_student_list().await
    }

    pub async fn delete_student(&self, student_id: &str) -> Result<()> {
        self.gateway.delete_student(student_id).await?;
        self.fetch_student_list().await
    }

    pub async fn create_alumnus(&self, alumnus: &AlumnusSummary) -> Result<()> {
        self.gateway.create_alumnus(alumnus).await?;
        self.fetch_alumni_list().await
    }

    pub async fn update_alumnus(&self, alumnus: &AlumnusSummary) -> Result<()> {
        self.gateway.update_alumnus(alumnus).await?;
        self.fetch_alumni_list().await
    }

    pub async fn delete_alumnus(&self, alumnus_id: &str) -> Result<()> {
        self.gateway.delete_alumnus(alumnus_id).await?;
        self.fetch_alumni_list().await
    }
}

/// The student record an account operates on: the bound id, or the login
/// principal itself when it is a plain student number.
fn own_student_id(session: &Session) -> Option<String> {
    if let Some(id) = &session.student_id {
        return Some(id.clone());
    }
    let username = session.username.trim();
    if !username.is_empty() && username.chars().all(|c| c.is_ascii_digit()) {
        Some(username.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod own_student_id_tests {
    use super::own_student_id;
    use jobscope_core::session::{Role, Session};

    fn session(username: &str, student_id: Option<&str>) -> Session {
        Session {
            username: username.to_string(),
            role: Role::Student,
            student_id: student_id.map(str::to_string),
            assessment_completed: false,
            auth_token: "t".to_string(),
        }
    }

    #[test]
    fn test_bound_id_wins() {
        assert_eq!(
            own_student_id(&session("alice", Some("20240001"))),
            Some("20240001".to_string())
        );
    }

    #[test]
    fn test_numeric_username_fallback() {
        assert_eq!(
            own_student_id(&session("20240002", None)),
            Some("20240002".to_string())
        );
        assert_eq!(own_student_id(&session("alice", None)), None);
    }
}
