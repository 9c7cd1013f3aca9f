//! The shared dashboard state.
//!
//! One instance of [`DashboardState`] is the single owner of everything the
//! widgets display. Widgets read slices and request changes through the
//! store's named actions; nothing outside the store writes fields.

use jobscope_core::alumnus::AlumnusSummary;
use jobscope_core::chat::{self, ChatEntry};
use jobscope_core::distribution::JobDistribution;
use jobscope_core::graph::CompetencyGraph;
use jobscope_core::session::Session;
use jobscope_core::student::{StudentProfile, StudentSummary};
use jobscope_core::timeline::GrowthTimeline;

/// Identifies which part of the state a change notification refers to, so
/// subscribers re-read only the slices they render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Session,
    Selection,
    StudentList,
    AlumniList,
    JobList,
    Profile,
    Graph,
    Timeline,
    Distribution,
    Chat,
    Loading,
    Error,
}

/// Per-resource loading flags.
///
/// Each flag is toggled only around operations on its own resource; a slow
/// fetch can never show a spinner on an unrelated widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub auth: bool,
    pub student_list: bool,
    pub alumni_list: bool,
    pub student_profile: bool,
    pub graph: bool,
    pub job_list: bool,
    pub timeline: bool,
    pub map: bool,
    pub chat: bool,
}

/// Everything the dashboard renders from.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub session: Option<Session>,

    // Selection state
    pub selected_student_id: Option<String>,
    pub selected_alumnus_id: Option<String>,
    /// Derived from the selected alumnus's job title, or set directly
    pub selected_job_role: Option<String>,

    // Derived resources
    pub student_profile: Option<StudentProfile>,
    pub competency_graph: Option<CompetencyGraph>,
    pub timeline: Option<GrowthTimeline>,

    // Reference data
    pub student_list: Vec<StudentSummary>,
    pub alumni_list: Vec<AlumnusSummary>,
    pub job_list: Vec<String>,
    pub distribution: Option<JobDistribution>,

    pub chat_transcript: Vec<ChatEntry>,

    pub loading: LoadingFlags,
    /// Most recent failure, overwritten (never queued) by the next outcome
    pub last_error: Option<String>,
}

impl DashboardState {
    /// Fresh state with the assistant greeting seeded into the transcript.
    pub fn new() -> Self {
        Self {
            chat_transcript: vec![ChatEntry::assistant(chat::GREETING)],
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The selected alumnus resolved against the loaded list, if possible.
    pub fn selected_alumnus(&self) -> Option<&AlumnusSummary> {
        let id = self.selected_alumnus_id.as_deref()?;
        jobscope_core::alumnus::find_alumnus(&self.alumni_list, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscope_core::chat::ChatRole;

    #[test]
    fn test_new_state_is_unauthenticated_with_greeting() {
        let state = DashboardState::new();
        assert!(!state.is_authenticated());
        assert_eq!(state.chat_transcript.len(), 1);
        assert_eq!(state.chat_transcript[0].role, ChatRole::Assistant);
    }

    #[test]
    fn test_selected_alumnus_requires_listed_id() {
        let mut state = DashboardState::new();
        state.selected_alumnus_id = Some("7".to_string());
        assert!(state.selected_alumnus().is_none());

        state.alumni_list =
            serde_json::from_str(r#"[{ "alumniId": 7, "name": "Zhao Lei" }]"#).unwrap();
        assert_eq!(state.selected_alumnus().unwrap().name, "Zhao Lei");
    }
}
