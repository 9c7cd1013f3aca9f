//! Conversational assistant transcript and context binding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alumnus::AlumnusSummary;
use crate::student::StudentProfile;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry in the assistant transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
}

impl ChatEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Greeting seeded into a fresh transcript.
pub const GREETING: &str = "Hello! I am your career-planning assistant. \
Ask me anything about career development, role fit, or skill growth.";

/// Static fallback appended when the chat gateway fails.
pub const APOLOGY: &str =
    "Sorry, the assistant service is unavailable right now. Please try again later.";

/// Composes the context preamble from the currently loaded selections.
///
/// Returns `None` when neither a complete profile nor a resolvable alumnus
/// is available, in which case the raw user message is sent unmodified.
pub fn compose_context(
    profile: Option<&StudentProfile>,
    alumnus: Option<&AlumnusSummary>,
) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(payload) = profile.and_then(StudentProfile::payload) {
        let mut line = format!("Student under discussion: {}", payload.info.name);
        if let Some(major) = &payload.info.major {
            line.push_str(&format!(", major {}", major));
        }
        if let Some(gpa) = payload.assessment.gpa_major {
            line.push_str(&format!(", major GPA {:.2}", gpa));
        }
        line.push_str(&format!(
            ". Key scores: problem solving {:.1}, teamwork {:.1}, communication {:.1}.",
            payload.assessment.problem_solving_score,
            payload.assessment.teamwork_score,
            payload.assessment.communication_score,
        ));
        parts.push(line);
    }

    if let Some(alumnus) = alumnus {
        let mut line = format!("Reference alumnus: {}", alumnus.name);
        if let Some(title) = &alumnus.job_title {
            line.push_str(&format!(", {}", title));
        }
        if let Some(company) = &alumnus.company {
            line.push_str(&format!(" at {}", company));
        }
        line.push('.');
        parts.push(line);
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// Prepends the context preamble, if any, to an outgoing message.
pub fn bind_message(context: Option<&str>, message: &str) -> String {
    match context {
        Some(context) => format!("{}\n\n{}", context, message),
        None => message.to_string(),
    }
}
