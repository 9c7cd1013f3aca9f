//! Student domain models.

use serde::{Deserialize, Serialize};

/// Summary record as returned by the student list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub student_id: String,
    pub name: String,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub enrollment_year: Option<i32>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// Assessment completion status for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStatus {
    pub is_complete: bool,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Personal information section of a full profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub name: String,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

/// Nested assessment scores of a full profile.
///
/// Score fields are on the 0..=5 scale used by the radar model; missing
/// fields default to zero so a partially assessed student still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScores {
    #[serde(default)]
    pub python_score: f64,
    #[serde(default)]
    pub java_score: f64,
    #[serde(default)]
    pub sql_score: f64,
    #[serde(default)]
    pub bigdata_frameworks_score: f64,
    #[serde(default)]
    pub problem_solving_score: f64,
    #[serde(default)]
    pub teamwork_score: f64,
    #[serde(default)]
    pub communication_score: f64,
    #[serde(default)]
    pub resilience_score: f64,
    #[serde(default)]
    pub gpa_major: Option<f64>,
    #[serde(default)]
    pub disc_type: Option<String>,
}

/// Full profile payload as returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub info: StudentInfo,
    pub assessment: AssessmentScores,
}

/// The profile slice held in the store for the selected student.
///
/// A profile has two shapes: `Incomplete` when the remote status check says
/// the assessment has not been done yet (an expected state, not an error),
/// and `Complete` with the full payload otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum StudentProfile {
    Incomplete { status: String },
    Complete(ProfilePayload),
}

impl StudentProfile {
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete { .. })
    }

    /// Returns the full payload if this profile is complete.
    pub fn payload(&self) -> Option<&ProfilePayload> {
        match self {
            Self::Complete(payload) => Some(payload),
            Self::Incomplete { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_payload_wire_shape() {
        let json = r#"{
            "info": { "name": "Li Ming", "major": "Software Engineering" },
            "assessment": { "pythonScore": 4.5, "gpaMajor": 3.6, "discType": "DI" }
        }"#;
        let payload: ProfilePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.info.name, "Li Ming");
        assert_eq!(payload.assessment.python_score, 4.5);
        assert_eq!(payload.assessment.java_score, 0.0);
        assert_eq!(payload.assessment.gpa_major, Some(3.6));
    }

    #[test]
    fn test_incomplete_profile_has_no_payload() {
        let profile = StudentProfile::Incomplete {
            status: "PENDING".to_string(),
        };
        assert!(profile.is_incomplete());
        assert!(profile.payload().is_none());
    }
}
