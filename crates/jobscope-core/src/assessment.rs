//! Self-assessment wizard: question banks, draft state, submission payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One self-rating question.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
}

/// Stage one: general computer-science literacy, asked of everyone.
pub const GENERAL_QUESTIONS: [Question; 4] = [
    Question {
        id: "algo_base",
        label: "Data structures and algorithms",
    },
    Question {
        id: "cs_network",
        label: "Networks and operating systems",
    },
    Question {
        id: "english",
        label: "Technical English reading",
    },
    Question {
        id: "communication",
        label: "Team communication",
    },
];

/// Target directions offered in stage two.
pub const TARGET_JOBS: [&str; 3] = ["Java Backend", "Frontend", "Data Analyst"];

const JAVA_BACKEND_QUESTIONS: [Question; 4] = [
    Question {
        id: "java_se",
        label: "Java core (collections, threading, JVM)",
    },
    Question {
        id: "spring_boot",
        label: "Spring Boot / Cloud",
    },
    Question {
        id: "mysql_redis",
        label: "MySQL and Redis schema design",
    },
    Question {
        id: "distributed",
        label: "Distributed systems (MQ, Docker)",
    },
];

const FRONTEND_QUESTIONS: [Question; 4] = [
    Question {
        id: "js_ts",
        label: "JavaScript / TypeScript depth",
    },
    Question {
        id: "react_vue",
        label: "React / Vue frameworks",
    },
    Question {
        id: "css_html",
        label: "HTML5, CSS3, responsive layout",
    },
    Question {
        id: "browser",
        label: "Browser internals and performance",
    },
];

const DATA_ANALYST_QUESTIONS: [Question; 4] = [
    Question {
        id: "python_data",
        label: "Python analysis stack (Pandas, NumPy)",
    },
    Question {
        id: "sql_advanced",
        label: "Advanced SQL and query tuning",
    },
    Question {
        id: "visualization",
        label: "Data visualization",
    },
    Question {
        id: "stats_ml",
        label: "Statistics and machine learning basics",
    },
];

/// Stage three question bank for one target direction.
pub fn specific_questions(job: &str) -> Option<&'static [Question]> {
    match job {
        "Java Backend" => Some(&JAVA_BACKEND_QUESTIONS),
        "Frontend" => Some(&FRONTEND_QUESTIONS),
        "Data Analyst" => Some(&DATA_ANALYST_QUESTIONS),
        _ => None,
    }
}

const SCORE_MAX: u8 = 100;
const SCORE_DEFAULT: u8 = 50;

/// Submission payload sent to the assessment endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub general_scores: HashMap<String, u8>,
    pub target_jobs: Vec<String>,
    pub specific_scores: HashMap<String, u8>,
}

/// In-progress wizard state.
///
/// Deselecting a target job removes the specific scores entered for it, so
/// a submission never carries ratings for directions the student backed
/// out of.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentDraft {
    general_scores: HashMap<String, u8>,
    target_jobs: Vec<String>,
    specific_scores: HashMap<String, u8>,
}

impl AssessmentDraft {
    /// A fresh draft with every general question at the slider midpoint.
    pub fn new() -> Self {
        let general_scores = GENERAL_QUESTIONS
            .iter()
            .map(|q| (q.id.to_string(), SCORE_DEFAULT))
            .collect();
        Self {
            general_scores,
            target_jobs: Vec::new(),
            specific_scores: HashMap::new(),
        }
    }

    pub fn set_general(&mut self, question_id: &str, score: u8) {
        self.general_scores
            .insert(question_id.to_string(), score.min(SCORE_MAX));
    }

    pub fn set_specific(&mut self, question_id: &str, score: u8) {
        self.specific_scores
            .insert(question_id.to_string(), score.min(SCORE_MAX));
    }

    /// Adds or removes a target direction. Unknown directions are ignored.
    pub fn toggle_job(&mut self, job: &str) {
        let Some(questions) = specific_questions(job) else {
            return;
        };
        if let Some(pos) = self.target_jobs.iter().position(|j| j == job) {
            self.target_jobs.remove(pos);
            for question in questions {
                self.specific_scores.remove(question.id);
            }
        } else {
            self.target_jobs.push(job.to_string());
        }
    }

    pub fn target_jobs(&self) -> &[String] {
        &self.target_jobs
    }

    pub fn specific_score(&self, question_id: &str) -> Option<u8> {
        self.specific_scores.get(question_id).copied()
    }

    /// A draft can be submitted once at least one direction is chosen.
    pub fn is_submittable(&self) -> bool {
        !self.target_jobs.is_empty()
    }

    pub fn to_submission(&self) -> AssessmentSubmission {
        AssessmentSubmission {
            general_scores: self.general_scores.clone(),
            target_jobs: self.target_jobs.clone(),
            specific_scores: self.specific_scores.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_seeds_general_midpoints() {
        let draft = AssessmentDraft::new();
        let submission = draft.to_submission();
        assert_eq!(submission.general_scores.len(), GENERAL_QUESTIONS.len());
        assert!(submission.general_scores.values().all(|&v| v == 50));
        assert!(!draft.is_submittable());
    }

    #[test]
    fn test_deselecting_job_clears_its_scores() {
        let mut draft = AssessmentDraft::new();
        draft.toggle_job("Frontend");
        draft.set_specific("js_ts", 80);
        draft.set_specific("browser", 60);
        assert!(draft.is_submittable());

        draft.toggle_job("Frontend");
        assert!(!draft.is_submittable());
        assert!(draft.specific_score("js_ts").is_none());
        assert!(draft.specific_score("browser").is_none());
    }

    #[test]
    fn test_deselect_keeps_other_jobs_scores() {
        let mut draft = AssessmentDraft::new();
        draft.toggle_job("Frontend");
        draft.toggle_job("Data Analyst");
        draft.set_specific("js_ts", 70);
        draft.set_specific("python_data", 90);

        draft.toggle_job("Frontend");
        assert!(draft.specific_score("js_ts").is_none());
        assert_eq!(draft.specific_score("python_data"), Some(90));
        assert_eq!(draft.target_jobs(), ["Data Analyst"]);
    }

    #[test]
    fn test_scores_clamped_to_scale() {
        let mut draft = AssessmentDraft::new();
        draft.set_general("algo_base", 255);
        assert_eq!(draft.to_submission().general_scores["algo_base"], 100);
    }

    #[test]
    fn test_unknown_job_is_ignored() {
        let mut draft = AssessmentDraft::new();
        draft.toggle_job("Astronaut");
        assert!(!draft.is_submittable());
    }
}
