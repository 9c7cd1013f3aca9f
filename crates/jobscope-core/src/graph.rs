//! Competency graph payload.

use serde::{Deserialize, Serialize};

/// Node category used for legend grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphCategory {
    pub name: String,
}

/// One node of the job competency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub name: String,
    /// Index into the category list
    pub category: usize,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub symbol_size: Option<f64>,
}

/// One edge of the job competency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// The derived competency graph for a (student, job role) pair.
///
/// `recommend_path` is the backend's growth-path suggestion; it is optional
/// and its absence is not an error (the gap panel shows a placeholder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyGraph {
    pub job_title: String,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub categories: Vec<GraphCategory>,
    #[serde(default)]
    pub recommend_path: Option<String>,
}
