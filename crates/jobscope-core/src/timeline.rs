//! Alumnus growth timeline payload and its chart preparation.
//!
//! The gateway returns dates as `YYYY-MM-DD` strings and does not promise
//! ordering or validity. Preparation happens once here; widgets consume the
//! prepared form and never re-parse.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Development pillar a milestone is attributed to.
///
/// Unknown wire values fall back to `Other` instead of failing the whole
/// timeline payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Pillar {
    Academic,
    Character,
    Practical,
    Other,
}

impl From<String> for Pillar {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "academic" => Pillar::Academic,
            "character" => Pillar::Character,
            "practical" => Pillar::Practical,
            _ => Pillar::Other,
        }
    }
}

/// One GPA sample on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpaSample {
    pub date: String,
    #[serde(default)]
    pub gpa: Option<f64>,
}

/// An employment or study tenure on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenureSpan {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// A milestone event on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub date: String,
    pub title: String,
    #[serde(default = "Pillar::other")]
    pub pillar: Pillar,
}

impl Pillar {
    fn other() -> Self {
        Pillar::Other
    }
}

/// Timeline payload as returned by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthTimeline {
    #[serde(default)]
    pub gpa_series: Vec<GpaSample>,
    #[serde(default)]
    pub duration_tenures: Vec<TenureSpan>,
    #[serde(default)]
    pub major_milestones: Vec<Milestone>,
}

/// A parsed, validated GPA point.
#[derive(Debug, Clone, PartialEq)]
pub struct GpaPoint {
    pub date: NaiveDate,
    pub gpa: f64,
}

/// A parsed, validated tenure.
#[derive(Debug, Clone, PartialEq)]
pub struct Tenure {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: Option<String>,
}

/// A parsed, validated milestone.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneEvent {
    pub date: NaiveDate,
    pub title: String,
    pub pillar: Pillar,
}

/// Chart-ready timeline: parsed dates, invalid entries dropped, GPA series
/// sorted ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedTimeline {
    pub gpa_points: Vec<GpaPoint>,
    pub tenures: Vec<Tenure>,
    pub milestones: Vec<MilestoneEvent>,
}

impl PreparedTimeline {
    /// The inclusive date range covered by any series, if non-empty.
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self
            .gpa_points
            .iter()
            .map(|p| p.date)
            .chain(self.tenures.iter().flat_map(|t| [t.start, t.end]))
            .chain(self.milestones.iter().map(|m| m.date));

        let mut min = None;
        let mut max = None;
        for date in dates {
            min = Some(min.map_or(date, |m: NaiveDate| m.min(date)));
            max = Some(max.map_or(date, |m: NaiveDate| m.max(date)));
        }
        Some((min?, max?))
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Prepares a raw timeline for rendering.
pub fn prepare(timeline: &GrowthTimeline) -> PreparedTimeline {
    let mut gpa_points: Vec<GpaPoint> = timeline
        .gpa_series
        .iter()
        .filter_map(|sample| {
            Some(GpaPoint {
                date: parse_date(&sample.date)?,
                gpa: sample.gpa?,
            })
        })
        .collect();
    gpa_points.sort_by_key(|p| p.date);

    let tenures = timeline
        .duration_tenures
        .iter()
        .filter_map(|span| {
            Some(Tenure {
                start: parse_date(&span.start_date)?,
                end: parse_date(&span.end_date)?,
                label: span.label.clone(),
            })
        })
        .collect();

    let milestones = timeline
        .major_milestones
        .iter()
        .filter_map(|milestone| {
            Some(MilestoneEvent {
                date: parse_date(&milestone.date)?,
                title: milestone.title.clone(),
                pillar: milestone.pillar,
            })
        })
        .collect();

    PreparedTimeline {
        gpa_points,
        tenures,
        milestones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(date: &str, gpa: Option<f64>) -> GpaSample {
        GpaSample {
            date: date.to_string(),
            gpa,
        }
    }

    #[test]
    fn test_prepare_drops_unparseable_and_sorts() {
        let timeline = GrowthTimeline {
            gpa_series: vec![
                sample("2023-09-01", Some(3.4)),
                sample("not-a-date", Some(3.9)),
                sample("2022-09-01", Some(3.1)),
                sample("2023-02-01", None),
            ],
            ..Default::default()
        };
        let prepared = prepare(&timeline);
        assert_eq!(prepared.gpa_points.len(), 2);
        assert!(prepared.gpa_points[0].date < prepared.gpa_points[1].date);
    }

    #[test]
    fn test_unknown_pillar_falls_back_to_other() {
        let milestone: Milestone =
            serde_json::from_str(r#"{ "date": "2023-05-01", "title": "Award", "pillar": "sports" }"#)
                .unwrap();
        assert_eq!(milestone.pillar, Pillar::Other);
    }

    #[test]
    fn test_date_extent_spans_all_series() {
        let timeline = GrowthTimeline {
            gpa_series: vec![sample("2022-09-01", Some(3.0))],
            duration_tenures: vec![TenureSpan {
                start_date: "2023-01-01".to_string(),
                end_date: "2024-06-30".to_string(),
                label: None,
            }],
            major_milestones: vec![],
        };
        let prepared = prepare(&timeline);
        let (min, max) = prepared.date_extent().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2022, 9, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_empty_timeline_has_no_extent() {
        assert!(prepare(&GrowthTimeline::default()).date_extent().is_none());
    }
}
