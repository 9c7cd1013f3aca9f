//! The competency indicator table and the shared radar transformation.
//!
//! Every chart widget consumes the same score-to-series mapping; the table
//! below is the single place a new indicator gets added.

use crate::student::AssessmentScores;
use serde::{Deserialize, Serialize};

/// Upper bound of the assessment score scale.
pub const MAX_SCORE: f64 = 5.0;

/// Backend score field addressed by an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKey {
    Python,
    Java,
    Sql,
    BigdataFrameworks,
    ProblemSolving,
    Teamwork,
    Communication,
    Resilience,
}

/// One axis of the radar model.
#[derive(Debug, Clone, Copy)]
pub struct Indicator {
    pub label: &'static str,
    pub key: ScoreKey,
    pub max: f64,
}

/// The K-S-Q competency model axes, in display order.
pub const INDICATORS: [Indicator; 8] = [
    Indicator {
        label: "Python",
        key: ScoreKey::Python,
        max: MAX_SCORE,
    },
    Indicator {
        label: "Java",
        key: ScoreKey::Java,
        max: MAX_SCORE,
    },
    Indicator {
        label: "SQL",
        key: ScoreKey::Sql,
        max: MAX_SCORE,
    },
    Indicator {
        label: "Big Data Frameworks",
        key: ScoreKey::BigdataFrameworks,
        max: MAX_SCORE,
    },
    Indicator {
        label: "Problem Solving",
        key: ScoreKey::ProblemSolving,
        max: MAX_SCORE,
    },
    Indicator {
        label: "Teamwork",
        key: ScoreKey::Teamwork,
        max: MAX_SCORE,
    },
    Indicator {
        label: "Communication",
        key: ScoreKey::Communication,
        max: MAX_SCORE,
    },
    Indicator {
        label: "Resilience",
        key: ScoreKey::Resilience,
        max: MAX_SCORE,
    },
];

/// Industry-average reference series, aligned with [`INDICATORS`].
pub const INDUSTRY_AVERAGE: [f64; 8] = [3.5, 3.8, 3.5, 3.2, 4.0, 4.2, 3.8, 4.0];

impl AssessmentScores {
    /// Score for a single indicator key.
    pub fn score(&self, key: ScoreKey) -> f64 {
        match key {
            ScoreKey::Python => self.python_score,
            ScoreKey::Java => self.java_score,
            ScoreKey::Sql => self.sql_score,
            ScoreKey::BigdataFrameworks => self.bigdata_frameworks_score,
            ScoreKey::ProblemSolving => self.problem_solving_score,
            ScoreKey::Teamwork => self.teamwork_score,
            ScoreKey::Communication => self.communication_score,
            ScoreKey::Resilience => self.resilience_score,
        }
    }
}

/// One axis descriptor in chart-ready form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub name: String,
    pub max: f64,
}

/// Chart-ready radar series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub axes: Vec<RadarAxis>,
    pub values: Vec<f64>,
}

/// Maps assessment scores into the chart-ready series all radar widgets
/// consume. `None` produces an empty series, which widgets render as a
/// cleared chart.
pub fn radar_series(assessment: Option<&AssessmentScores>) -> RadarSeries {
    let Some(assessment) = assessment else {
        return RadarSeries::default();
    };

    let mut series = RadarSeries {
        axes: Vec::with_capacity(INDICATORS.len()),
        values: Vec::with_capacity(INDICATORS.len()),
    };
    for indicator in INDICATORS {
        series.axes.push(RadarAxis {
            name: indicator.label.to_string(),
            max: indicator.max,
        });
        series.values.push(assessment.score(indicator.key));
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radar_series_covers_every_indicator() {
        let assessment = AssessmentScores {
            python_score: 4.0,
            resilience_score: 2.5,
            ..Default::default()
        };
        let series = radar_series(Some(&assessment));
        assert_eq!(series.axes.len(), INDICATORS.len());
        assert_eq!(series.values.len(), INDICATORS.len());
        assert_eq!(series.values[0], 4.0);
        assert_eq!(*series.values.last().unwrap(), 2.5);
        assert!(series.axes.iter().all(|axis| axis.max == MAX_SCORE));
    }

    #[test]
    fn test_no_assessment_yields_empty_series() {
        let series = radar_series(None);
        assert!(series.axes.is_empty());
        assert!(series.values.is_empty());
    }

    #[test]
    fn test_reference_series_is_aligned() {
        assert_eq!(INDUSTRY_AVERAGE.len(), INDICATORS.len());
    }
}
