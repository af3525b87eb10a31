use serde::Serialize;

use crate::analyzers::analyzer::Assessment;
use crate::analyzers::utility::{mean, median};

/// Group-level numbers shown in the report summary and after the table.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub total_students: usize,
    pub total_ratings: usize,

    // before normalization
    pub group_mean: f64,
    pub adjustment: f64,
    pub target: u8,

    // normalized scores
    pub score_mean: f64,
    pub score_median: u8,
}

impl GroupStats {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let scores: Vec<u8> = assessment.normalization.scores.values().copied().collect();
        let as_f64: Vec<f64> = scores.iter().map(|&s| f64::from(s)).collect();

        GroupStats {
            total_students: assessment.layout.students.len(),
            total_ratings: assessment.raw.pool.len(),
            group_mean: assessment.normalization.group_mean,
            adjustment: assessment.normalization.adjustment,
            target: assessment.target,
            score_mean: mean(&as_f64),
            score_median: median(&scores),
        }
    }
}
