use crate::analyzers::aggregate::aggregate_scores;
use crate::analyzers::comments::collect_comments;
use crate::analyzers::header::{EXPECTED_HEADER, parse_headers};
use crate::analyzers::normalize::normalize_scores;
use crate::analyzers::types::{CommentSet, HeaderLayout, Normalization, RawScores};
use crate::parser::Survey;
use anyhow::{Result, bail};
use tracing::info;

/// Everything derived from one survey export, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub layout: HeaderLayout,
    pub raw: RawScores,
    pub normalization: Normalization,
    pub comments: CommentSet,
    pub target: u8,
}

impl Assessment {
    /// Self-ratings can only be excluded when respondents named themselves.
    pub fn self_exclusion_enabled(&self) -> bool {
        self.layout.identity_column.is_some()
    }

    pub fn raw_average(&self, name: &str) -> f64 {
        self.raw.averages.get(name).copied().unwrap_or(0.0)
    }

    pub fn score(&self, name: &str) -> Option<u8> {
        self.normalization.scores.get(name).copied()
    }

    pub fn comments_for(&self, name: &str) -> &[String] {
        self.comments.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Runs header detection, aggregation, normalization and comment collection
/// over a survey.
///
/// # Errors
///
/// Returns an error if no student rating columns are found in the header row.
#[tracing::instrument(skip(survey), fields(rows = survey.rows.len()))]
pub fn analyze(survey: &Survey, target: u8) -> Result<Assessment> {
    let layout = parse_headers(&survey.headers);

    if layout.students.is_empty() {
        bail!(
            "Could not find any students in the CSV file. Expected columns like '{}'",
            EXPECTED_HEADER
        );
    }

    if layout.identity_column.is_none() {
        info!("Respondent name column not found, self-assessments will not be excluded");
    }

    let raw = aggregate_scores(&survey.rows, &layout);
    let normalization = normalize_scores(&raw, target);
    let comments = collect_comments(&survey.rows, &layout);

    info!(
        students = layout.students.len(),
        ratings = raw.pool.len(),
        group_mean = normalization.group_mean,
        "Survey analyzed"
    );

    Ok(Assessment {
        layout,
        raw,
        normalization,
        comments,
        target,
    })
}
