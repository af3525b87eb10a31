//! Report rendering for analyzed surveys.
//!
//! Supports the plain-text feedback report and a JSON rendering of the same data.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::analyzers::analyzer::Assessment;
use crate::analyzers::types::StudentRecord;
use crate::stats::GroupStats;

pub const DEFAULT_TITLE: &str = "PEER ASSESSMENT REPORT";

pub const SELF_EXCLUSION_WARNING: &str =
    "Warning: Could not find respondent name column. Self-assessments won't be excluded.";

const WIDTH: usize = 70;

/// Order in which students appear in the table and feedback blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudentOrder {
    /// Order of first appearance in the header row.
    #[default]
    Appearance,
    /// Descending normalized score; ties keep header order.
    Rank,
}

/// How a student's peer comments are laid out in the feedback block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentStyle {
    /// One bulleted line per comment.
    #[default]
    Lines,
    /// All comments on one line, separated by ` | `.
    Joined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub title: String,
    pub order: StudentOrder,
    pub comment_style: CommentStyle,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            order: StudentOrder::default(),
            comment_style: CommentStyle::default(),
        }
    }
}

/// Writes the lines printed ahead of the text report: the self-exclusion
/// warning when there is no identity column, then the detected students.
pub fn write_preamble<W: Write>(out: &mut W, assessment: &Assessment) -> Result<()> {
    if !assessment.self_exclusion_enabled() {
        writeln!(out, "{SELF_EXCLUSION_WARNING}")?;
    }

    let names: Vec<_> = assessment.layout.students.names().collect();
    writeln!(out, "Detected {} students: {}", names.len(), names.join(", "))?;
    writeln!(out)?;
    Ok(())
}

/// Students that received a normalized score, in the requested order.
pub fn ordered_students(assessment: &Assessment, order: StudentOrder) -> Vec<&StudentRecord> {
    let mut students: Vec<&StudentRecord> = assessment
        .layout
        .students
        .iter()
        .filter(|s| assessment.score(&s.name).is_some())
        .collect();

    if order == StudentOrder::Rank {
        students.sort_by_key(|s| std::cmp::Reverse(assessment.score(&s.name)));
    }

    students
}

/// Writes the full text report.
pub fn write_report<W: Write>(
    out: &mut W,
    assessment: &Assessment,
    options: &ReportOptions,
) -> Result<()> {
    let stats = GroupStats::from_assessment(assessment);
    let students = ordered_students(assessment, options.order);
    let heavy = "=".repeat(WIDTH);
    let light = "-".repeat(WIDTH);

    writeln!(out, "{heavy}")?;
    writeln!(out, "{}", options.title)?;
    writeln!(out, "{heavy}")?;
    writeln!(out)?;

    writeln!(out, "Total students: {}", stats.total_students)?;
    writeln!(out, "Group mean (raw): {:.2}", stats.group_mean)?;
    writeln!(out, "Normalization adjustment: {:+.2}", stats.adjustment)?;
    writeln!(out, "Target median: {}", stats.target)?;
    writeln!(out)?;

    let index_label = match options.order {
        StudentOrder::Appearance => "#",
        StudentOrder::Rank => "Rank",
    };

    writeln!(out, "{light}")?;
    writeln!(out, "SUMMARY TABLE")?;
    writeln!(out, "{light}")?;
    writeln!(out, "{:<6}{:<30}{:>12}{:>12}", index_label, "Student", "Raw Avg", "Score")?;
    writeln!(out, "{light}")?;

    for (num, student) in students.iter().enumerate() {
        writeln!(
            out,
            "{:<6}{:<30}{:>12.2}{:>12}",
            num + 1,
            student.name,
            assessment.raw_average(&student.name),
            assessment.score(&student.name).unwrap_or_default()
        )?;
    }

    writeln!(out, "{light}")?;
    writeln!(out, "{:36}{:>12}{:>12.2}", "", "Group Mean:", stats.score_mean)?;
    writeln!(out, "{:36}{:>12}{:>12}", "", "Median:", stats.score_median)?;
    writeln!(out)?;

    writeln!(out, "{heavy}")?;
    writeln!(out, "INDIVIDUAL FEEDBACK")?;
    writeln!(out, "{heavy}")?;

    for student in &students {
        let comments = assessment.comments_for(&student.name);

        writeln!(out)?;
        writeln!(out, ">>> {}", student.name)?;
        writeln!(
            out,
            "    Score: {}",
            assessment.score(&student.name).unwrap_or_default()
        )?;
        writeln!(out)?;

        if comments.is_empty() {
            writeln!(out, "    Peer Comments: (No comments provided)")?;
        } else {
            writeln!(out, "    Peer Comments:")?;
            match options.comment_style {
                CommentStyle::Lines => {
                    for comment in comments {
                        writeln!(out, "    - {comment}")?;
                    }
                }
                CommentStyle::Joined => writeln!(out, "    {}", comments.join(" | "))?,
            }
        }

        writeln!(out)?;
        writeln!(out, "{light}")?;
    }

    debug!(students = students.len(), "Text report rendered");
    Ok(())
}

/// Renders the text report into a string.
pub fn render_report(assessment: &Assessment, options: &ReportOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_report(&mut buf, assessment, options)?;
    Ok(String::from_utf8(buf)?)
}

/// One student's entry in the JSON report.
#[derive(Debug, Serialize)]
pub struct StudentReport<'a> {
    pub rank: usize,
    pub name: &'a str,
    pub rating_column: usize,
    pub justification_column: usize,
    pub raw_average: f64,
    pub score: u8,
    pub comments: &'a [String],
}

/// Top-level JSON report document.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub title: &'a str,
    pub self_exclusion: bool,
    pub stats: GroupStats,
    pub students: Vec<StudentReport<'a>>,
}

/// Renders the assessment as pretty-printed JSON, students in the requested order.
pub fn render_json(assessment: &Assessment, options: &ReportOptions) -> Result<String> {
    let students = ordered_students(assessment, options.order)
        .into_iter()
        .enumerate()
        .map(|(i, s)| StudentReport {
            rank: i + 1,
            name: &s.name,
            rating_column: s.rating_column,
            justification_column: s.justification_column,
            raw_average: assessment.raw_average(&s.name),
            score: assessment.score(&s.name).unwrap_or_default(),
            comments: assessment.comments_for(&s.name),
        })
        .collect();

    let report = JsonReport {
        generated_at: Utc::now(),
        title: &options.title,
        self_exclusion: assessment.self_exclusion_enabled(),
        stats: GroupStats::from_assessment(assessment),
        students,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
