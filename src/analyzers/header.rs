//! Infers students and the respondent identity column from header text.

use crate::analyzers::types::{HeaderLayout, StudentRecord, StudentRegistry};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Matches "rate [the] overall contribution from NAME", capturing NAME.
static CONTRIBUTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)rate (?:the )?overall contribution from (.+)")
        .expect("contribution pattern is valid")
});

/// Lowercase phrases that mark the column where respondents name themselves.
const IDENTITY_PHRASES: &[&str] = &["select your name", "your name"];

/// Example header shown to users when no student columns are found.
pub const EXPECTED_HEADER: &str = "Please rate the overall contribution from [Name]";

/// Extracts the student name from a header cell, if the cell is a rating column.
pub fn student_name(header: &str) -> Option<&str> {
    let captures = CONTRIBUTION_PATTERN.captures(header)?;
    let name = captures.get(1)?.as_str().trim();
    if name.is_empty() { None } else { Some(name) }
}

/// Returns true if the header cell asks respondents for their own name.
pub fn is_identity_header(header: &str) -> bool {
    let lower = header.to_lowercase();
    IDENTITY_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Scans the header row for student rating columns and the identity column.
///
/// Students are registered in order of first appearance. When two cells name
/// the same student, the later cell's columns win.
pub fn parse_headers<S: AsRef<str>>(headers: &[S]) -> HeaderLayout {
    let mut students = StudentRegistry::default();

    for (i, header) in headers.iter().enumerate() {
        if let Some(name) = student_name(header.as_ref()) {
            debug!(name, column = i, "Student column detected");
            students.register(StudentRecord::new(name, i));
        }
    }

    let identity_column = headers
        .iter()
        .position(|header| is_identity_header(header.as_ref()));

    HeaderLayout {
        students,
        identity_column,
    }
}
