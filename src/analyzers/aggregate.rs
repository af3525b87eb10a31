use crate::analyzers::types::{HeaderLayout, RawScores};
use crate::analyzers::utility::{is_self_rating, mean_of_ints};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Parses a rating cell as a base-10 integer, tolerating surrounding whitespace.
pub fn parse_rating(cell: &str) -> Option<i64> {
    cell.trim().parse().ok()
}

/// Computes each student's raw average rating, excluding self-ratings.
///
/// Every accepted rating is also appended to the shared pool used for the
/// group mean. Missing or non-numeric cells are skipped. A student with no
/// accepted ratings averages exactly 0.
pub fn aggregate_scores(rows: &[Vec<String>], layout: &HeaderLayout) -> RawScores {
    let mut averages = HashMap::new();
    let mut pool = Vec::new();

    for student in layout.students.iter() {
        let mut scores = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            if is_self_rating(row, layout.identity_column, &student.name) {
                continue;
            }

            match row.get(student.rating_column).and_then(|cell| parse_rating(cell)) {
                Some(score) => {
                    scores.push(score);
                    pool.push(score);
                }
                None => {
                    trace!(student = %student.name, row = row_index, "Rating cell skipped");
                }
            }
        }

        let average = mean_of_ints(&scores);
        debug!(student = %student.name, ratings = scores.len(), average, "Raw average computed");
        averages.insert(student.name.clone(), average);
    }

    RawScores { averages, pool }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::header::parse_headers;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn layout() -> HeaderLayout {
        parse_headers(&[
            "Select your name",
            "Timestamp",
            "Team",
            "Please rate the overall contribution from Alice",
            "Justification",
            "Please rate the overall contribution from Bob",
            "Justification",
        ])
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("8"), Some(8));
        assert_eq!(parse_rating(" 7 "), Some(7));
        assert_eq!(parse_rating("+3"), Some(3));
        assert_eq!(parse_rating("7.5"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("n/a"), None);
    }

    #[test]
    fn test_self_rating_excluded() {
        let rows = vec![
            row(&["Bob", "...", "...", "8", "great work", "6", "ok"]),
            row(&["Alice", "...", "...", "9", "n/a", "4", "meh"]),
        ];
        let raw = aggregate_scores(&rows, &layout());

        assert_eq!(raw.averages["Alice"], 8.0);
        assert_eq!(raw.averages["Bob"], 4.0);
        assert_eq!(raw.pool, vec![8, 4]);
    }

    #[test]
    fn test_malformed_and_short_rows_skipped() {
        let rows = vec![
            row(&["Carol", "...", "...", "seven", "x", "5"]),
            row(&["Dave", "...", "..."]),
            row(&["Erin", "...", "...", "6"]),
        ];
        let raw = aggregate_scores(&rows, &layout());

        assert_eq!(raw.averages["Alice"], 6.0);
        assert_eq!(raw.averages["Bob"], 5.0);
        assert_eq!(raw.pool.len(), 2);
    }

    #[test]
    fn test_student_without_ratings_averages_zero() {
        let rows = vec![row(&["Carol", "...", "...", "7"])];
        let raw = aggregate_scores(&rows, &layout());

        assert_eq!(raw.averages["Alice"], 7.0);
        assert_eq!(raw.averages.get("Bob"), Some(&0.0));
    }

    #[test]
    fn test_no_identity_column_counts_every_row() {
        let layout = parse_headers(&[
            "Please rate the overall contribution from Alice",
            "Justification",
        ]);
        let rows = vec![row(&["4", "a"]), row(&["6", "b"])];
        let raw = aggregate_scores(&rows, &layout);

        assert_eq!(raw.averages["Alice"], 5.0);
        assert_eq!(raw.pool, vec![4, 6]);
    }

    #[test]
    fn test_pool_spans_students_in_registry_order() {
        let rows = vec![
            row(&["Carol", "...", "...", "2", "", "9"]),
            row(&["Dave", "...", "...", "4", "", "7"]),
        ];
        let raw = aggregate_scores(&rows, &layout());
        assert_eq!(raw.pool, vec![2, 4, 9, 7]);
    }
}
