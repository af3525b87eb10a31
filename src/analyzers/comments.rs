use crate::analyzers::types::{CommentSet, HeaderLayout};
use crate::analyzers::utility::is_self_rating;

/// Collects non-empty justification text for each student, in row order.
///
/// Self-ratings are excluded with the same rule as the score aggregation.
/// Every registered student gets an entry, possibly empty.
pub fn collect_comments(rows: &[Vec<String>], layout: &HeaderLayout) -> CommentSet {
    let mut comments: CommentSet = layout
        .students
        .names()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    for student in layout.students.iter() {
        let Some(list) = comments.get_mut(&student.name) else {
            continue;
        };

        for row in rows {
            if is_self_rating(row, layout.identity_column, &student.name) {
                continue;
            }

            if let Some(text) = row.get(student.justification_column).map(|c| c.trim())
                && !text.is_empty()
            {
                list.push(text.to_string());
            }
        }
    }

    comments
}
