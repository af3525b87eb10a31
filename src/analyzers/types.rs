//! Data types shared by the scoring pipeline stages.

use serde::Serialize;
use std::collections::HashMap;

/// Column positions for one student detected in the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub name: String,
    pub rating_column: usize,
    pub justification_column: usize,
}

impl StudentRecord {
    /// The justification column always sits directly after the rating column.
    pub fn new(name: impl Into<String>, rating_column: usize) -> Self {
        Self {
            name: name.into(),
            rating_column,
            justification_column: rating_column + 1,
        }
    }
}

/// Students keyed by name, in order of first appearance in the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRegistry {
    students: Vec<StudentRecord>,
}

impl StudentRegistry {
    /// Registers a student. A name seen before keeps its position but takes
    /// the new column mapping.
    pub fn register(&mut self, record: StudentRecord) {
        match self.students.iter_mut().find(|s| s.name == record.name) {
            Some(existing) => *existing = record,
            None => self.students.push(record),
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&StudentRecord> {
        self.students.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.students.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.students.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

/// What the header parser learned about the survey's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    pub students: StudentRegistry,
    /// Column where each respondent names themselves, if one was found.
    pub identity_column: Option<usize>,
}

/// Raw per-student averages and the flat pool of every accepted rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScores {
    pub averages: HashMap<String, f64>,
    pub pool: Vec<i64>,
}

/// Result of centring the raw averages on the target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalization {
    pub scores: HashMap<String, u8>,
    pub group_mean: f64,
    pub adjustment: f64,
}

/// Ordered peer comments per student. Every registered student has an entry.
pub type CommentSet = HashMap<String, Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_justification_follows_rating() {
        let record = StudentRecord::new("Alice", 3);
        assert_eq!(record.rating_column, 3);
        assert_eq!(record.justification_column, 4);
    }

    #[test]
    fn test_registry_keeps_first_appearance_order() {
        let mut registry = StudentRegistry::default();
        registry.register(StudentRecord::new("Bob", 1));
        registry.register(StudentRecord::new("Alice", 3));

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_registry_duplicate_overwrites_in_place() {
        let mut registry = StudentRegistry::default();
        registry.register(StudentRecord::new("Bob", 1));
        registry.register(StudentRecord::new("Alice", 3));
        registry.register(StudentRecord::new("Bob", 7));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().next(), Some("Bob"));
        assert_eq!(registry.get("Bob").unwrap().rating_column, 7);
        assert_eq!(registry.get("Bob").unwrap().justification_column, 8);
    }
}
