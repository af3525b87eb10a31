//! CSV reader for peer-assessment survey exports.

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

/// A survey export held fully in memory: the header row and every data row.
///
/// Rows keep their original cell text and may be shorter (or longer) than
/// the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Decodes a comma-separated survey export from raw bytes.
///
/// The first record is taken as the header row.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 CSV or contain no
/// records at all.
pub fn parse_survey(bytes: &[u8]) -> Result<Survey> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => bail!("survey has no header row"),
    };

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Survey { headers, rows })
}

/// Reads and decodes the survey export at `path`.
///
/// # Errors
///
/// Returns an error naming the file if it cannot be read or parsed.
pub fn read_survey(path: &Path) -> Result<Survey> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("could not read file '{}'", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Survey file loaded");

    parse_survey(&bytes).with_context(|| format!("could not parse file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_parse_empty_bytes_fails() {
        let result = parse_survey(b"");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_header_only() {
        let survey = parse_survey(b"Select your name,Score\n").unwrap();
        assert_eq!(survey.headers, vec!["Select your name", "Score"]);
        assert!(survey.rows.is_empty());
    }

    #[test]
    fn test_parse_ragged_rows() {
        let bytes = b"a,b,c,d\nBob,1\nAlice,2,3,4,5\n";
        let survey = parse_survey(bytes).unwrap();

        assert_eq!(survey.rows.len(), 2);
        assert_eq!(survey.rows[0], vec!["Bob", "1"]);
        assert_eq!(survey.rows[1].len(), 5);
    }

    #[test]
    fn test_parse_quoted_cells_keep_commas() {
        let bytes = b"name,comment\nBob,\"solid, reliable\"\n";
        let survey = parse_survey(bytes).unwrap();
        assert_eq!(survey.rows[0][1], "solid, reliable");
    }

    #[test]
    fn test_parse_invalid_utf8_fails() {
        let bytes = vec![b'a', b',', 0xFF, 0xFE, b'\n'];
        assert!(parse_survey(&bytes).is_err());
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let path = env::temp_dir().join("pa_rater_test_does_not_exist.csv");
        let _ = fs::remove_file(&path);

        let err = read_survey(&path).unwrap_err();
        assert!(format!("{err:#}").contains("pa_rater_test_does_not_exist.csv"));
    }

    #[test]
    fn test_read_survey_from_disk() {
        let path = env::temp_dir().join("pa_rater_test_read.csv");
        fs::write(&path, "h1,h2\nx,y\n").unwrap();

        let survey = read_survey(&path).unwrap();
        assert_eq!(survey.headers, vec!["h1", "h2"]);
        assert_eq!(survey.rows, vec![vec!["x".to_string(), "y".to_string()]]);

        fs::remove_file(&path).unwrap();
    }
}
