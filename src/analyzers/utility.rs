/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of integer ratings, computed in `f64`. Returns 0.0 for empty input.
pub fn mean_of_ints(values: &[i64]) -> f64 {
    let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    mean(&as_f64)
}

/// Element at index `len / 2` of the sorted values, or 0 for empty input.
///
/// For an even count this is the upper of the two middle elements.
pub fn median(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2]
}

/// Rounds half away from zero, then clamps into `[min, max]`.
pub fn round_clamped(value: f64, min: u8, max: u8) -> u8 {
    let rounded = value.round();
    if rounded <= f64::from(min) {
        min
    } else if rounded >= f64::from(max) {
        max
    } else {
        rounded as u8
    }
}

/// Returns the rater named in `row`, or `None` if there is no identity
/// column or the row is too short to have one.
pub fn rater<'a>(row: &'a [String], identity_column: Option<usize>) -> Option<&'a str> {
    identity_column
        .and_then(|col| row.get(col))
        .map(String::as_str)
}

/// Self-ratings are rows whose rater cell equals the student name exactly.
pub fn is_self_rating(row: &[String], identity_column: Option<usize>, student: &str) -> bool {
    rater(row, identity_column) == Some(student)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean_of_ints(&[]), 0.0);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean_of_ints(&[7, 8]), 7.5);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[]), 0);
        assert_eq!(median(&[5, 1, 9]), 5);
        assert_eq!(median(&[4, 1, 3, 2]), 3);
    }

    #[test]
    fn test_round_clamped_half_away_from_zero() {
        assert_eq!(round_clamped(4.5, 0, 9), 5);
        assert_eq!(round_clamped(5.5, 0, 9), 6);
        assert_eq!(round_clamped(6.0, 0, 9), 6);
        assert_eq!(round_clamped(6.49, 0, 9), 6);
    }

    #[test]
    fn test_round_clamped_bounds() {
        assert_eq!(round_clamped(10.8, 0, 9), 9);
        assert_eq!(round_clamped(-0.4, 0, 9), 0);
        assert_eq!(round_clamped(-3.7, 0, 9), 0);
        assert_eq!(round_clamped(f64::NAN, 0, 9), 0);
    }

    #[test]
    fn test_self_rating() {
        let row = vec!["Alice".to_string(), "9".to_string()];
        assert!(is_self_rating(&row, Some(0), "Alice"));
        assert!(!is_self_rating(&row, Some(0), "alice"));
        assert!(!is_self_rating(&row, None, "Alice"));
        assert!(!is_self_rating(&row, Some(5), "Alice"));
    }
}
