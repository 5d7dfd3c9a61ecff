use serde_json::Value as JsonValue;

use crate::error::ValidationError;

pub const MIN_RATING: i64 = 0;
pub const MAX_RATING: i64 = 5;
pub const DEFAULT_RATING: i64 = 1;

/// Coerce a loosely typed rating into an integer in `MIN_RATING..=MAX_RATING`.
///
/// Numbers and numeric strings are accepted; fractional values are truncated
/// toward zero, never rounded (`"4.25"` and `4.9` both give `4`).
pub fn normalize_rating(value: &JsonValue) -> Result<i64, ValidationError> {
    let number = match value {
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => return check_range(i),
            None => n.as_f64().ok_or(ValidationError::InvalidRating)?,
        },
        JsonValue::String(s) => parse_numeric(s)?,
        _ => return Err(ValidationError::InvalidRating),
    };

    if !number.is_finite() {
        return Err(ValidationError::InvalidRating);
    }

    let truncated = number.trunc();
    if truncated < MIN_RATING as f64 || truncated > MAX_RATING as f64 {
        return Err(ValidationError::RatingOutOfRange);
    }
    Ok(truncated as i64)
}

fn parse_numeric(s: &str) -> Result<f64, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::InvalidRating);
    }
    s.parse::<f64>().map_err(|_| ValidationError::InvalidRating)
}

fn check_range(rating: i64) -> Result<i64, ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ValidationError::RatingOutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers() {
        assert_eq!(normalize_rating(&json!(0)), Ok(0));
        assert_eq!(normalize_rating(&json!(5)), Ok(5));
        assert_eq!(normalize_rating(&json!(10)), Err(ValidationError::RatingOutOfRange));
        assert_eq!(normalize_rating(&json!(-1)), Err(ValidationError::RatingOutOfRange));
        assert_eq!(normalize_rating(&json!(u64::MAX)), Err(ValidationError::RatingOutOfRange));
    }

    #[test]
    fn test_fractions_truncate() {
        assert_eq!(normalize_rating(&json!("4.25")), Ok(4));
        assert_eq!(normalize_rating(&json!("4.99")), Ok(4));
        assert_eq!(normalize_rating(&json!(3.7)), Ok(3));
        assert_eq!(normalize_rating(&json!(" 2 ")), Ok(2));
        assert_eq!(normalize_rating(&json!("5.5")), Ok(5));
        assert_eq!(normalize_rating(&json!("6.1")), Err(ValidationError::RatingOutOfRange));
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(normalize_rating(&json!("invalid")), Err(ValidationError::InvalidRating));
        assert_eq!(normalize_rating(&json!("")), Err(ValidationError::InvalidRating));
        assert_eq!(normalize_rating(&json!("NaN")), Err(ValidationError::InvalidRating));
        assert_eq!(normalize_rating(&json!("inf")), Err(ValidationError::InvalidRating));
        assert_eq!(normalize_rating(&json!(true)), Err(ValidationError::InvalidRating));
        assert_eq!(normalize_rating(&json!([3])), Err(ValidationError::InvalidRating));
    }
}
