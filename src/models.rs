use crate::error::{AppError, AppResult};

pub const LANGUAGES: &[&str] = &["EN", "RU", "UZ", "KR", "TR", "OTHER"];
pub const AGE_RATINGS: &[&str] = &["G", "PG", "PG-13", "R", "NC-17"];

pub const MIN_REVIEW_RATING: i32 = 1;
pub const MAX_REVIEW_RATING: i32 = 10;

pub fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

pub fn random_hex(n_bytes: usize) -> String {
    use rand::RngCore;

    let mut bytes = vec![0u8; n_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Calendar dates travel as ISO-8601 strings and are validated at the
/// boundary before they reach the store.
pub fn validate_date(field: &'static str, value: &str) -> AppResult<()> {
    value
        .parse::<jiff::civil::Date>()
        .map(|_| ())
        .map_err(|_| AppError::validation(field, format!("not an ISO date: {value}")))
}

pub fn validate_language(value: &str) -> AppResult<()> {
    if LANGUAGES.contains(&value) {
        Ok(())
    } else {
        Err(AppError::validation("language", format!("unknown language code: {value}")))
    }
}

pub fn validate_age_rating(value: &str) -> AppResult<()> {
    if AGE_RATINGS.contains(&value) {
        Ok(())
    } else {
        Err(AppError::validation("age_rating", format!("unknown age rating: {value}")))
    }
}

pub fn validate_review_rating(value: i32) -> AppResult<()> {
    if (MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&value) {
        Ok(())
    } else {
        Err(AppError::validation(
            "rating",
            format!("rating must be between {MIN_REVIEW_RATING} and {MAX_REVIEW_RATING}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_dates() {
        assert!(validate_date("release_date", "1999-10-15").is_ok());
        assert!(validate_date("release_date", "15/10/1999").is_err());
        assert!(validate_date("release_date", "1999-13-01").is_err());
    }

    #[test]
    fn review_rating_bounds() {
        assert!(validate_review_rating(1).is_ok());
        assert!(validate_review_rating(10).is_ok());
        assert!(validate_review_rating(0).is_err());
        assert!(validate_review_rating(11).is_err());
    }

    #[test]
    fn language_and_age_rating_codes() {
        assert!(validate_language("EN").is_ok());
        assert!(validate_language("en").is_err());
        assert!(validate_age_rating("PG-13").is_ok());
        assert!(validate_age_rating("PG13").is_err());
    }
}
