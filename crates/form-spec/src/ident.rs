use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").expect("identifier pattern"));

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern"));

static TIME_WITH_SECONDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9])?$").expect("time pattern")
});

static LOCALE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("locale pattern"));

/// Identifiers are non-empty and use lowercase letters, digits, `-` and `_`.
pub fn is_valid_identifier(candidate: &str) -> bool {
    IDENTIFIER_RE.is_match(candidate)
}

/// `HH:MM`, 24-hour clock.
pub fn is_valid_time(candidate: &str) -> bool {
    TIME_RE.is_match(candidate)
}

/// `HH:MM` or `HH:MM:SS`, 24-hour clock.
pub fn is_valid_time_with_seconds(candidate: &str) -> bool {
    TIME_WITH_SECONDS_RE.is_match(candidate)
}

pub fn is_valid_locale(candidate: &str) -> bool {
    LOCALE_RE.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_accepts_lowercase_digits_and_separators() {
        assert!(is_valid_identifier("abc-123_x"));
        assert!(is_valid_identifier("q1"));
        assert!(is_valid_identifier("-"));
    }

    #[test]
    fn identifier_rejects_uppercase_spaces_and_punctuation() {
        assert!(!is_valid_identifier("Abc 1"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("abc!"));
        assert!(!is_valid_identifier("abc\n"));
    }

    #[test]
    fn time_requires_two_digit_hours_and_minutes() {
        assert!(is_valid_time("00:00"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("25:00"));
        assert!(!is_valid_time("9:00"));
        assert!(!is_valid_time("09:60"));
        assert!(!is_valid_time("09:00:00"));
    }

    #[test]
    fn time_with_seconds_allows_optional_seconds() {
        assert!(is_valid_time_with_seconds("09:30"));
        assert!(is_valid_time_with_seconds("09:30:15"));
        assert!(!is_valid_time_with_seconds("09:30:60"));
    }

    #[test]
    fn locale_accepts_language_and_region() {
        assert!(is_valid_locale("en"));
        assert!(is_valid_locale("pt-BR"));
        assert!(!is_valid_locale("EN"));
        assert!(!is_valid_locale("en_us"));
    }
}
