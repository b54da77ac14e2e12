//! Request/query types (Deserialize)

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Advisory; the configured provider answers.
    #[serde(default)]
    pub llm_provider: Option<String>,
}

/// Raw pagination input; clamped by the service, never rejected.
///
/// Kept as text so out-of-range numbers saturate instead of failing
/// extraction. Non-numeric values fall back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<String>,
    pub size: Option<String>,
}

impl HistoryQuery {
    pub fn page(&self) -> Option<i64> {
        self.page.as_deref().and_then(saturating_i64)
    }

    pub fn size(&self) -> Option<i64> {
        self.size.as_deref().and_then(saturating_i64)
    }
}

/// Parses a decimal integer, saturating at the `i64` bounds.
fn saturating_i64(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::saturating_i64;

    #[test]
    fn saturates_out_of_range_integers() {
        assert_eq!(saturating_i64("42"), Some(42));
        assert_eq!(saturating_i64(" -3 "), Some(-3));
        assert_eq!(saturating_i64("99999999999999999999"), Some(i64::MAX));
        assert_eq!(saturating_i64("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(saturating_i64("+99999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn non_numeric_is_ignored() {
        assert_eq!(saturating_i64("abc"), None);
        assert_eq!(saturating_i64(""), None);
        assert_eq!(saturating_i64("-"), None);
        assert_eq!(saturating_i64("1.5"), None);
    }
}
