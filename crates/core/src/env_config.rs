//! Environment variable parsing with warn-level logging for invalid values.

/// Parse a raw configuration value with a default fallback.
///
/// - If the value is absent: returns `default` silently (expected case).
/// - If the value is present but cannot be parsed: logs a warning and returns `default`.
pub fn parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Read an environment variable, treating unset and blank the same way.
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_value() {
        let result: u32 = parse_with_default("API_PORT", Some("42"), 10);
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_invalid_value() {
        let result: u32 = parse_with_default("API_PORT", Some("banana"), 10);
        assert_eq!(result, 10);
    }

    #[test]
    fn test_parse_missing_value() {
        let result: f32 = parse_with_default("TEMPERATURE", None, 0.3);
        assert!((result - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let result: u16 = parse_with_default("API_PORT", Some(" 9000 "), 8000);
        assert_eq!(result, 9000);
    }

    #[test]
    fn test_env_non_empty_blank_is_none() {
        let var_name = "TEST_QG_ENV_NON_EMPTY_51874";
        unsafe { std::env::set_var(var_name, "   ") };
        assert_eq!(env_non_empty(var_name), None);
        unsafe { std::env::set_var(var_name, " value ") };
        assert_eq!(env_non_empty(var_name).as_deref(), Some("value"));
        unsafe { std::env::remove_var(var_name) };
    }
}
