use thiserror::Error;

/// Startup configuration errors. These abort the process.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must start with '{prefix}'")]
    InvalidKeyPrefix { var: &'static str, prefix: &'static str },

    #[error("invalid value for {var}: '{value}' (expected one of {expected})")]
    InvalidChoice { var: &'static str, value: String, expected: &'static str },

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}
