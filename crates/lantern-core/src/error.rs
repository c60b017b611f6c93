//! Error types for Lantern

use thiserror::Error;

/// The main error type for Lantern operations
#[derive(Debug, Error)]
pub enum LanternError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Unknown easing: {0}")]
    UnknownEasing(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Lantern operations
pub type Result<T> = std::result::Result<T, LanternError>;

impl From<toml::de::Error> for LanternError {
    fn from(err: toml::de::Error) -> Self {
        LanternError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for LanternError {
    fn from(err: toml::ser::Error) -> Self {
        LanternError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = LanternError::ValueOutOfRange {
            field: "particle_interval_ms".into(),
            min: 1.0,
            max: 60000.0,
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: particle_interval_ms must be between 1 and 60000, got 0"
        );
        assert_eq!(
            LanternError::UnknownEasing("wobble".into()).to_string(),
            "Unknown easing: wobble"
        );
    }

    #[test]
    fn toml_errors_convert() {
        let parse = toml::from_str::<toml::Value>("a = ").unwrap_err();
        assert!(matches!(LanternError::from(parse), LanternError::TomlParseError(_)));
    }
}
