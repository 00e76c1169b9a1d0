use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user at the input boundary or while loading config.
///
/// Out-of-range selections and failed sound cues are not errors: the first is
/// ignored outright and the second is only traced.
#[derive(Debug, Error)]
pub enum PetError {
    /// A required text field was submitted empty
    #[error("Please enter a {field}!")]
    UserInputMissing { field: &'static str },

    #[error("could not read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Presence check applied to names typed into the create and rename popups.
pub fn require_name(input: &str) -> Result<&str, PetError> {
    if input.is_empty() {
        Err(PetError::UserInputMissing { field: "name" })
    } else {
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_is_missing_input() {
        let err = require_name("").unwrap_err();
        assert!(matches!(err, PetError::UserInputMissing { field: "name" }));
        assert_eq!(err.to_string(), "Please enter a name!");
    }

    #[test]
    fn test_whitespace_name_is_present() {
        // Presence is the only validation applied
        assert_eq!(require_name(" ").unwrap(), " ");
        assert_eq!(require_name("Max").unwrap(), "Max");
    }
}
