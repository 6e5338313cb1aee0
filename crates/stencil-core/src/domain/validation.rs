use crate::domain::{
    error::DomainError,
    naming::{ArtifactKind, RawInput},
};

/// Centralized answer validation.
///
/// Parsing of the closed-choice answers lives here, not in the generators.
pub struct InputValidator;

impl InputValidator {
    /// `y`/`yes` or `n`/`no`, case-insensitive. Blank means no.
    pub fn yes_no(raw: &RawInput) -> Result<bool, DomainError> {
        match raw.as_str().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "" | "n" | "no" => Ok(false),
            _ => Err(DomainError::InvalidChoice {
                field: raw.role().field(),
                input: raw.as_str().to_string(),
                expected: "y or n",
            }),
        }
    }

    /// `1`/`http` or `2`/`db`, case-insensitive.
    pub fn client_kind(raw: &RawInput) -> Result<ArtifactKind, DomainError> {
        match raw.as_str().to_ascii_lowercase().as_str() {
            "1" | "http" => Ok(ArtifactKind::HttpClient),
            "2" | "db" => Ok(ArtifactKind::DbClient),
            "" => Err(DomainError::MissingRequiredField {
                field: raw.role().field(),
            }),
            _ => Err(DomainError::InvalidChoice {
                field: raw.role().field(),
                input: raw.as_str().to_string(),
                expected: "1 (HTTP) or 2 (DB)",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::InputRole;

    fn yn(s: &str) -> Result<bool, DomainError> {
        InputValidator::yes_no(&RawInput::new(InputRole::YesNo, s))
    }

    #[test]
    fn yes_no_defaults_to_no() {
        assert_eq!(yn(""), Ok(false));
        assert_eq!(yn("Y"), Ok(true));
        assert_eq!(yn(" yes "), Ok(true));
        assert_eq!(yn("No"), Ok(false));
        assert!(yn("maybe").is_err());
    }

    #[test]
    fn client_kind_accepts_numbers_and_names() {
        let kind = |s: &str| InputValidator::client_kind(&RawInput::new(InputRole::ClientType, s));

        assert_eq!(kind("1"), Ok(ArtifactKind::HttpClient));
        assert_eq!(kind("HTTP"), Ok(ArtifactKind::HttpClient));
        assert_eq!(kind("2"), Ok(ArtifactKind::DbClient));
        assert_eq!(kind("Db"), Ok(ArtifactKind::DbClient));
        assert!(matches!(kind(""), Err(DomainError::MissingRequiredField { .. })));
        assert!(matches!(kind("grpc"), Err(DomainError::InvalidChoice { .. })));
    }
}
