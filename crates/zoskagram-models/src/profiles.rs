//! Profile models.
//!
//! A profile is the minimal per-user record a signed-in user must create
//! before using the rest of the application. The request gate only cares
//! whether one exists; the profile API reads and writes it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A stored profile, keyed by the owning identity's subject id.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Profile {
    pub owner_id: String,
    pub username: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Body of the profile-completion form.
///
/// The owner is never part of the body: it is always the caller's own
/// session identity.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpsertProfileDto {
    /// 3-30 characters of `a-z`, `0-9`, `.` and `_`
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
}

impl UpsertProfileDto {
    /// Lowercases the username and trims surrounding whitespace everywhere.
    /// An all-blank bio becomes `None`.
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_lowercase(),
            full_name: self.full_name.trim().to_string(),
            bio: self
                .bio
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
        }
    }

    /// Whether the username only uses the allowed characters.
    pub fn has_valid_username_chars(&self) -> bool {
        self.username
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(username: &str, full_name: &str, bio: Option<&str>) -> UpsertProfileDto {
        UpsertProfileDto {
            username: username.to_string(),
            full_name: full_name.to_string(),
            bio: bio.map(str::to_string),
        }
    }

    #[test]
    fn test_normalized() {
        let normalized = dto("  Jana.Novakova ", " Jana Nováková ", Some("   ")).normalized();
        assert_eq!(normalized.username, "jana.novakova");
        assert_eq!(normalized.full_name, "Jana Nováková");
        assert_eq!(normalized.bio, None);
    }

    #[test]
    fn test_length_validation() {
        assert!(dto("jana", "Jana", None).validate().is_ok());
        assert!(dto("ja", "Jana", None).validate().is_err());
        assert!(dto("jana", "", None).validate().is_err());
        assert!(dto("jana", "Jana", Some(&"x".repeat(501))).validate().is_err());
    }

    #[test]
    fn test_username_chars() {
        assert!(dto("jana_n.2024", "Jana", None).has_valid_username_chars());
        assert!(!dto("jana novakova", "Jana", None).has_valid_username_chars());
        assert!(!dto("jana-n", "Jana", None).has_valid_username_chars());
        assert!(!dto("žofia", "Žofia", None).has_valid_username_chars());
    }

    #[test]
    fn test_dto_deserialize_without_bio() {
        let json = r#"{"username":"jana","full_name":"Jana"}"#;
        let parsed: UpsertProfileDto = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.bio, None);
    }
}
