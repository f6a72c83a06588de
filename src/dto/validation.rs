//! Validation helpers for DTOs.

use validator::ValidationError;

/// Maximum length of a leaderboard display name.
pub const MAX_PLAYER_NAME_LEN: usize = 50;

/// Validates that a player name is non-empty once trimmed and at most 50
/// characters long.
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("player_name_empty");
        err.message = Some("Name is required and cannot be empty".into());
        return Err(err);
    }

    if name.chars().count() > MAX_PLAYER_NAME_LEN {
        let mut err = ValidationError::new("player_name_length");
        err.message =
            Some(format!("Name must be {} characters or less", MAX_PLAYER_NAME_LEN).into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_player_name_valid() {
        assert!(validate_player_name("alice").is_ok());
        assert!(validate_player_name("  bob  ").is_ok());
        assert!(validate_player_name(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_player_name_empty() {
        assert!(validate_player_name("").is_err());
        assert!(validate_player_name("   ").is_err());
        assert!(validate_player_name("\t\n").is_err());
    }

    #[test]
    fn test_validate_player_name_too_long() {
        assert!(validate_player_name(&"x".repeat(51)).is_err());
    }
}
