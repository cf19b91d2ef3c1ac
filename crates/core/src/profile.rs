//! Profile defaults and the email uniqueness rule.

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Avatar key stored when the user has not uploaded one.
pub const DEFAULT_AVATAR: &str = "no-img.jpg";

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists";

/// Birth date stored when none is supplied.
pub fn default_birth_date() -> Date {
    Date::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

/// Reject an email that already belongs to a different profile.
///
/// `holder` is the id of the profile currently holding `email` (if any) and
/// `current` is the id of the profile being saved (`None` on create). A
/// profile re-saving its own email passes.
pub fn ensure_email_available(holder: Option<DbId>, current: Option<DbId>) -> Result<(), CoreError> {
    match holder {
        Some(holder) if Some(holder) != current => {
            Err(CoreError::Validation(DUPLICATE_EMAIL_MESSAGE.to_string()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn unused_email_is_available() {
        assert!(ensure_email_available(None, None).is_ok());
        assert!(ensure_email_available(None, Some(3)).is_ok());
    }

    #[test]
    fn own_email_is_available() {
        assert!(ensure_email_available(Some(3), Some(3)).is_ok());
    }

    #[test]
    fn other_profiles_email_is_rejected() {
        assert_matches!(
            ensure_email_available(Some(3), None),
            Err(CoreError::Validation(msg)) if msg == DUPLICATE_EMAIL_MESSAGE
        );
        assert_matches!(
            ensure_email_available(Some(3), Some(4)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn default_birth_date_is_2000_01_01() {
        assert_eq!(default_birth_date().to_string(), "2000-01-01");
    }
}
