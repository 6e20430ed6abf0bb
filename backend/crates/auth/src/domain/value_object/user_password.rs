//! User Password Value Object
//!
//! Domain password policy on top of `platform::password`.
//!
//! ## Registration policy
//! - 8 to 72 bytes
//! - At least one uppercase letter, one lowercase letter and one digit
//! - At least one of `!@#$%^&*`
//!
//! Sign-in only requires a non-empty password so that accounts created
//! under an older policy can still authenticate.

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (in bytes)
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum password length (in bytes)
pub const PASSWORD_MAX_LENGTH: usize = 72;

/// Accepted special characters
pub const PASSWORD_SPECIAL_CHARS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

// ============================================================================
// Policy Errors
// ============================================================================

/// Password policy violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("password is required")]
    Empty,

    #[error("password must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },

    #[error("password must be at most {max} characters long")]
    TooLong { max: usize, actual: usize },

    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("password must contain at least one number")]
    MissingDigit,

    #[error("password must contain at least one special character (!@#$%^&*)")]
    MissingSpecial,
}

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword`; memory is zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password, enforcing the registration policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let clear_text = ClearTextPassword::new(raw);
        Self::validate(&clear_text)?;
        Ok(Self(clear_text))
    }

    /// Accept any non-empty password for comparison against a stored hash
    pub fn for_verification(raw: String) -> Result<Self, PasswordPolicyError> {
        let clear_text = ClearTextPassword::new(raw);
        if clear_text.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(clear_text))
    }

    fn validate(password: &ClearTextPassword) -> Result<(), PasswordPolicyError> {
        let actual = password.len();
        if actual < PASSWORD_MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: PASSWORD_MIN_LENGTH,
                actual,
            });
        }
        if actual > PASSWORD_MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: PASSWORD_MAX_LENGTH,
                actual,
            });
        }

        let s = password.as_str();
        if !s.chars().any(char::is_uppercase) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !s.chars().any(char::is_lowercase) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !s.chars().any(char::is_numeric) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !s.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(&c)) {
            return Err(PasswordPolicyError::MissingSpecial);
        }

        Ok(())
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Stores password in Argon2id PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword) -> Result<Self, PasswordHashError> {
        raw.inner().hash().map(Self)
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    pub fn verify(&self, raw: &RawPassword) -> Result<bool, PasswordHashError> {
        self.0.verify(raw.inner())
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================
