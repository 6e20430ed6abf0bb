//! Login Value Object
//!
//! The login is the user's unique public handle, used to sign in and shown
//! as the author of ads.
//!
//! ## Invariants
//! - Length: 3 to 50 characters
//! - First character: ASCII letter
//! - All characters: ASCII letters, digits or `_`
//!
//! Logins are stored as given; no case folding or normalization is applied.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Minimum login length (in characters)
pub const LOGIN_MIN_LENGTH: usize = 3;

/// Maximum login length (in characters)
pub const LOGIN_MAX_LENGTH: usize = 50;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when login validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Login is shorter than LOGIN_MIN_LENGTH or longer than LOGIN_MAX_LENGTH
    #[error("login must be {min}-{max} characters long (got {length})")]
    Length {
        length: usize,
        min: usize,
        max: usize,
    },

    /// Login does not start with an ASCII letter
    #[error("login must start with a letter")]
    InvalidStart { char: char },

    /// Login contains a character outside `[A-Za-z0-9_]`
    #[error(
        "login may contain only letters, numbers and underscores (found '{char}' at position {position})"
    )]
    InvalidCharacter { char: char, position: usize },
}

// ============================================================================
// Login Value Object
// ============================================================================

/// Validated login
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    /// Validate and wrap a login
    pub fn new(input: impl AsRef<str>) -> Result<Self, LoginError> {
        let input = input.as_ref();
        Self::validate(input)?;
        Ok(Self(input.to_string()))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(input: &str) -> Result<(), LoginError> {
        let length = input.chars().count();
        if !(LOGIN_MIN_LENGTH..=LOGIN_MAX_LENGTH).contains(&length) {
            return Err(LoginError::Length {
                length,
                min: LOGIN_MIN_LENGTH,
                max: LOGIN_MAX_LENGTH,
            });
        }

        if let Some(first) = input.chars().next().filter(|c| !c.is_ascii_alphabetic()) {
            return Err(LoginError::InvalidStart { char: first });
        }

        if let Some((position, char)) = input
            .chars()
            .enumerate()
            .find(|(_, c)| !Self::is_valid_char(*c))
        {
            return Err(LoginError::InvalidCharacter { char, position });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
}

impl TryFrom<String> for Login {
    type Error = LoginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<Login> for String {
    fn from(login: Login) -> Self {
        login.0
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Login({})", self.0)
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
