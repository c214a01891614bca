//! Identity records held by the external identity provider.
//!
//! The provider is the root of trust for "who is calling". This module
//! only models the record shape; creation and deletion go through the
//! [`crate::domain::ports::IdentityStore`] port.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors for identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// Identity id is empty.
    EmptyId,
    /// Identity id carries surrounding whitespace.
    PaddedId,
    /// Email is empty.
    EmptyEmail,
    /// Email does not look like an address.
    InvalidEmail,
    /// Email exceeds the storable length.
    EmailTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "identity id must not be empty"),
            Self::PaddedId => write!(f, "identity id must not carry surrounding whitespace"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Opaque identifier assigned by the identity provider.
///
/// The id format is owned by the provider; this type only guarantees the
/// value is non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityId(String);

impl IdentityId {
    /// Validate and wrap a provider-assigned id.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(IdentityValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(IdentityValidationError::PaddedId);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for IdentityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<IdentityId> for String {
    fn from(value: IdentityId) -> Self {
        value.0
    }
}

impl TryFrom<String> for IdentityId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum accepted email length.
pub const EMAIL_MAX_LEN: usize = 200;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        #[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

/// Canonicalised email address.
///
/// Stored lowercased so that lookups against the identity provider are
/// case-insensitive, matching the provider's own matching rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate, lowercase, and wrap an address.
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdentityValidationError> {
        let raw = value.as_ref().trim();
        if raw.is_empty() {
            return Err(IdentityValidationError::EmptyEmail);
        }
        if raw.len() > EMAIL_MAX_LEN {
            return Err(IdentityValidationError::EmailTooLong { max: EMAIL_MAX_LEN });
        }
        if !email_regex().is_match(raw) {
            return Err(IdentityValidationError::InvalidEmail);
        }
        Ok(Self(raw.to_lowercase()))
    }

    /// Borrow the canonical address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identity record as held by the external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Provider-assigned opaque id.
    pub id: IdentityId,
    /// Canonical email address.
    pub email: Email,
}
