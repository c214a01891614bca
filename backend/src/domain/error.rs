//! Caller-facing error taxonomy.
//!
//! These errors are transport agnostic. Every fallible branch in the
//! service layer resolves to exactly one variant; adapters map them to
//! whatever envelope their protocol needs. Persistence-level failures are
//! translated into this taxonomy by the services, never passed through raw.

use serde::Serialize;
use thiserror::Error;

/// Result alias used across the service layer.
pub type DomainResult<T> = Result<T, Error>;

/// Domain error returned by the driving ports.
///
/// The variants follow a fixed taxonomy:
///
/// - [`Error::Validation`] — malformed input, the caller's fault, never
///   retried.
/// - [`Error::NotFound`] — no such record, *or* a record owned by a
///   different tenant. The two cases are intentionally indistinguishable
///   so that callers cannot probe for other tenants' rows.
/// - [`Error::Duplicate`] — a uniqueness rule was violated, whether caught
///   by a pre-check or surfaced by the backing store mid-insert.
/// - [`Error::Integrity`] — a cross-store invariant is broken (identity
///   without profile or vice versa). Always logged as an operational
///   alert before being returned; never treated as a plain absence.
/// - [`Error::Forbidden`] — the caller is known but the payload references
///   a resource outside their ownership scope.
/// - [`Error::Restricted`] — deletion refused while other rows still
///   reference the target.
/// - [`Error::Fatal`] — an adapter or transport failure. Propagated
///   unchanged; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Error {
    /// Input failed a shape or range check.
    #[error("validation failed for `{field}`: {message}")]
    Validation {
        /// Offending input field.
        field: String,
        /// Human-readable reason.
        message: String,
    },

    /// The requested record does not exist for this caller.
    #[error("{resource} not found")]
    NotFound {
        /// Resource kind, e.g. `"product"` or `"storefront"`.
        resource: String,
    },

    /// A uniqueness rule was violated.
    #[error("duplicate value for `{field}`")]
    Duplicate {
        /// Field carrying the duplicated value.
        field: String,
    },

    /// A cross-store invariant does not hold.
    #[error("integrity violation on {resource}: {detail}")]
    Integrity {
        /// Resource whose invariant is broken.
        resource: String,
        /// Which side of the invariant is missing.
        detail: String,
    },

    /// The payload references a resource the caller does not own.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Why the operation was refused.
        message: String,
    },

    /// Deletion refused while the target is still referenced.
    #[error("{resource} is still referenced and cannot be deleted")]
    Restricted {
        /// Resource kind whose deletion was refused.
        resource: String,
    },

    /// An adapter or backing store failed.
    #[error("backend failure: {message}")]
    Fatal {
        /// Adapter-level failure description.
        message: String,
    },
}

impl Error {
    /// Build an [`Error::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build an [`Error::NotFound`] error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Build an [`Error::Duplicate`] error.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }

    /// Build an [`Error::Integrity`] error.
    pub fn integrity(resource: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Integrity {
            resource: resource.into(),
            detail: detail.into(),
        }
    }

    /// Build an [`Error::Forbidden`] error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Build an [`Error::Restricted`] error.
    pub fn restricted(resource: impl Into<String>) -> Self {
        Self::Restricted {
            resource: resource.into(),
        }
    }

    /// Build an [`Error::Fatal`] error.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }

    /// Whether this error is [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
