//! Skip/limit pagination for list operations.

use serde::{Deserialize, Serialize};

use super::error::{DomainResult, Error};

/// Largest page a single call may request.
pub const PAGE_LIMIT_MAX: u32 = 100;
/// Page size used when the caller does not specify one.
pub const PAGE_LIMIT_DEFAULT: u32 = 25;

/// Caller-supplied page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Rows to skip before the first returned item.
    pub skip: u32,
    /// Maximum rows to return; `1..=PAGE_LIMIT_MAX`.
    pub limit: u32,
}

impl PageRequest {
    /// Build a window after checking the limit bounds.
    pub fn new(skip: u32, limit: u32) -> DomainResult<Self> {
        if limit == 0 || limit > PAGE_LIMIT_MAX {
            return Err(Error::validation(
                "limit",
                format!("must be between 1 and {PAGE_LIMIT_MAX}"),
            ));
        }
        Ok(Self { skip, limit })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: PAGE_LIMIT_DEFAULT,
        }
    }
}

/// One page of results plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items within the requested window.
    pub items: Vec<T>,
    /// Total matching rows, ignoring the window.
    pub total: u64,
}
