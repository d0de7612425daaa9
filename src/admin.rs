//! Serializable boundary type for administrative endpoints.
//!
//! Actions return `Result<T, AccessError>`; transports that need a flat
//! JSON body (admin panels, internal tooling) convert through
//! [`AdminResponse`] so error taxonomy names stay stable on the wire.

use serde::{Deserialize, Serialize};

use crate::AccessError;

/// Flat success/error envelope for administrative operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AdminResponse {
    /// Successful operation, no payload.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Failed operation. The message carries the stable taxonomy kind
    /// followed by the human-readable detail.
    pub fn err(error: &AccessError) -> Self {
        Self {
            success: false,
            error: Some(format!("{}: {}", error.kind(), error)),
        }
    }
}

impl<T> From<Result<T, AccessError>> for AdminResponse {
    fn from(result: Result<T, AccessError>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(err) => Self::err(&err),
        }
    }
}
