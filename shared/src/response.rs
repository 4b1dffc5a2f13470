//! API Response types
//!
//! The backend answers either with the resource itself or with the resource
//! wrapped in a `data` field, depending on the endpoint. Errors always carry
//! a human-readable `message`:
//!
//! ```json
//! { "message": "Quotation not found" }
//! ```

use serde::{Deserialize, Serialize};

/// Error body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

/// Response body that may or may not be wrapped in `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ApiPayload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ApiPayload<T> {
    pub fn into_inner(self) -> T {
        match self {
            ApiPayload::Wrapped { data } => data,
            ApiPayload::Bare(data) => data,
        }
    }
}
