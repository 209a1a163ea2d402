use serde::{Deserialize, Serialize};

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Translation lookup response
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub key: String,
    pub language: String,
    pub text: String,
    /// Whether the key resolved to a catalog entry
    pub found: bool,
}
