//! Response envelopes. Every endpoint answers with one of these shapes.

use serde::{Deserialize, Serialize};

/// `/bfhl` response: `data` is the result on success and `null` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub is_success: bool,
    pub official_email: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(official_email: Option<String>, data: T) -> Self {
        Self {
            is_success: true,
            official_email,
            data: Some(data),
        }
    }

    pub fn failure(official_email: Option<String>) -> Self {
        Self {
            is_success: false,
            official_email,
            data: None,
        }
    }
}

/// `/health` response. Carries no `data` field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthEnvelope {
    pub is_success: bool,
    pub official_email: Option<String>,
}
