use thiserror::Error;

/// Failures talking to the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record store unreachable: {0}")]
    Network(String),

    #[error("Record store rejected the access token")]
    AuthRejected,

    #[error("Record store denied access")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rejected by record store: {0}")]
    Rejected(String),

    #[error("Record store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed record store response: {0}")]
    MalformedResponse(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Classify a non-success HTTP response from the store
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = error_message(body);
        match status {
            401 => StoreError::AuthRejected,
            403 => StoreError::Forbidden,
            404 => StoreError::NotFound(message),
            409 => StoreError::Conflict(message),
            400 | 422 => StoreError::Rejected(message),
            _ => StoreError::Status { status, message },
        }
    }
}

/// The store answers errors as `{"message": ...}` or `{"error": ...}`; fall back to the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error", "msg"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_taxonomy() {
        assert!(matches!(
            StoreError::from_status(401, ""),
            StoreError::AuthRejected
        ));
        assert!(matches!(
            StoreError::from_status(403, "nope"),
            StoreError::Forbidden
        ));
        assert!(matches!(
            StoreError::from_status(500, "boom"),
            StoreError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_json_error_message_is_extracted() {
        match StoreError::from_status(409, r#"{"message":"Agen masih memiliki pelanggan"}"#) {
            StoreError::Conflict(msg) => assert_eq!(msg, "Agen masih memiliki pelanggan"),
            other => panic!("unexpected {:?}", other),
        }

        match StoreError::from_status(422, "  nomor sudah terdaftar ") {
            StoreError::Rejected(msg) => assert_eq!(msg, "nomor sudah terdaftar"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
