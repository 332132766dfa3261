use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
    Unauthorized,
    Corrupt { key: String, message: String },
    Encode { key: String, message: String },
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            StoreError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            StoreError::Invalid(msg) => write!(f, "Invalid: {}", msg),
            StoreError::Unauthorized => write!(f, "Unauthorized"),
            StoreError::Corrupt { key, message } => {
                write!(f, "Corrupt data under '{}': {}", key, message)
            }
            StoreError::Encode { key, message } => {
                write!(f, "Failed to encode data for '{}': {}", key, message)
            }
            StoreError::Backend(msg) => write!(f, "Storage backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// Failures surfaced by the key-value medium itself
impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_and_corrupt_are_distinct() {
        let encode = StoreError::Encode {
            key: "batform_posts".to_string(),
            message: "key must be a string".to_string(),
        };
        let corrupt = StoreError::Corrupt {
            key: "batform_posts".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(
            encode.to_string(),
            "Failed to encode data for 'batform_posts': key must be a string"
        );
        assert_eq!(
            corrupt.to_string(),
            "Corrupt data under 'batform_posts': expected value"
        );
    }

    #[test]
    fn backend_errors_convert_from_anyhow() {
        let err: StoreError = anyhow::anyhow!("disk full").into();
        assert!(matches!(err, StoreError::Backend(ref msg) if msg == "disk full"));
    }
}
