use thiserror::Error;

/// Failures of the remote expense store.
///
/// Every variant renders as a fixed, user-facing message. The wrapped string
/// keeps the underlying reason (HTTP status or transport error) for the log;
/// network failures and application-level rejections are not distinguished.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Listing expenses failed.
    #[error("Failed to fetch expenses")]
    Fetch(String),

    /// Creating an expense failed.
    #[error("Failed to create expense")]
    Create(String),

    /// Deleting an expense failed.
    #[error("Failed to delete")]
    Delete(String),

    /// Fetching the monthly aggregate failed.
    #[error("Failed to fetch total")]
    TotalFetch(String),
}

impl ApiError {
    /// The underlying reason, suitable for logs.
    pub fn reason(&self) -> &str {
        match self {
            ApiError::Fetch(reason)
            | ApiError::Create(reason)
            | ApiError::Delete(reason)
            | ApiError::TotalFetch(reason) => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hides_reason() {
        let err = ApiError::Create("HTTP 500 Internal Server Error".to_string());
        assert_eq!(err.to_string(), "Failed to create expense");
        assert_eq!(err.reason(), "HTTP 500 Internal Server Error");
    }

    #[test]
    fn test_display_per_operation() {
        assert_eq!(ApiError::Fetch(String::new()).to_string(), "Failed to fetch expenses");
        assert_eq!(ApiError::Delete(String::new()).to_string(), "Failed to delete");
        assert_eq!(ApiError::TotalFetch(String::new()).to_string(), "Failed to fetch total");
    }
}
