//! Errors raised while talking to the content API and rendering pages

use thiserror::Error;

/// Result alias for content API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure of a single request against the content API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status
    #[error("Failed to fetch {url}: {status_text}")]
    Status { url: String, status_text: String },

    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the JSON we expected
    #[error("Invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Build a status error from a response status code
    pub fn status(url: &str, status: reqwest::StatusCode) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        ApiError::Status {
            url: url.to_string(),
            status_text,
        }
    }
}

/// Why a page could not be rendered
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,

    /// The primary listing of a page could not be fetched
    #[error(transparent)]
    Upstream(#[from] ApiError),

    #[error("Template error: {0}")]
    Render(#[from] tera::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_status_text() {
        let err = ApiError::status("http://api/posts/", reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Failed to fetch http://api/posts/: Not Found");
    }
}
