use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedtermError {
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Terminal error: {0}")]
    Protocol(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("URL shortening failed: {0}")]
    Shorten(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FeedtermError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_includes_body() {
        let err = FeedtermError::HttpStatus {
            status: 404,
            body: "not here".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404: not here");
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            FeedtermError::Timeout(10).to_string(),
            "Request timed out after 10s"
        );
    }
}
