use thiserror::Error;

/// Failures while retrieving a product page. Any of these means no verdict
/// can be produced for the check.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid page URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Failures while posting a webhook notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("invalid webhook URL: {reason}")]
    InvalidUrl { reason: String },
}
