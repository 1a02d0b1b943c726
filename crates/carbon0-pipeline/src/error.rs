use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported page: {url}")]
    UnsupportedPage { url: String },

    #[error("no usable product data extracted from {url}")]
    ExtractionEmpty { url: String },

    /// The request never completed: connection refused, DNS failure, timeout.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request reached the server, which answered with a non-2xx status.
    #[error("backend rejected request to {url} with HTTP status {status}")]
    BackendRejected { status: u16, url: String },

    #[error("malformed response from {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("vision extraction failed: {0}")]
    Vision(String),

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl PipelineError {
    /// Text suitable for showing to the person who triggered the run.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::UnsupportedPage { .. } => "Please navigate to a supported product page \
                 (Amazon, Walmart, Etsy, Best Buy, Target, or eBay)."
                .to_string(),
            PipelineError::ExtractionEmpty { .. } => "Could not extract product information. \
                 Make sure you are on a product page; the page structure may have changed."
                .to_string(),
            PipelineError::Transport(e) => {
                format!("Error: {e}. Make sure the backend server is running.")
            }
            PipelineError::BackendRejected { status, .. } => {
                format!("Backend failed: {status} error.")
            }
            PipelineError::MalformedResponse { .. } => {
                "The backend returned a response that could not be understood.".to_string()
            }
            PipelineError::Vision(reason) => {
                format!("Screenshot analysis failed: {reason}.")
            }
            PipelineError::InvalidUrl { url, reason } => {
                format!("Invalid URL \"{url}\": {reason}.")
            }
        }
    }
}
