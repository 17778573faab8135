use thiserror::Error;

/// error types for all PubChem pipelines
#[derive(Debug, Error)]
pub enum PubChemError {
    /// input rejected before any network call
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },
    /// the initial lookup call failed or returned no well-formed identifier list
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    /// the PUG XML job could not be submitted or its request id could not be parsed
    #[error("Job submission failed: {0}")]
    Submission(String),
    /// body parsed, but the expected field is absent
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Settings error: {0}")]
    Settings(String),
}

impl PubChemError {
    pub fn request(url: &str, reason: impl ToString) -> Self {
        PubChemError::Request {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_input(input: impl ToString, reason: impl ToString) -> Self {
        PubChemError::InvalidInput {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}
