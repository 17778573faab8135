use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// status code and body of a finished HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client trait for dependency injection
///
/// Non-success statuses are not errors at this level: the pipelines decide
/// what a 404 or a 503 means for them.
pub trait HttpClient {
    fn get_text(&self, url: &str) -> Result<HttpReply, reqwest::Error>;
    fn post_xml(&self, url: &str, body: &str) -> Result<HttpReply, reqwest::Error>;
}

// Implementation for the real reqwest client
impl HttpClient for Client {
    fn get_text(&self, url: &str) -> Result<HttpReply, reqwest::Error> {
        let response = self.get(url).send()?;
        let status = response.status().as_u16();
        Ok(HttpReply {
            status,
            body: response.text()?,
        })
    }

    fn post_xml(&self, url: &str, body: &str) -> Result<HttpReply, reqwest::Error> {
        let response = self
            .post(url)
            .header(CONTENT_TYPE, "text/xml")
            .body(body.to_string())
            .send()?;
        let status = response.status().as_u16();
        Ok(HttpReply {
            status,
            body: response.text()?,
        })
    }
}

pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("PubChemFetch/", env!("CARGO_PKG_VERSION")))
        .build()
}
