use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Refused connection, timeout, TLS or protocol failure.
    #[error("{0}")]
    Network(String),

    /// The request could not be built (bad base URL, client setup).
    #[error("{0}")]
    Unexpected(String),
}

/// Sends one request per call; never retries.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    base_url: String,
}

impl HttpProber {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ProbeError::Unexpected(error_chain(&err)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the HTTP status code of `method path`. POST requests carry an
    /// empty JSON object as body.
    pub fn probe(&self, method: Method, path: &str) -> Result<u16, ProbeError> {
        let raw = format!("{}{path}", self.base_url);
        let url = reqwest::Url::parse(&raw)
            .map_err(|err| ProbeError::Unexpected(format!("invalid URL {raw}: {err}")))?;

        let request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self
                .client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body("{}"),
        };

        let response = request.send().map_err(classify)?;
        Ok(response.status().as_u16())
    }
}

fn classify(err: reqwest::Error) -> ProbeError {
    let text = error_chain(&err);
    if err.is_builder() {
        ProbeError::Unexpected(text)
    } else {
        ProbeError::Network(text)
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
