// --- File: crates/flexwin_client/src/transport.rs ---
//! The HTTP seam: one form-encoded POST per call, no retries.

use crate::error::{FlexwinError, Result};
use crate::request::{Credentials, Fields};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Status and body of a gateway reply, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Posts a form to the gateway.
///
/// Implementations return network failures as [`FlexwinError::RequestError`]
/// and hand back every received reply, whatever its status.
pub trait Transport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        fields: &'a Fields,
        credentials: Option<&'a Credentials>,
    ) -> BoxFuture<'a, RawReply>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a dedicated client with the given request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = flexwin_common::create_client(timeout_secs)?;
        Ok(Self::new(client))
    }
}

impl Transport for HttpTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        fields: &'a Fields,
        credentials: Option<&'a Credentials>,
    ) -> BoxFuture<'a, RawReply> {
        Box::pin(async move {
            let body = serde_urlencoded::to_string(fields)
                .map_err(|e| FlexwinError::EncodingError(e.to_string()))?;

            let mut request = self
                .client
                .post(url)
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(body);

            if let Some(credentials) = credentials {
                let username = credentials.username.as_deref().unwrap_or_default();
                request = request.basic_auth(username, credentials.password.as_deref());
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let bytes = response.bytes().await?;
            debug!("Flexwin reply from {}: HTTP {}", url, status);

            Ok(RawReply {
                status,
                body: decode_body(status, bytes.to_vec())?,
            })
        })
    }
}

/// Success bodies must be UTF-8. Rejection bodies are kept lossily so the
/// caller still gets them with the status error.
fn decode_body(status: u16, bytes: Vec<u8>) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(body) => Ok(body),
        Err(e) if (200..300).contains(&status) => Err(FlexwinError::ParseError(format!(
            "reply body is not valid UTF-8: {}",
            e.utf8_error()
        ))),
        Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}
