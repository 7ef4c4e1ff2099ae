// --- File: crates/flexwin_client/src/error.rs ---
use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, FlexwinError>;

/// Errors raised by the Flexwin client.
///
/// Business rejections (e.g. a declined card) are not errors: they arrive as a
/// decoded [`GatewayResponse`](crate::GatewayResponse) carrying the gateway's own status fields.
#[derive(Error, Debug)]
pub enum FlexwinError {
    /// Network or TLS failure talking to the gateway
    #[error("Flexwin request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status; `body` is the raw reply
    #[error("Flexwin gateway returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// A 2xx reply body could not be decoded
    #[error("Failed to parse Flexwin reply: {0}")]
    ParseError(String),

    /// The outgoing form could not be serialized
    #[error("Failed to encode request body: {0}")]
    EncodingError(String),

    /// The client could not be constructed from its configuration
    #[error("Flexwin configuration error: {0}")]
    ConfigError(String),
}

impl FlexwinError {
    /// True for network failures and non-2xx replies.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FlexwinError::RequestError(_) | FlexwinError::HttpStatus { .. }
        )
    }

    /// True when the reply arrived but could not be decoded.
    pub fn is_parse(&self) -> bool {
        matches!(self, FlexwinError::ParseError(_))
    }

    /// Raw reply body of a non-2xx response.
    pub fn body(&self) -> Option<&str> {
        match self {
            FlexwinError::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status of the failed reply, when one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FlexwinError::HttpStatus { status, .. } => Some(*status),
            FlexwinError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
