// --- File: crates/flexwin_client/src/lib.rs ---
//! Client for the DIBS Flexwin payment gateway.
//!
//! Builds form posts for ticket creation, ticket authorization, capture,
//! refund, cancel and ticket deletion, optionally signs them with the
//! gateway's two-pass MD5 checksum, and decodes the `key=value&...` text reply.
//!
//! ```no_run
//! use std::sync::Arc;
//! use flexwin_client::{FlexwinClient, FlexwinRequest};
//! use flexwin_config::FlexwinConfig;
//!
//! # async fn example() -> flexwin_client::Result<()> {
//! let config = Arc::new(FlexwinConfig {
//!     merchant: Some("1000".into()),
//!     test_mode: true,
//!     ..FlexwinConfig::default()
//! });
//! let client = FlexwinClient::new(config)?;
//!
//! let reply = client
//!     .capture_transaction(
//!         FlexwinRequest::new()
//!             .field("orderid", "A1")
//!             .field("transact", "12345")
//!             .field("amount", "100"),
//!     )
//!     .await?;
//! println!("status: {:?}", reply.status());
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod client;
pub mod error;
pub mod operation;
pub mod request;
pub mod response;
pub mod transport;

pub use checksum::compute_checksum;
pub use client::{FlexwinClient, PreparedRequest};
pub use error::{FlexwinError, Result};
pub use operation::Operation;
pub use request::{build_request, Credentials, Fields, FlexwinRequest};
pub use response::{parse_response, GatewayResponse};
pub use transport::{HttpTransport, RawReply, Transport};
