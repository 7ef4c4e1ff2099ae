// --- File: crates/flexwin_client/src/client.rs ---
use std::sync::Arc;

use flexwin_config::FlexwinConfig;
use tracing::{debug, error, info, warn};

use crate::checksum::{compute_checksum, CHECKSUM_FIELD};
use crate::error::{FlexwinError, Result};
use crate::operation::Operation;
use crate::request::{build_request, Credentials, Fields, FlexwinRequest};
use crate::response::{parse_response, GatewayResponse};
use crate::transport::{HttpTransport, Transport};

/// A fully built call, ready for the transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub operation: Operation,
    pub url: String,
    pub fields: Fields,
    pub credentials: Option<Credentials>,
}

/// Client for the Flexwin gateway.
///
/// The configuration is shared read-only; concurrent calls need no coordination.
#[derive(Debug, Clone)]
pub struct FlexwinClient<T = HttpTransport> {
    config: Arc<FlexwinConfig>,
    transport: T,
}

impl FlexwinClient<HttpTransport> {
    /// Creates a client with its own HTTP client using the configured timeout.
    pub fn new(config: Arc<FlexwinConfig>) -> Result<Self> {
        let transport = HttpTransport::with_timeout(config.timeout_secs).map_err(|e| {
            FlexwinError::ConfigError(format!("could not build HTTP client: {}", e))
        })?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> FlexwinClient<T> {
    pub fn with_transport(config: Arc<FlexwinConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &FlexwinConfig {
        &self.config
    }

    /// Builds the outgoing form for `operation` without sending it.
    pub fn prepare(&self, operation: Operation, request: FlexwinRequest) -> PreparedRequest {
        let FlexwinRequest {
            fields,
            credentials,
        } = request;
        let mut fields = build_request(&self.config, fields);

        if let Some((key1, key2)) = self.config.checksum_keys() {
            let checksum = compute_checksum(operation.checksum_fields(), &fields, key1, key2);
            fields.insert(CHECKSUM_FIELD.to_string(), checksum);
        }

        let credentials = if operation.requires_auth() {
            let resolved = credentials
                .unwrap_or_default()
                .or(Credentials::from_fields(&fields))
                .or(Credentials::from_config(&self.config));
            if resolved.username.is_none() {
                warn!(
                    "No username configured for authenticated operation {}",
                    operation
                );
            }
            Some(resolved)
        } else {
            None
        };

        PreparedRequest {
            operation,
            url: operation.url(&self.config.base_url),
            fields,
            credentials,
        }
    }

    /// Sends one operation and decodes the reply.
    pub async fn execute(
        &self,
        operation: Operation,
        request: FlexwinRequest,
    ) -> Result<GatewayResponse> {
        let prepared = self.prepare(operation, request);
        self.send(prepared).await
    }

    /// Sends an already prepared request.
    pub async fn send(&self, prepared: PreparedRequest) -> Result<GatewayResponse> {
        let PreparedRequest {
            operation,
            url,
            fields,
            credentials,
        } = prepared;

        info!("Sending Flexwin {} request to {}", operation, url);
        debug!(
            "Flexwin {} fields: {:?}",
            operation,
            fields.keys().collect::<Vec<_>>()
        );

        let reply = self
            .transport
            .post_form(&url, &fields, credentials.as_ref())
            .await
            .inspect_err(|e| error!("Flexwin {} transport failure: {}", operation, e))?;

        if !reply.is_success() {
            error!(
                "Flexwin {} failed with HTTP status {}. Body: {}",
                operation, reply.status, reply.body
            );
            return Err(FlexwinError::HttpStatus {
                status: reply.status,
                body: reply.body,
            });
        }

        let response = parse_response(&reply.body)
            .inspect_err(|e| error!("Flexwin {} reply could not be decoded: {}", operation, e))?;
        info!(
            "Flexwin {} completed with status {:?}",
            operation,
            response.status()
        );
        Ok(response)
    }

    /// Checks a card and saves it as a ticket for recurring payments.
    pub async fn create_ticket(
        &self,
        request: impl Into<FlexwinRequest>,
    ) -> Result<GatewayResponse> {
        self.execute(Operation::CreateTicket, request.into()).await
    }

    /// Makes a recurring payment against a ticket from [`create_ticket`](Self::create_ticket).
    pub async fn authorize_ticket(
        &self,
        request: impl Into<FlexwinRequest>,
    ) -> Result<GatewayResponse> {
        self.execute(Operation::AuthorizeTicket, request.into())
            .await
    }

    /// Captures an authorized transaction, typically when the goods ship.
    pub async fn capture_transaction(
        &self,
        request: impl Into<FlexwinRequest>,
    ) -> Result<GatewayResponse> {
        self.execute(Operation::CaptureTransaction, request.into())
            .await
    }

    /// Refunds a captured transaction. Sent with basic authentication.
    pub async fn refund_transaction(
        &self,
        request: impl Into<FlexwinRequest>,
    ) -> Result<GatewayResponse> {
        self.execute(Operation::RefundTransaction, request.into())
            .await
    }

    /// Cancels an uncaptured transaction. Sent with basic authentication.
    pub async fn cancel_transaction(
        &self,
        request: impl Into<FlexwinRequest>,
    ) -> Result<GatewayResponse> {
        self.execute(Operation::CancelTransaction, request.into())
            .await
    }

    /// Deletes a stored ticket. Sent with basic authentication.
    pub async fn delete_ticket(
        &self,
        request: impl Into<FlexwinRequest>,
    ) -> Result<GatewayResponse> {
        self.execute(Operation::DeleteTicket, request.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{BoxFuture, RawReply};
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct SentRequest {
        url: String,
        fields: Fields,
        credentials: Option<Credentials>,
    }

    /// Records every post and answers with a canned reply.
    struct RecordingTransport {
        reply: RawReply,
        sent: Mutex<Vec<SentRequest>>,
    }

    impl RecordingTransport {
        fn answering(status: u16, body: &str) -> Self {
            Self {
                reply: RawReply {
                    status,
                    body: body.to_string(),
                },
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<SentRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            fields: &'a Fields,
            credentials: Option<&'a Credentials>,
        ) -> BoxFuture<'a, RawReply> {
            self.sent.lock().unwrap().push(SentRequest {
                url: url.to_string(),
                fields: fields.clone(),
                credentials: credentials.cloned(),
            });
            let reply = self.reply.clone();
            Box::pin(async move { Ok(reply) })
        }
    }

    fn config() -> FlexwinConfig {
        FlexwinConfig {
            test_mode: true,
            merchant: Some("1000".into()),
            username: Some("apiuser".into()),
            password: Some("apipass".into()),
            md5_key1: Some("k1-secret".into()),
            md5_key2: Some("k2-secret".into()),
            base_url: "https://gateway.test".into(),
            ..FlexwinConfig::default()
        }
    }

    fn client(transport: RecordingTransport) -> FlexwinClient<RecordingTransport> {
        FlexwinClient::with_transport(Arc::new(config()), transport)
    }

    #[test]
    fn test_prepare_create_ticket_checksum() {
        let client = client(RecordingTransport::answering(200, ""));
        let prepared = client.prepare(
            Operation::CreateTicket,
            FlexwinRequest::from([
                ("orderid", "A1"),
                ("preauth", ""),
                ("currency", "208"),
                ("amount", "100"),
            ]),
        );

        assert_eq!(prepared.url, "https://gateway.test/cgi-ssl/auth.cgi");
        assert_eq!(prepared.fields["merchant"], "1000");
        assert_eq!(prepared.fields["test"], "yes");
        assert_eq!(prepared.fields["textreply"], "yes");
        assert_eq!(prepared.fields["fullreply"], "yes");
        assert_eq!(
            prepared.fields[CHECKSUM_FIELD],
            "8eaeb5b3e9d8d18b91a440bde2c32944"
        );
        assert!(prepared.credentials.is_none());
    }

    #[test]
    fn test_prepare_without_keys_has_no_checksum() {
        let config = FlexwinConfig {
            md5_key2: None,
            ..config()
        };
        let client =
            FlexwinClient::with_transport(Arc::new(config), RecordingTransport::answering(200, ""));
        let prepared = client.prepare(Operation::CaptureTransaction, FlexwinRequest::new());
        assert!(!prepared.fields.contains_key(CHECKSUM_FIELD));
    }

    #[test]
    fn test_every_operation_sets_reply_flags() {
        let client = client(RecordingTransport::answering(200, ""));
        for operation in Operation::ALL {
            let prepared = client.prepare(operation, FlexwinRequest::new());
            assert_eq!(prepared.fields["textreply"], "yes", "{operation}");
            assert_eq!(prepared.fields["fullreply"], "yes", "{operation}");
            assert_eq!(prepared.fields["test"], "yes", "{operation}");
            assert_eq!(prepared.credentials.is_some(), operation.requires_auth());
        }
    }

    #[test]
    fn test_prepare_uses_per_call_credentials() {
        let client = client(RecordingTransport::answering(200, ""));
        let prepared = client.prepare(
            Operation::RefundTransaction,
            FlexwinRequest::new().with_credentials(Credentials::new("override", "secret")),
        );
        assert_eq!(
            prepared.credentials,
            Some(Credentials::new("override", "secret"))
        );

        let fallback = client.prepare(Operation::CancelTransaction, FlexwinRequest::new());
        assert_eq!(
            fallback.credentials,
            Some(Credentials::new("apiuser", "apipass"))
        );
    }

    #[test]
    fn test_prepare_reads_credentials_from_fields() {
        let config = FlexwinConfig {
            username: None,
            password: None,
            ..config()
        };
        let unconfigured =
            FlexwinClient::with_transport(Arc::new(config), RecordingTransport::answering(200, ""));
        let prepared = unconfigured.prepare(
            Operation::RefundTransaction,
            FlexwinRequest::from([("username", "u"), ("password", "p"), ("transact", "1")]),
        );
        assert_eq!(prepared.credentials, Some(Credentials::new("u", "p")));

        let half = client(RecordingTransport::answering(200, "")).prepare(
            Operation::DeleteTicket,
            FlexwinRequest::from([("username", "override")]),
        );
        assert_eq!(
            half.credentials,
            Some(Credentials::new("override", "apipass"))
        );
    }

    #[test]
    fn test_explicit_credentials_win_over_fields() {
        let client = client(RecordingTransport::answering(200, ""));
        let prepared = client.prepare(
            Operation::CancelTransaction,
            FlexwinRequest::from([("username", "field-user"), ("password", "field-pass")])
                .with_credentials(Credentials::new("override", "secret")),
        );
        assert_eq!(
            prepared.credentials,
            Some(Credentials::new("override", "secret"))
        );
    }

    #[tokio::test]
    async fn test_capture_sends_once_and_decodes() {
        let client = client(RecordingTransport::answering(
            200,
            "status=ACCEPT&transact=12345&amount=100",
        ));
        let reply = client
            .capture_transaction([("orderid", "A1"), ("transact", "12345"), ("amount", "100")])
            .await
            .unwrap();

        assert_eq!(reply.status(), Some("ACCEPT"));
        assert_eq!(reply.transaction_id(), Some("12345"));

        let sent = client.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://gateway.test/cgi-bin/capture.cgi");
        assert_eq!(
            sent[0].fields[CHECKSUM_FIELD],
            "d985391043f9f80a80f86503fea0aa2e"
        );
        assert!(sent[0].credentials.is_none());
    }

    #[tokio::test]
    async fn test_declined_reply_is_not_an_error() {
        let client = client(RecordingTransport::answering(
            200,
            "status=DECLINED&reason=Card%20expired",
        ));
        let reply = client
            .authorize_ticket([("ticket", "987654")])
            .await
            .unwrap();
        assert_eq!(reply.status(), Some("DECLINED"));
        assert_eq!(reply.reason(), Some("Card expired"));
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let client = client(RecordingTransport::answering(
            401,
            "status=DECLINED&reason=Unauthorized",
        ));
        let err = client
            .delete_ticket([("ticket", "987654")])
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.body(), Some("status=DECLINED&reason=Unauthorized"));
        assert_eq!(
            client.transport.sent()[0].credentials,
            Some(Credentials::new("apiuser", "apipass"))
        );
    }

    #[tokio::test]
    async fn test_undecodable_body_is_parse_error() {
        let client = client(RecordingTransport::answering(200, "reason=100%"));
        let err = client.create_ticket(FlexwinRequest::new()).await.unwrap_err();
        assert!(err.is_parse());
    }
}
