// --- File: crates/flexwin_client/src/operation.rs ---
use std::fmt;
use std::str::FromStr;

/// The gateway calls this client can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Check a card and store it as a ticket for recurring payments.
    CreateTicket,
    /// Charge a previously created ticket.
    AuthorizeTicket,
    /// Capture an authorized transaction, usually when goods ship.
    CaptureTransaction,
    /// Refund a captured transaction.
    RefundTransaction,
    /// Cancel an authorized, uncaptured transaction.
    CancelTransaction,
    /// Delete a stored ticket.
    DeleteTicket,
}

/// Static description of one gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub name: &'static str,
    pub path: &'static str,
    /// Fields hashed into `md5key`, in order.
    pub checksum_fields: &'static [&'static str],
    /// Whether the endpoint requires HTTP basic authentication.
    pub authenticated: bool,
}

// Indexed by `Operation as usize`.
static OPERATIONS: [OperationSpec; 6] = [
    OperationSpec {
        name: "createTicket",
        path: "/cgi-ssl/auth.cgi",
        checksum_fields: &["merchant", "orderid", "preauth", "currency", "amount"],
        authenticated: false,
    },
    OperationSpec {
        name: "authorizeTicket",
        path: "/cgi-ssl/ticket_auth.cgi",
        checksum_fields: &["merchant", "orderid", "ticket", "currency", "amount"],
        authenticated: false,
    },
    OperationSpec {
        name: "captureTransaction",
        path: "/cgi-bin/capture.cgi",
        checksum_fields: &["merchant", "orderid", "transact", "amount"],
        authenticated: false,
    },
    OperationSpec {
        name: "refundTransaction",
        path: "/cgi-adm/refund.cgi",
        checksum_fields: &["merchant", "orderid", "transact", "amount"],
        authenticated: true,
    },
    OperationSpec {
        name: "cancelTransaction",
        path: "/cgi-adm/cancel.cgi",
        checksum_fields: &["merchant", "orderid", "transact"],
        authenticated: true,
    },
    OperationSpec {
        name: "deleteTicket",
        path: "/cgi-adm/delticket.cgi",
        checksum_fields: &["merchant", "ticket"],
        authenticated: true,
    },
];

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::CreateTicket,
        Operation::AuthorizeTicket,
        Operation::CaptureTransaction,
        Operation::RefundTransaction,
        Operation::CancelTransaction,
        Operation::DeleteTicket,
    ];

    pub fn spec(self) -> &'static OperationSpec {
        &OPERATIONS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn path(self) -> &'static str {
        self.spec().path
    }

    pub fn checksum_fields(self) -> &'static [&'static str] {
        self.spec().checksum_fields
    }

    pub fn requires_auth(self) -> bool {
        self.spec().authenticated
    }

    /// Full endpoint URL below `base_url`.
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an operation name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation: {}", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    /// Accepts `createTicket`, `create_ticket` or `create-ticket` (any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.name().to_lowercase() == wanted)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}
