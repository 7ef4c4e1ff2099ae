// --- File: crates/flexwin_client/src/request.rs ---
use flexwin_config::FlexwinConfig;
use std::collections::BTreeMap;
use std::fmt;

/// Outgoing form fields, keyed by gateway field name.
pub type Fields = BTreeMap<String, String>;

/// HTTP basic credentials for the gateway's admin endpoints.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Fills each missing half from `fallback`.
    pub fn or(self, fallback: Credentials) -> Credentials {
        Credentials {
            username: non_empty(self.username).or(non_empty(fallback.username)),
            password: non_empty(self.password).or(non_empty(fallback.password)),
        }
    }

    /// Credentials carried as `username` / `password` request fields.
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            username: fields.get("username").cloned(),
            password: fields.get("password").cloned(),
        }
    }

    pub fn from_config(config: &FlexwinConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

// Keep passwords out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// One call's worth of caller-supplied input.
#[derive(Debug, Clone, Default)]
pub struct FlexwinRequest {
    pub fields: Fields,
    /// Per-call credentials; missing halves fall back to the configuration.
    pub credentials: Option<Credentials>,
}

impl FlexwinRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

impl From<Fields> for FlexwinRequest {
    fn from(fields: Fields) -> Self {
        Self {
            fields,
            credentials: None,
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FlexwinRequest
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<Fields>()
            .into()
    }
}

/// Applies the configured defaults to a caller's fields.
///
/// - `test=yes` when the configuration is in test mode
/// - the configured merchant when the caller gave none (or an empty one)
/// - `textreply=yes` and `fullreply=yes`, always
///
/// Nothing is validated; the gateway rejects incomplete requests itself.
pub fn build_request(config: &FlexwinConfig, mut fields: Fields) -> Fields {
    if config.test_mode {
        fields.insert("test".to_string(), "yes".to_string());
    }

    let has_merchant = fields.get("merchant").is_some_and(|m| !m.is_empty());
    if !has_merchant {
        if let Some(merchant) = config.merchant.as_deref().filter(|m| !m.is_empty()) {
            fields.insert("merchant".to_string(), merchant.to_string());
        }
    }

    fields.insert("textreply".to_string(), "yes".to_string());
    fields.insert("fullreply".to_string(), "yes".to_string());
    fields
}
