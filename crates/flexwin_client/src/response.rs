// --- File: crates/flexwin_client/src/response.rs ---
//! Decoding of the gateway's text reply (`key=value&key=value...`).

use crate::error::{FlexwinError, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;
use std::str::FromStr;

// Characters left unescaped by `encodeURIComponent`-style encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Decoded gateway reply.
///
/// Keys are taken verbatim; values are percent-decoded. A segment without `=`
/// is kept as a key with no value. Nothing is interpreted: callers read the
/// gateway's status fields themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayResponse {
    fields: BTreeMap<String, Option<String>>,
}

impl GatewayResponse {
    /// Value of `key`, if present and carrying a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status")
    }

    /// The gateway's transaction id (`transact`).
    pub fn transaction_id(&self) -> Option<&str> {
        self.get("transact")
    }

    pub fn ticket(&self) -> Option<&str> {
        self.get("ticket")
    }

    pub fn reason(&self) -> Option<&str> {
        self.get("reason")
    }

    /// Keys that carried a value, with their decoded values.
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.fields
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect()
    }

    /// Renders the reply back into text-reply form, percent-encoding values.
    pub fn to_text_reply(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| match v {
                Some(v) => format!("{}={}", k, utf8_percent_encode(v, COMPONENT)),
                None => k.clone(),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl FromIterator<(String, String)> for GatewayResponse {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k, Some(v))).collect(),
        }
    }
}

impl FromStr for GatewayResponse {
    type Err = FlexwinError;

    fn from_str(body: &str) -> Result<Self> {
        parse_response(body)
    }
}

/// Parses a text-reply body.
///
/// Later duplicates of a key overwrite earlier ones. Empty segments and a
/// trailing line break are ignored. Invalid `%` escapes or escapes that do not
/// decode to UTF-8 fail with [`FlexwinError::ParseError`].
pub fn parse_response(body: &str) -> Result<GatewayResponse> {
    let mut fields = BTreeMap::new();

    for segment in body.trim_end_matches(['\r', '\n']).split('&') {
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('=') {
            Some((key, raw)) => {
                fields.insert(key.to_string(), Some(decode_component(key, raw)?));
            }
            None => {
                fields.insert(segment.to_string(), None);
            }
        }
    }

    Ok(GatewayResponse { fields })
}

fn decode_component(key: &str, raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(FlexwinError::ParseError(format!(
                    "malformed percent escape in value of '{}'",
                    key
                )));
            }
        }
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            FlexwinError::ParseError(format!("value of '{}' is not valid UTF-8: {}", key, e))
        })
}
