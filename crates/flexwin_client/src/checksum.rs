// --- File: crates/flexwin_client/src/checksum.rs ---
//! The gateway's `md5key` request checksum.
//!
//! The message is `name=value&name=value...` over an operation's checksum
//! fields in their fixed order. The key is then
//! `md5(key2 + md5(key1 + message))`, both digests as lowercase hex.

use crate::request::Fields;
use md5::{Digest, Md5};

/// Form field the checksum is sent in.
pub const CHECKSUM_FIELD: &str = "md5key";

/// Builds the checksum message. Absent fields contribute an empty value.
pub fn checksum_message(field_list: &[&str], fields: &Fields) -> String {
    let mut message = String::new();
    for name in field_list {
        let value = fields.get(*name).map(String::as_str).unwrap_or_default();
        message.push_str(&name.to_lowercase());
        message.push('=');
        message.push_str(value);
        message.push('&');
    }
    message.pop();
    message
}

/// Computes the two-pass MD5 checksum over `field_list`.
pub fn compute_checksum(field_list: &[&str], fields: &Fields, key1: &str, key2: &str) -> String {
    let message = checksum_message(field_list, fields);
    let digest1 = md5_hex(&[key1, &message]);
    md5_hex(&[key2, &digest1])
}

fn md5_hex(parts: &[&str]) -> String {
    let mut hasher = Md5::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
