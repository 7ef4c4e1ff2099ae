//! Environment variable handling for the Flexwin client.
//!
//! Configuration values may be overridden through `FLEXWIN__SECTION__KEY`
//! variables. Secrets written as `"secret_from_env"` in a config file are
//! resolved from `FLEXWIN_SECRET_SECTION_KEY`, falling back to the shorter
//! `SECTION_KEY` form (e.g. `FLEXWIN_PASSWORD`).

use std::env;
use tracing::warn;

/// The prefix for configuration environment variables
pub const CONFIG_PREFIX: &str = "FLEXWIN";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "FLEXWIN_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that requests a secret be read from the environment
pub const SECRET_MARKER: &str = "secret_from_env";

/// Convert a secret path to an environment variable name
///
/// `"flexwin.md5_key1"` becomes `"FLEXWIN_SECRET_FLEXWIN_MD5_KEY1"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its short environment variable name
///
/// `"flexwin.password"` becomes `"FLEXWIN_PASSWORD"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let section = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", section, key).to_uppercase()
}

/// Get an environment variable for a secret path, trying the prefixed name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    let env_var = secret_path_to_env_var(path);
    if let Ok(value) = env::var(&env_var) {
        return Some(value);
    }

    let legacy_env_var = legacy_secret_path_to_env_var(path);
    env::var(&legacy_env_var).ok()
}

/// Replace every `"secret_from_env"` string in a JSON value.
///
/// `lookup` receives the dotted path of the marker (e.g. `"flexwin.password"`).
/// Markers without a value are cleared to `null` so they never reach the gateway.
/// Returns `true` if any marker was replaced with a value.
pub fn inject_secrets_with<F>(value: &mut serde_json::Value, lookup: &F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    use serde_json::Value;

    fn walk<F>(path: &mut Vec<String>, obj: &mut Value, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    replaced |= walk(path, v, lookup);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match lookup(&path_str) {
                    Some(env_val) => {
                        *obj = Value::String(env_val);
                        replaced = true;
                    }
                    None => {
                        warn!("env var for {} not found", path_str);
                        *obj = Value::Null;
                    }
                }
            }
            _ => {}
        }

        replaced
    }

    walk(&mut Vec::new(), value, lookup)
}

/// Replace `"secret_from_env"` markers using the process environment.
pub fn inject_env_secrets(value: &mut serde_json::Value) -> bool {
    inject_secrets_with(value, &get_secret_env_var)
}
