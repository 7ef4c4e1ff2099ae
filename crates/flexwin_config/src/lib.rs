use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

/// Loads configuration from `config/default.*`, `config/{RUN_ENV}.*` and the environment.
///
/// The config directory defaults to `./config` and can be moved with `FLEXWIN_CONFIG_DIR`.
/// `RUN_ENV` defaults to `debug`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("FLEXWIN_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    load_config_from(&config_dir, &run_env)
}

/// Loads configuration from an explicit directory and run environment.
///
/// Both files are optional; values from `FLEXWIN__SECTION__KEY` variables win over files.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!("config default_path: {}", default_path.display());
    debug!("config env_path: {}", env_path.display());

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(env_vars::CONFIG_PREFIX).separator(env_vars::CONFIG_SEPARATOR),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Applies environment overrides based on "secret_from_env" markers in the loaded config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    env_vars::inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The path is taken from `DOTENV_OVERRIDE` and defaults to `.env`. Loading
/// happens at most once per process; a missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_config_from_layers_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
[flexwin]
merchant = "1000"
test_mode = false
md5_key1 = "k1"

[logging]
level = "info"
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            r#"
[flexwin]
test_mode = true
md5_key2 = "k2"
"#,
        )
        .unwrap();

        let config = load_config_from(dir.path(), "staging").unwrap();

        assert!(config.flexwin.test_mode);
        assert_eq!(config.flexwin.merchant.as_deref(), Some("1000"));
        assert_eq!(config.flexwin.checksum_keys(), Some(("k1", "k2")));
        assert_eq!(config.flexwin.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.logging.level.as_deref(), Some("info"));
    }

    #[test]
    fn test_load_config_from_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent"), "debug").unwrap();

        assert_eq!(config.flexwin.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.flexwin.merchant.is_none());
    }
}
