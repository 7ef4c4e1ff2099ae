// --- File: crates/flexwin_common/src/lib.rs ---

pub mod http; // reqwest client builder
pub mod logging; // Tracing subscriber setup

pub use http::create_client;
pub use logging::{init, init_from_config, init_with_level};
