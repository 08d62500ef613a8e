//! Configuration module
//!
//! Compile-time limits live in [`constants::compile_time`]; user preferences
//! are read from `RDP_*` environment variables or a TOML file through
//! [`runtime::RuntimeConfig`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{
    ConfigError, LexicalPreferences, LogLevel, LoggingPreferences, RuntimeConfig,
    SyntaxPreferences,
};
