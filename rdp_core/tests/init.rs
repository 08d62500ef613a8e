//! Crate initialization from a runtime configuration

use rdp_core::logging::{self, codes, config};
use rdp_core::{RuntimeConfig, Tokenizer};

#[test]
fn test_init_installs_preferences_and_logger() {
    let runtime = RuntimeConfig::from_toml_str(
        r#"
        [logging]
        enable_console_logging = false
        min_log_level = "warning"
        "#,
    )
    .unwrap();

    assert!(!logging::is_initialized());
    rdp_core::init(&runtime).unwrap();

    assert!(logging::is_initialized());
    assert!(!config::use_console_logging());
    assert_eq!(config::get_min_log_level(), logging::LogLevel::Warning);

    let service = logging::try_get_global_logger().unwrap();
    assert!(!service.is_enabled());

    // Logging through a disabled service is a no-op
    let mut tokenizer: Tokenizer = Tokenizer::new();
    tokenizer.add_rule("A", "a").unwrap();
    assert!(tokenizer.tokenize("ab", &[]).is_err());
    logging::safe_log_error(codes::system::INTERNAL_ERROR, "ignored");

    assert!(rdp_core::init(&runtime).is_err());
}
