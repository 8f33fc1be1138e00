// Integration tests for the global logging bootstrap.
//
// Lives in its own test binary: installing a global subscriber is
// process-wide and would leak into the library's unit tests.
use event_enrich::monitoring::{init_logging, LogFormat, LogLevel, LoggerConfig};
use event_enrich::Error;

#[test]
fn test_second_init_fails() {
    let config = LoggerConfig {
        level: LogLevel::Warn,
        format: LogFormat::Compact,
        ..Default::default()
    };

    assert!(init_logging(&config).is_ok());
    assert!(matches!(init_logging(&config), Err(Error::Logging(_))));
}
