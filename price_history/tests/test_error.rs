use price_history::{ConfigError, ErrorReport, HistoryError, SynthesisError};
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let history_error = HistoryError::from(io_error);
    assert!(matches!(history_error, HistoryError::Io(_)));

    let synthesis_error = SynthesisError::Upstream("provider offline".to_string());
    let history_error = HistoryError::from(synthesis_error.clone());
    assert!(matches!(history_error, HistoryError::Synthesis(ref e) if *e == synthesis_error));

    let config_error = ConfigError::Validation("no stores".to_string());
    assert!(matches!(HistoryError::from(config_error), HistoryError::Config(_)));
}

#[test]
fn test_error_display() {
    let error = HistoryError::InvalidInput("days must not be negative, got -3".to_string());
    assert_eq!(error.to_string(), "Invalid input: days must not be negative, got -3");

    let error = HistoryError::from(SynthesisError::InsufficientHistory {
        product: "Desk Lamp".to_string(),
        needed: 31,
        available: 2,
    });
    let message = error.to_string();
    assert!(message.contains("Desk Lamp"));
    assert!(message.contains("need 31"));
}

#[test]
fn test_error_report() {
    let error = HistoryError::InvalidInput("product name cannot be empty".to_string());
    let report = ErrorReport::from(&error);

    assert!(!report.success);
    assert_eq!(report.error, "Invalid input: product name cannot be empty");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["success"], false);
}
