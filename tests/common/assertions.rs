//! Custom assertion macros and utilities
//!
//! Provides assertion macros with more descriptive failure output for the
//! JSON payloads the channels push.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that the payloads are exactly the given inline `{"message"}` reports
#[macro_export]
macro_rules! assert_informed {
    ($payloads:expr, $($message:expr),+ $(,)?) => {
        let expected: Vec<serde_json::Value> =
            vec![$(serde_json::json!({ "message": $message })),+];
        pretty_assertions::assert_eq!($payloads, expected);
    };
}

/// Assert that some payload has `field == value`
#[macro_export]
macro_rules! assert_pushed {
    ($payloads:expr, $field:expr => $value:expr) => {
        assert!(
            $payloads.iter().any(|p| p[$field] == $value),
            "No payload with {} == {:?} in {:#?}",
            $field,
            $value,
            $payloads
        );
    };
}
