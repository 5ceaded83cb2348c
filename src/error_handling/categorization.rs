//! Error categorization.
//!
//! Maps transport errors onto `HopError` so the analyzer can report them without
//! depending on reqwest.

use super::types::HopError;

/// Categorizes a `reqwest::Error` into a `HopError`.
///
/// Timeouts are checked first: reqwest reports a connect timeout as both
/// `is_connect()` and `is_timeout()`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> HopError {
    let message = error_chain_message(error);
    if error.is_timeout() {
        HopError::Timeout(message)
    } else if error.is_connect() {
        HopError::Connect(message)
    } else if error.is_builder() {
        HopError::InvalidRequest(message)
    } else {
        HopError::Other(message)
    }
}

/// Joins an error and its sources into a single line.
fn error_chain_message(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
