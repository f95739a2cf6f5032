//! Upstream signal classification.
//!
//! The provider answers HTTP 200 for both data and non-data responses. A body
//! may consist of nothing but an error or throttle notice, so these keys are
//! checked, in priority order, before any data field is read.

use serde_json::Value;

use crate::GatewayError;

/// Non-data signal found in an upstream payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderSignal {
    /// `"Error Message"`: the provider rejected the symbol.
    ErrorMessage,
    /// `"Note"`: call-frequency limit reached.
    Note,
    /// `"Information"`: per-second throttle or plan notice.
    Information,
}

impl ProviderSignal {
    /// Checked first to last; the first present key decides.
    pub const PRIORITY: [Self; 3] = [Self::ErrorMessage, Self::Note, Self::Information];

    pub const fn key(self) -> &'static str {
        match self {
            Self::ErrorMessage => "Error Message",
            Self::Note => "Note",
            Self::Information => "Information",
        }
    }

    pub fn into_error(self) -> GatewayError {
        match self {
            Self::ErrorMessage => GatewayError::provider_rejected(),
            Self::Note => GatewayError::rate_limited_calls(),
            Self::Information => GatewayError::rate_limited_per_second(),
        }
    }
}

/// Returns the highest-priority signal in `payload`, or `None` when the body
/// should go on to shape-specific extraction.
///
/// A key counts as present when its value is neither `null` nor an empty string.
pub fn classify(payload: &Value) -> Option<ProviderSignal> {
    let object = payload.as_object()?;

    ProviderSignal::PRIORITY
        .into_iter()
        .find(|signal| object.get(signal.key()).is_some_and(is_present))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::GatewayErrorKind;

    #[test]
    fn error_message_wins_over_every_other_signal() {
        let payload = json!({
            "Information": "per-second limit",
            "Note": "call limit",
            "Error Message": "Invalid API call.",
            "Global Quote": { "01. symbol": "AAPL" }
        });

        assert_eq!(classify(&payload), Some(ProviderSignal::ErrorMessage));
        assert_eq!(
            ProviderSignal::ErrorMessage.into_error().kind(),
            GatewayErrorKind::ProviderRejected
        );
    }

    #[test]
    fn note_wins_over_information() {
        let payload = json!({ "Information": "per-second", "Note": "calls" });

        let signal = classify(&payload).expect("signal expected");
        assert_eq!(signal, ProviderSignal::Note);
        assert_eq!(
            signal.into_error().message(),
            GatewayError::rate_limited_calls().message()
        );
    }

    #[test]
    fn information_alone_is_rate_limited_with_its_own_message() {
        let payload = json!({ "Information": "Please consider spreading out your free API requests" });

        let error = classify(&payload).expect("signal expected").into_error();
        assert_eq!(error.kind(), GatewayErrorKind::RateLimited);
        assert_eq!(error.message_key(), "errorRateLimitPerSecond");
    }

    #[test]
    fn data_payloads_and_blank_signals_pass_through() {
        assert_eq!(classify(&json!({ "Global Quote": {} })), None);
        assert_eq!(classify(&json!({ "Note": "", "Error Message": null })), None);
        assert_eq!(classify(&json!(["Note"])), None);
        assert_eq!(classify(&Value::Null), None);
    }
}
