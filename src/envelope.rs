//! Server response envelope
//!
//! The server wraps every response body in `{ result, data? }`. Only the
//! sentinel result code `"100"` signals application-level success; anything
//! else is a typed failure regardless of the HTTP status. The payload handed
//! to callers is the `data` field when the key is present (an explicit `null`
//! counts as present), otherwise the whole body.

use serde_json::Value;

use crate::error::FetchError;

/// Result code the server uses to signal success
pub const SUCCESS_RESULT: &str = "100";

/// A parsed response body
#[derive(Debug, Clone)]
pub struct Envelope {
    raw: Value,
}

impl Envelope {
    /// Parses a response body as JSON
    pub fn parse(body: &str) -> Result<Self, FetchError> {
        let raw: Value = serde_json::from_str(body)?;
        Ok(Self { raw })
    }

    /// Wraps an already-parsed body, e.g. one read back from the cache
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// The envelope's result code, if the body carried one
    pub fn result(&self) -> Option<&str> {
        self.raw.get("result").and_then(Value::as_str)
    }

    /// Whether the result code matches the success sentinel
    pub fn is_success(&self) -> bool {
        self.result() == Some(SUCCESS_RESULT)
    }

    /// The whole response body
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Extracts the payload to hand to the caller: the `data` field when the
    /// key is present (including explicit null), the whole body otherwise
    pub fn payload(&self) -> Value {
        match &self.raw {
            Value::Object(map) if map.contains_key("data") => map["data"].clone(),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_sentinel_match() {
        let envelope = Envelope::parse(r#"{"result": "100", "data": {"id": 123}}"#).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.result(), Some("100"));
    }

    #[test]
    fn test_other_result_is_not_success() {
        let envelope = Envelope::parse(r#"{"result": "500"}"#).unwrap();
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_missing_result_is_not_success() {
        let envelope = Envelope::parse(r#"{"data": 1}"#).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.result(), None);
    }

    #[test]
    fn test_payload_is_data_field_when_present() {
        let envelope = Envelope::parse(r#"{"result": "100", "data": {"id": 123}}"#).unwrap();
        assert_eq!(envelope.payload(), json!({"id": 123}));
    }

    #[test]
    fn test_payload_explicit_null_counts_as_present() {
        let envelope = Envelope::parse(r#"{"result": "100", "data": null}"#).unwrap();
        assert_eq!(envelope.payload(), Value::Null);
    }

    #[test]
    fn test_payload_falls_back_to_whole_body() {
        let envelope = Envelope::parse(r#"{"result": "100", "count": 7}"#).unwrap();
        assert_eq!(envelope.payload(), json!({"result": "100", "count": 7}));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        assert!(matches!(
            Envelope::parse("not json"),
            Err(FetchError::Parse(_))
        ));
    }
}
