//! Decoding of the `{data, errors}` envelope the gateway wraps every response in
//!
//! The gateway does not keep a fixed shape for `errors`: it may be an empty
//! list, an empty object, an empty string, or an object describing the
//! failure. Both regions are therefore kept raw first and only parsed into a
//! concrete type once their shape is known.

use crate::{Result, ZarinpalError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::collections::HashMap;

/// Outer response envelope with both regions left undecoded
#[derive(Debug)]
pub struct Envelope {
    pub data: Option<Box<RawValue>>,
    pub errors: Option<Box<RawValue>>,
}

impl Envelope {
    /// Parse the top level of a response body, which must be a JSON object
    pub fn parse(body: &[u8]) -> Result<Self> {
        let mut fields: HashMap<String, Box<RawValue>> = serde_json::from_slice(body)
            .map_err(|e| ZarinpalError::malformed_envelope(e.to_string()))?;

        Ok(Self {
            data: fields.remove("data"),
            errors: fields.remove("errors"),
        })
    }
}

/// Error region of an envelope once it is known to be non-empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub validations: Vec<Value>,
}

/// Split a raw response body into its data region or a gateway error.
///
/// The data region is returned exactly as received; a missing one comes back
/// as `null` so that typed decoding reports it.
pub fn decode(body: &[u8]) -> Result<Box<RawValue>> {
    let envelope = Envelope::parse(body)?;

    if let Some(errors) = envelope.errors.as_deref() {
        if !errors_is_empty(errors)? {
            let error: ErrorBody = serde_json::from_str(errors.get())
                .map_err(|e| ZarinpalError::malformed_envelope(e.to_string()))?;
            return Err(ZarinpalError::gateway(error.code, error.message));
        }
    }

    match envelope.data {
        Some(data) => Ok(data),
        None => RawValue::from_string("null".to_string())
            .map_err(|e| ZarinpalError::malformed_envelope(e.to_string())),
    }
}

/// Decode the envelope and deserialize its data region into `T`
pub fn decode_into<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let data = decode(body)?;
    serde_json::from_str(data.get()).map_err(|e| ZarinpalError::malformed_payload(e.to_string()))
}

fn errors_is_empty(errors: &RawValue) -> Result<bool> {
    let value: Value = serde_json::from_str(errors.get())
        .map_err(|e| ZarinpalError::malformed_envelope(e.to_string()))?;

    Ok(match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::String(text) => text.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentCreationResponse;
    use serde_json::json;

    const DATA: &str = r#"{"code":100,"message":"Success","authority":"A0000000000000000000000000000wwOGYpd","fee_type":"Merchant","fee":100}"#;

    fn envelope_with_errors(errors: &str) -> String {
        format!(r#"{{"data":{},"errors":{}}}"#, DATA, errors)
    }

    #[test]
    fn test_empty_error_regions_return_data_unchanged() {
        for errors in ["[]", "{}", r#""""#, "null"] {
            let body = envelope_with_errors(errors);
            let data = decode(body.as_bytes()).unwrap();
            assert_eq!(data.get(), DATA, "errors region {}", errors);
        }
    }

    #[test]
    fn test_missing_error_region_returns_data() {
        let body = format!(r#"{{"data":{}}}"#, DATA);
        let data = decode(body.as_bytes()).unwrap();
        assert_eq!(data.get(), DATA);
    }

    #[test]
    fn test_error_object_becomes_gateway_error() {
        let body = json!({
            "data": [],
            "errors": {
                "code": -9,
                "message": "The input params invalid, validation error.",
                "validations": [{ "amount": "The amount must be at least 1000." }]
            }
        })
        .to_string();

        match decode(body.as_bytes()) {
            Err(ZarinpalError::Gateway { code, message }) => {
                assert_eq!(code, -9);
                assert_eq!(message, "The input params invalid, validation error.");
            }
            other => panic!("expected gateway error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_object_without_validations() {
        let body = r#"{"data":{},"errors":{"code":-10,"message":"Terminal is not valid"}}"#;
        let err = decode(body.as_bytes()).unwrap_err();
        assert_eq!(err.gateway_code(), Some(-10));
    }

    #[test]
    fn test_unreadable_error_region_is_malformed_envelope() {
        for errors in [r#""boom""#, "[1,2]", r#"{"unexpected":true}"#, "42"] {
            let body = envelope_with_errors(errors);
            assert!(
                matches!(
                    decode(body.as_bytes()),
                    Err(ZarinpalError::MalformedEnvelope { .. })
                ),
                "errors region {}",
                errors
            );
        }
    }

    #[test]
    fn test_non_envelope_body_is_malformed_envelope() {
        for body in ["<html>502 Bad Gateway</html>", "", "42"] {
            assert!(
                matches!(
                    decode(body.as_bytes()),
                    Err(ZarinpalError::MalformedEnvelope { .. })
                ),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_top_level_array_is_malformed_envelope() {
        let single = format!("[{}]", DATA);
        for body in ["[]", single.as_str(), "[1,2]", r#"[{"code":100},[]]"#] {
            assert!(
                matches!(
                    decode(body.as_bytes()),
                    Err(ZarinpalError::MalformedEnvelope { .. })
                ),
                "body {:?}",
                body
            );
        }

        let result: Result<PaymentCreationResponse> = decode_into(single.as_bytes());
        assert!(matches!(result, Err(ZarinpalError::MalformedEnvelope { .. })));
    }

    #[test]
    fn test_null_data_is_malformed_payload() {
        let body = r#"{"data":null,"errors":[]}"#;
        let result: Result<PaymentCreationResponse> = decode_into(body.as_bytes());
        assert!(matches!(result, Err(ZarinpalError::MalformedPayload { .. })));
    }

    #[test]
    fn test_decode_into_typed_response() {
        let body = envelope_with_errors("[]");
        let response: PaymentCreationResponse = decode_into(body.as_bytes()).unwrap();
        assert_eq!(response.code, 100);
        assert_eq!(response.authority, "A0000000000000000000000000000wwOGYpd");
        assert_eq!(response.fee_type, "Merchant");
        assert_eq!(response.fee, 100);
    }

    #[test]
    fn test_decode_into_wrong_shape_is_malformed_payload() {
        let body = r#"{"data":[],"errors":[]}"#;
        let result: Result<PaymentCreationResponse> = decode_into(body.as_bytes());
        assert!(matches!(result, Err(ZarinpalError::MalformedPayload { .. })));
    }

    #[test]
    fn test_missing_data_is_malformed_payload() {
        let body = r#"{"errors":[]}"#;
        let result: Result<PaymentCreationResponse> = decode_into(body.as_bytes());
        assert!(matches!(result, Err(ZarinpalError::MalformedPayload { .. })));
    }
}
