//! Simplified view of a verification result

use crate::types::{codes, PaymentVerificationResponse};
use serde::{Deserialize, Serialize};

/// Outcome of a verification, reduced to what a shop needs to act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    /// The payment went through
    pub is_successful: bool,
    /// The payment had already been verified by an earlier call
    pub is_repeated: bool,
    pub ref_id: Option<i64>,
    pub message: String,
}

/// Map a verification response onto [`PaymentStatus`].
///
/// `verify.json` answers both "confirm this payment" and "was this payment
/// confirmed", told apart only by the result code.
pub fn classify(verification: &PaymentVerificationResponse) -> PaymentStatus {
    let (is_successful, is_repeated) = match verification.code {
        codes::PAYMENT_SUCCESS => (true, false),
        codes::PAYMENT_ALREADY_VERIFIED => (true, true),
        _ => (false, false),
    };

    PaymentStatus {
        is_successful,
        is_repeated,
        ref_id: verification.ref_id,
        message: verification.message.clone(),
    }
}

impl From<&PaymentVerificationResponse> for PaymentStatus {
    fn from(verification: &PaymentVerificationResponse) -> Self {
        classify(verification)
    }
}

impl From<PaymentVerificationResponse> for PaymentStatus {
    fn from(verification: PaymentVerificationResponse) -> Self {
        classify(&verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verification(code: i32, ref_id: Option<i64>, message: &str) -> PaymentVerificationResponse {
        PaymentVerificationResponse {
            code,
            message: message.to_string(),
            card_hash: "1EBE3EBEBE35C7EC0F8D6EE4F2F859107A87822CA179BC9528767EA7B5489B69".to_string(),
            card_pan: "502229******5995".to_string(),
            ref_id,
            fee_type: "Merchant".to_string(),
            fee: 0,
        }
    }

    #[test]
    fn test_first_verification() {
        let status = classify(&verification(100, Some(201), "Paid"));
        assert!(status.is_successful);
        assert!(!status.is_repeated);
        assert_eq!(status.ref_id, Some(201));
        assert_eq!(status.message, "Paid");
    }

    #[test]
    fn test_repeated_verification() {
        let status = classify(&verification(101, Some(201), "Verified"));
        assert!(status.is_successful);
        assert!(status.is_repeated);
        assert_eq!(status.ref_id, Some(201));
        assert_eq!(status.message, "Verified");
    }

    #[test]
    fn test_other_codes_fail() {
        for code in [0, 99, 102, 200, -9, -51, i32::MIN, i32::MAX] {
            let status = classify(&verification(code, None, "Failed"));
            assert!(!status.is_successful, "code {}", code);
            assert!(!status.is_repeated, "code {}", code);
            assert_eq!(status.ref_id, None);
            assert_eq!(status.message, "Failed");
        }
    }

    #[test]
    fn test_ref_id_passes_through_on_failure() {
        let status = classify(&verification(-50, Some(7), "Amount mismatch"));
        assert!(!status.is_successful);
        assert_eq!(status.ref_id, Some(7));
        assert_eq!(status.message, "Amount mismatch");
    }

    #[test]
    fn test_from_matches_classify() {
        let response = verification(101, Some(42), "Verified");
        assert_eq!(PaymentStatus::from(&response), classify(&response));
        assert_eq!(PaymentStatus::from(response.clone()), classify(&response));
    }
}
