//! Request and response types for the Zarinpal v4 payment API

use serde::{Deserialize, Serialize};

/// Deployment target of the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// Pick the environment from a sandbox flag
    pub fn from_sandbox(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Whether this is the sandbox environment
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Self::Sandbox)
    }

    /// Scheme and host of the environment
    pub fn host(&self) -> &'static str {
        match self {
            Self::Production => hosts::PRODUCTION,
            Self::Sandbox => hosts::SANDBOX,
        }
    }

    /// Base URL of the JSON API, ending in a slash
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.host(), hosts::API_PATH)
    }

    /// Base URL the payer is redirected to, ending in a slash
    pub fn payment_base_url(&self) -> String {
        format!("{}{}", self.host(), hosts::START_PAY_PATH)
    }
}

/// Gateway hosts and paths
pub mod hosts {
    /// Production host
    pub const PRODUCTION: &str = "https://payment.zarinpal.com";
    /// Sandbox host
    pub const SANDBOX: &str = "https://sandbox.zarinpal.com";
    /// Path of the v4 payment API
    pub const API_PATH: &str = "/pg/v4/payment/";
    /// Path of the payer redirect page
    pub const START_PAY_PATH: &str = "/pg/StartPay/";
    /// Endpoint that creates a payment
    pub const REQUEST_ENDPOINT: &str = "request.json";
    /// Endpoint that verifies a payment
    pub const VERIFY_ENDPOINT: &str = "verify.json";
}

/// Verification result codes
pub mod codes {
    /// The payment was verified by this request
    pub const PAYMENT_SUCCESS: i32 = 100;
    /// The payment succeeded and had already been verified
    pub const PAYMENT_ALREADY_VERIFIED: i32 = 101;
}

/// Optional payer details attached to a payment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payer email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the payer mobile number
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Set the merchant's order identifier
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}

/// A split of the payment routed to another account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wage {
    /// Destination IBAN
    pub iban: String,
    /// Amount routed to this destination
    pub amount: u64,
    pub description: String,
}

impl Wage {
    pub fn new(iban: impl Into<String>, amount: u64, description: impl Into<String>) -> Self {
        Self {
            iban: iban.into(),
            amount,
            description: description.into(),
        }
    }
}

/// Parameters of a new payment, without the merchant identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    /// Amount in the smallest currency unit
    pub amount: u64,
    pub description: String,
    /// Absolute URL the gateway redirects the payer to afterwards
    pub callback_url: String,
    pub metadata: Option<Metadata>,
    pub wages: Vec<Wage>,
}

impl NewPayment {
    /// Create payment parameters
    pub fn new(
        amount: u64,
        description: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            callback_url: callback_url.into(),
            metadata: None,
            wages: Vec::new(),
        }
    }

    /// Attach payer metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Replace the wage list
    pub fn with_wages(mut self, wages: Vec<Wage>) -> Self {
        self.wages = wages;
        self
    }

    /// Append a single wage
    pub fn add_wage(mut self, wage: Wage) -> Self {
        self.wages.push(wage);
        self
    }
}

/// Body of `request.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub merchant_id: String,
    pub amount: u64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wages: Vec<Wage>,
}

impl PaymentRequest {
    /// Bind payment parameters to a merchant
    pub fn new(merchant_id: impl Into<String>, payment: &NewPayment) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            amount: payment.amount,
            description: payment.description.clone(),
            metadata: payment.metadata.clone(),
            callback_url: payment.callback_url.clone(),
            wages: payment.wages.clone(),
        }
    }
}

/// Data region of a successful `request.json` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCreationResponse {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    /// Opaque token that identifies the transaction from here on
    pub authority: String,
    #[serde(default)]
    pub fee_type: String,
    #[serde(default)]
    pub fee: u64,
}

/// Body of `verify.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerificationRequest {
    pub merchant_id: String,
    /// Must equal the amount the payment was created with
    pub amount: u64,
    pub authority: String,
}

impl PaymentVerificationRequest {
    pub fn new(merchant_id: impl Into<String>, amount: u64, authority: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            amount,
            authority: authority.into(),
        }
    }
}

/// Data region of a successful `verify.json` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerificationResponse {
    /// 100 on first verification, 101 if the payment was verified before
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub card_hash: String,
    /// Masked card number
    #[serde(default)]
    pub card_pan: String,
    /// Only present when the payment succeeded
    #[serde(default)]
    pub ref_id: Option<i64>,
    #[serde(default)]
    pub fee_type: String,
    #[serde(default)]
    pub fee: u64,
}
