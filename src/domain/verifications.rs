use serde::{Deserialize, Serialize};

use crate::domain::pagination::PageParams;
use crate::domain::validation::{ValidationError, in_range, non_empty};
use crate::domain::value::{RawPhoneNumber, ResourceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Accepted,
    Invalid,
    Expired,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    Sms,
    Call,
    Flashcall,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Verification {
    pub id: String,
    pub phone_number: String,
    pub status: VerificationStatus,
    #[serde(rename = "type")]
    pub verification_type: VerificationType,
    #[serde(default)]
    pub verify_profile_id: Option<String>,
    #[serde(default)]
    pub custom_code: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u32>,
    #[serde(default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
/// Body of `POST /verifications/sms` and `POST /verifications/call`.
pub struct TriggerVerification {
    phone_number: RawPhoneNumber,
    verify_profile_id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u32>,
    /// DTMF digits dialed after the call connects (call verifications only).
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
}

impl TriggerVerification {
    pub const MIN_CODE_LEN: usize = 4;
    pub const MAX_CODE_LEN: usize = 10;

    pub fn new(phone_number: RawPhoneNumber, verify_profile_id: ResourceId) -> Self {
        Self {
            phone_number,
            verify_profile_id,
            custom_code: None,
            timeout_secs: None,
            extension: None,
        }
    }

    /// Use a caller-chosen code instead of a generated one.
    pub fn with_custom_code(mut self, code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = non_empty("custom_code", code)?;
        if !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "custom_code",
                reason: "only digits are allowed",
            });
        }
        if !(Self::MIN_CODE_LEN..=Self::MAX_CODE_LEN).contains(&code.len()) {
            return Err(ValidationError::OutOfRange {
                field: "custom_code length",
                min: Self::MIN_CODE_LEN as u64,
                max: Self::MAX_CODE_LEN as u64,
                actual: code.len() as u64,
            });
        }
        self.custom_code = Some(code);
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u32) -> Result<Self, ValidationError> {
        self.timeout_secs = Some(in_range("timeout_secs", secs, 1, 3600)?);
        Ok(self)
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }
}

/// Query of `GET /verifications/by_phone_number/{phone_number}`.
#[derive(Debug, Clone, Default)]
pub struct ListVerifications {
    pub page: PageParams,
}

#[derive(Debug, Clone, Serialize)]
/// Body of `POST /verifications/by_phone_number/{phone_number}/actions/verify`.
pub struct VerifyCode {
    code: String,
    verify_profile_id: ResourceId,
}

impl VerifyCode {
    pub fn new(
        code: impl Into<String>,
        verify_profile_id: ResourceId,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            code: non_empty("code", code)?,
            verify_profile_id,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyResponseCode {
    Accepted,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyCodeResult {
    pub phone_number: String,
    pub response_code: VerifyResponseCode,
}

impl VerifyCodeResult {
    pub fn is_accepted(&self) -> bool {
        self.response_code == VerifyResponseCode::Accepted
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn trigger() -> TriggerVerification {
        TriggerVerification::new(
            RawPhoneNumber::new("+13035551234").unwrap(),
            ResourceId::new("12ade33a-21c0-473b-b055-b3c836e1c292").unwrap(),
        )
    }

    #[test]
    fn custom_code_must_be_four_to_ten_digits() {
        assert!(trigger().with_custom_code("123").is_err());
        assert!(trigger().with_custom_code("12345678901").is_err());
        assert!(matches!(
            trigger().with_custom_code("12a4"),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let body = serde_json::to_value(trigger().with_custom_code("4321").unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "phone_number": "+13035551234",
                "verify_profile_id": "12ade33a-21c0-473b-b055-b3c836e1c292",
                "custom_code": "4321"
            })
        );
    }

    #[test]
    fn verification_decodes_type_and_status() {
        let verification: Verification = serde_json::from_str(
            r#"{
              "id": "12ade33a-21c0-473b-b055-b3c836e1c292",
              "phone_number": "+13035551234",
              "status": "pending",
              "type": "sms",
              "timeout_secs": 300
            }"#,
        )
        .unwrap();
        assert_eq!(verification.status, VerificationStatus::Pending);
        assert_eq!(verification.verification_type, VerificationType::Sms);
        assert_eq!(verification.timeout_secs, Some(300));
    }

    #[test]
    fn verify_code_result_reports_acceptance() {
        let result: VerifyCodeResult =
            serde_json::from_str(r#"{"phone_number": "+13035551234", "response_code": "accepted"}"#)
                .unwrap();
        assert!(result.is_accepted());
    }
}
