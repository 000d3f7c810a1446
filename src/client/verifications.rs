use crate::client::{TelnyxClient, TelnyxError};
use crate::domain::verifications::{
    ListVerifications, TriggerVerification, Verification, VerifyCode, VerifyCodeResult,
};
use crate::domain::{Page, RawPhoneNumber, ResourceId};
use crate::transport::encode_list_verifications_query;

/// Two-factor verifications over SMS or voice call.
#[derive(Debug, Clone, Copy)]
pub struct VerificationsService<'a> {
    client: &'a TelnyxClient,
}

impl<'a> VerificationsService<'a> {
    pub(crate) fn new(client: &'a TelnyxClient) -> Self {
        Self { client }
    }

    /// Send a code by SMS.
    pub async fn trigger_sms(
        &self,
        request: TriggerVerification,
    ) -> Result<Verification, TelnyxError> {
        self.client
            .post_data(&["verifications", "sms"], &request)
            .await
    }

    /// Read the code out in a voice call.
    pub async fn trigger_call(
        &self,
        request: TriggerVerification,
    ) -> Result<Verification, TelnyxError> {
        self.client
            .post_data(&["verifications", "call"], &request)
            .await
    }

    pub async fn retrieve(&self, id: &ResourceId) -> Result<Verification, TelnyxError> {
        self.client
            .get_data(&["verifications", id.as_str()], Vec::new())
            .await
    }

    pub async fn list_by_phone_number(
        &self,
        phone_number: &RawPhoneNumber,
        request: ListVerifications,
    ) -> Result<Page<Verification>, TelnyxError> {
        self.client
            .get_page(
                &["verifications", "by_phone_number", phone_number.raw()],
                encode_list_verifications_query(&request),
            )
            .await
    }

    /// Check a code the user entered.
    ///
    /// A wrong code is not an error: inspect [`VerifyCodeResult::is_accepted`].
    pub async fn verify_code(
        &self,
        phone_number: &RawPhoneNumber,
        request: VerifyCode,
    ) -> Result<VerifyCodeResult, TelnyxError> {
        self.client
            .post_data(
                &[
                    "verifications",
                    "by_phone_number",
                    phone_number.raw(),
                    "actions",
                    "verify",
                ],
                &request,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::http::HttpMethod;
    use crate::client::testing::{FakeTransport, assert_query, body, make_client};
    use crate::domain::verifications::{VerificationStatus, VerificationType, VerifyResponseCode};

    use super::*;

    const VERIFICATION: &str = r#"
    {
      "data": {
        "id": "12ade33a-21c0-473b-b055-b3c836e1c292",
        "record_type": "verification",
        "phone_number": "+13035551234",
        "type": "sms",
        "status": "pending",
        "verify_profile_id": "12ade33a-21c0-473b-b055-b3c836e1c293",
        "timeout_secs": 300,
        "created_at": "2026-10-01T10:00:00Z"
      }
    }
    "#;

    fn phone() -> RawPhoneNumber {
        RawPhoneNumber::new("+13035551234").unwrap()
    }

    fn profile() -> ResourceId {
        ResourceId::new("12ade33a-21c0-473b-b055-b3c836e1c293").unwrap()
    }

    #[tokio::test]
    async fn trigger_posts_to_channel_endpoint() {
        let transport = FakeTransport::new()
            .respond(200, VERIFICATION)
            .respond(200, VERIFICATION);
        let client = make_client(transport.clone());

        let request = TriggerVerification::new(phone(), profile())
            .with_custom_code("4321")
            .unwrap()
            .with_timeout_secs(300)
            .unwrap();
        let verification = client
            .verifications()
            .trigger_sms(request.clone())
            .await
            .unwrap();
        assert_eq!(verification.status, VerificationStatus::Pending);
        assert_eq!(verification.verification_type, VerificationType::Sms);

        client.verifications().trigger_call(request).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url.path(), "/v2/verifications/sms");
        assert_eq!(requests[1].url.path(), "/v2/verifications/call");
        assert_eq!(
            *body(&requests[0]),
            json!({
                "phone_number": "+13035551234",
                "verify_profile_id": "12ade33a-21c0-473b-b055-b3c836e1c293",
                "custom_code": "4321",
                "timeout_secs": 300
            })
        );
    }

    #[tokio::test]
    async fn retrieve_and_list_by_phone_number() {
        let page = r#"
        {
          "data": [
            {"id": "a", "phone_number": "+13035551234", "type": "sms", "status": "accepted"},
            {"id": "b", "phone_number": "+13035551234", "type": "call", "status": "expired"}
          ],
          "meta": {"page_number": 1, "page_size": 25, "total_pages": 1, "total_results": 2}
        }
        "#;
        let transport = FakeTransport::new()
            .respond(200, VERIFICATION)
            .respond(200, page);
        let client = make_client(transport.clone());

        client
            .verifications()
            .retrieve(&ResourceId::new("12ade33a-21c0-473b-b055-b3c836e1c292").unwrap())
            .await
            .unwrap();
        let listed = client
            .verifications()
            .list_by_phone_number(&phone(), ListVerifications::default())
            .await
            .unwrap();
        assert_eq!(listed.data.len(), 2);
        assert_eq!(listed.data[1].status, VerificationStatus::Expired);
        assert!(!listed.has_next_page());

        let requests = transport.requests();
        assert_eq!(
            requests[0].url.path(),
            "/v2/verifications/12ade33a-21c0-473b-b055-b3c836e1c292"
        );
        assert_eq!(
            requests[1].url.path(),
            "/v2/verifications/by_phone_number/+13035551234"
        );
        assert_query(&requests[1], "page[size]", "20");
    }

    #[tokio::test]
    async fn verify_code_reports_rejection_without_error() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{"data": {"phone_number": "+13035551234", "response_code": "rejected"}}"#,
        );
        let client = make_client(transport.clone());

        let result = client
            .verifications()
            .verify_code(&phone(), VerifyCode::new("0000", profile()).unwrap())
            .await
            .unwrap();
        assert_eq!(result.response_code, VerifyResponseCode::Rejected);
        assert!(!result.is_accepted());

        let sent = transport.last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(
            sent.url.path(),
            "/v2/verifications/by_phone_number/+13035551234/actions/verify"
        );
        assert_eq!(
            *body(&sent),
            json!({"code": "0000", "verify_profile_id": "12ade33a-21c0-473b-b055-b3c836e1c293"})
        );
    }
}
