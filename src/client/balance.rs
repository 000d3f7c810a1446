use crate::client::{TelnyxClient, TelnyxError};
use crate::domain::Balance;

#[derive(Debug, Clone, Copy)]
pub struct BalanceService<'a> {
    client: &'a TelnyxClient,
}

impl<'a> BalanceService<'a> {
    pub(crate) fn new(client: &'a TelnyxClient) -> Self {
        Self { client }
    }

    /// Current account balance (`GET /balance`).
    pub async fn retrieve(&self) -> Result<Balance, TelnyxError> {
        self.client.get_data(&["balance"], Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::ApiErrorKind;
    use crate::client::http::HttpMethod;
    use crate::client::testing::{FakeTransport, make_client};

    #[tokio::test]
    async fn retrieve_keeps_exact_amounts() {
        let transport = FakeTransport::new().respond(
            200,
            r#"
            {
              "data": {
                "record_type": "balance",
                "balance": "300.00",
                "credit_limit": 100.00,
                "available_credit": "400.00",
                "pending": "10.00",
                "currency": "USD"
              }
            }
            "#,
        );
        let client = make_client(transport.clone());

        let balance = client.balance().retrieve().await.unwrap();
        assert_eq!(balance.balance.as_str(), "300.00");
        assert_eq!(
            balance.credit_limit.as_ref().map(|it| it.as_str()),
            Some("100.00")
        );
        assert_eq!(balance.currency, "USD");

        let sent = transport.last_request();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url.as_str(), "https://api.example.invalid/v2/balance");
    }

    #[tokio::test]
    async fn bad_key_is_unauthorized() {
        let transport = FakeTransport::new().respond(
            401,
            r#"{"errors": [{"code": "10009", "title": "Authentication failed", "detail": "The API key looks malformed."}]}"#,
        );
        let client = make_client(transport);

        let err = client.balance().retrieve().await.unwrap_err();
        assert_eq!(err.kind(), Some(ApiErrorKind::Unauthorized));
        assert!(!err.is_retryable());
    }
}
