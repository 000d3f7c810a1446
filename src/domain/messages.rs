//! Messaging: outbound SMS/MMS and message records.

use serde::{Deserialize, Serialize};

use crate::domain::response::{ApiErrorDetail, Reported};
use crate::domain::validation::{ValidationError, http_url, non_empty};
use crate::domain::value::{Amount, RawPhoneNumber, ResourceId};

pub const MAX_MEDIA_URLS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "SMS")]
    Sms,
    #[serde(rename = "MMS")]
    Mms,
}

#[derive(Debug, Clone, Serialize)]
/// Body of `POST /messages`.
///
/// The sender is either a phone number (`from`) or a messaging profile for
/// number-pool sending; the content is text, media, or both.
pub struct SendMessage {
    to: RawPhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<RawPhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    messaging_profile_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    media_urls: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    message_type: Option<MessageType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_failover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    use_profile_webhooks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_detect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_at: Option<String>,
}

impl SendMessage {
    /// Text message from a specific number.
    pub fn text(
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::blank(to).with_from(from).with_text(text)
    }

    /// Text message sent from the number pool of a messaging profile.
    pub fn from_profile(
        messaging_profile_id: ResourceId,
        to: RawPhoneNumber,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let mut message = Self::blank(to).with_text(text)?;
        message.messaging_profile_id = Some(messaging_profile_id);
        Ok(message)
    }

    /// MMS from a specific number with media only.
    pub fn media(
        from: RawPhoneNumber,
        to: RawPhoneNumber,
        media_urls: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let mut message = Self::blank(to).with_from(from);
        for url in media_urls {
            message = message.with_media_url(url)?;
        }
        message.validate()?;
        Ok(message)
    }

    fn blank(to: RawPhoneNumber) -> Self {
        Self {
            to,
            from: None,
            messaging_profile_id: None,
            text: None,
            subject: None,
            media_urls: Vec::new(),
            message_type: None,
            webhook_url: None,
            webhook_failover_url: None,
            use_profile_webhooks: None,
            auto_detect: None,
            send_at: None,
        }
    }

    /// Check that a sender and some content are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.from.is_none() && self.messaging_profile_id.is_none() {
            return Err(ValidationError::MissingOneOf {
                first: "from",
                second: "messaging_profile_id",
            });
        }
        if self.text.is_none() && self.media_urls.is_empty() {
            return Err(ValidationError::MissingOneOf {
                first: "text",
                second: "media_urls",
            });
        }
        Ok(())
    }

    pub fn with_from(mut self, from: RawPhoneNumber) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::Empty { field: "text" });
        }
        self.text = Some(text);
        Ok(self)
    }

    /// MMS subject line.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        if self.media_urls.len() == MAX_MEDIA_URLS {
            return Err(ValidationError::TooMany {
                field: "media_urls",
                max: MAX_MEDIA_URLS,
                actual: MAX_MEDIA_URLS + 1,
            });
        }
        self.media_urls.push(http_url("media_urls", url)?);
        Ok(self)
    }

    pub fn with_type(mut self, message_type: MessageType) -> Self {
        self.message_type = Some(message_type);
        self
    }

    pub fn with_webhooks(
        mut self,
        url: impl Into<String>,
        failover_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        self.webhook_url = Some(http_url("webhook_url", url)?);
        self.webhook_failover_url = failover_url
            .map(|it| http_url("webhook_failover_url", it))
            .transpose()?;
        self.use_profile_webhooks = Some(false);
        Ok(self)
    }

    /// Let Telnyx pick the encoding that minimizes the number of parts.
    pub fn auto_detect(mut self) -> Self {
        self.auto_detect = Some(true);
        self
    }

    /// Schedule delivery at an ISO-8601 timestamp.
    pub fn scheduled_at(mut self, send_at: impl Into<String>) -> Result<Self, ValidationError> {
        self.send_at = Some(non_empty("send_at", send_at)?);
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    Inbound,
    Outbound,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Scheduled,
    Queued,
    Sending,
    Sent,
    Cancelled,
    Expired,
    SendingFailed,
    DeliveryUnconfirmed,
    Delivered,
    DeliveryFailed,
    Received,
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    /// No further status webhooks are expected after a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Cancelled
                | Self::Expired
                | Self::SendingFailed
                | Self::DeliveryUnconfirmed
                | Self::Delivered
                | Self::DeliveryFailed
                | Self::Received
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageEndpoint {
    pub phone_number: String,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub line_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageRecipient {
    pub phone_number: String,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub line_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageMedia {
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageCost {
    pub amount: Amount,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub record_type: Option<String>,
    pub direction: MessageDirection,
    #[serde(rename = "type")]
    pub message_type: Reported<MessageType>,
    #[serde(default)]
    pub messaging_profile_id: Option<String>,
    pub from: MessageEndpoint,
    #[serde(default)]
    pub to: Vec<MessageRecipient>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub media: Vec<MessageMedia>,
    #[serde(default)]
    pub parts: Option<u32>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub cost: Option<MessageCost>,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn phone(raw: &str) -> RawPhoneNumber {
        RawPhoneNumber::new(raw).unwrap()
    }

    #[test]
    fn text_message_serializes_sender_and_body() {
        let message = SendMessage::text(phone("+18445550001"), phone("+18445550002"), "hi")
            .unwrap()
            .with_type(MessageType::Sms)
            .auto_detect();
        assert_eq!(
            serde_json::to_value(message).unwrap(),
            json!({
                "from": "+18445550001",
                "to": "+18445550002",
                "text": "hi",
                "type": "SMS",
                "auto_detect": true
            })
        );
    }

    #[test]
    fn profile_message_omits_from() {
        let message = SendMessage::from_profile(
            ResourceId::new("400017d2-25a4-4f46-9ba2-9e8dcd3e2f7b").unwrap(),
            phone("+18445550002"),
            "pool",
        )
        .unwrap();
        let body = serde_json::to_value(message).unwrap();
        assert!(body.get("from").is_none());
        assert_eq!(
            body["messaging_profile_id"],
            "400017d2-25a4-4f46-9ba2-9e8dcd3e2f7b"
        );
    }

    #[test]
    fn media_message_enforces_limits() {
        let urls = (0..=MAX_MEDIA_URLS)
            .map(|i| format!("https://cdn.example.com/{i}.png"))
            .collect::<Vec<_>>();
        assert!(matches!(
            SendMessage::media(phone("+1"), phone("+2"), urls),
            Err(ValidationError::TooMany { max: 10, .. })
        ));
        assert!(matches!(
            SendMessage::media(phone("+1"), phone("+2"), Vec::new()),
            Err(ValidationError::MissingOneOf { first: "text", .. })
        ));
        assert!(SendMessage::text(phone("+1"), phone("+2"), "  ").is_err());
    }

    #[test]
    fn message_decodes_outbound_record() {
        let json = r#"
        {
          "id": "40385f64-5717-4562-b3fc-2c963f66afa6",
          "record_type": "message",
          "direction": "outbound",
          "type": "SMS",
          "from": {"phone_number": "+18445550001", "carrier": "Telnyx", "line_type": "Wireless"},
          "to": [{"phone_number": "+18445550002", "status": "queued", "carrier": "T-MOBILE USA, INC."}],
          "text": "hi",
          "media": [],
          "parts": 1,
          "encoding": "GSM-7",
          "cost": {"amount": "0.0051", "currency": "USD"},
          "errors": []
        }
        "#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.direction, MessageDirection::Outbound);
        assert_eq!(message.message_type, Reported::Known(MessageType::Sms));
        assert_eq!(message.to[0].status, DeliveryStatus::Queued);
        assert!(!message.to[0].status.is_terminal());
        assert_eq!(
            message.cost.map(|it| it.amount.into_string()).as_deref(),
            Some("0.0051")
        );
    }

    #[test]
    fn unknown_delivery_status_is_preserved_as_unknown() {
        let recipient: MessageRecipient =
            serde_json::from_str(r#"{"phone_number": "+1", "status": "teleported"}"#).unwrap();
        assert_eq!(recipient.status, DeliveryStatus::Unknown);
    }

    #[test]
    fn new_message_type_is_kept_verbatim() {
        let message: Message = serde_json::from_str(
            r#"{"id": "m1", "direction": "inbound", "type": "RCS", "from": {"phone_number": "+1"}}"#,
        )
        .unwrap();
        assert_eq!(
            message.message_type,
            Reported::Unrecognized("RCS".to_owned())
        );
        assert_eq!(message.message_type.known(), None);
        assert_eq!(serde_json::to_value(MessageType::Mms).unwrap(), json!("MMS"));
    }
}
