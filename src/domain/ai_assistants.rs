//! AI voice/messaging assistants.
//!
//! These endpoints return bare JSON objects rather than a `data` envelope.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::response::Reported;
use crate::domain::validation::{ValidationError, http_url, non_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnabledFeature {
    Telephony,
    Messaging,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookTool {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<WebhookToolHeader>,
    /// JSON schema of the body the model fills in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_parameters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookToolHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HangupTool {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTarget {
    pub name: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTool {
    pub targets: Vec<TransferTarget>,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalTool {
    pub bucket_ids: Vec<String>,
}

/// Tool the assistant can invoke, tagged by `type`.
///
/// Tool types without a variant here decode into [`AssistantTool::Other`] and
/// serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantTool {
    Webhook { webhook: WebhookTool },
    Hangup { hangup: HangupTool },
    Transfer { transfer: TransferTool },
    Retrieval { retrieval: RetrievalTool },
    Other(serde_json::Value),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum KnownToolRef<'a> {
    Webhook { webhook: &'a WebhookTool },
    Hangup { hangup: &'a HangupTool },
    Transfer { transfer: &'a TransferTool },
    Retrieval { retrieval: &'a RetrievalTool },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum KnownTool {
    Webhook { webhook: WebhookTool },
    Hangup { hangup: HangupTool },
    Transfer { transfer: TransferTool },
    Retrieval { retrieval: RetrievalTool },
}

impl Serialize for AssistantTool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Webhook { webhook } => KnownToolRef::Webhook { webhook }.serialize(serializer),
            Self::Hangup { hangup } => KnownToolRef::Hangup { hangup }.serialize(serializer),
            Self::Transfer { transfer } => {
                KnownToolRef::Transfer { transfer }.serialize(serializer)
            }
            Self::Retrieval { retrieval } => {
                KnownToolRef::Retrieval { retrieval }.serialize(serializer)
            }
            Self::Other(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AssistantTool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let known = matches!(
            raw.get("type").and_then(serde_json::Value::as_str),
            Some("webhook" | "hangup" | "transfer" | "retrieval")
        );
        if !known {
            return Ok(Self::Other(raw));
        }
        let tool = KnownTool::deserialize(raw).map_err(D::Error::custom)?;
        Ok(match tool {
            KnownTool::Webhook { webhook } => Self::Webhook { webhook },
            KnownTool::Hangup { hangup } => Self::Hangup { hangup },
            KnownTool::Transfer { transfer } => Self::Transfer { transfer },
            KnownTool::Retrieval { retrieval } => Self::Retrieval { retrieval },
        })
    }
}

impl AssistantTool {
    pub fn webhook(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Webhook {
            webhook: WebhookTool {
                name: non_empty("tools.webhook.name", name)?,
                description: description.into(),
                url: http_url("tools.webhook.url", url)?,
                method: None,
                headers: Vec::new(),
                body_parameters: None,
            },
        })
    }

    pub fn hangup(description: impl Into<String>) -> Self {
        Self::Hangup {
            hangup: HangupTool {
                description: description.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// e.g. `Telnyx.KokoroTTS.af_heart` or `AWS.Polly.Joanna-Neural`.
    pub voice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Assistant {
    pub id: String,
    pub name: String,
    pub model: String,
    pub instructions: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
    #[serde(default)]
    pub voice_settings: Option<VoiceSettings>,
    #[serde(default)]
    pub transcription: Option<TranscriptionSettings>,
    #[serde(default)]
    pub enabled_features: Vec<Reported<EnabledFeature>>,
    #[serde(default)]
    pub dynamic_variables: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub dynamic_variables_webhook_url: Option<String>,
    #[serde(default)]
    pub llm_api_key_ref: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssistantsList {
    #[serde(default)]
    pub data: Vec<Assistant>,
}

#[derive(Debug, Clone, Serialize)]
/// Body of `POST /ai/assistants`.
pub struct CreateAssistant {
    name: String,
    model: String,
    instructions: String,
    #[serde(flatten)]
    settings: AssistantSettings,
}

/// Optional assistant fields shared by create and update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssistantSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AssistantTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<TranscriptionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_features: Option<Vec<EnabledFeature>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_variables: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_variables_webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_api_key_ref: Option<String>,
}

impl CreateAssistant {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_empty("name", name)?,
            model: non_empty("model", model)?,
            instructions: non_empty("instructions", instructions)?,
            settings: AssistantSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: AssistantSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.settings.greeting = Some(greeting.into());
        self
    }

    pub fn with_tool(mut self, tool: AssistantTool) -> Self {
        self.settings.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Result<Self, ValidationError> {
        self.settings.voice_settings = Some(VoiceSettings {
            voice: non_empty("voice_settings.voice", voice)?,
            voice_speed: None,
            api_key_ref: None,
        });
        Ok(self)
    }

    pub fn with_features(mut self, features: Vec<EnabledFeature>) -> Self {
        self.settings.enabled_features = Some(features);
        self
    }
}

/// Body of `POST /ai/assistants/{id}`; only set fields are changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAssistant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub settings: AssistantSettings,
    /// Make this version the one served to callers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promote_to_main: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
/// Body of `POST /ai/assistants/{id}/chat`.
pub struct AssistantChat {
    content: String,
    conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl AssistantChat {
    pub fn new(
        conversation_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }
        Ok(Self {
            content,
            conversation_id: non_empty("conversation_id", conversation_id)?,
            name: None,
        })
    }

    /// Display name of the human participant.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssistantChatReply {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_flattens_settings_and_tags_tools() {
        let request = CreateAssistant::new("Support", "openai/gpt-4o", "Be brief.")
            .unwrap()
            .with_greeting("Hi!")
            .with_tool(AssistantTool::hangup("End the call when done"))
            .with_tool(
                AssistantTool::webhook("lookup", "Find an order", "https://api.example.com/o")
                    .unwrap(),
            )
            .with_features(vec![EnabledFeature::Telephony]);

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "name": "Support",
                "model": "openai/gpt-4o",
                "instructions": "Be brief.",
                "greeting": "Hi!",
                "tools": [
                    {"type": "hangup", "hangup": {"description": "End the call when done"}},
                    {"type": "webhook", "webhook": {
                        "name": "lookup",
                        "description": "Find an order",
                        "url": "https://api.example.com/o"
                    }}
                ],
                "enabled_features": ["telephony"]
            })
        );
    }

    #[test]
    fn create_requires_name_model_and_instructions() {
        assert!(CreateAssistant::new("", "m", "i").is_err());
        assert!(CreateAssistant::new("n", " ", "i").is_err());
        assert!(matches!(
            CreateAssistant::new("n", "m", ""),
            Err(ValidationError::Empty {
                field: "instructions"
            })
        ));
    }

    #[test]
    fn unmodelled_tool_types_survive_an_update() {
        let tools: Vec<AssistantTool> = serde_json::from_str(
            r#"[{"type": "send_dtmf", "send_dtmf": {"digits": "1"}}, {"type": "retrieval", "retrieval": {"bucket_ids": ["kb"]}}]"#,
        )
        .unwrap();
        assert_eq!(
            tools[0],
            AssistantTool::Other(json!({"type": "send_dtmf", "send_dtmf": {"digits": "1"}}))
        );
        assert_eq!(
            tools[1],
            AssistantTool::Retrieval {
                retrieval: RetrievalTool {
                    bucket_ids: vec!["kb".to_owned()]
                }
            }
        );

        let update = UpdateAssistant {
            settings: AssistantSettings {
                tools: Some(tools),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            json!({
                "tools": [
                    {"type": "send_dtmf", "send_dtmf": {"digits": "1"}},
                    {"type": "retrieval", "retrieval": {"bucket_ids": ["kb"]}}
                ]
            })
        );
    }

    #[test]
    fn malformed_known_tool_is_an_error() {
        let result = serde_json::from_str::<AssistantTool>(r#"{"type": "webhook", "webhook": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_features_are_reported_verbatim() {
        let assistant: Assistant = serde_json::from_str(
            r#"{"id": "a", "name": "n", "model": "m", "instructions": "i", "enabled_features": ["messaging", "video"]}"#,
        )
        .unwrap();
        assert_eq!(
            assistant.enabled_features,
            vec![
                Reported::Known(EnabledFeature::Messaging),
                Reported::Unrecognized("video".to_owned())
            ]
        );
    }

    #[test]
    fn chat_requires_content() {
        assert!(AssistantChat::new("conv-1", " ").is_err());
        let body = serde_json::to_value(AssistantChat::new("conv-1", "hello").unwrap()).unwrap();
        assert_eq!(body, json!({"content": "hello", "conversation_id": "conv-1"}));
    }
}
