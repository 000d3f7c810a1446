use crate::client::{TelnyxClient, TelnyxError};
use crate::domain::ai_assistants::{
    Assistant, AssistantChat, AssistantChatReply, AssistantsList, CreateAssistant,
    UpdateAssistant,
};
use crate::domain::{Deleted, ResourceId};

/// AI voice/chat assistants.
///
/// These endpoints answer with bare JSON objects, not the usual `data` envelope.
#[derive(Debug, Clone, Copy)]
pub struct AiAssistantsService<'a> {
    client: &'a TelnyxClient,
}

impl<'a> AiAssistantsService<'a> {
    pub(crate) fn new(client: &'a TelnyxClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: CreateAssistant) -> Result<Assistant, TelnyxError> {
        self.client.post_json(&["ai", "assistants"], &request).await
    }

    /// All assistants of the account. This endpoint is not paginated.
    pub async fn list(&self) -> Result<Vec<Assistant>, TelnyxError> {
        let list: AssistantsList = self.client.get_json(&["ai", "assistants"]).await?;
        Ok(list.data)
    }

    pub async fn retrieve(&self, id: &ResourceId) -> Result<Assistant, TelnyxError> {
        self.client.get_json(&["ai", "assistants", id.as_str()]).await
    }

    /// `POST /ai/assistants/{id}`; only set fields are changed.
    pub async fn update(
        &self,
        id: &ResourceId,
        request: UpdateAssistant,
    ) -> Result<Assistant, TelnyxError> {
        self.client
            .post_json(&["ai", "assistants", id.as_str()], &request)
            .await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<Deleted, TelnyxError> {
        self.client
            .delete_json(&["ai", "assistants", id.as_str()])
            .await
    }

    /// Send one user turn to the assistant and wait for its reply.
    pub async fn chat(
        &self,
        id: &ResourceId,
        request: AssistantChat,
    ) -> Result<AssistantChatReply, TelnyxError> {
        self.client
            .post_json(&["ai", "assistants", id.as_str(), "chat"], &request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::http::HttpMethod;
    use crate::client::testing::{FakeTransport, body, make_client};
    use crate::domain::Reported;
    use crate::domain::ai_assistants::{AssistantTool, EnabledFeature};

    use super::*;

    const ASSISTANT: &str = r#"
    {
      "id": "assistant-3c1d2b3f-4e5a-4b6c-8d7e-9f0a1b2c3d4e",
      "name": "Support",
      "model": "openai/gpt-4o",
      "instructions": "Be brief.",
      "greeting": "Hi! How can I help?",
      "tools": [
        {"type": "hangup", "hangup": {"description": "End the call when done"}},
        {"type": "send_dtmf", "send_dtmf": {}}
      ],
      "enabled_features": ["telephony"],
      "created_at": "2026-09-01T12:00:00Z"
    }
    "#;

    fn id() -> ResourceId {
        ResourceId::new("assistant-3c1d2b3f-4e5a-4b6c-8d7e-9f0a1b2c3d4e").unwrap()
    }

    #[tokio::test]
    async fn create_posts_bare_body_and_parses_bare_response() {
        let transport = FakeTransport::new().respond(200, ASSISTANT);
        let client = make_client(transport.clone());

        let request = CreateAssistant::new("Support", "openai/gpt-4o", "Be brief.")
            .unwrap()
            .with_greeting("Hi! How can I help?")
            .with_tool(AssistantTool::hangup("End the call when done"));
        let assistant = client.ai_assistants().create(request).await.unwrap();

        assert_eq!(assistant.name, "Support");
        assert_eq!(
            assistant.enabled_features,
            vec![Reported::Known(EnabledFeature::Telephony)]
        );
        assert_eq!(assistant.tools.len(), 2);
        assert!(matches!(assistant.tools[1], AssistantTool::Other(_)));

        let sent = transport.last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url.path(), "/v2/ai/assistants");
        assert_eq!(
            *body(&sent),
            json!({
                "name": "Support",
                "model": "openai/gpt-4o",
                "instructions": "Be brief.",
                "greeting": "Hi! How can I help?",
                "tools": [{"type": "hangup", "hangup": {"description": "End the call when done"}}]
            })
        );
    }

    #[tokio::test]
    async fn list_unwraps_data_array() {
        let response = format!(r#"{{"data": [{ASSISTANT}]}}"#);
        let transport = FakeTransport::new().respond(200, response);
        let client = make_client(transport.clone());

        let assistants = client.ai_assistants().list().await.unwrap();
        assert_eq!(assistants.len(), 1);
        assert_eq!(assistants[0].model, "openai/gpt-4o");
        assert_eq!(transport.last_request().method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn retrieve_update_delete_and_chat() {
        let transport = FakeTransport::new()
            .respond(200, ASSISTANT)
            .respond(200, ASSISTANT)
            .respond(
                200,
                r#"{"id": "assistant-3c1d2b3f-4e5a-4b6c-8d7e-9f0a1b2c3d4e", "object": "assistant", "deleted": true}"#,
            )
            .respond(200, r#"{"content": "Your order ships tomorrow."}"#);
        let client = make_client(transport.clone());
        let assistants = client.ai_assistants();

        assistants.retrieve(&id()).await.unwrap();
        let update = UpdateAssistant {
            instructions: Some("Be very brief.".to_owned()),
            promote_to_main: Some(true),
            ..Default::default()
        };
        assistants.update(&id(), update).await.unwrap();
        let deleted = assistants.delete(&id()).await.unwrap();
        assert!(deleted.deleted);
        let reply = assistants
            .chat(
                &id(),
                AssistantChat::new("conv-42", "Where is my order?").unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(reply.content, "Your order ships tomorrow.");

        let requests = transport.requests();
        let base = "/v2/ai/assistants/assistant-3c1d2b3f-4e5a-4b6c-8d7e-9f0a1b2c3d4e";
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url.path(), base);
        assert_eq!(requests[1].method, HttpMethod::Post);
        assert_eq!(
            *body(&requests[1]),
            json!({"instructions": "Be very brief.", "promote_to_main": true})
        );
        assert_eq!(requests[2].method, HttpMethod::Delete);
        assert_eq!(requests[3].url.path(), format!("{base}/chat"));
        assert_eq!(
            *body(&requests[3]),
            json!({"content": "Where is my order?", "conversation_id": "conv-42"})
        );
    }

    #[tokio::test]
    async fn enveloped_response_is_a_parse_error() {
        let transport = FakeTransport::new().respond(200, r#"{"data": {"id": "x"}}"#);
        let client = make_client(transport);

        let err = client.ai_assistants().retrieve(&id()).await.unwrap_err();
        assert!(matches!(err, TelnyxError::Parse(_)));
    }
}
