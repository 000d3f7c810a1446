use crate::client::{TelnyxClient, TelnyxError};
use crate::domain::ResourceId;
use crate::domain::messages::{Message, SendMessage};

/// Messaging: send SMS/MMS and look up message records.
#[derive(Debug, Clone, Copy)]
pub struct MessagesService<'a> {
    client: &'a TelnyxClient,
}

impl<'a> MessagesService<'a> {
    pub(crate) fn new(client: &'a TelnyxClient) -> Self {
        Self { client }
    }

    /// Send a message (`POST /messages`).
    ///
    /// Errors:
    /// - Returns [`TelnyxError::Validation`] when the message has no sender or no content,
    /// - [`TelnyxError::Api`] for non-2xx responses (e.g. `40310` invalid `from`).
    pub async fn send(&self, request: SendMessage) -> Result<Message, TelnyxError> {
        request.validate()?;
        self.client.post_data(&["messages"], &request).await
    }

    pub async fn retrieve(&self, id: &ResourceId) -> Result<Message, TelnyxError> {
        self.client
            .get_data(&["messages", id.as_str()], Vec::new())
            .await
    }

    /// Cancel a message scheduled with [`SendMessage::scheduled_at`].
    ///
    /// Only messages that have not been sent yet can be cancelled.
    pub async fn cancel_scheduled(&self, id: &ResourceId) -> Result<Message, TelnyxError> {
        self.client.delete_data(&["messages", id.as_str()]).await
    }
}
