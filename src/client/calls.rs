use serde::Serialize;

use crate::client::{TelnyxClient, TelnyxError};
use crate::domain::CallControlId;
use crate::domain::calls::{
    AnswerCall, BridgeCalls, Call, CallActionResult, DialCall, HangupCall, SendDtmf, SpeakText,
    StartPlayback, StartRecording, StopPlayback, StopRecording, TransferCall,
};

/// Call Control: outbound dials and in-call commands.
///
/// Commands are asynchronous on the Telnyx side; a successful
/// [`CallActionResult`] only means the command was accepted; the outcome
/// arrives later as a webhook.
#[derive(Debug, Clone, Copy)]
pub struct CallsService<'a> {
    client: &'a TelnyxClient,
}

impl<'a> CallsService<'a> {
    pub(crate) fn new(client: &'a TelnyxClient) -> Self {
        Self { client }
    }

    /// Place an outbound call (`POST /calls`).
    pub async fn dial(&self, request: DialCall) -> Result<Call, TelnyxError> {
        self.client.post_data(&["calls"], &request).await
    }

    /// `GET /calls/{call_control_id}`.
    pub async fn retrieve_status(&self, id: &CallControlId) -> Result<Call, TelnyxError> {
        self.client
            .get_data(&["calls", id.as_str()], Vec::new())
            .await
    }

    pub async fn answer(
        &self,
        id: &CallControlId,
        request: AnswerCall,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "answer", &request).await
    }

    pub async fn hangup(
        &self,
        id: &CallControlId,
        request: HangupCall,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "hangup", &request).await
    }

    pub async fn transfer(
        &self,
        id: &CallControlId,
        request: TransferCall,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "transfer", &request).await
    }

    /// Bridge `id` with the call named in `request`.
    pub async fn bridge(
        &self,
        id: &CallControlId,
        request: BridgeCalls,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "bridge", &request).await
    }

    /// Text-to-speech on the call.
    pub async fn speak(
        &self,
        id: &CallControlId,
        request: SpeakText,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "speak", &request).await
    }

    pub async fn start_playback(
        &self,
        id: &CallControlId,
        request: StartPlayback,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "playback_start", &request).await
    }

    pub async fn stop_playback(
        &self,
        id: &CallControlId,
        request: StopPlayback,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "playback_stop", &request).await
    }

    pub async fn start_recording(
        &self,
        id: &CallControlId,
        request: StartRecording,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "record_start", &request).await
    }

    pub async fn stop_recording(
        &self,
        id: &CallControlId,
        request: StopRecording,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "record_stop", &request).await
    }

    pub async fn send_dtmf(
        &self,
        id: &CallControlId,
        request: SendDtmf,
    ) -> Result<CallActionResult, TelnyxError> {
        self.action(id, "send_dtmf", &request).await
    }

    async fn action<B: Serialize>(
        &self,
        id: &CallControlId,
        action: &str,
        body: &B,
    ) -> Result<CallActionResult, TelnyxError> {
        self.client
            .post_data(&["calls", id.as_str(), "actions", action], body)
            .await
    }
}
