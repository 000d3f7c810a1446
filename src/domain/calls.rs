//! Call Control: dialing, inspecting, and driving live call legs.

use serde::{Deserialize, Serialize};

use crate::domain::validation::{ValidationError, http_url, in_range, non_empty};
use crate::domain::value::{CallControlId, RawPhoneNumber, ResourceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookMethod {
    Post,
    Get,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnsweringMachineDetection {
    Premium,
    Detect,
    DetectBeep,
    DetectWords,
    GreetingEnd,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordChannels {
    Single,
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    Wav,
    Mp3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamTrack {
    InboundTrack,
    OutboundTrack,
    BothTracks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakPayloadType {
    Text,
    Ssml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakServiceLevel {
    Basic,
    Premium,
}

/// Which legs of a bridged call hear the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLegs {
    #[serde(rename = "self")]
    Own,
    Opposite,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomSipHeader {
    name: String,
    value: String,
}

impl CustomSipHeader {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_empty("custom_headers.name", name)?,
            value: value.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

// Media streams are pushed over WebSockets.
fn stream_url(url: impl Into<String>) -> Result<String, ValidationError> {
    let url = non_empty("stream_url", url)?;
    if !(url.starts_with("wss://") || url.starts_with("ws://")) {
        return Err(ValidationError::InvalidUrl {
            field: "stream_url",
            input: url,
        });
    }
    Ok(url)
}

#[derive(Debug, Clone, Serialize)]
/// Body of `POST /calls`.
pub struct DialCall {
    connection_id: ResourceId,
    to: RawPhoneNumber,
    from: RawPhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_limit_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answering_machine_detection: Option<AnsweringMachineDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url_method: Option<WebhookMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_channels: Option<RecordChannels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_format: Option<RecordFormat>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    custom_headers: Vec<CustomSipHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_track: Option<StreamTrack>,
}

impl DialCall {
    pub const MIN_TIMEOUT_SECS: u32 = 5;
    pub const MAX_TIMEOUT_SECS: u32 = 600;
    pub const MIN_TIME_LIMIT_SECS: u32 = 30;
    pub const MAX_TIME_LIMIT_SECS: u32 = 14_400;

    pub fn new(connection_id: ResourceId, to: RawPhoneNumber, from: RawPhoneNumber) -> Self {
        Self {
            connection_id,
            to,
            from,
            from_display_name: None,
            timeout_secs: None,
            time_limit_secs: None,
            answering_machine_detection: None,
            webhook_url: None,
            webhook_url_method: None,
            client_state: None,
            command_id: None,
            audio_url: None,
            record: None,
            record_channels: None,
            record_format: None,
            custom_headers: Vec::new(),
            stream_url: None,
            stream_track: None,
        }
    }

    pub fn with_from_display_name(mut self, name: impl Into<String>) -> Self {
        self.from_display_name = Some(name.into());
        self
    }

    /// Ring timeout before the call is considered unanswered.
    pub fn with_timeout_secs(mut self, secs: u32) -> Result<Self, ValidationError> {
        self.timeout_secs = Some(in_range(
            "timeout_secs",
            secs,
            Self::MIN_TIMEOUT_SECS,
            Self::MAX_TIMEOUT_SECS,
        )?);
        Ok(self)
    }

    /// Maximum call duration after answer.
    pub fn with_time_limit_secs(mut self, secs: u32) -> Result<Self, ValidationError> {
        self.time_limit_secs = Some(in_range(
            "time_limit_secs",
            secs,
            Self::MIN_TIME_LIMIT_SECS,
            Self::MAX_TIME_LIMIT_SECS,
        )?);
        Ok(self)
    }

    pub fn with_answering_machine_detection(mut self, mode: AnsweringMachineDetection) -> Self {
        self.answering_machine_detection = Some(mode);
        self
    }

    pub fn with_webhook(
        mut self,
        url: impl Into<String>,
        method: WebhookMethod,
    ) -> Result<Self, ValidationError> {
        self.webhook_url = Some(http_url("webhook_url", url)?);
        self.webhook_url_method = Some(method);
        Ok(self)
    }

    /// Opaque base64 state echoed back on every webhook of this leg.
    pub fn with_client_state(mut self, state: impl Into<String>) -> Self {
        self.client_state = Some(state.into());
        self
    }

    pub fn with_command_id(mut self, command_id: impl Into<String>) -> Self {
        self.command_id = Some(command_id.into());
        self
    }

    /// Audio played to the callee as soon as the call is answered.
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        self.audio_url = Some(http_url("audio_url", url)?);
        Ok(self)
    }

    /// Record the call from the moment it is answered.
    pub fn with_recording(mut self, channels: RecordChannels, format: RecordFormat) -> Self {
        self.record = Some("record-from-answer");
        self.record_channels = Some(channels);
        self.record_format = Some(format);
        self
    }

    pub fn with_custom_header(mut self, header: CustomSipHeader) -> Self {
        self.custom_headers.push(header);
        self
    }

    pub fn with_stream(
        mut self,
        url: impl Into<String>,
        track: StreamTrack,
    ) -> Result<Self, ValidationError> {
        self.stream_url = Some(stream_url(url)?);
        self.stream_track = Some(track);
        Ok(self)
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// A call leg as returned by `POST /calls` and `GET /calls/{id}`.
pub struct Call {
    pub call_control_id: String,
    #[serde(default)]
    pub call_leg_id: Option<String>,
    #[serde(default)]
    pub call_session_id: Option<String>,
    #[serde(default)]
    pub is_alive: bool,
    #[serde(default)]
    pub call_duration: Option<u64>,
    #[serde(default)]
    pub client_state: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub record_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Acknowledgement returned by every `/calls/{id}/actions/*` command.
pub struct CallActionResult {
    pub result: String,
}

impl CallActionResult {
    pub fn is_ok(&self) -> bool {
        self.result.eq_ignore_ascii_case("ok")
    }
}

/// Fields shared by every call command: client state and idempotency key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnswerCall {
    #[serde(flatten)]
    command: CommandOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url_method: Option<WebhookMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream_track: Option<StreamTrack>,
}

impl AnswerCall {
    /// Send this leg's webhooks somewhere other than the connection default.
    pub fn with_webhook(
        mut self,
        url: impl Into<String>,
        method: WebhookMethod,
    ) -> Result<Self, ValidationError> {
        self.webhook_url = Some(http_url("webhook_url", url)?);
        self.webhook_url_method = Some(method);
        Ok(self)
    }

    pub fn with_stream(
        mut self,
        url: impl Into<String>,
        track: StreamTrack,
    ) -> Result<Self, ValidationError> {
        self.stream_url = Some(stream_url(url)?);
        self.stream_track = Some(track);
        Ok(self)
    }

    pub fn with_command(mut self, command: CommandOptions) -> Self {
        self.command = command;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct HangupCall {
    #[serde(flatten)]
    pub command: CommandOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferCall {
    to: RawPhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<RawPhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    #[serde(flatten)]
    command: CommandOptions,
}

impl TransferCall {
    pub fn new(to: RawPhoneNumber) -> Self {
        Self {
            to,
            from: None,
            timeout_secs: None,
            audio_url: None,
            webhook_url: None,
            command: CommandOptions::default(),
        }
    }

    pub fn with_from(mut self, from: RawPhoneNumber) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u32) -> Result<Self, ValidationError> {
        self.timeout_secs = Some(in_range(
            "timeout_secs",
            secs,
            DialCall::MIN_TIMEOUT_SECS,
            DialCall::MAX_TIMEOUT_SECS,
        )?);
        Ok(self)
    }

    /// Ringback audio played to the caller while the transfer target rings.
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        self.audio_url = Some(http_url("audio_url", url)?);
        Ok(self)
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        self.webhook_url = Some(http_url("webhook_url", url)?);
        Ok(self)
    }

    pub fn with_command(mut self, command: CommandOptions) -> Self {
        self.command = command;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BridgeCalls {
    /// The other leg to bridge with.
    call_control_id: CallControlId,
    #[serde(skip_serializing_if = "Option::is_none")]
    park_after_unbridge: Option<&'static str>,
    #[serde(flatten)]
    command: CommandOptions,
}

impl BridgeCalls {
    pub fn with(other: CallControlId) -> Self {
        Self {
            call_control_id: other,
            park_after_unbridge: None,
            command: CommandOptions::default(),
        }
    }

    /// Park this leg instead of hanging it up when the other leg leaves.
    pub fn park_after_unbridge(mut self) -> Self {
        self.park_after_unbridge = Some("self");
        self
    }

    pub fn with_command(mut self, command: CommandOptions) -> Self {
        self.command = command;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeakText {
    payload: String,
    voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload_type: Option<SpeakPayloadType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_level: Option<SpeakServiceLevel>,
    #[serde(flatten)]
    command: CommandOptions,
}

impl SpeakText {
    /// `voice` is either `male`/`female` or a provider voice such as `Polly.Joanna`.
    pub fn new(
        payload: impl Into<String>,
        voice: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let payload = payload.into();
        if payload.trim().is_empty() {
            return Err(ValidationError::Empty { field: "payload" });
        }
        Ok(Self {
            payload,
            voice: non_empty("voice", voice)?,
            language: None,
            payload_type: None,
            service_level: None,
            command: CommandOptions::default(),
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn ssml(mut self) -> Self {
        self.payload_type = Some(SpeakPayloadType::Ssml);
        self
    }

    pub fn with_service_level(mut self, level: SpeakServiceLevel) -> Self {
        self.service_level = Some(level);
        self
    }

    pub fn with_command(mut self, command: CommandOptions) -> Self {
        self.command = command;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPlayback {
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_name: Option<String>,
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    loop_count: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    overlay: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_legs: Option<TargetLegs>,
    #[serde(flatten)]
    command: CommandOptions,
}

impl StartPlayback {
    /// Exactly one of `audio_url` or `media_name` must be provided.
    pub fn new(
        audio_url: Option<String>,
        media_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let (audio_url, media_name) = match (audio_url, media_name) {
            (Some(_), Some(_)) => {
                return Err(ValidationError::Conflict {
                    first: "audio_url",
                    second: "media_name",
                });
            }
            (None, None) => {
                return Err(ValidationError::MissingOneOf {
                    first: "audio_url",
                    second: "media_name",
                });
            }
            (Some(url), None) => (Some(http_url("audio_url", url)?), None),
            (None, Some(name)) => (None, Some(non_empty("media_name", name)?)),
        };
        Ok(Self {
            audio_url,
            media_name,
            loop_count: None,
            overlay: false,
            target_legs: None,
            command: CommandOptions::default(),
        })
    }

    pub fn audio_url(url: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Some(url.into()), None)
    }

    pub fn media_name(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(None, Some(name.into()))
    }

    pub fn with_loop_count(mut self, count: u32) -> Self {
        self.loop_count = Some(count);
        self
    }

    /// Mix the audio over an already running playback instead of replacing it.
    pub fn overlay(mut self) -> Self {
        self.overlay = true;
        self
    }

    pub fn with_target_legs(mut self, legs: TargetLegs) -> Self {
        self.target_legs = Some(legs);
        self
    }

    pub fn with_command(mut self, command: CommandOptions) -> Self {
        self.command = command;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StopPlayback {
    /// `all` (default) or `current`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub overlay: bool,
    #[serde(flatten)]
    pub command: CommandOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartRecording {
    format: RecordFormat,
    channels: RecordChannels,
    #[serde(skip_serializing_if = "Option::is_none")]
    play_beep: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u32>,
    #[serde(flatten)]
    command: CommandOptions,
}

impl StartRecording {
    pub const MAX_LENGTH_SECS: u32 = 14_400;

    pub fn new(format: RecordFormat, channels: RecordChannels) -> Self {
        Self {
            format,
            channels,
            play_beep: None,
            max_length: None,
            timeout_secs: None,
            command: CommandOptions::default(),
        }
    }

    pub fn with_beep(mut self, play_beep: bool) -> Self {
        self.play_beep = Some(play_beep);
        self
    }

    /// Maximum recording length in seconds; `0` means unlimited.
    pub fn with_max_length(mut self, secs: u32) -> Result<Self, ValidationError> {
        self.max_length = Some(in_range("max_length", secs, 0, Self::MAX_LENGTH_SECS)?);
        Ok(self)
    }

    /// Stop after this many seconds of silence; `0` disables the check.
    pub fn with_silence_timeout_secs(mut self, secs: u32) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_command(mut self, command: CommandOptions) -> Self {
        self.command = command;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StopRecording {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_id: Option<String>,
    #[serde(flatten)]
    pub command: CommandOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendDtmf {
    digits: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_millis: Option<u32>,
    #[serde(flatten)]
    command: CommandOptions,
}

impl SendDtmf {
    pub const MIN_DURATION_MILLIS: u32 = 100;
    pub const MAX_DURATION_MILLIS: u32 = 500;

    /// Digits may contain `0-9`, `*`, `#`, `A-D`, and `w`/`W` pauses.
    pub fn new(digits: impl Into<String>) -> Result<Self, ValidationError> {
        let digits = non_empty("digits", digits)?;
        let valid = digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '*' | '#' | 'w' | 'W' | 'A'..='D'));
        if !valid {
            return Err(ValidationError::InvalidFormat {
                field: "digits",
                reason: "only 0-9, *, #, A-D, w and W are allowed",
            });
        }
        Ok(Self {
            digits,
            duration_millis: None,
            command: CommandOptions::default(),
        })
    }

    pub fn with_duration_millis(mut self, millis: u32) -> Result<Self, ValidationError> {
        self.duration_millis = Some(in_range(
            "duration_millis",
            millis,
            Self::MIN_DURATION_MILLIS,
            Self::MAX_DURATION_MILLIS,
        )?);
        Ok(self)
    }

    pub fn with_command(mut self, command: CommandOptions) -> Self {
        self.command = command;
        self
    }
}
