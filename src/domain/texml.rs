//! TeXML applications and TeXML (REST-compatible) calls.

use serde::{Deserialize, Serialize};

use crate::domain::calls::WebhookMethod;
use crate::domain::pagination::PageParams;
use crate::domain::response::Reported;
use crate::domain::validation::{ValidationError, http_url, non_empty};
use crate::domain::value::{RawPhoneNumber, ResourceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DtmfType {
    #[serde(rename = "RFC 2833")]
    Rfc2833,
    Inband,
    #[serde(rename = "SIP INFO")]
    SipInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TexmlInbound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shaken_stir_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sip_subdomain: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TexmlOutbound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_voice_profile_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TexmlApplication {
    pub id: String,
    pub friendly_name: String,
    #[serde(default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub anchorsite_override: Option<String>,
    #[serde(default)]
    pub dtmf_type: Option<Reported<DtmfType>>,
    #[serde(default)]
    pub first_command_timeout: bool,
    #[serde(default)]
    pub first_command_timeout_secs: Option<u32>,
    #[serde(default)]
    pub voice_url: Option<String>,
    #[serde(default)]
    pub voice_fallback_url: Option<String>,
    #[serde(default)]
    pub voice_method: Option<String>,
    #[serde(default)]
    pub status_callback: Option<String>,
    #[serde(default)]
    pub status_callback_method: Option<String>,
    #[serde(default)]
    pub inbound: Option<TexmlInbound>,
    #[serde(default)]
    pub outbound: Option<TexmlOutbound>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
/// Body of `POST /texml_applications` and `PATCH /texml_applications/{id}`.
///
/// The API requires `friendly_name` and `voice_url` on both operations.
pub struct TexmlApplicationParams {
    friendly_name: String,
    voice_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_callback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_callback_method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anchorsite_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dtmf_type: Option<DtmfType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_command_timeout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_command_timeout_secs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inbound: Option<TexmlInbound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outbound: Option<TexmlOutbound>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

fn method_str(method: WebhookMethod) -> &'static str {
    match method {
        WebhookMethod::Get => "get",
        WebhookMethod::Post => "post",
    }
}

impl TexmlApplicationParams {
    pub fn new(
        friendly_name: impl Into<String>,
        voice_url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            friendly_name: non_empty("friendly_name", friendly_name)?,
            voice_url: http_url("voice_url", voice_url)?,
            voice_fallback_url: None,
            voice_method: None,
            status_callback: None,
            status_callback_method: None,
            active: None,
            anchorsite_override: None,
            dtmf_type: None,
            first_command_timeout: None,
            first_command_timeout_secs: None,
            inbound: None,
            outbound: None,
            tags: Vec::new(),
        })
    }

    pub fn with_voice_method(mut self, method: WebhookMethod) -> Self {
        self.voice_method = Some(method_str(method));
        self
    }

    pub fn with_fallback_url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        self.voice_fallback_url = Some(http_url("voice_fallback_url", url)?);
        Ok(self)
    }

    pub fn with_status_callback(
        mut self,
        url: impl Into<String>,
        method: WebhookMethod,
    ) -> Result<Self, ValidationError> {
        self.status_callback = Some(http_url("status_callback", url)?);
        self.status_callback_method = Some(method_str(method));
        Ok(self)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Preferred media anchorsite, e.g. `"Latency"` or `"Chicago, IL"`.
    pub fn with_anchorsite(mut self, anchorsite: impl Into<String>) -> Self {
        self.anchorsite_override = Some(anchorsite.into());
        self
    }

    pub fn with_dtmf_type(mut self, dtmf_type: DtmfType) -> Self {
        self.dtmf_type = Some(dtmf_type);
        self
    }

    /// Hang up if the first TeXML command does not arrive within `secs`.
    pub fn with_first_command_timeout(mut self, secs: u32) -> Self {
        self.first_command_timeout = Some(true);
        self.first_command_timeout_secs = Some(secs);
        self
    }

    pub fn with_inbound(mut self, inbound: TexmlInbound) -> Self {
        self.inbound = Some(inbound);
        self
    }

    pub fn with_outbound(mut self, outbound: TexmlOutbound) -> Self {
        self.outbound = Some(outbound);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexmlApplicationSort {
    CreatedAt,
    FriendlyName,
    Active,
}

impl TexmlApplicationSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::FriendlyName => "friendly_name",
            Self::Active => "active",
        }
    }
}

/// Query of `GET /texml_applications`.
#[derive(Debug, Clone, Default)]
pub struct ListTexmlApplications {
    pub page: PageParams,
    /// Substring match on the friendly name.
    pub friendly_name: Option<String>,
    pub outbound_voice_profile_id: Option<ResourceId>,
    pub sort: Option<TexmlApplicationSort>,
    pub descending: bool,
}

impl ListTexmlApplications {
    pub fn with_page(mut self, page: PageParams) -> Self {
        self.page = page;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MachineDetection {
    Enable,
    Disable,
    DetectMessageEnd,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Body of `POST /texml/Accounts/{account_sid}/Calls`.
pub struct InitiateTexmlCall {
    application_sid: ResourceId,
    to: RawPhoneNumber,
    from: RawPhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url_method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_callback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_callback_method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    machine_detection: Option<MachineDetection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u32>,
}

fn pascal_method(method: WebhookMethod) -> &'static str {
    match method {
        WebhookMethod::Get => "GET",
        WebhookMethod::Post => "POST",
    }
}

impl InitiateTexmlCall {
    pub fn new(application_sid: ResourceId, to: RawPhoneNumber, from: RawPhoneNumber) -> Self {
        Self {
            application_sid,
            to,
            from,
            url: None,
            url_method: None,
            fallback_url: None,
            status_callback: None,
            status_callback_method: None,
            machine_detection: None,
            record: None,
            timeout: None,
        }
    }

    /// Fetch TeXML from `url` instead of the application's voice URL.
    pub fn with_url(
        mut self,
        url: impl Into<String>,
        method: WebhookMethod,
    ) -> Result<Self, ValidationError> {
        self.url = Some(http_url("Url", url)?);
        self.url_method = Some(pascal_method(method));
        Ok(self)
    }

    pub fn with_fallback_url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        self.fallback_url = Some(http_url("FallbackUrl", url)?);
        Ok(self)
    }

    pub fn with_status_callback(
        mut self,
        url: impl Into<String>,
        method: WebhookMethod,
    ) -> Result<Self, ValidationError> {
        self.status_callback = Some(http_url("StatusCallback", url)?);
        self.status_callback_method = Some(pascal_method(method));
        Ok(self)
    }

    pub fn with_machine_detection(mut self, detection: MachineDetection) -> Self {
        self.machine_detection = Some(detection);
        self
    }

    pub fn with_record(mut self, record: bool) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u32) -> Self {
        self.timeout = Some(secs);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TexmlCallTermination {
    Completed,
    Canceled,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
/// Body of `POST /texml/Accounts/{account_sid}/Calls/{call_sid}`.
///
/// Either ends the call (`Status`) or redirects it to new TeXML (`Url`).
pub struct UpdateTexmlCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TexmlCallTermination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'static str>,
}

impl UpdateTexmlCall {
    pub fn terminate(status: TexmlCallTermination) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn redirect(url: impl Into<String>, method: WebhookMethod) -> Result<Self, ValidationError> {
        Ok(Self {
            status: None,
            url: Some(http_url("Url", url)?),
            method: Some(pascal_method(method)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Acknowledgement of `POST /texml/Accounts/{account_sid}/Calls`.
pub struct TexmlCallInitiated {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TexmlCall {
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}
