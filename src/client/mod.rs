//! Client layer: shared dispatch core, configuration and one service per resource.

mod ai_assistants;
mod balance;
mod calls;
mod error;
mod http;
mod messages;
mod pagination;
mod porting_orders;
mod sim_cards;
#[cfg(test)]
mod testing;
mod texml;
mod verifications;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{ApiKey, Page};
use crate::transport::{self, TransportError};

pub use ai_assistants::AiAssistantsService;
pub use balance::BalanceService;
pub use calls::CallsService;
pub use error::{ApiErrorKind, TelnyxError};
pub use messages::MessagesService;
pub use porting_orders::PortingOrdersService;
pub use sim_cards::SimCardsService;
pub use texml::TexmlService;
pub use verifications::VerificationsService;

use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.telnyx.com/v2";
pub const API_KEY_ENV: &str = "TELNYX_API_KEY";
pub const BASE_URL_ENV: &str = "TELNYX_BASE_URL";
pub const TIMEOUT_ENV: &str = "TELNYX_TIMEOUT_SECS";

const DEFAULT_USER_AGENT: &str = concat!("telnyx-rust/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
/// Builder for [`TelnyxClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct TelnyxClientBuilder {
    api_key: ApiKey,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TelnyxClientBuilder {
    /// Create a builder with the production base URL and no timeout override.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Read `TELNYX_API_KEY` (required), `TELNYX_BASE_URL` and
    /// `TELNYX_TIMEOUT_SECS` (both optional).
    pub fn from_env() -> Result<Self, TelnyxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TelnyxError> {
        let api_key = lookup(API_KEY_ENV)
            .ok_or_else(|| TelnyxError::Config(format!("{API_KEY_ENV} is not set")))?;
        let api_key = ApiKey::new(api_key)
            .map_err(|err| TelnyxError::Config(format!("{API_KEY_ENV}: {err}")))?;

        let mut builder = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|it| !it.trim().is_empty()) {
            builder = builder.base_url(base_url.trim());
        }
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|it| !it.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|err| {
                TelnyxError::Config(format!("{TIMEOUT_ENV}={raw:?} is not a number: {err}"))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Override the API root, e.g. to point at a mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TelnyxClient`].
    pub fn build(self) -> Result<TelnyxClient, TelnyxError> {
        parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TelnyxError::Transport(Box::new(err)))?;

        Ok(TelnyxClient {
            api_key: self.api_key,
            base_url: self.base_url,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            http: Arc::new(ReqwestTransport::new(client)),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TelnyxError> {
    let url = Url::parse(raw)
        .map_err(|err| TelnyxError::Config(format!("invalid base URL {raw:?}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(TelnyxError::Config(format!(
            "base URL {raw:?} must be an absolute http(s) URL"
        )));
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level Telnyx API client.
///
/// Cloning is cheap; clones share the underlying connection pool. Each
/// resource is reached through a borrowing service, e.g.
/// [`TelnyxClient::messages`] or [`TelnyxClient::sim_cards`].
pub struct TelnyxClient {
    api_key: ApiKey,
    base_url: String,
    user_agent: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for TelnyxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelnyxClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl TelnyxClient {
    /// Create a client for the production API.
    ///
    /// For more customization, use [`TelnyxClient::builder`].
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            http: Arc::new(ReqwestTransport::new(reqwest::Client::new())),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> TelnyxClientBuilder {
        TelnyxClientBuilder::new(api_key)
    }

    /// Build a client from `TELNYX_*` environment variables.
    ///
    /// See [`TelnyxClientBuilder::from_env`].
    pub fn from_env() -> Result<Self, TelnyxError> {
        TelnyxClientBuilder::from_env()?.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ai_assistants(&self) -> AiAssistantsService<'_> {
        AiAssistantsService::new(self)
    }

    pub fn balance(&self) -> BalanceService<'_> {
        BalanceService::new(self)
    }

    pub fn calls(&self) -> CallsService<'_> {
        CallsService::new(self)
    }

    pub fn messages(&self) -> MessagesService<'_> {
        MessagesService::new(self)
    }

    pub fn porting_orders(&self) -> PortingOrdersService<'_> {
        PortingOrdersService::new(self)
    }

    pub fn sim_cards(&self) -> SimCardsService<'_> {
        SimCardsService::new(self)
    }

    pub fn texml(&self) -> TexmlService<'_> {
        TexmlService::new(self)
    }

    pub fn verifications(&self) -> VerificationsService<'_> {
        VerificationsService::new(self)
    }

    pub(crate) async fn get_data<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: Vec<(String, String)>,
    ) -> Result<T, TelnyxError> {
        let body = self.send(HttpMethod::Get, path, query, None).await?;
        parsed(transport::decode_data(&body))
    }

    pub(crate) async fn post_data<B, T>(&self, path: &[&str], body: &B) -> Result<T, TelnyxError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let body = self.send(HttpMethod::Post, path, Vec::new(), Some(body)).await?;
        parsed(transport::decode_data(&body))
    }

    /// `POST` without a request body, as used by resource actions.
    pub(crate) async fn post_data_empty<T: DeserializeOwned>(
        &self,
        path: &[&str],
    ) -> Result<T, TelnyxError> {
        let body = self.send(HttpMethod::Post, path, Vec::new(), None).await?;
        parsed(transport::decode_data(&body))
    }

    pub(crate) async fn patch_data<B, T>(&self, path: &[&str], body: &B) -> Result<T, TelnyxError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let body = self
            .send(HttpMethod::Patch, path, Vec::new(), Some(body))
            .await?;
        parsed(transport::decode_data(&body))
    }

    pub(crate) async fn delete_data<T: DeserializeOwned>(
        &self,
        path: &[&str],
    ) -> Result<T, TelnyxError> {
        let body = self.send(HttpMethod::Delete, path, Vec::new(), None).await?;
        parsed(transport::decode_data(&body))
    }

    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: Vec<(String, String)>,
    ) -> Result<Page<T>, TelnyxError> {
        let body = self.send(HttpMethod::Get, path, query, None).await?;
        parsed(transport::decode_page(&body))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &[&str],
    ) -> Result<T, TelnyxError> {
        let body = self.send(HttpMethod::Get, path, Vec::new(), None).await?;
        parsed(transport::decode_bare(&body))
    }

    pub(crate) async fn post_json<B, T>(&self, path: &[&str], body: &B) -> Result<T, TelnyxError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let body = self.send(HttpMethod::Post, path, Vec::new(), Some(body)).await?;
        parsed(transport::decode_bare(&body))
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &[&str],
    ) -> Result<T, TelnyxError> {
        let body = self.send(HttpMethod::Delete, path, Vec::new(), None).await?;
        parsed(transport::decode_bare(&body))
    }

    /// `DELETE` of an endpoint that answers `204 No Content`.
    pub(crate) async fn delete_empty(&self, path: &[&str]) -> Result<(), TelnyxError> {
        self.send(HttpMethod::Delete, path, Vec::new(), None)
            .await
            .map(drop)
    }

    fn endpoint(&self, path: &[&str], query: &[(String, String)]) -> Result<Url, TelnyxError> {
        let mut url = parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                TelnyxError::Config(format!("base URL {:?} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(path);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send one request and return the body of a 2xx response.
    async fn send(
        &self,
        method: HttpMethod,
        path: &[&str],
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<String, TelnyxError> {
        let url = self.endpoint(path, &query)?;
        debug!(%method, path = url.path(), "sending Telnyx request");

        let request = HttpRequest {
            method,
            url,
            headers: vec![
                ("Authorization", format!("Bearer {}", self.api_key.as_str())),
                ("Accept", "application/json".to_owned()),
                ("User-Agent", self.user_agent.clone()),
            ],
            body,
        };

        let HttpResponse { status, body } = self
            .http
            .send(request)
            .await
            .map_err(TelnyxError::Transport)?;
        debug!(status, bytes = body.len(), "received Telnyx response");

        if !(200..=299).contains(&status) {
            let errors = transport::decode_error_body(&body);
            warn!(
                status,
                code = ?errors.first().and_then(|it| it.code.as_deref()),
                "Telnyx API returned an error"
            );
            let body = if body.trim().is_empty() {
                None
            } else {
                Some(body)
            };
            return Err(TelnyxError::Api {
                status,
                errors,
                body,
            });
        }

        Ok(body)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, TelnyxError> {
    serde_json::to_value(body).map_err(TelnyxError::Encode)
}

fn parsed<T>(result: Result<T, TransportError>) -> Result<T, TelnyxError> {
    result.map_err(|err| TelnyxError::Parse(Box::new(err)))
}
