//! Fake HTTP transport shared by the client tests.

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use super::TelnyxClient;
use super::http::{BoxFuture, HttpRequest, HttpResponse, HttpTransport};
use crate::domain::ApiKey;

#[derive(Debug)]
enum Canned {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Debug, Default)]
struct FakeTransportState {
    requests: Vec<HttpRequest>,
    responses: VecDeque<Canned>,
}

/// Records every request and replays queued responses in order.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Canned::Response(HttpResponse {
                status,
                body: body.into(),
            }));
        self
    }

    pub(crate) fn fail(self, message: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Canned::Failure(message.into()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let canned = {
                let mut state = self.state.lock().unwrap();
                state.requests.push(request);
                state.responses.pop_front()
            };
            match canned {
                Some(Canned::Response(response)) => Ok(response),
                Some(Canned::Failure(message)) => Err(message.into()),
                None => Err("no canned response left".into()),
            }
        })
    }
}

pub(crate) fn make_client(transport: FakeTransport) -> TelnyxClient {
    TelnyxClient {
        api_key: ApiKey::new("KEY_test").unwrap(),
        base_url: "https://api.example.invalid/v2".to_owned(),
        user_agent: super::DEFAULT_USER_AGENT.to_owned(),
        http: Arc::new(transport),
    }
}

pub(crate) fn header<'r>(request: &'r HttpRequest, name: &str) -> Option<&'r str> {
    request
        .headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Decoded query pairs, in order.
pub(crate) fn query(request: &HttpRequest) -> Vec<(String, String)> {
    request.url.query_pairs().into_owned().collect()
}

pub(crate) fn assert_query(request: &HttpRequest, key: &str, value: &str) {
    let pairs = query(request);
    assert!(
        pairs.iter().any(|(k, v)| k == key && v == value),
        "missing query param {key}={value}; got: {pairs:?}"
    );
}

pub(crate) fn body(request: &HttpRequest) -> &serde_json::Value {
    request.body.as_ref().expect("request has no body")
}
