use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{ApiErrorDetail, Page, PageMeta};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no `data` member")]
    MissingData,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Option::default")]
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

/// Decode `{"data": T}`.
pub fn decode_data<T: DeserializeOwned>(json: &str) -> Result<T, TransportError> {
    let parsed: DataEnvelope<T> = serde_json::from_str(json)?;
    parsed.data.ok_or(TransportError::MissingData)
}

/// Decode `{"data": [T], "meta": {...}}`.
pub fn decode_page<T: DeserializeOwned>(json: &str) -> Result<Page<T>, TransportError> {
    let parsed: ListEnvelope<T> = serde_json::from_str(json)?;
    Ok(Page {
        data: parsed.data,
        meta: parsed.meta,
    })
}

/// Decode an endpoint that answers with a bare object.
pub fn decode_bare<T: DeserializeOwned>(json: &str) -> Result<T, TransportError> {
    Ok(serde_json::from_str(json)?)
}

/// Best-effort decoding of an error body; anything unexpected yields no details.
pub fn decode_error_body(body: &str) -> Vec<ApiErrorDetail> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|it| it.errors)
        .unwrap_or_default()
}
