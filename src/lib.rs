//! Typed Rust client for the Telnyx v2 REST API.
//!
//! The crate is split the same way for every resource: a domain layer of
//! strong types (request params, response models, validated newtypes), a
//! transport layer for wire-format quirks (`data` envelopes, error bodies,
//! `page[number]`/`filter[...]` queries), and a client layer with one thin
//! service per resource on top of a shared dispatch core.
//!
//! ```rust,no_run
//! use telnyx::domain::messages::SendMessage;
//! use telnyx::{ApiKey, RawPhoneNumber, TelnyxClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telnyx::TelnyxError> {
//!     let client = TelnyxClient::new(ApiKey::new("KEY...")?);
//!     let request = SendMessage::text(
//!         RawPhoneNumber::new("+18445550001")?,
//!         RawPhoneNumber::new("+18665550001")?,
//!         "Hello, World!",
//!     )?;
//!     let message = client.messages().send(request).await?;
//!     println!("queued message {}", message.id);
//!     Ok(())
//! }
//! ```
//!
//! List endpoints return one [`Page`] at a time; the `*_auto_paging` variants
//! return a [`futures::Stream`] that fetches further pages on demand.
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{ApiErrorKind, TelnyxClient, TelnyxClientBuilder, TelnyxError};
pub use domain::{
    Amount, ApiErrorDetail, ApiKey, Balance, CallControlId, Deleted, ErrorSource, Page, PageMeta,
    PageParams, PhoneNumber, RawPhoneNumber, Reported, ResourceId, ValidationError,
};
