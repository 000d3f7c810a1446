//! Domain layer: typed request params and response models (no I/O).

pub mod ai_assistants;
pub mod balance;
pub mod calls;
pub mod messages;
pub mod pagination;
pub mod porting;
mod response;
pub mod sim_cards;
pub mod texml;
mod validation;
mod value;
pub mod verifications;

pub use balance::Balance;
pub use pagination::{Page, PageMeta, PageParams};
pub use response::{ApiErrorDetail, Deleted, ErrorSource, Reported};
pub use validation::ValidationError;
pub use value::{Amount, ApiKey, CallControlId, PhoneNumber, RawPhoneNumber, ResourceId};
