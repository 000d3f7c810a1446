//! Transport layer: wire-format details (envelopes, error bodies, query encoding).

mod envelope;
mod query;

pub use envelope::{TransportError, decode_bare, decode_data, decode_error_body, decode_page};
pub use query::{
    encode_list_porting_orders_query, encode_list_sim_cards_query,
    encode_list_texml_applications_query, encode_list_verifications_query,
};
