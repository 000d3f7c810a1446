use serde::Deserialize;

use crate::domain::value::Amount;

/// Account balance as returned by `GET /balance`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Balance {
    pub balance: Amount,
    #[serde(default)]
    pub credit_limit: Option<Amount>,
    #[serde(default)]
    pub available_credit: Option<Amount>,
    #[serde(default)]
    pub pending: Option<Amount>,
    pub currency: String,
    #[serde(default)]
    pub record_type: Option<String>,
}
