use serde::{Deserialize, Serialize};

use crate::domain::pagination::PageParams;
use crate::domain::validation::{ValidationError, non_empty};
use crate::domain::value::ResourceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimCardStatusValue {
    Registering,
    Enabling,
    Enabled,
    Disabling,
    Disabled,
    DataLimitExceeded,
    SettingStandby,
    Standby,
    UnauthorizedImei,
    #[serde(other)]
    Unknown,
}

impl SimCardStatusValue {
    /// Wire value, as used in `filter[status]`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registering => "registering",
            Self::Enabling => "enabling",
            Self::Enabled => "enabled",
            Self::Disabling => "disabling",
            Self::Disabled => "disabled",
            Self::DataLimitExceeded => "data_limit_exceeded",
            Self::SettingStandby => "setting_standby",
            Self::Standby => "standby",
            Self::UnauthorizedImei => "unauthorized_imei",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimCardStatus {
    pub value: SimCardStatusValue,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimCardType {
    Physical,
    Esim,
    #[serde(other)]
    Unknown,
}

/// Monthly data cap. Telnyx expresses it as a decimal string with a unit (`MB`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLimit {
    pub amount: String,
    pub unit: String,
}

impl DataLimit {
    pub fn megabytes(amount: u64) -> Self {
        Self {
            amount: amount.to_string(),
            unit: "MB".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimCard {
    pub id: String,
    #[serde(default)]
    pub record_type: Option<String>,
    pub status: SimCardStatus,
    #[serde(rename = "type", default)]
    pub sim_card_type: Option<SimCardType>,
    #[serde(default)]
    pub iccid: Option<String>,
    #[serde(default)]
    pub imsi: Option<String>,
    #[serde(default)]
    pub msisdn: Option<String>,
    #[serde(default)]
    pub sim_card_group_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub data_limit: Option<DataLimit>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimCardSort {
    ConsumedDataAscending,
    ConsumedDataDescending,
}

impl SimCardSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConsumedDataAscending => "current_billing_period_consumed_data.amount",
            Self::ConsumedDataDescending => "-current_billing_period_consumed_data.amount",
        }
    }
}

/// Query of `GET /sim_cards`.
#[derive(Debug, Clone, Default)]
pub struct ListSimCards {
    pub page: PageParams,
    pub tags: Vec<String>,
    pub iccid: Option<String>,
    pub status: Vec<SimCardStatusValue>,
    pub sim_card_group_id: Option<ResourceId>,
    pub include_sim_card_group: bool,
    pub sort: Option<SimCardSort>,
}

impl ListSimCards {
    pub fn with_page(mut self, page: PageParams) -> Self {
        self.page = page;
        self
    }
}

/// Body of `PATCH /sim_cards/{id}`; only set fields are changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSimCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    sim_card_group_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_limit: Option<DataLimit>,
}

impl UpdateSimCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, sim_card_group_id: ResourceId) -> Self {
        self.sim_card_group_id = Some(sim_card_group_id);
        self
    }

    /// Replace all tags. Tags must be non-empty after trimming.
    pub fn with_tags(
        mut self,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ValidationError> {
        let tags = tags
            .into_iter()
            .map(|tag| non_empty("tags", tag))
            .collect::<Result<Vec<_>, _>>()?;
        self.tags = Some(tags);
        Ok(self)
    }

    pub fn with_data_limit(mut self, data_limit: DataLimit) -> Self {
        self.data_limit = Some(data_limit);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sim_card_group_id.is_none() && self.tags.is_none() && self.data_limit.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimCardActionStatusValue {
    InProgress,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimCardActionStatus {
    pub value: SimCardActionStatusValue,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Asynchronous state change of a SIM card (`enable`, `disable`, `set_standby`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimCardAction {
    pub id: String,
    pub action_type: String,
    pub status: SimCardActionStatus,
    #[serde(default)]
    pub sim_card_id: Option<String>,
    #[serde(default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn update_only_serializes_changed_fields() {
        let update = UpdateSimCard::new()
            .with_tags(["fleet", " eu "])
            .unwrap()
            .with_data_limit(DataLimit::megabytes(2048));
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            json!({
                "tags": ["fleet", "eu"],
                "data_limit": {"amount": "2048", "unit": "MB"}
            })
        );
        assert!(UpdateSimCard::new().is_empty());
        assert!(UpdateSimCard::new().with_tags(["", "x"]).is_err());
    }

    #[test]
    fn sim_card_decodes_status_and_type() {
        let card: SimCard = serde_json::from_str(
            r#"{
              "id": "6a09cdc3-8948-47f0-aa62-74ac943d6c58",
              "record_type": "sim_card",
              "status": {"value": "enabled"},
              "type": "physical",
              "iccid": "89310410106543789301",
              "tags": ["personal"]
            }"#,
        )
        .unwrap();
        assert_eq!(card.status.value, SimCardStatusValue::Enabled);
        assert_eq!(card.sim_card_type, Some(SimCardType::Physical));
        assert_eq!(card.tags, vec!["personal".to_owned()]);
    }

    #[test]
    fn action_status_uses_kebab_case() {
        let action: SimCardAction = serde_json::from_str(
            r#"{"id": "a", "action_type": "enable", "status": {"value": "in-progress"}}"#,
        )
        .unwrap();
        assert_eq!(action.status.value, SimCardActionStatusValue::InProgress);
    }
}
