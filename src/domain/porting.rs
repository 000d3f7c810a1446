//! Number porting orders.

use serde::{Deserialize, Serialize};

use crate::domain::pagination::PageParams;
use crate::domain::validation::{ValidationError, non_empty};
use crate::domain::value::RawPhoneNumber;

pub const PORTING_ORDER_MAX_NUMBERS: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortingOrderStatusValue {
    Draft,
    InProcess,
    Submitted,
    Exception,
    FocDateConfirmed,
    CancelPending,
    Ported,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl PortingOrderStatusValue {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProcess => "in-process",
            Self::Submitted => "submitted",
            Self::Exception => "exception",
            Self::FocDateConfirmed => "foc-date-confirmed",
            Self::CancelPending => "cancel-pending",
            Self::Ported => "ported",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortingOrderStatusDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortingOrderStatus {
    pub value: PortingOrderStatusValue,
    #[serde(default)]
    pub details: Vec<PortingOrderStatusDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortingPhoneNumberType {
    Landline,
    Local,
    Mobile,
    National,
    SharedCost,
    TollFree,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndUserAdmin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_person_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_passcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndUserLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Current owner of the numbers, as known to the losing carrier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<EndUserAdmin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<EndUserLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivationSettings {
    #[serde(default)]
    pub foc_datetime_requested: Option<String>,
    #[serde(default)]
    pub foc_datetime_actual: Option<String>,
    #[serde(default)]
    pub fast_port_eligible: Option<bool>,
    #[serde(default)]
    pub activation_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortingOrder {
    pub id: String,
    #[serde(default)]
    pub record_type: Option<String>,
    pub status: PortingOrderStatus,
    #[serde(default)]
    pub customer_reference: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub support_key: Option<String>,
    #[serde(default)]
    pub parent_support_key: Option<String>,
    #[serde(default)]
    pub old_service_provider_ocn: Option<String>,
    #[serde(default)]
    pub porting_phone_numbers_count: Option<u32>,
    #[serde(default)]
    pub phone_number_type: Option<PortingPhoneNumberType>,
    #[serde(default)]
    pub activation_settings: Option<ActivationSettings>,
    #[serde(default)]
    pub end_user: Option<EndUser>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
/// Body of `POST /porting_orders`.
///
/// Telnyx splits the numbers into one draft order per losing carrier.
pub struct CreatePortingOrder {
    phone_numbers: Vec<RawPhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_reference: Option<String>,
}

impl CreatePortingOrder {
    pub fn new(phone_numbers: Vec<RawPhoneNumber>) -> Result<Self, ValidationError> {
        if phone_numbers.is_empty() {
            return Err(ValidationError::Empty {
                field: "phone_numbers",
            });
        }
        if phone_numbers.len() > PORTING_ORDER_MAX_NUMBERS {
            return Err(ValidationError::TooMany {
                field: "phone_numbers",
                max: PORTING_ORDER_MAX_NUMBERS,
                actual: phone_numbers.len(),
            });
        }
        Ok(Self {
            phone_numbers,
            customer_reference: None,
        })
    }

    pub fn with_customer_reference(
        mut self,
        reference: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        self.customer_reference = Some(non_empty("customer_reference", reference)?);
        Ok(self)
    }

    pub fn phone_numbers(&self) -> &[RawPhoneNumber] {
        &self.phone_numbers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortingOrderSort {
    CreatedAtAscending,
    CreatedAtDescending,
}

impl PortingOrderSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAtAscending => "created_at",
            Self::CreatedAtDescending => "-created_at",
        }
    }
}

/// Query of `GET /porting_orders`.
#[derive(Debug, Clone, Default)]
pub struct ListPortingOrders {
    pub page: PageParams,
    pub status: Option<PortingOrderStatusValue>,
    pub customer_reference: Option<String>,
    pub phone_number: Option<RawPhoneNumber>,
    pub include_phone_numbers: bool,
    pub sort: Option<PortingOrderSort>,
}

impl ListPortingOrders {
    pub fn with_page(mut self, page: PageParams) -> Self {
        self.page = page;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    Full,
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainingNumbersAction {
    Keep,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortingMisc {
    #[serde(rename = "type")]
    pub port_type: PortType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_numbers_action: Option<RemainingNumbersAction>,
}

/// Body of `PATCH /porting_orders/{id}`; only set fields are changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePortingOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_user: Option<EndUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_settings: Option<RequestedActivation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misc: Option<PortingMisc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestedActivation {
    /// ISO-8601 date-time the numbers should move over.
    pub foc_datetime_requested: String,
}

impl UpdatePortingOrder {
    pub fn with_end_user(mut self, end_user: EndUser) -> Self {
        self.end_user = Some(end_user);
        self
    }

    pub fn with_requested_foc(
        mut self,
        foc_datetime: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        self.activation_settings = Some(RequestedActivation {
            foc_datetime_requested: non_empty("foc_datetime_requested", foc_datetime)?,
        });
        Ok(self)
    }

    pub fn with_misc(mut self, misc: PortingMisc) -> Self {
        self.misc = Some(misc);
        self
    }
}
