//! Deep-object query encoding (`page[number]=2&filter[status]=enabled`).

use crate::domain::PageParams;
use crate::domain::porting::{ListPortingOrders, PortingOrderStatusValue};
use crate::domain::sim_cards::{ListSimCards, SimCardStatusValue};
use crate::domain::texml::ListTexmlApplications;
use crate::domain::verifications::ListVerifications;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn push_opt(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn push_page(&mut self, page: PageParams) {
        self.push("page[number]", page.number().to_string());
        self.push("page[size]", page.size().to_string());
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}

pub fn encode_list_sim_cards_query(request: &ListSimCards) -> Vec<(String, String)> {
    let mut query = QueryPairs::new();
    query.push_page(request.page);
    if !request.tags.is_empty() {
        query.push("filter[tags]", request.tags.join(","));
    }
    query.push_opt("filter[iccid]", request.iccid.as_deref());
    let status = request
        .status
        .iter()
        .filter(|it| **it != SimCardStatusValue::Unknown)
        .map(|it| it.as_str())
        .collect::<Vec<_>>();
    if !status.is_empty() {
        query.push("filter[status]", status.join(","));
    }
    query.push_opt(
        "filter[sim_card_group_id]",
        request.sim_card_group_id.as_ref().map(|it| it.as_str()),
    );
    if request.include_sim_card_group {
        query.push("include_sim_card_group", "true");
    }
    query.push_opt("sort", request.sort.map(|it| it.as_str()));
    query.into_vec()
}

pub fn encode_list_porting_orders_query(request: &ListPortingOrders) -> Vec<(String, String)> {
    let mut query = QueryPairs::new();
    query.push_page(request.page);
    query.push_opt(
        "filter[status][value]",
        request
            .status
            .filter(|it| *it != PortingOrderStatusValue::Unknown)
            .map(|it| it.as_str()),
    );
    query.push_opt(
        "filter[customer_reference]",
        request.customer_reference.as_deref(),
    );
    query.push_opt(
        "filter[phone_numbers][phone_number][eq]",
        request.phone_number.as_ref().map(|it| it.raw()),
    );
    if request.include_phone_numbers {
        query.push("include_phone_numbers", "true");
    }
    query.push_opt("sort[value]", request.sort.map(|it| it.as_str()));
    query.into_vec()
}

pub fn encode_list_texml_applications_query(
    request: &ListTexmlApplications,
) -> Vec<(String, String)> {
    let mut query = QueryPairs::new();
    query.push_page(request.page);
    query.push_opt("filter[friendly_name]", request.friendly_name.as_deref());
    query.push_opt(
        "filter[outbound_voice_profile_id]",
        request
            .outbound_voice_profile_id
            .as_ref()
            .map(|it| it.as_str()),
    );
    if let Some(sort) = request.sort {
        let value = if request.descending {
            format!("-{}", sort.as_str())
        } else {
            sort.as_str().to_owned()
        };
        query.push("sort", value);
    }
    query.into_vec()
}

pub fn encode_list_verifications_query(request: &ListVerifications) -> Vec<(String, String)> {
    let mut query = QueryPairs::new();
    query.push_page(request.page);
    query.into_vec()
}
