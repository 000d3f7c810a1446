use futures::Stream;

use crate::client::pagination::paginate;
use crate::client::{TelnyxClient, TelnyxError};
use crate::domain::sim_cards::{ListSimCards, SimCard, SimCardAction, UpdateSimCard};
use crate::domain::{Page, ResourceId, ValidationError};
use crate::transport::encode_list_sim_cards_query;

/// Wireless SIM card inventory and state changes.
#[derive(Debug, Clone, Copy)]
pub struct SimCardsService<'a> {
    client: &'a TelnyxClient,
}

impl<'a> SimCardsService<'a> {
    pub(crate) fn new(client: &'a TelnyxClient) -> Self {
        Self { client }
    }

    /// One page of `GET /sim_cards`.
    pub async fn list(&self, request: ListSimCards) -> Result<Page<SimCard>, TelnyxError> {
        self.client
            .get_page(&["sim_cards"], encode_list_sim_cards_query(&request))
            .await
    }

    /// Every SIM card matching `request`, starting at `request.page`.
    pub fn list_auto_paging(
        self,
        request: ListSimCards,
    ) -> impl Stream<Item = Result<SimCard, TelnyxError>> + 'a {
        let client = self.client;
        paginate(request.page, move |page| {
            let request = request.clone().with_page(page);
            async move {
                let service = SimCardsService::new(client);
                service.list(request).await
            }
        })
    }

    pub async fn retrieve(&self, id: &ResourceId) -> Result<SimCard, TelnyxError> {
        self.client
            .get_data(&["sim_cards", id.as_str()], Vec::new())
            .await
    }

    /// `PATCH /sim_cards/{id}`. An empty update is rejected locally.
    pub async fn update(
        &self,
        id: &ResourceId,
        request: UpdateSimCard,
    ) -> Result<SimCard, TelnyxError> {
        if request.is_empty() {
            return Err(ValidationError::MissingOneOf {
                first: "sim_card_group_id",
                second: "tags",
            }
            .into());
        }
        self.client
            .patch_data(&["sim_cards", id.as_str()], &request)
            .await
    }

    /// Deregister the SIM card; the returned record carries its final state.
    pub async fn delete(&self, id: &ResourceId) -> Result<SimCard, TelnyxError> {
        self.client.delete_data(&["sim_cards", id.as_str()]).await
    }

    pub async fn enable(&self, id: &ResourceId) -> Result<SimCardAction, TelnyxError> {
        self.action(id, "enable").await
    }

    pub async fn disable(&self, id: &ResourceId) -> Result<SimCardAction, TelnyxError> {
        self.action(id, "disable").await
    }

    /// Keep the SIM attached but block data until it is enabled again.
    pub async fn set_standby(&self, id: &ResourceId) -> Result<SimCardAction, TelnyxError> {
        self.action(id, "set_standby").await
    }

    async fn action(&self, id: &ResourceId, action: &str) -> Result<SimCardAction, TelnyxError> {
        self.client
            .post_data_empty(&["sim_cards", id.as_str(), "actions", action])
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::pin::pin;

    use futures::TryStreamExt;
    use serde_json::json;

    use crate::client::http::HttpMethod;
    use crate::client::testing::{FakeTransport, assert_query, body, make_client, query};
    use crate::domain::PageParams;
    use crate::domain::sim_cards::{
        DataLimit, SimCardActionStatusValue, SimCardStatusValue, SimCardType,
    };

    use super::*;

    fn sim_page(ids: &[&str], page_number: u32, total_pages: u32) -> String {
        let data = ids
            .iter()
            .map(|id| json!({"id": id, "record_type": "sim_card", "status": {"value": "enabled"}}))
            .collect::<Vec<_>>();
        json!({
            "data": data,
            "meta": {
                "page_number": page_number,
                "page_size": 2,
                "total_pages": total_pages,
                "total_results": 3
            }
        })
        .to_string()
    }

    fn id() -> ResourceId {
        ResourceId::new("6a09cdc3-8948-47f0-aa62-74ac943d6c58").unwrap()
    }

    #[tokio::test]
    async fn list_sends_filters_and_parses_page() {
        let transport = FakeTransport::new().respond(200, sim_page(&["a", "b"], 1, 2));
        let client = make_client(transport.clone());

        let request = ListSimCards {
            page: PageParams::first(2).unwrap(),
            tags: vec!["fleet".to_owned()],
            status: vec![SimCardStatusValue::Enabled],
            ..Default::default()
        };
        let page = client.sim_cards().list(request).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].status.value, SimCardStatusValue::Enabled);
        assert_eq!(page.next_page_params().map(|it| it.number()), Some(2));

        let sent = transport.last_request();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.url.path(), "/v2/sim_cards");
        assert_query(&sent, "page[number]", "1");
        assert_query(&sent, "page[size]", "2");
        assert_query(&sent, "filter[tags]", "fleet");
        assert_query(&sent, "filter[status]", "enabled");
    }

    #[tokio::test]
    async fn list_auto_paging_follows_meta() {
        let transport = FakeTransport::new()
            .respond(200, sim_page(&["a", "b"], 1, 2))
            .respond(200, sim_page(&["c"], 2, 2));
        let client = make_client(transport.clone());

        let request = ListSimCards {
            page: PageParams::first(2).unwrap(),
            iccid: Some("89310410106543789301".to_owned()),
            ..Default::default()
        };
        let ids = client
            .sim_cards()
            .list_auto_paging(request)
            .map_ok(|it| it.id)
            .try_collect::<Vec<_>>()
            .await
            .unwrap();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_query(&requests[1], "page[number]", "2");
        assert_query(&requests[1], "filter[iccid]", "89310410106543789301");
    }

    #[tokio::test]
    async fn list_auto_paging_is_lazy() {
        let transport = FakeTransport::new()
            .respond(200, sim_page(&["a", "b"], 1, 5))
            .respond(200, sim_page(&["c", "d"], 2, 5));
        let client = make_client(transport.clone());

        let mut stream = pin!(client.sim_cards().list_auto_paging(ListSimCards::default()));
        assert_eq!(stream.try_next().await.unwrap().map(|it| it.id), Some("a".to_owned()));
        assert_eq!(stream.try_next().await.unwrap().map(|it| it.id), Some("b".to_owned()));
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(stream.try_next().await.unwrap().map(|it| it.id), Some("c".to_owned()));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn retrieve_update_and_delete_use_resource_path() {
        let record = r#"
        {
          "data": {
            "id": "6a09cdc3-8948-47f0-aa62-74ac943d6c58",
            "record_type": "sim_card",
            "status": {"value": "enabled"},
            "type": "physical",
            "iccid": "89310410106543789301",
            "tags": ["personal", "customers"],
            "data_limit": {"amount": "2048.0", "unit": "MB"}
          }
        }
        "#;
        let transport = FakeTransport::new()
            .respond(200, record)
            .respond(200, record)
            .respond(200, record);
        let client = make_client(transport.clone());
        let sims = client.sim_cards();

        let sim = sims.retrieve(&id()).await.unwrap();
        assert_eq!(sim.sim_card_type, Some(SimCardType::Physical));
        assert_eq!(sim.tags, vec!["personal", "customers"]);

        sims.update(
            &id(),
            UpdateSimCard::new()
                .with_tags(["personal"])
                .unwrap()
                .with_data_limit(DataLimit::megabytes(2048)),
        )
        .await
        .unwrap();
        let patch = transport.last_request();
        assert_eq!(patch.method, HttpMethod::Patch);
        assert_eq!(
            *body(&patch),
            json!({"tags": ["personal"], "data_limit": {"amount": "2048", "unit": "MB"}})
        );

        sims.delete(&id()).await.unwrap();
        let requests = transport.requests();
        assert_eq!(requests[2].method, HttpMethod::Delete);
        assert!(
            requests
                .iter()
                .all(|it| it.url.path() == "/v2/sim_cards/6a09cdc3-8948-47f0-aa62-74ac943d6c58")
        );
        assert!(query(&requests[0]).is_empty());
    }

    #[tokio::test]
    async fn empty_update_is_rejected_without_request() {
        let transport = FakeTransport::new();
        let client = make_client(transport.clone());

        let err = client
            .sim_cards()
            .update(&id(), UpdateSimCard::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TelnyxError::Validation(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn actions_post_without_body() {
        let action = |kind: &str| {
            json!({
                "data": {
                    "id": "45f45a04-b4be-4592-95b1-9306b9db2b21",
                    "record_type": "sim_card_action",
                    "action_type": kind,
                    "sim_card_id": "6a09cdc3-8948-47f0-aa62-74ac943d6c58",
                    "status": {"value": "in-progress", "reason": "The data limit was exceeded."}
                }
            })
            .to_string()
        };
        let transport = FakeTransport::new()
            .respond(202, action("enable"))
            .respond(202, action("disable"))
            .respond(202, action("set_standby"));
        let client = make_client(transport.clone());
        let sims = client.sim_cards();

        let enabled = sims.enable(&id()).await.unwrap();
        assert_eq!(enabled.action_type, "enable");
        assert_eq!(enabled.status.value, SimCardActionStatusValue::InProgress);
        sims.disable(&id()).await.unwrap();
        sims.set_standby(&id()).await.unwrap();

        let paths = transport
            .requests()
            .iter()
            .map(|it| {
                assert_eq!(it.method, HttpMethod::Post);
                assert!(it.body.is_none());
                it.url.path().to_owned()
            })
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec![
                "/v2/sim_cards/6a09cdc3-8948-47f0-aa62-74ac943d6c58/actions/enable",
                "/v2/sim_cards/6a09cdc3-8948-47f0-aa62-74ac943d6c58/actions/disable",
                "/v2/sim_cards/6a09cdc3-8948-47f0-aa62-74ac943d6c58/actions/set_standby",
            ]
        );
    }
}
