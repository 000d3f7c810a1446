use futures::Stream;

use crate::client::pagination::paginate;
use crate::client::{TelnyxClient, TelnyxError};
use crate::domain::porting::{
    CreatePortingOrder, ListPortingOrders, PortingOrder, UpdatePortingOrder,
};
use crate::domain::{Page, ResourceId};
use crate::transport::encode_list_porting_orders_query;

/// Number porting orders (moving numbers from another carrier to Telnyx).
#[derive(Debug, Clone, Copy)]
pub struct PortingOrdersService<'a> {
    client: &'a TelnyxClient,
}

impl<'a> PortingOrdersService<'a> {
    pub(crate) fn new(client: &'a TelnyxClient) -> Self {
        Self { client }
    }

    /// Create draft orders (`POST /porting_orders`).
    ///
    /// Telnyx groups the numbers by losing carrier and returns one draft order per group.
    pub async fn create(
        &self,
        request: CreatePortingOrder,
    ) -> Result<Vec<PortingOrder>, TelnyxError> {
        self.client.post_data(&["porting_orders"], &request).await
    }

    pub async fn list(
        &self,
        request: ListPortingOrders,
    ) -> Result<Page<PortingOrder>, TelnyxError> {
        self.client
            .get_page(
                &["porting_orders"],
                encode_list_porting_orders_query(&request),
            )
            .await
    }

    pub fn list_auto_paging(
        self,
        request: ListPortingOrders,
    ) -> impl Stream<Item = Result<PortingOrder, TelnyxError>> + 'a {
        let client = self.client;
        paginate(request.page, move |page| {
            let request = request.clone().with_page(page);
            async move {
                let service = PortingOrdersService::new(client);
                service.list(request).await
            }
        })
    }

    pub async fn retrieve(&self, id: &ResourceId) -> Result<PortingOrder, TelnyxError> {
        self.client
            .get_data(&["porting_orders", id.as_str()], Vec::new())
            .await
    }

    /// `PATCH /porting_orders/{id}`; only draft and exception orders can be edited.
    pub async fn update(
        &self,
        id: &ResourceId,
        request: UpdatePortingOrder,
    ) -> Result<PortingOrder, TelnyxError> {
        self.client
            .patch_data(&["porting_orders", id.as_str()], &request)
            .await
    }

    /// Delete a draft order. Telnyx answers `204 No Content`.
    pub async fn delete(&self, id: &ResourceId) -> Result<(), TelnyxError> {
        self.client
            .delete_empty(&["porting_orders", id.as_str()])
            .await
    }

    /// Submit a draft order to the losing carrier.
    pub async fn confirm(&self, id: &ResourceId) -> Result<PortingOrder, TelnyxError> {
        self.action(id, "confirm").await
    }

    pub async fn cancel(&self, id: &ResourceId) -> Result<PortingOrder, TelnyxError> {
        self.action(id, "cancel").await
    }

    async fn action(&self, id: &ResourceId, action: &str) -> Result<PortingOrder, TelnyxError> {
        self.client
            .post_data_empty(&["porting_orders", id.as_str(), "actions", action])
            .await
    }
}
