use futures::Stream;

use crate::client::pagination::paginate;
use crate::client::{TelnyxClient, TelnyxError};
use crate::domain::texml::{
    InitiateTexmlCall, ListTexmlApplications, TexmlApplication, TexmlApplicationParams,
    TexmlCall, TexmlCallInitiated, UpdateTexmlCall,
};
use crate::domain::{Page, ResourceId};
use crate::transport::encode_list_texml_applications_query;

/// TeXML applications and the REST-compatible TeXML call endpoints.
///
/// Application endpoints use the `data` envelope; the `/texml/Accounts/...`
/// call endpoints answer with bare PascalCase-in, snake_case-out objects.
#[derive(Debug, Clone, Copy)]
pub struct TexmlService<'a> {
    client: &'a TelnyxClient,
}

impl<'a> TexmlService<'a> {
    pub(crate) fn new(client: &'a TelnyxClient) -> Self {
        Self { client }
    }

    pub async fn create_application(
        &self,
        request: TexmlApplicationParams,
    ) -> Result<TexmlApplication, TelnyxError> {
        self.client
            .post_data(&["texml_applications"], &request)
            .await
    }

    pub async fn list_applications(
        &self,
        request: ListTexmlApplications,
    ) -> Result<Page<TexmlApplication>, TelnyxError> {
        self.client
            .get_page(
                &["texml_applications"],
                encode_list_texml_applications_query(&request),
            )
            .await
    }

    pub fn list_applications_auto_paging(
        self,
        request: ListTexmlApplications,
    ) -> impl Stream<Item = Result<TexmlApplication, TelnyxError>> + 'a {
        let client = self.client;
        paginate(request.page, move |page| {
            let request = ListTexmlApplications {
                page,
                ..request.clone()
            };
            async move {
                let service = TexmlService::new(client);
                service.list_applications(request).await
            }
        })
    }

    pub async fn retrieve_application(
        &self,
        id: &ResourceId,
    ) -> Result<TexmlApplication, TelnyxError> {
        self.client
            .get_data(&["texml_applications", id.as_str()], Vec::new())
            .await
    }

    /// `PATCH /texml_applications/{id}`. The API wants the full parameter set.
    pub async fn update_application(
        &self,
        id: &ResourceId,
        request: TexmlApplicationParams,
    ) -> Result<TexmlApplication, TelnyxError> {
        self.client
            .patch_data(&["texml_applications", id.as_str()], &request)
            .await
    }

    pub async fn delete_application(
        &self,
        id: &ResourceId,
    ) -> Result<TexmlApplication, TelnyxError> {
        self.client
            .delete_data(&["texml_applications", id.as_str()])
            .await
    }

    /// Start an outbound call driven by a TeXML application.
    pub async fn initiate_call(
        &self,
        account_sid: &ResourceId,
        request: InitiateTexmlCall,
    ) -> Result<TexmlCallInitiated, TelnyxError> {
        self.client
            .post_json(&["texml", "Accounts", account_sid.as_str(), "Calls"], &request)
            .await
    }

    pub async fn retrieve_call(
        &self,
        account_sid: &ResourceId,
        call_sid: &ResourceId,
    ) -> Result<TexmlCall, TelnyxError> {
        self.client
            .get_json(&[
                "texml",
                "Accounts",
                account_sid.as_str(),
                "Calls",
                call_sid.as_str(),
            ])
            .await
    }

    /// End a live call or redirect it to new TeXML.
    pub async fn update_call(
        &self,
        account_sid: &ResourceId,
        call_sid: &ResourceId,
        request: UpdateTexmlCall,
    ) -> Result<TexmlCall, TelnyxError> {
        self.client
            .post_json(
                &[
                    "texml",
                    "Accounts",
                    account_sid.as_str(),
                    "Calls",
                    call_sid.as_str(),
                ],
                &request,
            )
            .await
    }
}
