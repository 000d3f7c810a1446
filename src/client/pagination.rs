use std::future::Future;

use futures::stream::{self, Stream, TryStreamExt};

use crate::client::TelnyxError;
use crate::domain::{Page, PageParams};

/// Lazily walk a list endpoint, yielding items until `meta` reports the last page.
///
/// A page is only requested once the previous one has been fully consumed.
pub(crate) fn paginate<'a, T, F, Fut>(
    first: PageParams,
    fetch: F,
) -> impl Stream<Item = Result<T, TelnyxError>> + 'a
where
    T: 'a,
    F: FnMut(PageParams) -> Fut + 'a,
    Fut: Future<Output = Result<Page<T>, TelnyxError>> + 'a,
{
    stream::try_unfold((fetch, Some(first)), |(mut fetch, next)| async move {
        let Some(params) = next else {
            return Ok::<_, TelnyxError>(None);
        };
        let page = fetch(params).await?;
        // Stop if `meta` does not move past the page just requested.
        let following = page
            .next_page_params()
            .filter(|next| next.number() > params.number());
        let items = stream::iter(page.data.into_iter().map(Ok::<T, TelnyxError>));
        Ok(Some((items, (fetch, following))))
    })
    .try_flatten()
}
