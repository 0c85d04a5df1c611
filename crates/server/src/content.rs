use serde::de::DeserializeOwned;
use shared_types::{Collection, CREATED_AT};

use crate::gateway::{select_rows, Gateway, GatewayError, Query};

/// The `limit` most recent rows of `collection`, newest first, returned as the backend sent them.
#[tracing::instrument(skip(gateway, auth))]
pub async fn recent_rows<T: DeserializeOwned>(
    gateway: &dyn Gateway,
    collection: Collection,
    limit: usize,
    auth: Option<&str>,
) -> Result<Vec<T>, GatewayError> {
    let query = Query::select(collection).order_desc(CREATED_AT).limit(limit);
    select_rows(gateway, &query, auth).await
}
