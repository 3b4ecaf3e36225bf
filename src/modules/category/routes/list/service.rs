use super::types::{request, response};
use crate::{modules::category::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many_by_restaurant_id(&ctx.db_conn.pool, payload.filters.restaurant_id)
        .await
        .map_err(|_| response::Error::FailedToFetchCategories)
        .map(response::Success::Categories)
}
