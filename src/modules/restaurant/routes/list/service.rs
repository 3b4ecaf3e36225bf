use super::types::{request, response};
use crate::{modules::restaurant::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many(
        &ctx.db_conn.pool,
        payload.pagination,
        repository::Filters {
            search: payload
                .filters
                .search
                .filter(|search| !search.trim().is_empty()),
            owner_id: payload.filters.owner_id,
            is_open: payload.filters.is_open,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToFetchRestaurants)
    .map(response::Success::Restaurants)
}
