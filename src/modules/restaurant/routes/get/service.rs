use super::types::response;
use crate::{modules::restaurant::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, id: String) -> response::Response {
    repository::find_with_location_by_id(&ctx.db_conn.pool, id)
        .await
        .map_err(|_| response::Error::FailedToFetchRestaurant)?
        .ok_or(response::Error::RestaurantNotFound)
        .map(response::Success::Restaurant)
}
