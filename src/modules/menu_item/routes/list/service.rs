use super::types::{request, response};
use crate::{modules::menu_item::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many(&ctx.db_conn.pool, payload.pagination, payload.filters)
        .await
        .map_err(|_| response::Error::FailedToFetchMenuItems)
        .map(response::Success::MenuItems)
}
