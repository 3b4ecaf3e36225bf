use super::types::{request, response};
use crate::{
    modules::{frontend::pages, restaurant::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurants = repository::find_many(
        &ctx.db_conn.pool,
        payload.pagination,
        repository::Filters {
            is_open: Some(true),
            ..Default::default()
        },
    )
    .await
    .map_err(|_| response::Error::FailedToRenderPage)?;

    Ok(response::Success::Page(pages::home(&restaurants.items)))
}
