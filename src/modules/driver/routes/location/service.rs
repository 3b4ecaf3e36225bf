use super::types::{request, response};
use crate::{
    modules::location::repository::{self as location, Owner},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    location::find_by_owner(&ctx.db_conn.pool, Owner::Driver(payload.id))
        .await
        .map_err(|_| response::Error::FailedToFetchLocation)?
        .ok_or(response::Error::LocationNotFound)
        .map(response::Success::Location)
}
