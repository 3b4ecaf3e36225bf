use super::types::{request, response};
use crate::{
    modules::category::{repository, service as category_service},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let category = category_service::find_owned(ctx.clone(), &payload.auth.user, payload.id).await?;

    // menu items keep existing with category_id set to NULL
    repository::delete_by_id(&ctx.db_conn.pool, category.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteCategory)
        .map(|_| response::Success::CategoryDeleted)
}
