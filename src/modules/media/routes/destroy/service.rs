use super::types::{request, response};
use crate::{modules::media::repository, types::Context, utils::storage};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let media = repository::find_by_id(&ctx.db_conn.pool, payload.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteMedia)?
        .ok_or(response::Error::MediaNotFound)?;

    if !repository::is_owner(&media, &payload.auth.user.id) {
        return Err(response::Error::NotMediaOwner);
    }

    storage::delete_file(ctx.storage.clone(), media.into())
        .await
        .map_err(|_| response::Error::FailedToDeleteMedia)?;

    repository::delete_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteMedia)
        .map(|_| response::Success::MediaDeleted)
}
