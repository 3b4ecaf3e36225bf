use super::types::{request, response};
use crate::{modules::media::repository, types::Context, utils::storage};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let uploaded = storage::upload_temp_file(ctx.storage.clone(), payload.body.file.contents)
        .await
        .map_err(|_| response::Error::FailedToUploadMedia)?;

    repository::create(&ctx.db_conn.pool, uploaded, payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToUploadMedia)
        .map(response::Success::MediaUploaded)
}
