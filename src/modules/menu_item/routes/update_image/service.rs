use super::types::{request, response};
use crate::{
    modules::{
        media,
        menu_item::{repository, service as menu_item_service},
    },
    types::Context,
    utils::storage,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let menu_item =
        menu_item_service::find_owned(ctx.clone(), &payload.auth.user, payload.id).await?;
    let previous = menu_item.image.map(|image| image.0);

    let image = storage::replace_file(
        ctx.storage.clone(),
        previous.clone(),
        payload.body.image.contents,
    )
    .await
    .map_err(|_| response::Error::FailedToUploadImage)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToUpdateMenuItem
    })?;

    if let Some(previous) = previous {
        media::repository::delete_by_public_id(&mut *tx, previous.public_id)
            .await
            .map_err(|_| response::Error::FailedToUpdateMenuItem)?;
    }

    media::repository::create(&mut *tx, image.clone(), payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateMenuItem)?;

    let menu_item = repository::update_image(&mut *tx, menu_item.id, image)
        .await
        .map_err(|_| response::Error::FailedToUpdateMenuItem)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToUpdateMenuItem
    })?;

    Ok(response::Success::ImageUpdated(menu_item))
}
