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

    if repository::has_been_ordered(&ctx.db_conn.pool, menu_item.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteMenuItem)?
    {
        return Err(response::Error::AlreadyOrdered);
    }

    repository::delete_by_id(&ctx.db_conn.pool, menu_item.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteMenuItem)?;

    if let Some(image) = menu_item.image {
        let public_id = image.0.public_id.clone();
        if media::repository::delete_by_public_id(&ctx.db_conn.pool, public_id)
            .await
            .is_err()
        {
            tracing::warn!("Failed to forget media of menu item {}", menu_item.id);
        }
        if storage::delete_file(ctx.storage.clone(), image.0).await.is_err() {
            tracing::warn!("Failed to remove image of menu item {}", menu_item.id);
        }
    }

    Ok(response::Success::MenuItemDeleted)
}
