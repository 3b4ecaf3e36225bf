use super::types::{request, response};
use crate::{
    modules::{
        media,
        menu_item::{repository, service as menu_item_service},
        restaurant::service as restaurant_service,
    },
    types::Context,
    utils::storage,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let body = payload.body;
    let details = request::Details {
        name: body.name.trim().to_string(),
        description: body.description,
        price: body.price.0,
    };

    details.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let restaurant =
        restaurant_service::find_owned(ctx.clone(), &payload.auth.user, body.restaurant_id)
            .await
            .map_err(menu_item_service::Error::from)?;

    let category_id = body.category_id.filter(|id| !id.trim().is_empty());
    if let Some(category_id) = category_id.clone() {
        menu_item_service::ensure_category_belongs_to(ctx.clone(), category_id, &restaurant.id)
            .await?;
    }

    let image = storage::upload_temp_file(ctx.storage.clone(), body.image.contents)
        .await
        .map_err(|_| response::Error::FailedToUploadImage)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToCreateMenuItem
    })?;

    media::repository::create(&mut *tx, image.clone(), payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToCreateMenuItem)?;

    let menu_item = repository::create(
        &mut *tx,
        repository::CreateMenuItemPayload {
            name: details.name,
            description: details.description,
            price: details.price,
            image,
            restaurant_id: restaurant.id,
            category_id,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateMenuItem)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToCreateMenuItem
    })?;

    Ok(response::Success::MenuItemCreated(menu_item))
}
