use super::types::{request, response};
use crate::{
    modules::{
        media,
        restaurant::{repository, service as restaurant_service},
    },
    types::Context,
    utils::storage,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let restaurant =
        restaurant_service::find_owned(ctx.clone(), &payload.auth.user, payload.id).await?;
    let previous = restaurant.cover_image.map(|image| image.0);

    let cover_image = storage::replace_file(
        ctx.storage.clone(),
        previous.clone(),
        payload.body.cover_image.contents,
    )
    .await
    .map_err(|_| response::Error::FailedToUploadImage)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToUpdateRestaurant
    })?;

    if let Some(previous) = previous {
        media::repository::delete_by_public_id(&mut *tx, previous.public_id)
            .await
            .map_err(|_| response::Error::FailedToUpdateRestaurant)?;
    }

    media::repository::create(&mut *tx, cover_image.clone(), payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateRestaurant)?;

    let restaurant = repository::update_cover_image(&mut *tx, restaurant.id, cover_image)
        .await
        .map_err(|_| response::Error::FailedToUpdateRestaurant)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToUpdateRestaurant
    })?;

    Ok(response::Success::CoverImageUpdated(restaurant))
}
