use super::types::{request, response};
use crate::{
    modules::menu_item::{repository, service as menu_item_service},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let menu_item =
        menu_item_service::find_owned(ctx.clone(), &payload.auth.user, payload.id).await?;

    if let Some(category_id) = payload.body.category_id.clone() {
        menu_item_service::ensure_category_belongs_to(
            ctx.clone(),
            category_id,
            &menu_item.restaurant_id,
        )
        .await?;
    }

    repository::update_by_id(
        &ctx.db_conn.pool,
        menu_item.id,
        repository::UpdateMenuItemPayload {
            name: payload.body.name.map(|name| name.trim().to_string()),
            description: payload.body.description,
            price: payload.body.price,
            category_id: payload.body.category_id,
            is_available: payload.body.is_available,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateMenuItem)
    .map(response::Success::MenuItemUpdated)
}
