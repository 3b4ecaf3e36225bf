use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgExecutor};
use ulid::Ulid;

use crate::utils::{
    pagination::{Paginated, Pagination},
    storage::UploadedMedia,
};

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image: Option<Json<UploadedMedia>>,
    pub is_available: bool,
    pub restaurant_id: String,
    pub category_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateMenuItemPayload {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image: UploadedMedia,
    pub restaurant_id: String,
    pub category_id: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateMenuItemPayload,
) -> Result<MenuItem, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        INSERT INTO menu_items (
            id,
            name,
            description,
            price,
            image,
            restaurant_id,
            category_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(Json(payload.image))
    .bind(payload.restaurant_id)
    .bind(payload.category_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a menu item: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching menu item {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_many_by_ids<'e, E: PgExecutor<'e>>(
    e: E,
    ids: Vec<String>,
) -> Result<Vec<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>("SELECT * FROM menu_items WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching menu items by ids: {}", err);
            Error::UnexpectedError
        })
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Filters {
    pub restaurant_id: Option<String>,
    pub category_id: Option<String>,
    pub is_available: Option<bool>,
}

pub async fn find_many<'e, E: PgExecutor<'e> + Copy>(
    e: E,
    pagination: Pagination,
    filters: Filters,
) -> Result<Paginated<MenuItem>, Error> {
    let items = sqlx::query_as::<_, MenuItem>(
        "
        SELECT * FROM menu_items
        WHERE
            ($1::TEXT IS NULL OR restaurant_id = $1)
            AND ($2::TEXT IS NULL OR category_id = $2)
            AND ($3::BOOLEAN IS NULL OR is_available = $3)
        ORDER BY name ASC
        LIMIT $4 OFFSET $5
        ",
    )
    .bind(filters.restaurant_id.clone())
    .bind(filters.category_id.clone())
    .bind(filters.is_available)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many menu items: {}", err);
        Error::UnexpectedError
    })?;

    let total = sqlx::query_scalar::<_, i64>(
        "
        SELECT COUNT(*) FROM menu_items
        WHERE
            ($1::TEXT IS NULL OR restaurant_id = $1)
            AND ($2::TEXT IS NULL OR category_id = $2)
            AND ($3::BOOLEAN IS NULL OR is_available = $3)
        ",
    )
    .bind(filters.restaurant_id)
    .bind(filters.category_id)
    .bind(filters.is_available)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to count menu items: {}", err);
        Error::UnexpectedError
    })?;

    Ok(pagination.paginate(items, total))
}

pub async fn find_all_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<MenuItem>, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        SELECT * FROM menu_items
        WHERE restaurant_id = $1
        ORDER BY name ASC
        ",
    )
    .bind(restaurant_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching menu of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Default)]
pub struct UpdateMenuItemPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<BigDecimal>,
    pub category_id: Option<String>,
    pub is_available: Option<bool>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateMenuItemPayload,
) -> Result<MenuItem, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        UPDATE menu_items SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            price = COALESCE($3, price),
            category_id = COALESCE($4, category_id),
            is_available = COALESCE($5, is_available),
            updated_at = NOW()
        WHERE
            id = $6
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.price)
    .bind(payload.category_id)
    .bind(payload.is_available)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update menu item {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_image<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    image: UploadedMedia,
) -> Result<MenuItem, Error> {
    sqlx::query_as::<_, MenuItem>(
        "
        UPDATE menu_items SET
            image = $1,
            updated_at = NOW()
        WHERE
            id = $2
        RETURNING *
        ",
    )
    .bind(Json(image))
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating image of menu item {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn has_been_ordered<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<bool, Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM order_items WHERE menu_item_id = $1)",
    )
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while checking orders of menu item {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<(), Error> {
    sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while deleting menu item {}: {}", id, err);
            Error::UnexpectedError
        })
        .map(|_| ())
}
