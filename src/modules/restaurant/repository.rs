use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgExecutor};
use ulid::Ulid;

use crate::utils::{
    geo::Coordinates,
    pagination::{Paginated, Pagination},
    storage::UploadedMedia,
};

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub opening_time: String,
    pub closing_time: String,
    pub is_open: bool,
    pub cover_image: Option<Json<UploadedMedia>>,
    pub owner_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct RestaurantWithLocation {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub restaurant: Restaurant,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RestaurantWithLocation {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}

pub struct CreateRestaurantPayload {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub opening_time: String,
    pub closing_time: String,
    pub owner_id: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

const SELECT_WITH_LOCATION: &str = "
    SELECT
        restaurants.*,
        geo_locations.latitude,
        geo_locations.longitude
    FROM
        restaurants
    LEFT JOIN geo_locations ON geo_locations.restaurant_id = restaurants.id
";

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateRestaurantPayload,
) -> Result<Restaurant, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        INSERT INTO restaurants (
            id,
            name,
            description,
            address,
            phone_number,
            opening_time,
            closing_time,
            owner_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.address)
    .bind(payload.phone_number)
    .bind(payload.opening_time)
    .bind(payload.closing_time)
    .bind(payload.owner_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a restaurant: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<Restaurant>, Error> {
    sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching restaurant {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_with_location_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<RestaurantWithLocation>, Error> {
    sqlx::query_as::<_, RestaurantWithLocation>(&format!(
        "{} WHERE restaurants.id = $1",
        SELECT_WITH_LOCATION
    ))
    .bind(id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching restaurant {} with location: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Filters {
    pub search: Option<String>,
    pub owner_id: Option<String>,
    pub is_open: Option<bool>,
}

pub async fn find_many<'e, E: PgExecutor<'e> + Copy>(
    e: E,
    pagination: Pagination,
    filters: Filters,
) -> Result<Paginated<Restaurant>, Error> {
    let search = filters.search.map(|search| format!("%{}%", search));

    let restaurants = sqlx::query_as::<_, Restaurant>(
        "
        SELECT * FROM restaurants
        WHERE
            ($1::TEXT IS NULL OR name ILIKE $1)
            AND ($2::TEXT IS NULL OR owner_id = $2)
            AND ($3::BOOLEAN IS NULL OR is_open = $3)
        ORDER BY created_at DESC
        LIMIT $4 OFFSET $5
        ",
    )
    .bind(search.clone())
    .bind(filters.owner_id.clone())
    .bind(filters.is_open)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many restaurants: {}", err);
        Error::UnexpectedError
    })?;

    let total = sqlx::query_scalar::<_, i64>(
        "
        SELECT COUNT(*) FROM restaurants
        WHERE
            ($1::TEXT IS NULL OR name ILIKE $1)
            AND ($2::TEXT IS NULL OR owner_id = $2)
            AND ($3::BOOLEAN IS NULL OR is_open = $3)
        ",
    )
    .bind(search)
    .bind(filters.owner_id)
    .bind(filters.is_open)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to count restaurants: {}", err);
        Error::UnexpectedError
    })?;

    Ok(pagination.paginate(restaurants, total))
}

/// Every open restaurant that has a location set.
pub async fn find_open_with_location<'e, E: PgExecutor<'e>>(
    e: E,
) -> Result<Vec<RestaurantWithLocation>, Error> {
    sqlx::query_as::<_, RestaurantWithLocation>(&format!(
        "{} WHERE restaurants.is_open AND geo_locations.id IS NOT NULL",
        SELECT_WITH_LOCATION
    ))
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching restaurants with locations: {}",
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Default)]
pub struct UpdateRestaurantPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub is_open: Option<bool>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateRestaurantPayload,
) -> Result<Restaurant, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        UPDATE restaurants SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            address = COALESCE($3, address),
            phone_number = COALESCE($4, phone_number),
            opening_time = COALESCE($5, opening_time),
            closing_time = COALESCE($6, closing_time),
            is_open = COALESCE($7, is_open),
            updated_at = NOW()
        WHERE
            id = $8
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.description)
    .bind(payload.address)
    .bind(payload.phone_number)
    .bind(payload.opening_time)
    .bind(payload.closing_time)
    .bind(payload.is_open)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update restaurant {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_cover_image<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    cover_image: UploadedMedia,
) -> Result<Restaurant, Error> {
    sqlx::query_as::<_, Restaurant>(
        "
        UPDATE restaurants SET
            cover_image = $1,
            updated_at = NOW()
        WHERE
            id = $2
        RETURNING *
        ",
    )
    .bind(Json(cover_image))
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating cover image of restaurant {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn count_active_orders<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<i64, Error> {
    sqlx::query_scalar::<_, i64>(
        "
        SELECT COUNT(*) FROM orders
        WHERE
            restaurant_id = $1
            AND status NOT IN ('DELIVERED', 'CANCELLED')
        ",
    )
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while counting active orders of restaurant {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<(), Error> {
    sqlx::query("DELETE FROM restaurants WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while deleting restaurant {}: {}", id, err);
            Error::UnexpectedError
        })
        .map(|_| ())
}

pub fn is_owner(restaurant: &Restaurant, owner_id: &str) -> bool {
    restaurant.owner_id == owner_id
}
