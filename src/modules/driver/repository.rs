use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Driver {
    pub id: String,
    pub vehicle_type: String,
    pub license_plate: String,
    pub is_available: bool,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateDriverPayload {
    pub vehicle_type: String,
    pub license_plate: String,
    pub user_id: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateDriverPayload,
) -> Result<Driver, Error> {
    sqlx::query_as::<_, Driver>(
        "
        INSERT INTO drivers (id, vehicle_type, license_plate, is_available, user_id)
        VALUES ($1, $2, $3, false, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.vehicle_type)
    .bind(payload.license_plate.to_uppercase())
    .bind(payload.user_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while registering user {} as a driver: {}",
            payload.user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<Driver>, Error> {
    sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE user_id = $1")
        .bind(user_id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching driver for user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn set_availability<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    is_available: bool,
) -> Result<Driver, Error> {
    sqlx::query_as::<_, Driver>(
        "
        UPDATE drivers SET
            is_available = $1,
            updated_at = NOW()
        WHERE
            id = $2
        RETURNING *
        ",
    )
    .bind(is_available)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating availability of driver {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}
