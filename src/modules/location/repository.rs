use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

use crate::utils::geo::Coordinates;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct GeoLocation {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub restaurant_id: Option<String>,
    pub driver_id: Option<String>,
    pub customer_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl GeoLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Who a location belongs to. Each owner has at most one location row.
#[derive(Clone, Debug)]
pub enum Owner {
    Restaurant(String),
    Driver(String),
    Customer(String),
}

impl Owner {
    fn column(&self) -> &'static str {
        match self {
            Owner::Restaurant(_) => "restaurant_id",
            Owner::Driver(_) => "driver_id",
            Owner::Customer(_) => "customer_id",
        }
    }

    fn id(&self) -> String {
        match self {
            Owner::Restaurant(id) | Owner::Driver(id) | Owner::Customer(id) => id.clone(),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn upsert<'e, E: PgExecutor<'e>>(
    e: E,
    owner: Owner,
    coordinates: Coordinates,
) -> Result<GeoLocation, Error> {
    // the column name comes from a closed set, never from user input
    let query = format!(
        "
        INSERT INTO geo_locations (id, latitude, longitude, {column})
        VALUES ($1, $2, $3, $4)
        ON CONFLICT ({column}) DO UPDATE SET
            latitude = EXCLUDED.latitude,
            longitude = EXCLUDED.longitude,
            updated_at = NOW()
        RETURNING *
        ",
        column = owner.column()
    );

    sqlx::query_as::<_, GeoLocation>(&query)
        .bind(Ulid::new().to_string())
        .bind(coordinates.latitude)
        .bind(coordinates.longitude)
        .bind(owner.id())
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while saving location for {:?}: {}",
                owner,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_owner<'e, E: PgExecutor<'e>>(
    e: E,
    owner: Owner,
) -> Result<Option<GeoLocation>, Error> {
    let query = format!(
        "SELECT * FROM geo_locations WHERE {} = $1",
        owner.column()
    );

    sqlx::query_as::<_, GeoLocation>(&query)
        .bind(owner.id())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching location for {:?}: {}",
                owner,
                err
            );
            Error::UnexpectedError
        })
}
