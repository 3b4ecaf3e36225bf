use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use std::str::FromStr;
use ulid::Ulid;

use crate::text_column;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "CUSTOMER")]
    Customer,
    #[serde(rename = "RESTAURANT_OWNER")]
    RestaurantOwner,
    #[serde(rename = "DRIVER")]
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::RestaurantOwner => "RESTAURANT_OWNER",
            Role::Driver => "DRIVER",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Role::Customer),
            "RESTAURANT_OWNER" => Ok(Role::RestaurantOwner),
            "DRIVER" => Ok(Role::Driver),
            _ => Err(format!("'{}' is not a valid Role", s)),
        }
    }
}

text_column!(Role);

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: Option<String>,
    #[serde(skip)]
    pub google_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Customer {
    pub id: String,
    pub default_address: Option<String>,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct RestaurantOwner {
    pub id: String,
    pub user_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateUserPayload {
    pub email: String,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: Role,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E>(db: E, payload: CreateUserPayload) -> Result<User>
where
    E: PgExecutor<'e>,
{
    match sqlx::query_as::<_, User>(
        "
        INSERT INTO users (
            id,
            email,
            password_hash,
            google_id,
            first_name,
            last_name,
            phone_number,
            role
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.email.to_lowercase())
    .bind(payload.password_hash)
    .bind(payload.google_id)
    .bind(payload.first_name)
    .bind(payload.last_name)
    .bind(payload.phone_number)
    .bind(payload.role)
    .fetch_one(db)
    .await
    {
        Ok(user) => Ok(user),
        Err(err) => {
            tracing::error!("Error occured while creating a user account: {}", err);
            Err(Error::UnexpectedError)
        }
    }
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(e: E, email: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.to_lowercase())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_email: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_by_google_id<'e, E: PgExecutor<'e>>(
    e: E,
    google_id: String,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE google_id = $1")
        .bind(google_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_google_id: {}", err);
            Error::UnexpectedError
        })
}

pub async fn link_google_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    google_id: String,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            google_id = $1,
            updated_at = NOW()
        WHERE
            id = $2
        RETURNING *
        ",
    )
    .bind(google_id)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while linking a google account to user {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub struct UpdateUserPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateUserPayload,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            first_name = COALESCE($1, first_name),
            last_name = COALESCE($2, last_name),
            phone_number = COALESCE($3, phone_number),
            updated_at = NOW()
        WHERE
            id = $4
        RETURNING *
        ",
    )
    .bind(payload.first_name)
    .bind(payload.last_name)
    .bind(payload.phone_number)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update a user by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn create_customer<'e, E: PgExecutor<'e>>(e: E, user_id: String) -> Result<Customer> {
    sqlx::query_as::<_, Customer>(
        "
        INSERT INTO customers (id, user_id)
        VALUES ($1, $2)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(user_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating customer profile for user {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_customer_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<Customer>> {
    sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE user_id = $1")
        .bind(user_id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching customer profile for user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn update_customer_address<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    default_address: String,
) -> Result<Customer> {
    sqlx::query_as::<_, Customer>(
        "
        UPDATE customers SET
            default_address = $1,
            updated_at = NOW()
        WHERE
            id = $2
        RETURNING *
        ",
    )
    .bind(default_address)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating address of customer {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn create_restaurant_owner<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<RestaurantOwner> {
    sqlx::query_as::<_, RestaurantOwner>(
        "
        INSERT INTO restaurant_owners (id, user_id)
        VALUES ($1, $2)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(user_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating restaurant owner profile for user {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_restaurant_owner_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<RestaurantOwner>> {
    sqlx::query_as::<_, RestaurantOwner>("SELECT * FROM restaurant_owners WHERE user_id = $1")
        .bind(user_id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching restaurant owner profile for user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}

/// Creates the profile row that goes with the user's role. Drivers register
/// their vehicle separately, so no row is created for them here.
pub async fn create_profile<'e, E: PgExecutor<'e>>(e: E, user: &User) -> Result<()> {
    match user.role {
        Role::Customer => create_customer(e, user.id.clone()).await.map(|_| ()),
        Role::RestaurantOwner => create_restaurant_owner(e, user.id.clone()).await.map(|_| ()),
        Role::Driver => Ok(()),
    }
}

pub fn is_customer(user: &User) -> bool {
    user.role == Role::Customer
}

pub fn is_restaurant_owner(user: &User) -> bool {
    user.role == Role::RestaurantOwner
}

pub fn is_driver(user: &User) -> bool {
    user.role == Role::Driver
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_screaming_snake_case() {
        assert_eq!(Role::RestaurantOwner.to_string(), "RESTAURANT_OWNER");
        assert_eq!("DRIVER".parse::<Role>(), Ok(Role::Driver));
        assert!("ADMIN".parse::<Role>().is_err());
        assert_eq!(
            serde_json::to_string(&Role::Customer).unwrap(),
            "\"CUSTOMER\""
        );
    }
}
