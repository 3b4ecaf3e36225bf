use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub restaurant_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct CreateCategoryPayload {
    pub name: String,
    pub restaurant_id: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    NameAlreadyInUse,
}

fn map_write_error(err: sqlx::Error, action: &str) -> Error {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            Error::NameAlreadyInUse
        }
        err => {
            tracing::error!("Error occurred while trying to {} a category: {}", action, err);
            Error::UnexpectedError
        }
    }
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateCategoryPayload,
) -> Result<Category, Error> {
    sqlx::query_as::<_, Category>(
        "
        INSERT INTO categories (id, name, restaurant_id)
        VALUES ($1, $2, $3)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name)
    .bind(payload.restaurant_id)
    .fetch_one(e)
    .await
    .map_err(|err| map_write_error(err, "create"))
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<Category>, Error> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching category {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_many_by_restaurant_id<'e, E: PgExecutor<'e>>(
    e: E,
    restaurant_id: String,
) -> Result<Vec<Category>, Error> {
    sqlx::query_as::<_, Category>(
        "
        SELECT * FROM categories
        WHERE restaurant_id = $1
        ORDER BY name ASC
        ",
    )
    .bind(restaurant_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching categories of restaurant {}: {}",
            restaurant_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    name: String,
) -> Result<Category, Error> {
    sqlx::query_as::<_, Category>(
        "
        UPDATE categories SET
            name = $1,
            updated_at = NOW()
        WHERE
            id = $2
        RETURNING *
        ",
    )
    .bind(name)
    .bind(id)
    .fetch_one(e)
    .await
    .map_err(|err| map_write_error(err, "update"))
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<(), Error> {
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while deleting category {}: {}", id, err);
            Error::UnexpectedError
        })
        .map(|_| ())
}
