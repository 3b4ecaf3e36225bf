use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

use crate::utils::storage::UploadedMedia;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Media {
    pub id: String,
    pub public_id: String,
    pub url: String,
    pub timestamp: i64,
    pub owner_id: String,
    pub created_at: NaiveDateTime,
}

impl From<Media> for UploadedMedia {
    fn from(media: Media) -> Self {
        UploadedMedia {
            public_id: media.public_id,
            url: media.url,
            timestamp: media.timestamp,
        }
    }
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    media: UploadedMedia,
    owner_id: String,
) -> Result<Media, Error> {
    sqlx::query_as::<_, Media>(
        "
        INSERT INTO media (id, public_id, url, timestamp, owner_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(media.public_id)
    .bind(media.url)
    .bind(media.timestamp)
    .bind(owner_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to record media: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Media>, Error> {
    sqlx::query_as::<_, Media>("SELECT * FROM media WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to fetch media {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<(), Error> {
    sqlx::query("DELETE FROM media WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to delete media {}: {}", id, err);
            Error::UnexpectedError
        })
        .map(|_| ())
}

pub async fn delete_by_public_id<'e, E: PgExecutor<'e>>(
    e: E,
    public_id: String,
) -> Result<(), Error> {
    sqlx::query("DELETE FROM media WHERE public_id = $1")
        .bind(public_id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to delete media {}: {}",
                public_id,
                err
            );
            Error::UnexpectedError
        })
        .map(|_| ())
}

pub fn is_owner(media: &Media, user_id: &str) -> bool {
    media.owner_id == user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{modules::user::repository::Role, utils::fixtures};
    use sqlx::PgPool;

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn replaced_images_are_forgotten(pool: PgPool) {
        let owner = fixtures::user(&pool, Role::RestaurantOwner).await;
        let uploaded = UploadedMedia {
            public_id: String::from("covers/mama-put"),
            url: String::from("https://res.cloudinary.com/demo/image/upload/covers/mama-put.jpg"),
            timestamp: 1_727_740_800,
        };

        let media = create(&pool, uploaded.clone(), owner.id.clone())
            .await
            .expect("media should be recorded");
        assert_eq!(UploadedMedia::from(media.clone()), uploaded);
        assert!(is_owner(&media, &owner.id));

        delete_by_public_id(&pool, uploaded.public_id)
            .await
            .expect("media should be forgotten");

        let media = find_by_id(&pool, media.id).await.expect("lookup should run");
        assert!(media.is_none());
    }
}
