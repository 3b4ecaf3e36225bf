use std::sync::Arc;

use super::repository::{self, Driver};
use crate::{
    modules::user::{self, repository::User},
    types::Context,
};

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    NotDriver,
    NotRegistered,
}

/// Loads the driver profile of `user`.
pub async fn find_registered(ctx: Arc<Context>, user: &User) -> Result<Driver, Error> {
    if !user::repository::is_driver(user) {
        return Err(Error::NotDriver);
    }

    repository::find_by_user_id(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::NotRegistered)
}
