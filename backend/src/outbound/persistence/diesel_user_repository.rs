//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserCredentials};

use super::diesel_helpers::{
    is_unique_violation, map_diesel_error, map_pool_error, sql_limit, sql_offset,
    total_from_count,
};
use super::models::{NewUserRow, UserCredentialsRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        |message| UserPersistenceError::query(message),
        |message| UserPersistenceError::connection(message),
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, credentials: &UserCredentials) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        match diesel::insert_into(users::table)
            .values(NewUserRow::from(credentials))
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if is_unique_violation(&error) => {
                debug!("email already registered");
                Err(UserPersistenceError::duplicate_email(
                    credentials.user.email.clone(),
                ))
            }
            Err(error) => Err(diesel_error(error)),
        }
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserCredentialsRow> = users::table
            .filter(users::email.eq(email))
            .filter(users::deleted_at.is_null())
            .select(UserCredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(UserCredentials::from))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = users::table
            .filter(users::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::deleted_at.is_null())
            .order((users::name.asc(), users::id_user))
            .limit(sql_limit(page))
            .offset(sql_offset(page))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Page::new(
            rows.into_iter().map(User::from).collect(),
            page,
            total_from_count(total),
        ))
    }
}
