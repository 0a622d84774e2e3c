//! PostgreSQL-backed `StockLedger` implementation using Diesel ORM.
//!
//! Every read filters on `deleted_at IS NULL`; soft-deleted foods are
//! invisible to the domain.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::Food;
use crate::domain::ports::{StockLedger, StockLedgerError};

use super::diesel_helpers::{
    map_diesel_error, map_pool_error, sql_limit, sql_offset, total_from_count,
};
use super::models::{FoodRow, FoodUpdate, NewFoodRow};
use super::pool::{DbPool, PoolError};
use super::schema::foods;

/// Diesel-backed implementation of the [`StockLedger`] port.
#[derive(Clone)]
pub struct DieselStockLedger {
    pool: DbPool,
}

impl DieselStockLedger {
    /// Create a new ledger with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> StockLedgerError {
    map_pool_error(error, |message| StockLedgerError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> StockLedgerError {
    map_diesel_error(
        error,
        |message| StockLedgerError::query(message),
        |message| StockLedgerError::connection(message),
    )
}

#[async_trait]
impl StockLedger for DieselStockLedger {
    async fn list_active(&self, page: PageRequest) -> Result<Page<Food>, StockLedgerError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = foods::table
            .filter(foods::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<FoodRow> = foods::table
            .filter(foods::deleted_at.is_null())
            .order((foods::created_at.desc(), foods::id_food))
            .limit(sql_limit(page))
            .offset(sql_offset(page))
            .select(FoodRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Page::new(
            rows.into_iter().map(Food::from).collect(),
            page,
            total_from_count(total),
        ))
    }

    async fn find_active(&self, id_food: &Uuid) -> Result<Option<Food>, StockLedgerError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<FoodRow> = foods::table
            .filter(foods::id_food.eq(id_food))
            .filter(foods::deleted_at.is_null())
            .select(FoodRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        Ok(row.map(Food::from))
    }

    async fn list_by_owner(
        &self,
        id_user: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Food>, StockLedgerError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = foods::table
            .filter(foods::id_user.eq(id_user))
            .filter(foods::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<FoodRow> = foods::table
            .filter(foods::id_user.eq(id_user))
            .filter(foods::deleted_at.is_null())
            .order((foods::created_at.desc(), foods::id_food))
            .limit(sql_limit(page))
            .offset(sql_offset(page))
            .select(FoodRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Page::new(
            rows.into_iter().map(Food::from).collect(),
            page,
            total_from_count(total),
        ))
    }

    async fn create(&self, food: &Food) -> Result<(), StockLedgerError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(foods::table)
            .values(NewFoodRow::from(food))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn update(&self, food: &Food) -> Result<(), StockLedgerError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changed = diesel::update(
            foods::table
                .filter(foods::id_food.eq(food.id_food))
                .filter(foods::deleted_at.is_null()),
        )
        .set(FoodUpdate::from(food))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        if changed == 0 {
            return Err(StockLedgerError::query("food not found for update"));
        }
        Ok(())
    }

    async fn soft_delete(
        &self,
        id_food: &Uuid,
        at: DateTime<Utc>,
    ) -> Result<bool, StockLedgerError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changed = diesel::update(
            foods::table
                .filter(foods::id_food.eq(id_food))
                .filter(foods::deleted_at.is_null()),
        )
        .set((
            foods::is_active.eq(false),
            foods::deleted_at.eq(Some(at)),
            foods::updated_at.eq(at),
        ))
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(changed > 0)
    }
}
