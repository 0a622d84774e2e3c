//! PostgreSQL-backed `RequestLog` implementation using Diesel ORM.
//!
//! Status transitions are `UPDATE ... WHERE status = 0`; an update that
//! touches no row means another caller resolved the request first. Accept
//! flips the status and decrements stock in one transaction, so a failed
//! decrement (including the `quantity >= 0` check) rolls the status back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Timestamptz, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{RequestLog, RequestLogError, StatusUpdate};
use crate::domain::{Request, RequestStatus, RequestWithFood};

use super::diesel_helpers::{
    map_diesel_error, map_pool_error, sql_limit, sql_offset, total_from_count,
};
use super::models::{NewRequestRow, PendingJoinRow, RequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::{foods, requests};

const DECREMENT_STOCK_SQL: &str = r#"
UPDATE foods
SET quantity = foods.quantity - requests.quantity,
    updated_at = $2
FROM requests
WHERE requests.id_request = $1
  AND foods.id_food = requests.id_food
"#;

/// Diesel-backed implementation of the [`RequestLog`] port.
#[derive(Clone)]
pub struct DieselRequestLog {
    pool: DbPool,
}

impl DieselRequestLog {
    /// Create a new request log with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> RequestLogError {
    map_pool_error(error, |message| RequestLogError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> RequestLogError {
    map_diesel_error(
        error,
        |message| RequestLogError::query(message),
        |message| RequestLogError::connection(message),
    )
}

fn stock_error(error: diesel::result::Error) -> RequestLogError {
    map_diesel_error(
        error,
        |message| RequestLogError::stock_update(message),
        |message| RequestLogError::connection(message),
    )
}

/// Failure inside the accept transaction, kept apart so the stock step can
/// be reported as such.
#[derive(Debug)]
enum AcceptFailure {
    Status(diesel::result::Error),
    Stock(diesel::result::Error),
    MissingFood,
}

impl From<diesel::result::Error> for AcceptFailure {
    fn from(error: diesel::result::Error) -> Self {
        Self::Status(error)
    }
}

impl From<AcceptFailure> for RequestLogError {
    fn from(failure: AcceptFailure) -> Self {
        match failure {
            AcceptFailure::Status(error) => diesel_error(error),
            AcceptFailure::Stock(error) => stock_error(error),
            AcceptFailure::MissingFood => RequestLogError::stock_update("food row not found"),
        }
    }
}

/// `UPDATE` target restricted to a request that is still pending.
type PendingRequest = diesel::dsl::Filter<
    diesel::dsl::Filter<requests::table, diesel::dsl::Eq<requests::id_request, Uuid>>,
    diesel::dsl::Eq<requests::status, i16>,
>;

fn pending_only(id_request: Uuid) -> PendingRequest {
    requests::table
        .filter(requests::id_request.eq(id_request))
        .filter(requests::status.eq(RequestStatus::Pending.code()))
}

fn into_requests(rows: Vec<RequestRow>) -> Result<Vec<Request>, RequestLogError> {
    rows.into_iter()
        .map(|row| Request::try_from(row).map_err(|err| RequestLogError::query(err.to_string())))
        .collect()
}

#[async_trait]
impl RequestLog for DieselRequestLog {
    async fn find_pending_with_food(
        &self,
        id_request: &Uuid,
    ) -> Result<Option<RequestWithFood>, RequestLogError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<PendingJoinRow> = requests::table
            .inner_join(foods::table)
            .filter(requests::id_request.eq(id_request))
            .filter(requests::status.eq(RequestStatus::Pending.code()))
            .select((
                requests::id_request,
                requests::id_user,
                requests::id_food,
                requests::status,
                requests::quantity,
                foods::id_user,
                foods::quantity,
            ))
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(RequestWithFood::try_from)
            .transpose()
            .map_err(|err| RequestLogError::query(err.to_string()))
    }

    async fn reject(
        &self,
        id_request: &Uuid,
        at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RequestLogError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let changed = diesel::update(pending_only(*id_request))
            .set((
                requests::status.eq(RequestStatus::Rejected.code()),
                requests::updated_at.eq(at),
            ))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(if changed == 0 {
            StatusUpdate::AlreadyResolved
        } else {
            StatusUpdate::Applied
        })
    }

    async fn accept(
        &self,
        id_request: &Uuid,
        at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RequestLogError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let id_request = *id_request;
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let outcome = conn
            .transaction::<StatusUpdate, AcceptFailure, _>(|conn| {
                async move {
                    let flipped = diesel::update(pending_only(id_request))
                        .set((
                            requests::status.eq(RequestStatus::Accepted.code()),
                            requests::updated_at.eq(at),
                        ))
                        .execute(conn)
                        .await?;
                    if flipped == 0 {
                        return Ok(StatusUpdate::AlreadyResolved);
                    }

                    let decremented = sql_query(DECREMENT_STOCK_SQL)
                        .bind::<SqlUuid, _>(id_request)
                        .bind::<Timestamptz, _>(at)
                        .execute(conn)
                        .await
                        .map_err(AcceptFailure::Stock)?;
                    if decremented == 0 {
                        return Err(AcceptFailure::MissingFood);
                    }

                    Ok(StatusUpdate::Applied)
                }
                .scope_boxed()
            })
            .await;

        outcome.map_err(|failure| {
            warn!(id_request = %id_request, ?failure, "accept transaction rolled back");
            RequestLogError::from(failure)
        })
    }

    async fn create(&self, request: &Request) -> Result<(), RequestLogError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(requests::table)
            .values(NewRequestRow::from(request))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_by_food(
        &self,
        id_food: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Request>, RequestLogError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = requests::table
            .filter(requests::id_food.eq(id_food))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<RequestRow> = requests::table
            .filter(requests::id_food.eq(id_food))
            .order((requests::updated_at.desc(), requests::id_request))
            .limit(sql_limit(page))
            .offset(sql_offset(page))
            .select(RequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Page::new(into_requests(rows)?, page, total_from_count(total)))
    }

    async fn list_by_requester(
        &self,
        id_user: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Request>, RequestLogError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let total: i64 = requests::table
            .filter(requests::id_user.eq(id_user))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        let rows: Vec<RequestRow> = requests::table
            .filter(requests::id_user.eq(id_user))
            .order((requests::updated_at.desc(), requests::id_request))
            .limit(sql_limit(page))
            .offset(sql_offset(page))
            .select(RequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Page::new(into_requests(rows)?, page, total_from_count(total)))
    }
}
