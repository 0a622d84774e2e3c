//! Port for request persistence and the fulfillment state transition.
//!
//! Status transitions are conditional on the request still being pending.
//! Adapters report a transition that matched no pending row as
//! [`StatusUpdate::AlreadyResolved`] rather than as success, so two racing
//! owners cannot both resolve the same request.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::{Request, RequestWithFood};

use super::define_port_error;

define_port_error! {
    /// Errors raised by request log adapters.
    pub enum RequestLogError {
        /// Repository connection could not be established.
        Connection { message: String } => "request log connection failed: {message}",
        /// Query or status update failed during execution.
        Query { message: String } => "request log query failed: {message}",
        /// Stock decrement inside the accept transaction failed.
        StockUpdate { message: String } => "stock update failed: {message}",
    }
}

/// Outcome of a conditional status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The pending row was transitioned.
    Applied,
    /// No pending row matched; someone resolved it first.
    AlreadyResolved,
}

/// Port for reading and resolving food requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestLog: Send + Sync {
    /// Load a pending request joined with its food's owner and stock.
    async fn find_pending_with_food(
        &self,
        id_request: &Uuid,
    ) -> Result<Option<RequestWithFood>, RequestLogError>;

    /// Mark a pending request rejected. Stock is untouched.
    async fn reject(
        &self,
        id_request: &Uuid,
        at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RequestLogError>;

    /// Mark a pending request accepted and decrement its food's stock by the
    /// requested quantity, atomically.
    async fn accept(
        &self,
        id_request: &Uuid,
        at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RequestLogError>;

    /// Store a new pending request.
    async fn create(&self, request: &Request) -> Result<(), RequestLogError>;

    /// Requests made against a food, most recently updated first.
    async fn list_by_food(
        &self,
        id_food: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Request>, RequestLogError>;

    /// Requests made by a user, most recently updated first.
    async fn list_by_requester(
        &self,
        id_user: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Request>, RequestLogError>;
}

/// Fixture implementation for running without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRequestLog;

#[async_trait]
impl RequestLog for FixtureRequestLog {
    async fn find_pending_with_food(
        &self,
        _id_request: &Uuid,
    ) -> Result<Option<RequestWithFood>, RequestLogError> {
        Ok(None)
    }

    async fn reject(
        &self,
        _id_request: &Uuid,
        _at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RequestLogError> {
        Ok(StatusUpdate::AlreadyResolved)
    }

    async fn accept(
        &self,
        _id_request: &Uuid,
        _at: DateTime<Utc>,
    ) -> Result<StatusUpdate, RequestLogError> {
        Ok(StatusUpdate::AlreadyResolved)
    }

    async fn create(&self, _request: &Request) -> Result<(), RequestLogError> {
        Ok(())
    }

    async fn list_by_food(
        &self,
        _id_food: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Request>, RequestLogError> {
        Ok(Page::new(Vec::new(), page, 0))
    }

    async fn list_by_requester(
        &self,
        _id_user: &Uuid,
        page: PageRequest,
    ) -> Result<Page<Request>, RequestLogError> {
        Ok(Page::new(Vec::new(), page, 0))
    }
}
