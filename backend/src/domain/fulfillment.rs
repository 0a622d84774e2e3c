//! Request fulfillment: an owner accepts or rejects a pending request.
//!
//! The coordinator loads the pending request joined with its food, checks
//! ownership, checks stock for accepts, and then asks the [`RequestLog`] to
//! perform the transition. Accepting flips the status and decrements stock
//! in one transaction; rejecting is a single conditional update.
//!
//! The pending read and the transition are separate round trips, so the
//! transition itself re-checks that the request is still pending. A request
//! resolved by someone else in between is reported as already done, exactly
//! like a request that was never pending.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::error_chain::{ErrorChain, ErrorEvent, FieldError, codes};
use crate::domain::messages::{errors, events, keys};
use crate::domain::ports::{RequestActionInput, RequestLog, RequestLogError, StatusUpdate, UseCase};
use crate::domain::{RequestAction, RequestWithFood, ResponseEnvelope, settle};

const ACCEPT_REQUEST: &str = "accept_request";
const REJECT_REQUEST: &str = "reject_request";

fn map_request_log_error(event: &str, error: &RequestLogError) -> ErrorChain {
    ErrorEvent::new(event)
        .with_code(codes::INTERNAL_SERVER_ERROR)
        .wrap(error.to_string())
}

fn already_done(event: &str) -> ErrorChain {
    ErrorEvent::new(event)
        .with_code(codes::UNPROCESSABLE_ENTITY)
        .wrap(errors::ACTION_ALREADY_DONE)
}

/// Wrap a lower frame with the coordinator's own event.
fn request_action_frame(message: &str, inner: ErrorChain) -> ErrorChain {
    ErrorEvent::new(events::REQUEST_ACTION)
        .with_message(message)
        .wrap(inner)
}

/// Coordinator implementing the `request_action` use case.
#[derive(Clone)]
pub struct FulfillmentCoordinator<L> {
    request_log: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L> FulfillmentCoordinator<L> {
    /// Create a coordinator over a request log.
    pub fn new(request_log: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { request_log, clock }
    }
}

impl<L> FulfillmentCoordinator<L>
where
    L: RequestLog,
{
    async fn load_pending(&self, id_request: &Uuid) -> Result<RequestWithFood, ErrorChain> {
        let found = self
            .request_log
            .find_pending_with_food(id_request)
            .await
            .map_err(|err| {
                request_action_frame(
                    errors::ACTION_REQUEST_ERROR,
                    map_request_log_error(events::GET_PENDING_REQUEST, &err),
                )
            })?;
        found.ok_or_else(|| {
            request_action_frame(
                errors::ACTION_REQUEST_ERROR,
                already_done(events::GET_PENDING_REQUEST),
            )
        })
    }

    async fn reject(&self, pending: &RequestWithFood) -> Result<ResponseEnvelope, ErrorChain> {
        let outcome = self
            .request_log
            .reject(&pending.id_request, self.clock.utc())
            .await
            .map_err(|err| {
                let inner = ErrorEvent::new(REJECT_REQUEST)
                    .with_code(codes::UNPROCESSABLE_ENTITY)
                    .wrap(err.to_string());
                request_action_frame(errors::ACTION_NOT_VALID, inner)
            })?;
        match outcome {
            StatusUpdate::Applied => {
                info!(id_request = %pending.id_request, "request rejected");
                Ok(ResponseEnvelope::success(events::REQUEST_ACTION, codes::OK, None)
                    .with_message_key(keys::REQUEST_ACTION_SUCCESS))
            }
            StatusUpdate::AlreadyResolved => {
                warn!(id_request = %pending.id_request, "request resolved concurrently");
                Err(request_action_frame(
                    errors::ACTION_REQUEST_ERROR,
                    already_done(REJECT_REQUEST),
                ))
            }
        }
    }

    async fn accept(&self, pending: &RequestWithFood) -> Result<ResponseEnvelope, ErrorChain> {
        if !pending.stock_covers_request() {
            return Err(ErrorEvent::new(events::REQUEST_ACTION)
                .with_code(codes::UNPROCESSABLE_ENTITY)
                .wrap(errors::NOT_ENOUGH_QUANTITY));
        }

        let outcome = self
            .request_log
            .accept(&pending.id_request, self.clock.utc())
            .await
            .map_err(|err| {
                let message = match err {
                    RequestLogError::StockUpdate { .. } => errors::UPDATE_FOOD_ERROR,
                    RequestLogError::Connection { .. } | RequestLogError::Query { .. } => {
                        errors::ACTION_REQUEST_ERROR
                    }
                };
                request_action_frame(message, map_request_log_error(ACCEPT_REQUEST, &err))
            })?;
        match outcome {
            StatusUpdate::Applied => {
                info!(
                    id_request = %pending.id_request,
                    id_food = %pending.id_food,
                    quantity = pending.quantity,
                    "request accepted"
                );
                Ok(
                    ResponseEnvelope::success_with(events::REQUEST_ACTION, codes::OK, pending)
                        .with_message_key(keys::REQUEST_ACTION_SUCCESS),
                )
            }
            StatusUpdate::AlreadyResolved => {
                warn!(id_request = %pending.id_request, "request resolved concurrently");
                Err(request_action_frame(
                    errors::ACTION_REQUEST_ERROR,
                    already_done(ACCEPT_REQUEST),
                ))
            }
        }
    }

    async fn fulfil(&self, input: RequestActionInput) -> Result<ResponseEnvelope, ErrorChain> {
        let action: RequestAction = input.action.parse().map_err(|_| {
            ErrorEvent::new(events::REQUEST_ACTION)
                .with_code(codes::UNPROCESSABLE_ENTITY)
                .wrap(FieldError::new("action", errors::ACTION_NOT_VALID))
        })?;

        let pending = self.load_pending(&input.id_request).await?;

        if !pending.is_owned_by(input.actor) {
            warn!(
                id_request = %input.id_request,
                actor = %input.actor,
                "request action by non-owner"
            );
            return Err(ErrorEvent::new(events::REQUEST_ACTION)
                .with_code(codes::FORBIDDEN)
                .with_message(errors::ID_NOT_VALID)
                .wrap(errors::FORBIDDEN));
        }

        match action {
            RequestAction::Reject => self.reject(&pending).await,
            RequestAction::Accept => self.accept(&pending).await,
        }
    }
}

#[async_trait]
impl<L> UseCase<RequestActionInput> for FulfillmentCoordinator<L>
where
    L: RequestLog,
{
    async fn resolve(&self, input: RequestActionInput) -> ResponseEnvelope {
        settle(events::REQUEST_ACTION, self.fulfil(input).await)
    }
}

#[cfg(test)]
#[path = "fulfillment_tests.rs"]
mod tests;
