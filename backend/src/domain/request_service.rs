//! Request creation and listing use cases.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::error_chain::{ErrorChain, ErrorEvent, codes};
use crate::domain::food_service::map_ledger_error;
use crate::domain::messages::{errors, events};
use crate::domain::ports::{
    CreateRequestInput, ListRequestsForFoodInput, ListRequestsForUserInput, RequestLog,
    RequestLogError, StockLedger, UseCase,
};
use crate::domain::{ResponseEnvelope, settle};

const REQUEST_LOG: &str = "request_log";

fn map_request_log_error(event: &str, message: &str, error: &RequestLogError) -> ErrorChain {
    let inner = ErrorEvent::new(REQUEST_LOG).wrap(error.to_string());
    ErrorEvent::new(event).with_message(message).wrap(inner)
}

/// Service implementing request creation and listings.
#[derive(Clone)]
pub struct RequestService<S, L> {
    ledger: Arc<S>,
    request_log: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<S, L> RequestService<S, L> {
    /// Create a new service over the stock ledger and request log.
    pub fn new(ledger: Arc<S>, request_log: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger,
            request_log,
            clock,
        }
    }
}

impl<S, L> RequestService<S, L>
where
    S: StockLedger,
    L: RequestLog,
{
    async fn create(&self, input: CreateRequestInput) -> Result<ResponseEnvelope, ErrorChain> {
        let event = events::CREATE_REQUEST;
        input.draft.validate().map_err(|fields| {
            ErrorEvent::new(event)
                .with_code(codes::UNPROCESSABLE_ENTITY)
                .wrap(fields)
        })?;

        let food = self
            .ledger
            .find_active(&input.id_food)
            .await
            .map_err(|err| map_ledger_error(event, errors::CREATE_REQUEST_ERROR, &err))?
            .ok_or_else(|| {
                ErrorEvent::new(event)
                    .with_code(codes::BAD_REQUEST)
                    .wrap(errors::FOOD_NOT_FOUND)
            })?;

        if food.quantity <= input.draft.quantity {
            return Err(ErrorEvent::new(event)
                .with_code(codes::UNPROCESSABLE_ENTITY)
                .wrap(errors::NOT_ENOUGH_QUANTITY));
        }

        let request = input.draft.into_request(
            Uuid::new_v4(),
            input.actor,
            input.id_food,
            self.clock.utc(),
        );
        self.request_log
            .create(&request)
            .await
            .map_err(|err| map_request_log_error(event, errors::CREATE_REQUEST_ERROR, &err))?;

        info!(
            id_request = %request.id_request,
            id_food = %request.id_food,
            quantity = request.quantity,
            "request created"
        );
        Ok(ResponseEnvelope::success_with(event, codes::CREATED, &request))
    }

    async fn list_for_food(
        &self,
        input: ListRequestsForFoodInput,
    ) -> Result<ResponseEnvelope, ErrorChain> {
        let event = events::LIST_REQUESTS_FOOD;
        let food = self
            .ledger
            .find_active(&input.id_food)
            .await
            .map_err(|err| map_ledger_error(event, errors::LIST_REQUESTS_ERROR, &err))?
            .ok_or_else(|| {
                ErrorEvent::new(event)
                    .with_code(codes::NOT_FOUND)
                    .wrap(errors::FOOD_NOT_FOUND)
            })?;
        if !food.is_owned_by(input.actor) {
            return Err(ErrorEvent::new(event)
                .with_code(codes::FORBIDDEN)
                .wrap(errors::FORBIDDEN));
        }

        let page = self
            .request_log
            .list_by_food(&input.id_food, input.page)
            .await
            .map_err(|err| map_request_log_error(event, errors::LIST_REQUESTS_ERROR, &err))?;
        let (items, pagination) = page.into_parts();
        Ok(ResponseEnvelope::success_with(event, codes::OK, &items).with_pagination(pagination))
    }

    async fn list_for_user(
        &self,
        input: ListRequestsForUserInput,
    ) -> Result<ResponseEnvelope, ErrorChain> {
        let event = events::LIST_REQUESTS_USER;
        let page = self
            .request_log
            .list_by_requester(&input.actor, input.page)
            .await
            .map_err(|err| map_request_log_error(event, errors::LIST_REQUESTS_ERROR, &err))?;
        let (items, pagination) = page.into_parts();
        Ok(ResponseEnvelope::success_with(event, codes::OK, &items).with_pagination(pagination))
    }
}

#[async_trait]
impl<S, L> UseCase<CreateRequestInput> for RequestService<S, L>
where
    S: StockLedger,
    L: RequestLog,
{
    async fn resolve(&self, input: CreateRequestInput) -> ResponseEnvelope {
        settle(events::CREATE_REQUEST, self.create(input).await)
    }
}

#[async_trait]
impl<S, L> UseCase<ListRequestsForFoodInput> for RequestService<S, L>
where
    S: StockLedger,
    L: RequestLog,
{
    async fn resolve(&self, input: ListRequestsForFoodInput) -> ResponseEnvelope {
        settle(events::LIST_REQUESTS_FOOD, self.list_for_food(input).await)
    }
}

#[async_trait]
impl<S, L> UseCase<ListRequestsForUserInput> for RequestService<S, L>
where
    S: StockLedger,
    L: RequestLog,
{
    async fn resolve(&self, input: ListRequestsForUserInput) -> ResponseEnvelope {
        settle(events::LIST_REQUESTS_USER, self.list_for_user(input).await)
    }
}

#[cfg(test)]
#[path = "request_service_tests.rs"]
mod tests;
