//! Food listing use cases.
//!
//! Public reads go straight to the ledger. Owner operations load the live
//! food first and refuse anyone but its owner.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::error_chain::{ErrorChain, ErrorEvent, codes};
use crate::domain::messages::{errors, events};
use crate::domain::ports::{
    CreateFoodInput, DeleteFoodInput, FoodDetailInput, ListFoodsInput, ListMyFoodsInput,
    MyFoodDetailInput, StockLedger, StockLedgerError, UpdateFoodInput, UseCase,
};
use crate::domain::{Food, ResponseEnvelope, settle};

const STOCK_LEDGER: &str = "stock_ledger";

/// Wrap a ledger failure as a 500 chain under `event`.
pub(crate) fn map_ledger_error(event: &str, message: &str, error: &StockLedgerError) -> ErrorChain {
    let inner = ErrorEvent::new(STOCK_LEDGER).wrap(error.to_string());
    ErrorEvent::new(event).with_message(message).wrap(inner)
}

fn not_found(event: &str) -> ErrorChain {
    ErrorEvent::new(event)
        .with_code(codes::NOT_FOUND)
        .wrap(errors::FOOD_NOT_FOUND)
}

fn forbidden(event: &str) -> ErrorChain {
    ErrorEvent::new(event)
        .with_code(codes::FORBIDDEN)
        .with_message(errors::ID_NOT_VALID)
        .wrap(errors::FORBIDDEN)
}

/// Service implementing the food use cases.
#[derive(Clone)]
pub struct FoodService<S> {
    ledger: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> FoodService<S> {
    /// Create a new service over a stock ledger.
    pub fn new(ledger: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { ledger, clock }
    }
}

impl<S> FoodService<S>
where
    S: StockLedger,
{
    async fn find(&self, event: &str, id_food: &Uuid) -> Result<Food, ErrorChain> {
        self.ledger
            .find_active(id_food)
            .await
            .map_err(|err| map_ledger_error(event, errors::GET_FOOD_ERROR, &err))?
            .ok_or_else(|| not_found(event))
    }

    async fn find_owned(&self, event: &str, actor: Uuid, id_food: &Uuid) -> Result<Food, ErrorChain> {
        let food = self.find(event, id_food).await?;
        if food.is_owned_by(actor) {
            Ok(food)
        } else {
            Err(forbidden(event))
        }
    }

    async fn list(&self, input: ListFoodsInput) -> Result<ResponseEnvelope, ErrorChain> {
        let page = self
            .ledger
            .list_active(input.page)
            .await
            .map_err(|err| map_ledger_error(events::GET_FOODS, errors::LIST_FOODS_ERROR, &err))?;
        let (items, pagination) = page.into_parts();
        Ok(ResponseEnvelope::success_with(events::GET_FOODS, codes::OK, &items)
            .with_pagination(pagination))
    }

    async fn create(&self, input: CreateFoodInput) -> Result<ResponseEnvelope, ErrorChain> {
        input.draft.validate().map_err(|fields| {
            ErrorEvent::new(events::CREATE_FOOD)
                .with_code(codes::UNPROCESSABLE_ENTITY)
                .wrap(fields)
        })?;

        let food = input
            .draft
            .into_food(Uuid::new_v4(), input.actor, self.clock.utc());
        self.ledger
            .create(&food)
            .await
            .map_err(|err| map_ledger_error(events::CREATE_FOOD, errors::CREATE_FOOD_ERROR, &err))?;

        info!(id_food = %food.id_food, owner = %food.id_user, "food created");
        Ok(ResponseEnvelope::success_with(events::CREATE_FOOD, codes::CREATED, &food))
    }

    async fn list_mine(&self, input: ListMyFoodsInput) -> Result<ResponseEnvelope, ErrorChain> {
        let page = self
            .ledger
            .list_by_owner(&input.actor, input.page)
            .await
            .map_err(|err| map_ledger_error(events::LIST_MY_FOODS, errors::LIST_FOODS_ERROR, &err))?;
        let (items, pagination) = page.into_parts();
        Ok(
            ResponseEnvelope::success_with(events::LIST_MY_FOODS, codes::OK, &items)
                .with_pagination(pagination),
        )
    }

    async fn update(&self, input: UpdateFoodInput) -> Result<ResponseEnvelope, ErrorChain> {
        let event = events::UPDATE_MY_FOODS;
        input.draft.validate().map_err(|fields| {
            ErrorEvent::new(event)
                .with_code(codes::UNPROCESSABLE_ENTITY)
                .wrap(fields)
        })?;

        let mut food = self.find_owned(event, input.actor, &input.id_food).await?;
        food.apply(input.draft, self.clock.utc());
        self.ledger
            .update(&food)
            .await
            .map_err(|err| map_ledger_error(event, errors::UPDATE_FOOD_ERROR, &err))?;

        let updated = self.find(event, &input.id_food).await?;
        Ok(ResponseEnvelope::success_with(event, codes::OK, &updated))
    }

    async fn delete(&self, input: DeleteFoodInput) -> Result<ResponseEnvelope, ErrorChain> {
        let event = events::DELETE_MY_FOOD;
        self.find_owned(event, input.actor, &input.id_food).await?;
        let changed = self
            .ledger
            .soft_delete(&input.id_food, self.clock.utc())
            .await
            .map_err(|err| map_ledger_error(event, errors::DELETE_FOOD_ERROR, &err))?;
        if !changed {
            return Err(not_found(event));
        }
        info!(id_food = %input.id_food, "food deleted");
        Ok(ResponseEnvelope::success(event, codes::OK, None))
    }
}

#[async_trait]
impl<S: StockLedger> UseCase<ListFoodsInput> for FoodService<S> {
    async fn resolve(&self, input: ListFoodsInput) -> ResponseEnvelope {
        settle(events::GET_FOODS, self.list(input).await)
    }
}

#[async_trait]
impl<S: StockLedger> UseCase<FoodDetailInput> for FoodService<S> {
    async fn resolve(&self, input: FoodDetailInput) -> ResponseEnvelope {
        let event = events::GET_DETAIL_SHARED_FOOD;
        let result = self
            .find(event, &input.id_food)
            .await
            .map(|food| ResponseEnvelope::success_with(event, codes::OK, &food));
        settle(event, result)
    }
}

#[async_trait]
impl<S: StockLedger> UseCase<CreateFoodInput> for FoodService<S> {
    async fn resolve(&self, input: CreateFoodInput) -> ResponseEnvelope {
        settle(events::CREATE_FOOD, self.create(input).await)
    }
}

#[async_trait]
impl<S: StockLedger> UseCase<ListMyFoodsInput> for FoodService<S> {
    async fn resolve(&self, input: ListMyFoodsInput) -> ResponseEnvelope {
        settle(events::LIST_MY_FOODS, self.list_mine(input).await)
    }
}

#[async_trait]
impl<S: StockLedger> UseCase<MyFoodDetailInput> for FoodService<S> {
    async fn resolve(&self, input: MyFoodDetailInput) -> ResponseEnvelope {
        let event = events::GET_DETAIL_MY_FOOD;
        let result = self
            .find_owned(event, input.actor, &input.id_food)
            .await
            .map(|food| ResponseEnvelope::success_with(event, codes::OK, &food));
        settle(event, result)
    }
}

#[async_trait]
impl<S: StockLedger> UseCase<UpdateFoodInput> for FoodService<S> {
    async fn resolve(&self, input: UpdateFoodInput) -> ResponseEnvelope {
        settle(events::UPDATE_MY_FOODS, self.update(input).await)
    }
}

#[async_trait]
impl<S: StockLedger> UseCase<DeleteFoodInput> for FoodService<S> {
    async fn resolve(&self, input: DeleteFoodInput) -> ResponseEnvelope {
        settle(events::DELETE_MY_FOOD, self.delete(input).await)
    }
}

#[cfg(test)]
#[path = "food_service_tests.rs"]
mod tests;
