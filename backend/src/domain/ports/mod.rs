//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (persistence, credentials) expose strongly typed errors so
//! adapters map their failures into predictable variants. The driving port
//! is [`UseCase`], implemented by the domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod credentials;
mod request_log;
mod stock_ledger;
mod use_case;
mod user_repository;

#[cfg(test)]
pub use credentials::{MockPasswordHasher, MockTokenIssuer, MockTokenVerifier};
pub use credentials::{
    CredentialError, FixturePasswordHasher, FixtureTokens, PasswordHasher, TokenIssuer,
    TokenVerifier,
};
#[cfg(test)]
pub use request_log::MockRequestLog;
pub use request_log::{FixtureRequestLog, RequestLog, RequestLogError, StatusUpdate};
#[cfg(test)]
pub use stock_ledger::MockStockLedger;
pub use stock_ledger::{FixtureStockLedger, StockLedger, StockLedgerError};
pub use use_case::{
    CreateFoodInput, CreateRequestInput, DeleteFoodInput, FoodDetailInput, ListFoodsInput,
    ListMyFoodsInput, ListRequestsForFoodInput, ListRequestsForUserInput, ListUsersInput,
    LoginInput, MyFoodDetailInput, RegisterInput, RequestActionInput, UpdateFoodInput, UseCase,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
