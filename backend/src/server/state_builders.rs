//! Builders wiring adapters and services into the HTTP state.
//!
//! With a database pool the Diesel adapters back every service; without one
//! the in-memory fixtures do, which keeps the server bootable for smoke tests.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use sharefood::domain::ports::{
    FixtureRequestLog, FixtureStockLedger, FixtureUserRepository, PasswordHasher, RequestLog,
    StockLedger, TokenIssuer, TokenVerifier, UserRepository,
};
use sharefood::domain::{
    AccountService, FoodService, FulfillmentCoordinator, MessageCatalog, RequestService,
};
use sharefood::inbound::http::state::{AccountPorts, FoodPorts, HttpState, RequestPorts};
use sharefood::outbound::persistence::{
    DbPool, DieselRequestLog, DieselStockLedger, DieselUserRepository,
};

/// Credential adapters shared by every configuration.
pub(crate) struct Credentials {
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) issuer: Arc<dyn TokenIssuer>,
    pub(crate) verifier: Arc<dyn TokenVerifier>,
}

fn food_ports<S>(ledger: &Arc<S>, clock: &Arc<dyn Clock>) -> FoodPorts
where
    S: StockLedger + 'static,
{
    let service = Arc::new(FoodService::new(Arc::clone(ledger), Arc::clone(clock)));
    FoodPorts {
        list: service.clone(),
        detail: service.clone(),
        create: service.clone(),
        list_mine: service.clone(),
        my_detail: service.clone(),
        update: service.clone(),
        delete: service,
    }
}

fn request_ports<S, L>(ledger: &Arc<S>, request_log: &Arc<L>, clock: &Arc<dyn Clock>) -> RequestPorts
where
    S: StockLedger + 'static,
    L: RequestLog + 'static,
{
    let service = Arc::new(RequestService::new(
        Arc::clone(ledger),
        Arc::clone(request_log),
        Arc::clone(clock),
    ));
    RequestPorts {
        action: Arc::new(FulfillmentCoordinator::new(
            Arc::clone(request_log),
            Arc::clone(clock),
        )),
        create: service.clone(),
        list_for_food: service.clone(),
        list_for_user: service,
    }
}

fn account_ports<U>(users: Arc<U>, credentials: &Credentials, clock: &Arc<dyn Clock>) -> AccountPorts
where
    U: UserRepository + 'static,
{
    let service = Arc::new(AccountService::new(
        users,
        Arc::clone(&credentials.hasher),
        Arc::clone(&credentials.issuer),
        Arc::clone(clock),
    ));
    AccountPorts {
        register: service.clone(),
        login: service.clone(),
        list: service,
    }
}

fn assemble<S, L, U>(
    ledger: Arc<S>,
    request_log: Arc<L>,
    users: Arc<U>,
    credentials: Credentials,
    catalog: Arc<MessageCatalog>,
) -> HttpState
where
    S: StockLedger + 'static,
    L: RequestLog + 'static,
    U: UserRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState {
        foods: food_ports(&ledger, &clock),
        requests: request_ports(&ledger, &request_log, &clock),
        accounts: account_ports(users, &credentials, &clock),
        tokens: credentials.verifier,
        catalog,
    }
}

/// Build the handler state, preferring Diesel adapters when a pool exists.
pub(crate) fn build_http_state(
    pool: Option<&DbPool>,
    credentials: Credentials,
    catalog: Arc<MessageCatalog>,
) -> HttpState {
    match pool {
        Some(pool) => assemble(
            Arc::new(DieselStockLedger::new(pool.clone())),
            Arc::new(DieselRequestLog::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            credentials,
            catalog,
        ),
        None => assemble(
            Arc::new(FixtureStockLedger),
            Arc::new(FixtureRequestLog),
            Arc::new(FixtureUserRepository),
            credentials,
            catalog,
        ),
    }
}
