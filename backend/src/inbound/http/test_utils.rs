//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::ports::{FixtureTokens, UseCase};
use crate::domain::{MessageCatalog, ResponseEnvelope, codes};

use super::state::{AccountPorts, FoodPorts, HttpState, RequestPorts};

/// Use case double answering a canned envelope and recording its inputs.
pub struct RecordingUseCase<I> {
    envelope: ResponseEnvelope,
    calls: Mutex<Vec<I>>,
}

impl<I> RecordingUseCase<I> {
    /// Double that always answers `envelope`.
    pub fn answering(envelope: ResponseEnvelope) -> Arc<Self> {
        Arc::new(Self {
            envelope,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Inputs received so far.
    pub fn calls(&self) -> Vec<I>
    where
        I: Clone,
    {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl<I> UseCase<I> for RecordingUseCase<I>
where
    I: Send + 'static,
{
    async fn resolve(&self, input: I) -> ResponseEnvelope {
        self.calls.lock().expect("calls lock").push(input);
        self.envelope.clone()
    }
}

fn stub<I: Send + 'static>() -> Arc<RecordingUseCase<I>> {
    RecordingUseCase::answering(ResponseEnvelope::success("stub", codes::OK, None))
}

/// State whose use cases all answer `200 stubSuccess`, with fixture tokens
/// (the bearer token is the account id) and the bundled catalog.
pub fn test_state() -> HttpState {
    HttpState {
        foods: FoodPorts {
            list: stub(),
            detail: stub(),
            create: stub(),
            list_mine: stub(),
            my_detail: stub(),
            update: stub(),
            delete: stub(),
        },
        requests: RequestPorts {
            action: stub(),
            create: stub(),
            list_for_food: stub(),
            list_for_user: stub(),
        },
        accounts: AccountPorts {
            register: stub(),
            login: stub(),
            list: stub(),
        },
        tokens: Arc::new(FixtureTokens::default()),
        catalog: Arc::new(MessageCatalog::bundled("en").expect("bundled catalog")),
    }
}
