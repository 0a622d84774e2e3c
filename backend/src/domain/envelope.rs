//! Uniform response envelope returned by every use case.
//!
//! Labels (`entity`, `state`, `message`) are derived mechanically from the
//! snake_case event name and the outcome. When a message key is attached the
//! user-facing `message` is replaced by the catalog text for the request
//! language during [`ResponseEnvelope::localize`].
//!
//! Every constructor produces a fresh value; there is no shared template.

use pagination::Pagination;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::error_chain::{ErrorChain, ErrorEvent, codes};
use super::localization::MessageCatalog;
use super::messages::{errors, events, keys};
use super::trace_id::TraceId;

/// Outcome class of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx responses.
    Success,
    /// 4xx responses.
    Error,
    /// 5xx responses.
    Failure,
}

impl Outcome {
    /// Classify a status code.
    pub fn for_status(status_code: u16) -> Self {
        if status_code >= codes::INTERNAL_SERVER_ERROR {
            Self::Failure
        } else if status_code >= codes::BAD_REQUEST {
            Self::Error
        } else {
            Self::Success
        }
    }

    /// Upper-case word used in the `status` field.
    pub fn status_word(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Failure => "FAILURE",
        }
    }

    /// Title-case word appended to `state` and `message`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Failure => "Failure",
        }
    }
}

/// Labels derived from an event name and an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// lowerCamelCase event name, e.g. `requestAction`.
    pub entity: String,
    /// Entity followed by the outcome word, e.g. `requestActionError`.
    pub state: String,
    /// Title-cased event tokens and outcome, e.g. `Request Action Error`.
    pub message: String,
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Derive envelope labels from a snake_case event name.
///
/// # Examples
/// ```
/// use sharefood::domain::{Outcome, derive_labels};
///
/// let labels = derive_labels("request_action", Outcome::Error);
/// assert_eq!(labels.entity, "requestAction");
/// assert_eq!(labels.state, "requestActionError");
/// assert_eq!(labels.message, "Request Action Error");
/// ```
pub fn derive_labels(event: &str, outcome: Outcome) -> Labels {
    let tokens: Vec<&str> = event.split('_').filter(|token| !token.is_empty()).collect();
    let mut entity = String::new();
    for (position, token) in tokens.iter().enumerate() {
        if position == 0 {
            entity.push_str(token);
        } else {
            entity.push_str(&title_case(token));
        }
    }

    let mut words: Vec<String> = tokens.iter().map(|token| title_case(token)).collect();
    words.push(outcome.title().to_owned());

    Labels {
        state: format!("{entity}{}", outcome.title()),
        entity,
        message: words.join(" "),
    }
}

/// Catalog key for a failure, chosen from its innermost cause.
fn failure_key(chain: &ErrorChain) -> Option<&'static str> {
    match chain.to_string().as_str() {
        errors::ACTION_ALREADY_DONE => Some(keys::ACTION_ALREADY_DONE),
        errors::NOT_ENOUGH_QUANTITY => Some(keys::NOT_ENOUGH_QUANTITY),
        errors::FORBIDDEN => Some(keys::FORBIDDEN),
        errors::FOOD_NOT_FOUND => Some(keys::FOOD_NOT_FOUND),
        errors::UNAUTHORIZED | errors::TOKEN_NOT_VALID => Some(keys::UNAUTHORIZED),
        _ if chain.is_failure() => Some(keys::INTERNAL_SERVER_ERROR),
        _ => None,
    }
}

/// Fold a use case result into its envelope, tagged with the transaction id
/// of the request in flight.
pub fn settle(event: &str, result: Result<ResponseEnvelope, ErrorChain>) -> ResponseEnvelope {
    result
        .unwrap_or_else(|chain| ResponseEnvelope::failed(event, chain))
        .with_transaction_id(TraceId::transaction_id())
}

/// Correlation and pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_id: Option<Uuid>,
    #[serde(flatten)]
    pagination: Option<Pagination>,
}

impl Meta {
    /// Transaction identifier echoed for correlation.
    pub fn transaction_id(&self) -> Option<Uuid> {
        self.transaction_id
    }

    /// Pagination metadata for listings.
    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }
}

/// Uniform response object.
///
/// `code` travels on the status line and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResponseEnvelope {
    #[serde(skip)]
    code: u16,
    status: String,
    entity: String,
    state: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    meta: Option<Meta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    errors: Option<ErrorChain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    data: Option<Value>,
    #[serde(skip)]
    message_key: Option<String>,
}

impl ResponseEnvelope {
    fn labelled(event: &str, code: u16) -> Self {
        let outcome = Outcome::for_status(code);
        let Labels {
            entity,
            state,
            message,
        } = derive_labels(event, outcome);
        Self {
            code,
            status: outcome.status_word().to_owned(),
            entity,
            state,
            message,
            meta: None,
            errors: None,
            data: None,
            message_key: None,
        }
    }

    /// Successful outcome for `event` with an optional payload.
    pub fn success(event: &str, code: u16, data: Option<Value>) -> Self {
        Self {
            data,
            ..Self::labelled(event, code)
        }
    }

    /// Successful outcome carrying `data` serialized to JSON.
    ///
    /// A payload that fails to serialize yields a 500 envelope instead.
    pub fn success_with<T: Serialize>(event: &str, code: u16, data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self::success(event, code, Some(value)),
            Err(err) => Self::failed(event, ErrorEvent::new(event).wrap(err.to_string())),
        }
    }

    /// Failed outcome; the status code is the chain's visible status.
    pub fn failed(event: &str, chain: ErrorChain) -> Self {
        Self {
            message_key: failure_key(&chain).map(str::to_owned),
            errors: Some(chain.clone()),
            ..Self::labelled(event, chain.status_code())
        }
    }

    /// Generic 500 envelope used after a panic was caught.
    pub fn panic_recovered() -> Self {
        let chain = ErrorEvent::new(events::INTERNAL_SERVER_ERROR).into_chain();
        Self::failed(events::INTERNAL_SERVER_ERROR, chain)
            .with_message_key(keys::INTERNAL_SERVER_ERROR)
    }

    /// Attach a transaction identifier.
    #[must_use]
    pub fn with_transaction_id(mut self, transaction_id: Uuid) -> Self {
        self.meta.get_or_insert_with(Meta::default).transaction_id = Some(transaction_id);
        self
    }

    /// Attach listing pagination.
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.meta.get_or_insert_with(Meta::default).pagination = Some(pagination);
        self
    }

    /// Select the catalog key used to localise `message`.
    #[must_use]
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = Some(key.into());
        self
    }

    /// Replace `message` with catalog text when a key is attached and known.
    #[must_use]
    pub fn localize(mut self, catalog: &MessageCatalog, language: &str) -> Self {
        if let Some(entry) = self
            .message_key
            .as_deref()
            .and_then(|key| catalog.lookup(key, language))
        {
            self.message.clone_from(&entry.text);
        }
        self
    }

    /// HTTP status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// `SUCCESS`, `ERROR` or `FAILURE`.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Entity label derived from the event.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Entity plus outcome word.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Derived label, or catalog text once localised.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Transaction and pagination metadata, when any was attached.
    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    /// Error frames of a failed outcome.
    pub fn errors(&self) -> Option<&ErrorChain> {
        self.errors.as_ref()
    }

    /// Success payload.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Catalog key used by [`Self::localize`]; never serialized.
    pub fn message_key(&self) -> Option<&str> {
        self.message_key.as_deref()
    }
}
