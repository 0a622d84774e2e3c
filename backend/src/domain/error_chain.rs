//! Chainable error frames.
//!
//! Every layer that observes a failure wraps it with an [`ErrorEvent`] naming
//! the operation that failed. The resulting [`ErrorChain`] keeps one
//! [`ErrorFrame`] per layer, innermost first, and is rendered verbatim in the
//! `errors` field of failed responses.
//!
//! Wrapping follows two rules:
//! - wrapping an existing chain appends a frame that inherits the status code
//!   of the chain's last frame and uses the builder's message as its cause;
//! - wrapping anything else starts a new chain whose single frame carries the
//!   builder's status code and the wrapped cause (field errors stay
//!   structured, any other failure is reduced to its message).

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// HTTP status codes used by error frames and envelopes.
pub mod codes {
    /// Request handled.
    pub const OK: u16 = 200;
    /// Resource created.
    pub const CREATED: u16 = 201;
    /// Input referenced something that does not exist.
    pub const BAD_REQUEST: u16 = 400;
    /// Missing or invalid credentials.
    pub const UNAUTHORIZED: u16 = 401;
    /// Caller does not own the resource.
    pub const FORBIDDEN: u16 = 403;
    /// Resource does not exist.
    pub const NOT_FOUND: u16 = 404;
    /// Input or state prevents the operation.
    pub const UNPROCESSABLE_ENTITY: u16 = 422;
    /// Unexpected failure.
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Message used when a builder is not given one explicitly.
pub const DEFAULT_MESSAGE: &str = "internal server error";

/// Validation failure attached to a single input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field as the client sent it.
    pub field: String,
    /// Human readable reason.
    pub message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Cause recorded in a frame: either a message or a list of field errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrameCause {
    /// Plain failure message.
    Message(String),
    /// Structured validation failures.
    Fields(Vec<FieldError>),
}

impl FrameCause {
    fn text(&self) -> &str {
        match self {
            Self::Message(message) => message,
            Self::Fields(fields) => fields.first().map_or("", |field| field.message.as_str()),
        }
    }
}

/// One layer of an [`ErrorChain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorFrame {
    #[serde(skip)]
    status_code: u16,
    event: String,
    #[serde(rename = "error")]
    cause: FrameCause,
}

impl ErrorFrame {
    /// HTTP status code recorded for this frame.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Operation name that produced this frame.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Recorded cause.
    pub fn cause(&self) -> &FrameCause {
        &self.cause
    }
}

/// Ordered list of frames, innermost first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorChain {
    frames: Vec<ErrorFrame>,
}

impl ErrorChain {
    fn single(frame: ErrorFrame) -> Self {
        Self {
            frames: vec![frame],
        }
    }

    /// All frames, innermost first.
    pub fn frames(&self) -> &[ErrorFrame] {
        &self.frames
    }

    /// Status code of the outermost frame; this is the response status.
    pub fn status_code(&self) -> u16 {
        self.frames
            .last()
            .map_or(codes::INTERNAL_SERVER_ERROR, ErrorFrame::status_code)
    }

    /// Event name of the outermost frame.
    pub fn event(&self) -> &str {
        self.frames.last().map_or("", ErrorFrame::event)
    }

    /// Field errors recorded anywhere in the chain, if any.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        self.frames.iter().find_map(|frame| match &frame.cause {
            FrameCause::Fields(fields) => Some(fields.as_slice()),
            FrameCause::Message(_) => None,
        })
    }

    /// Whether the chain describes a server-side failure.
    pub fn is_failure(&self) -> bool {
        self.status_code() >= codes::INTERNAL_SERVER_ERROR
    }
}

impl fmt::Display for ErrorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .frames
            .first()
            .map_or(DEFAULT_MESSAGE, |frame| frame.cause.text());
        f.write_str(text)
    }
}

impl std::error::Error for ErrorChain {}

/// What an [`ErrorEvent`] wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause {
    /// A chain produced by a lower layer.
    Chain(ErrorChain),
    /// Field level validation failures.
    Fields(Vec<FieldError>),
    /// Any other failure, reduced to its message.
    Message(String),
}

impl From<ErrorChain> for Cause {
    fn from(value: ErrorChain) -> Self {
        Self::Chain(value)
    }
}

impl From<Vec<FieldError>> for Cause {
    fn from(value: Vec<FieldError>) -> Self {
        Self::Fields(value)
    }
}

impl From<FieldError> for Cause {
    fn from(value: FieldError) -> Self {
        Self::Fields(vec![value])
    }
}

impl From<String> for Cause {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

impl From<&str> for Cause {
    fn from(value: &str) -> Self {
        Self::Message(value.to_owned())
    }
}

/// Builder that names a failing operation and wraps its cause.
///
/// # Examples
/// ```
/// use sharefood::domain::{ErrorEvent, codes};
///
/// let inner = ErrorEvent::new("get_request_food_by_id_request")
///     .with_code(codes::UNPROCESSABLE_ENTITY)
///     .wrap("action already accepted or rejected");
/// let outer = ErrorEvent::new("request_action")
///     .with_message("action request error")
///     .wrap(inner);
///
/// assert_eq!(outer.frames().len(), 2);
/// assert_eq!(outer.status_code(), codes::UNPROCESSABLE_ENTITY);
/// assert_eq!(outer.to_string(), "action already accepted or rejected");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    status_code: u16,
    event: String,
    message: String,
}

impl ErrorEvent {
    /// Start a builder for `event` with status 500 and the default message.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            status_code: codes::INTERNAL_SERVER_ERROR,
            event: event.into(),
            message: DEFAULT_MESSAGE.to_owned(),
        }
    }

    /// Override the status code used when this builder starts a chain.
    #[must_use]
    pub fn with_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Override the message used when this builder extends a chain.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Wrap `cause` into a chain.
    pub fn wrap(self, cause: impl Into<Cause>) -> ErrorChain {
        let Self {
            status_code,
            event,
            message,
        } = self;
        match cause.into() {
            Cause::Chain(mut chain) => {
                let status_code = chain.status_code();
                chain.frames.push(ErrorFrame {
                    status_code,
                    event,
                    cause: FrameCause::Message(message),
                });
                chain
            }
            Cause::Fields(fields) => ErrorChain::single(ErrorFrame {
                status_code,
                event,
                cause: FrameCause::Fields(fields),
            }),
            Cause::Message(text) => ErrorChain::single(ErrorFrame {
                status_code,
                event,
                cause: FrameCause::Message(text),
            }),
        }
    }

    /// Start a chain whose cause is the builder's own message.
    pub fn into_chain(self) -> ErrorChain {
        let message = self.message.clone();
        self.wrap(Cause::Message(message))
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for wrapping rules.
    use rstest::rstest;

    use super::*;

    fn pending_miss() -> ErrorChain {
        ErrorEvent::new("get_request_food_by_id_request")
            .with_code(codes::UNPROCESSABLE_ENTITY)
            .wrap("action already accepted or rejected")
    }

    #[rstest]
    fn fresh_wrap_uses_builder_status_and_cause_text() {
        let chain = ErrorEvent::new("create_food")
            .with_code(codes::BAD_REQUEST)
            .with_message("ignored for fresh chains")
            .wrap("connection reset");

        assert_eq!(chain.frames().len(), 1);
        assert_eq!(chain.status_code(), codes::BAD_REQUEST);
        assert_eq!(
            chain.frames()[0].cause(),
            &FrameCause::Message("connection reset".to_owned())
        );
    }

    #[rstest]
    fn chain_wrap_inherits_last_status_and_uses_builder_message() {
        let chain = ErrorEvent::new("request_action")
            .with_code(codes::INTERNAL_SERVER_ERROR)
            .with_message("action request error")
            .wrap(pending_miss());

        assert_eq!(chain.frames().len(), 2);
        assert_eq!(chain.status_code(), codes::UNPROCESSABLE_ENTITY);
        assert_eq!(chain.event(), "request_action");
        assert_eq!(
            chain.frames()[1].cause(),
            &FrameCause::Message("action request error".to_owned())
        );
    }

    #[rstest]
    fn display_reports_innermost_cause() {
        let chain = ErrorEvent::new("request_action")
            .with_message("action request error")
            .wrap(pending_miss());
        assert_eq!(chain.to_string(), "action already accepted or rejected");
    }

    #[rstest]
    fn field_errors_stay_structured() {
        let chain = ErrorEvent::new("create_request")
            .with_code(codes::UNPROCESSABLE_ENTITY)
            .wrap(vec![FieldError::new("quantity", "must be at least 1")]);

        let fields = chain.field_errors().expect("field errors present");
        assert_eq!(fields.len(), 1);
        assert_eq!(chain.to_string(), "must be at least 1");
    }

    #[rstest]
    fn into_chain_uses_builder_message() {
        let chain = ErrorEvent::new("request_action")
            .with_code(codes::FORBIDDEN)
            .with_message("forbidden")
            .into_chain();
        assert_eq!(chain.to_string(), "forbidden");
        assert_eq!(chain.status_code(), codes::FORBIDDEN);
    }

    #[rstest]
    #[case(codes::UNPROCESSABLE_ENTITY, false)]
    #[case(codes::INTERNAL_SERVER_ERROR, true)]
    fn failure_is_server_side_only(#[case] code: u16, #[case] expected: bool) {
        let chain = ErrorEvent::new("x").with_code(code).wrap("boom");
        assert_eq!(chain.is_failure(), expected);
    }

    #[rstest]
    fn frames_serialize_as_event_and_error() {
        let chain = ErrorEvent::new("request_action")
            .with_message("action request error")
            .wrap(pending_miss());
        let value = serde_json::to_value(&chain).expect("serialize chain");
        assert_eq!(
            value,
            serde_json::json!([
                {"event": "get_request_food_by_id_request", "error": "action already accepted or rejected"},
                {"event": "request_action", "error": "action request error"}
            ])
        );
    }

    #[rstest]
    fn field_frames_serialize_as_lists() {
        let chain = ErrorEvent::new("register_user")
            .with_code(codes::UNPROCESSABLE_ENTITY)
            .wrap(FieldError::new("email", "must be a valid email"));
        let value = serde_json::to_value(&chain).expect("serialize chain");
        assert_eq!(
            value,
            serde_json::json!([
                {"event": "register_user", "error": [{"field": "email", "message": "must be a valid email"}]}
            ])
        );
    }
}
