//! HTTP rendering of response envelopes.
//!
//! The envelope `code` travels on the status line. Every envelope is logged
//! once here, before localisation: failures at `error` with their frame
//! trail, successes at `info`.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, info};

use crate::domain::{ErrorChain, MessageCatalog, ResponseEnvelope};

/// Status line for an envelope code.
pub fn status_for(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn frame_trail(chain: &ErrorChain) -> String {
    serde_json::to_string(chain).unwrap_or_else(|_| chain.to_string())
}

fn log_envelope(envelope: &ResponseEnvelope) {
    let transaction_id = envelope
        .meta()
        .and_then(|meta| meta.transaction_id())
        .map(|id| id.to_string())
        .unwrap_or_default();
    match envelope.errors() {
        Some(chain) => error!(
            event = chain.event(),
            state = envelope.state(),
            code = envelope.code(),
            transaction_id = transaction_id.as_str(),
            trail = %frame_trail(chain),
            "request failed"
        ),
        None => info!(
            state = envelope.state(),
            code = envelope.code(),
            transaction_id = transaction_id.as_str(),
            "request succeeded"
        ),
    }
}

/// Log, localise and render an envelope.
pub fn reply(envelope: ResponseEnvelope, catalog: &MessageCatalog, language: &str) -> HttpResponse {
    log_envelope(&envelope);
    let envelope = envelope.localize(catalog, language);
    HttpResponse::build(status_for(envelope.code())).json(envelope)
}

/// Failure envelope raised by an extractor before a handler runs.
#[derive(Debug, Clone)]
pub struct EnvelopeError {
    envelope: ResponseEnvelope,
}

impl EnvelopeError {
    /// Log and localise `envelope` for rendering as an extractor rejection.
    pub fn new(envelope: ResponseEnvelope, catalog: &MessageCatalog, language: &str) -> Self {
        log_envelope(&envelope);
        Self {
            envelope: envelope.localize(catalog, language),
        }
    }

    /// Log `envelope` and render it as-is, for when no catalog is reachable.
    pub fn unlocalized(envelope: ResponseEnvelope) -> Self {
        log_envelope(&envelope);
        Self { envelope }
    }

    /// Envelope rendered as the response body.
    pub fn envelope(&self) -> &ResponseEnvelope {
        &self.envelope
    }
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.envelope.message())
    }
}

impl ResponseError for EnvelopeError {
    fn status_code(&self) -> StatusCode {
        status_for(self.envelope.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.envelope)
    }
}

#[cfg(test)]
mod tests;
