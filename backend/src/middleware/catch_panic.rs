//! Panic recovery middleware.
//!
//! A handler that panics would otherwise take its worker down with the
//! connection reset. [`CatchPanic`] converts the unwind into the generic 500
//! failure envelope, localised for the caller and carrying the request's
//! transaction id, and logs the panic with a backtrace.

use std::any::Any;
use std::backtrace::Backtrace;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::header::ACCEPT_LANGUAGE;
use actix_web::{Error, HttpResponse};
use futures_util::FutureExt as _;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;
use uuid::Uuid;

use crate::domain::{MessageCatalog, ResponseEnvelope, TraceId};
use crate::inbound::http::language::negotiate;

/// Middleware answering panicking requests with a 500 failure envelope.
///
/// Wrap it inside [`crate::middleware::Trace`] so the envelope's
/// transaction id matches the `trace-id` header:
///
/// ```ignore
/// App::new().wrap(CatchPanic::new(catalog)).wrap(Trace)
/// ```
#[derive(Clone)]
pub struct CatchPanic {
    catalog: Arc<MessageCatalog>,
}

impl CatchPanic {
    /// Recover panics, rendering the envelope from `catalog`.
    pub fn new(catalog: Arc<MessageCatalog>) -> Self {
        Self { catalog }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CatchPanic
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CatchPanicMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CatchPanicMiddleware {
            service,
            catalog: Arc::clone(&self.catalog),
        }))
    }
}

/// Service wrapper produced by [`CatchPanic`].
pub struct CatchPanicMiddleware<S> {
    service: S,
    catalog: Arc<MessageCatalog>,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Error carrying the localised 500 envelope for a panicked request.
///
/// The router needs sole ownership of the `HttpRequest`, so nothing here
/// holds on to it; the response is rendered from the error instead.
fn recovered(catalog: &MessageCatalog, language: &str, transaction_id: Uuid) -> Error {
    let envelope = ResponseEnvelope::panic_recovered()
        .with_transaction_id(transaction_id)
        .localize(catalog, language);
    let response = HttpResponse::InternalServerError()
        .insert_header(("trace-id", transaction_id.to_string()))
        .json(envelope);
    InternalError::from_response("handler panicked", response).into()
}

impl<S, B> Service<ServiceRequest> for CatchPanicMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let language = negotiate(
            req.headers()
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok()),
            &self.catalog,
        );
        let catalog = Arc::clone(&self.catalog);
        let fut = self.service.call(req);

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => {
                    let transaction_id = TraceId::transaction_id();
                    error!(
                        panic = panic_message(payload.as_ref()),
                        method = %method,
                        path = %path,
                        %transaction_id,
                        backtrace = %Backtrace::force_capture(),
                        "handler panicked"
                    );
                    Err(recovered(&catalog, &language, transaction_id))
                }
            }
        })
    }
}
