use actix_web::{
    body::MessageBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::ContentType,
    Error, HttpResponse,
};
use futures::future::{FutureExt, LocalBoxFuture};
use std::any::Any;
use std::future::{ready, Ready};
use std::panic::{self, AssertUnwindSafe};

pub const GENERIC_ERROR_BODY: &str = "Something went wrong!";

/// 500 em texto puro, usado para qualquer falha não tratada
pub fn generic_error_response() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body(GENERIC_ERROR_BODY)
}

/// Last line of defence: turns service errors and panics raised further down the chain
/// into a logged, generic 500.
///
/// The failure is handed back as an `Error` carrying the generic response, so the
/// request itself is never held here; the dispatcher renders it.
pub struct ErrorCatcher;

impl<S, B> Transform<S, ServiceRequest> for ErrorCatcher
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorCatcherMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorCatcherMiddleware { service }))
    }
}

pub struct ErrorCatcherMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorCatcherMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Só o necessário para o log: o roteamento precisa do request sem outras referências
        let method = req.method().clone();
        let path = req.path().to_owned();

        let fut = match panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(panic) => {
                log::error!(
                    "❌ Panic while handling {} {}: {}",
                    method,
                    path,
                    panic_message(panic.as_ref())
                );
                let failed: Result<Self::Response, Self::Error> = Err(generic_error("panic"));
                return Box::pin(ready(failed));
            }
        };

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(res)) => Ok(res),
                Ok(Err(err)) => {
                    log::error!("❌ Unhandled error on {} {}: {:?}", method, path, err);
                    Err(generic_error(err.to_string()))
                }
                Err(panic) => {
                    log::error!(
                        "❌ Panic while handling {} {}: {}",
                        method,
                        path,
                        panic_message(panic.as_ref())
                    );
                    Err(generic_error("panic"))
                }
            }
        })
    }
}

fn generic_error(cause: impl Into<String>) -> Error {
    InternalError::from_response(cause.into(), generic_error_response()).into()
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}
