//! Request body parsing shared by the user endpoints.
//!
//! JSON and URL-encoded bodies are both accepted, whatever the casing of the content
//! type. A request without a body, or with any other content type, is read as an empty
//! object.

use actix_web::{
    dev,
    error::{InternalError, JsonPayloadError, UrlencodedError},
    http::header,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures::future::{ready, FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;

use crate::middleware::error_catcher::generic_error_response;

/// Limite de corpo (100kb)
pub const BODY_LIMIT: usize = 100 * 1024;

/// Typed request body, from JSON or a form.
pub struct Body<T>(pub T);

impl<T> Body<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

enum BodyKind {
    Json,
    Form,
    Empty,
}

impl BodyKind {
    fn of(req: &HttpRequest) -> Self {
        if !has_body(req) {
            return BodyKind::Empty;
        }

        let content_type = req.content_type().to_ascii_lowercase();
        if content_type == "application/json" || content_type.ends_with("+json") {
            BodyKind::Json
        } else if content_type == "application/x-www-form-urlencoded" {
            BodyKind::Form
        } else {
            BodyKind::Empty
        }
    }
}

fn has_body(req: &HttpRequest) -> bool {
    let headers = req.headers();
    if headers.contains_key(header::TRANSFER_ENCODING) {
        return true;
    }

    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map_or(false, |length| length > 0)
}

impl<T> FromRequest for Body<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut dev::Payload) -> Self::Future {
        match BodyKind::of(req) {
            BodyKind::Json => web::Json::<T>::from_request(req, payload)
                .map(|res| res.map(|json| Body(json.into_inner())))
                .boxed_local(),
            BodyKind::Form => web::Form::<T>::from_request(req, payload)
                .map(|res| res.map(|form| Body(form.into_inner())))
                .boxed_local(),
            BodyKind::Empty => ready(Ok(Body(T::default()))).boxed_local(),
        }
    }
}

/// Field values are cast by the models, so what fails here is the body itself (syntax,
/// a top-level value that is not an object, size, transport): the generic error path.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(|err: JsonPayloadError, req| unhandled(err, req))
}

pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(|err: UrlencodedError, req| unhandled(err, req))
}

fn unhandled<E>(err: E, req: &HttpRequest) -> Error
where
    E: ResponseError + 'static,
{
    log::error!("❌ Failed to parse body of {} {}: {}", req.method(), req.path(), err);
    InternalError::from_response(err, generic_error_response()).into()
}
