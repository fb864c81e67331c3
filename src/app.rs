use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api,
    config::UserLookup,
    middleware::ErrorCatcher,
    services::UserRepository,
};

/// CORS aberto: qualquer origem, sem credenciais
fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "HEAD", "PUT", "PATCH", "POST", "DELETE"])
        .allow_any_header()
}

/// Builds the application for one worker.
///
/// The error catcher sits inside CORS so that generic 500s still carry the CORS headers:
/// it fails with an `Error`, and CORS decorates that error's response on the way out.
pub fn create_app(
    repository: Arc<dyn UserRepository>,
    lookup: UserLookup,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let openapi = api::swagger::ApiDoc::openapi();

    App::new()
        .app_data(web::Data::from(repository))
        .app_data(api::payload::json_config())
        .app_data(api::payload::form_config())
        .wrap(ErrorCatcher)
        .wrap(cors())
        .wrap(Logger::default())
        .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
        .route("/health", web::get().to(api::health::health_check))
        .service(api::routes::user_scope(lookup))
}
