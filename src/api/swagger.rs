use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User CRUD Service API",
        version = "1.0.0",
        description = "Create, read, update and delete users stored in MongoDB.\n\n**Note:** the `/auth` prefix is a path name only; no authentication is performed."
    ),
    paths(
        // Users
        crate::api::users::create_user,
        crate::api::users::get_all_users,
        crate::api::users::get_user_by_id,
        crate::api::users::update_user_by_id,
        crate::api::users::delete_user_by_id,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::NewUser,
            crate::models::UserUpdate,
            crate::models::UserResponse,
            crate::utils::ErrorResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User CRUD endpoints."),
        (name = "Health", description = "Liveness check."),
    )
)]
pub struct ApiDoc;
