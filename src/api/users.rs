use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::{
    api::payload::Body,
    models::{NewUser, UserResponse, UserUpdate},
    services::UserRepository,
    utils::{AppError, ErrorResponse},
};

fn failure(action: &str, err: AppError) -> HttpResponse {
    match &err {
        AppError::NotFound(_) => log::info!("🔍 {}: {}", action, err),
        _ => log::error!("❌ {}: {}", action, err),
    }
    err.error_response()
}

/// POST /auth/user - Cria usuário
///
/// Any rejection from the store answers 400.
#[utoipa::path(
    post,
    path = "/auth/user",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Rejected by the store", body = ErrorResponse)
    )
)]
pub async fn create_user(
    repository: web::Data<dyn UserRepository>,
    body: Body<NewUser>,
) -> impl Responder {
    log::info!("📝 POST /auth/user");

    match repository.create(body.into_inner()).await {
        Ok(user) => {
            log::info!("✅ User created: {}", user.id.to_hex());
            HttpResponse::Created().json(UserResponse::from(user))
        }
        Err(e) => {
            log::warn!("⚠️ Failed to create user: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse::new(&e))
        }
    }
}

/// GET /auth/users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/auth/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn get_all_users(repository: web::Data<dyn UserRepository>) -> impl Responder {
    match repository.find_all().await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(
                users
                    .into_iter()
                    .map(UserResponse::from)
                    .collect::<Vec<_>>(),
            )
        }
        Err(e) => failure("Error listing users", e),
    }
}

/// GET /auth/user/{id}
#[utoipa::path(
    get,
    path = "/auth/user/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store error, including malformed ids", body = ErrorResponse)
    )
)]
pub async fn get_user_by_id(
    repository: web::Data<dyn UserRepository>,
    id: web::Path<String>,
) -> impl Responder {
    match repository.find_by_id(&id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(e) => failure(&format!("Error fetching user {}", id), e),
    }
}

/// GET /auth/user/{username} - only routed when `USER_LOOKUP=username`
pub async fn get_user_by_username(
    repository: web::Data<dyn UserRepository>,
    username: web::Path<String>,
) -> impl Responder {
    match repository.find_by_username(&username).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(e) => failure(&format!("Error fetching user '{}'", username), e),
    }
}

/// PUT /auth/user/{id} - Atualiza username, email e password
///
/// `firstName`/`lastName` are accepted in the body and ignored.
#[utoipa::path(
    put,
    path = "/auth/user/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (24 hex chars)")),
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store error, including malformed ids", body = ErrorResponse)
    )
)]
pub async fn update_user_by_id(
    repository: web::Data<dyn UserRepository>,
    id: web::Path<String>,
    body: Body<UserUpdate>,
) -> impl Responder {
    log::info!("🔧 PUT /auth/user/{}", id);

    match repository.update_by_id(&id, body.into_inner()).await {
        Ok(user) => {
            log::info!("✅ User updated");
            HttpResponse::Ok().json(UserResponse::from(user))
        }
        Err(e) => failure(&format!("Error updating user {}", id), e),
    }
}

/// DELETE /auth/user/{id} - Remove usuário e devolve o último estado
#[utoipa::path(
    delete,
    path = "/auth/user/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Store error, including malformed ids", body = ErrorResponse)
    )
)]
pub async fn delete_user_by_id(
    repository: web::Data<dyn UserRepository>,
    id: web::Path<String>,
) -> impl Responder {
    log::info!("🗑️  DELETE /auth/user/{}", id);

    match repository.delete_by_id(&id).await {
        Ok(user) => {
            log::info!("✅ User deleted");
            HttpResponse::Ok().json(UserResponse::from(user))
        }
        Err(e) => failure(&format!("Error deleting user {}", id), e),
    }
}
