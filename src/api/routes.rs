use actix_web::{web, Scope};

use crate::api::users;
use crate::config::UserLookup;

/// Prefixo histórico das rotas; não há autenticação aqui
pub const ROUTE_PREFIX: &str = "/auth";

/// User routes, mounted under `/auth`.
///
/// `GET /user/{key}` resolves by id unless the username lookup is switched on.
pub fn user_scope(lookup: UserLookup) -> Scope {
    let find_user = match lookup {
        UserLookup::Id => web::get().to(users::get_user_by_id),
        UserLookup::Username => web::get().to(users::get_user_by_username),
    };

    web::scope(ROUTE_PREFIX)
        .route("/user", web::post().to(users::create_user))
        .route("/users", web::get().to(users::get_all_users))
        .route("/user/{id}", find_user)
        .route("/user/{id}", web::put().to(users::update_user_by_id))
        .route("/user/{id}", web::delete().to(users::delete_user_by_id))
}
