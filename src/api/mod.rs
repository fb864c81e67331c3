pub mod health;
pub mod payload;
pub mod routes;
pub mod swagger;
pub mod users;
