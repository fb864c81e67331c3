pub mod user_repository;
#[cfg(test)]
pub mod memory_user_repository;

pub use user_repository::*;
