use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::{
    models::{parse_user_id, NewUser, User, UserUpdate},
    services::user_repository::UserRepository,
    utils::AppError,
};

/// In-process stand-in for the `users` collection, applying the same model rules.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = new_user.into_user(ObjectId::new())?;
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<User, AppError> {
        let object_id = parse_user_id(id)?;
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.id == object_id)
            .cloned()
            .ok_or_else(AppError::user_not_found)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, AppError> {
        self.users
            .read()
            .await
            .iter()
            .find(|user| user.username == username)
            .cloned()
            .ok_or_else(AppError::user_not_found)
    }

    async fn update_by_id(&self, id: &str, update: UserUpdate) -> Result<User, AppError> {
        let object_id = parse_user_id(id)?;
        update.check_casts()?;
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|user| user.id == object_id)
            .ok_or_else(AppError::user_not_found)?;

        apply_update(user, &update);
        Ok(user.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<User, AppError> {
        let object_id = parse_user_id(id)?;
        let mut users = self.users.write().await;
        let position = users
            .iter()
            .position(|user| user.id == object_id)
            .ok_or_else(AppError::user_not_found)?;

        Ok(users.remove(position))
    }
}

/// Mirrors the `$set` built by `UserUpdate::set_document`.
fn apply_update(user: &mut User, update: &UserUpdate) {
    if let Some(username) = &update.username {
        user.username = username.clone();
    }
    if let Some(email) = &update.email {
        user.email = email.clone();
    }
    if let Some(password) = &update.password {
        user.password = password.clone();
    }
}
