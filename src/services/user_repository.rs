// ==================== USER REPOSITORY ====================
// CRUD da collection "users". Validação e queries ficam a cargo do modelo/driver.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::{
    database::MongoDB,
    models::{id_filter, parse_user_id, NewUser, User, UserUpdate, USERS_COLLECTION},
    utils::AppError,
};

/// Storage seam used by the handlers.
///
/// A miss is `AppError::NotFound`; anything that goes wrong while querying is
/// `AppError::DatabaseError` or `AppError::Unavailable`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<User, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<User, AppError>;

    /// Returns the document as it is after the update.
    async fn update_by_id(&self, id: &str, update: UserUpdate) -> Result<User, AppError>;

    /// Returns the last state of the removed document.
    async fn delete_by_id(&self, id: &str) -> Result<User, AppError>;
}

pub struct MongoUserRepository {
    users: Option<Collection<User>>,
}

impl MongoUserRepository {
    /// `None` means the startup connection never produced a handle.
    pub fn new(store: Option<&MongoDB>) -> Self {
        Self {
            users: store.map(|db| db.collection::<User>(USERS_COLLECTION)),
        }
    }

    fn users(&self) -> Result<&Collection<User>, AppError> {
        self.users
            .as_ref()
            .ok_or_else(|| AppError::Unavailable("MongoDB connection is not established".to_string()))
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let users = self.users()?;
        let user = new_user.into_user(ObjectId::new())?;

        users.insert_one(&user).await?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.users()?.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> Result<User, AppError> {
        let object_id = parse_user_id(id)?;

        self.users()?
            .find_one(id_filter(object_id))
            .await?
            .ok_or_else(AppError::user_not_found)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, AppError> {
        self.users()?
            .find_one(doc! { "username": username })
            .await?
            .ok_or_else(AppError::user_not_found)
    }

    async fn update_by_id(&self, id: &str, update: UserUpdate) -> Result<User, AppError> {
        let object_id = parse_user_id(id)?;
        update.check_casts()?;
        let users = self.users()?;
        let changes = update.set_document();

        // Sem campos aplicáveis: só devolve o documento atual
        let updated = if changes.is_empty() {
            users.find_one(id_filter(object_id)).await?
        } else {
            users
                .find_one_and_update(id_filter(object_id), doc! { "$set": changes })
                .return_document(ReturnDocument::After)
                .await?
        };

        updated.ok_or_else(AppError::user_not_found)
    }

    async fn delete_by_id(&self, id: &str) -> Result<User, AppError> {
        let object_id = parse_user_id(id)?;

        self.users()?
            .find_one_and_delete(id_filter(object_id))
            .await?
            .ok_or_else(AppError::user_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: Some(username.to_string()),
            email: Some(format!("{}@x.com", username)),
            password: Some("p".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn without_store_every_call_fails_at_call_time() {
        let repository = MongoUserRepository::new(None);

        assert!(matches!(
            repository.find_all().await,
            Err(AppError::Unavailable(_))
        ));
        assert!(matches!(
            repository.create(new_user("alice")).await,
            Err(AppError::Unavailable(_))
        ));
        assert!(matches!(
            repository.find_by_username("alice").await,
            Err(AppError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn malformed_id_fails_before_reaching_the_store() {
        let repository = MongoUserRepository::new(None);

        assert!(matches!(
            repository.update_by_id("bad-id", UserUpdate::default()).await,
            Err(AppError::DatabaseError(_))
        ));
    }

    #[tokio::test]
    async fn uncastable_update_fails_before_reaching_the_store() {
        let repository = MongoUserRepository::new(None);
        let update: UserUpdate = serde_json::from_str(r#"{"username":{"a":1}}"#).unwrap();

        match repository.update_by_id(&ObjectId::new().to_hex(), update).await {
            Err(AppError::DatabaseError(msg)) => assert!(msg.contains(r#"at path "username""#)),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_user_lifecycle() {
        let store = crate::database::connect(crate::config::LOCAL_MONGODB_URI)
            .await
            .expect("local target should parse");
        let repository = MongoUserRepository::new(Some(&store));

        let username = format!("it-{}", ObjectId::new().to_hex());
        let created = repository.create(new_user(&username)).await.unwrap();

        let found = repository.find_by_id(&created.id.to_hex()).await.unwrap();
        assert_eq!(found, created);

        let by_username = repository.find_by_username(&username).await.unwrap();
        assert_eq!(by_username.id, created.id);

        let updated = repository
            .update_by_id(
                &created.id.to_hex(),
                UserUpdate {
                    email: Some("changed@x.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.email, "changed@x.com");
        assert_eq!(updated.username, username);

        let deleted = repository.delete_by_id(&created.id.to_hex()).await.unwrap();
        assert_eq!(deleted, updated);

        assert!(matches!(
            repository.delete_by_id(&created.id.to_hex()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
