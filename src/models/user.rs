use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::AppError;

pub const USERS_COLLECTION: &str = "users";

const MODEL_NAME: &str = "User";

/// Documento da collection "users"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    /// Armazenada como recebida (sem hash)
    pub password: String,
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none", default)]
    pub last_name: Option<String>,
}

/// Body of `POST /auth/user`.
///
/// Every field is optional at the boundary; the required paths are checked by
/// [`NewUser::into_user`] when the document is written, so a missing field is a store
/// rejection (400) rather than a parse failure. Numbers and booleans are cast to text;
/// objects and arrays are kept aside as cast errors and rejected the same way.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", from = "RawNewUser")]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(skip)]
    pub cast_errors: Vec<CastError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNewUser {
    first_name: Option<Value>,
    last_name: Option<Value>,
    username: Option<Value>,
    email: Option<Value>,
    password: Option<Value>,
}

impl From<RawNewUser> for NewUser {
    fn from(raw: RawNewUser) -> Self {
        let mut cast_errors = Vec::new();
        NewUser {
            first_name: cast_text("firstName", raw.first_name, &mut cast_errors),
            last_name: cast_text("lastName", raw.last_name, &mut cast_errors),
            username: cast_text("username", raw.username, &mut cast_errors),
            email: cast_text("email", raw.email, &mut cast_errors),
            password: cast_text("password", raw.password, &mut cast_errors),
            cast_errors,
        }
    }
}

impl NewUser {
    /// Applies the model's required-path rules and assigns the id.
    pub fn into_user(self, id: ObjectId) -> Result<User, AppError> {
        let mut problems: Vec<String> = self
            .cast_errors
            .iter()
            .map(|err| format!("{}: {}", err.path, err.message))
            .collect();

        // Um path com erro de cast já foi reportado acima
        problems.extend(
            [
                ("username", &self.username),
                ("email", &self.email),
                ("password", &self.password),
            ]
            .iter()
            .filter(|(path, _)| !self.cast_errors.iter().any(|err| err.path == *path))
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(path, _)| format!("{}: Path `{}` is required.", path, path)),
        );

        match (self.username, self.email, self.password) {
            (Some(username), Some(email), Some(password)) if problems.is_empty() => Ok(User {
                id,
                username,
                email,
                password,
                first_name: self.first_name,
                last_name: self.last_name,
            }),
            _ => Err(AppError::Validation(format!(
                "{} validation failed: {}",
                MODEL_NAME,
                problems.join(", ")
            ))),
        }
    }
}

/// Body of `PUT /auth/user/{id}`.
///
/// Only `username`, `email` and `password` are applied. `firstName`/`lastName` may be
/// sent but are dropped, like any other unknown key. Values are cast like [`NewUser`]'s.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(from = "RawUserUpdate")]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(skip)]
    pub cast_errors: Vec<CastError>,
}

#[derive(Deserialize)]
struct RawUserUpdate {
    username: Option<Value>,
    email: Option<Value>,
    password: Option<Value>,
}

impl From<RawUserUpdate> for UserUpdate {
    fn from(raw: RawUserUpdate) -> Self {
        let mut cast_errors = Vec::new();
        UserUpdate {
            username: cast_text("username", raw.username, &mut cast_errors),
            email: cast_text("email", raw.email, &mut cast_errors),
            password: cast_text("password", raw.password, &mut cast_errors),
            cast_errors,
        }
    }
}

impl UserUpdate {
    /// A value that could not be cast fails the whole query, before it is sent.
    pub fn check_casts(&self) -> Result<(), AppError> {
        match self.cast_errors.first() {
            Some(err) => Err(AppError::DatabaseError(err.message.clone())),
            None => Ok(()),
        }
    }

    /// Campos para o `$set` (apenas os informados)
    pub fn set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(username) = &self.username {
            set.insert("username", username.as_str());
        }
        if let Some(email) = &self.email {
            set.insert("email", email.as_str());
        }
        if let Some(password) = &self.password {
            set.insert("password", password.as_str());
        }
        set
    }
}

/// A body value that has no string form.
#[derive(Debug, Clone, PartialEq)]
pub struct CastError {
    pub path: &'static str,
    pub message: String,
}

/// String paths accept scalars: numbers and booleans become their text, `null` is unset.
fn cast_text(path: &'static str, value: Option<Value>, errors: &mut Vec<CastError>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => {
            let kind = if other.is_array() { "Array" } else { "Object" };
            errors.push(CastError {
                path,
                message: format!(
                    "Cast to string failed for value \"{}\" (type {}) at path \"{}\"",
                    other, kind, path
                ),
            });
            None
        }
    }
}

/// Response de usuário
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.to_hex(),
            username: user.username,
            email: user.email,
            password: user.password,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Casts a path id to an ObjectId.
///
/// A malformed id is a query failure, not a miss.
pub fn parse_user_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| {
        AppError::DatabaseError(format!(
            "Cast to ObjectId failed for value \"{}\" (type string) at path \"_id\" for model \"{}\"",
            id, MODEL_NAME
        ))
    })
}

pub fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}
