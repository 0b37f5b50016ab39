//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{User, UserRole};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields required to insert a user; the password is already hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// User repository trait for dependency injection.
///
/// The repository stores whatever hash it is handed; hashing is the caller's job.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Replace the stored password hash
    async fn update_password_hash(&self, id: Uuid, password_hash: String) -> AppResult<User>;

    /// Replace the user's role
    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(user.username),
            fullname: Set(user.fullname),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(insert_error)?;
        tracing::debug!(user_id = %model.id, "User row inserted");
        Ok(User::from(model))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: String) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> AppResult<User> {
        let mut active: ActiveModel = self.find_model(id).await?.into();
        active.role = Set(role.to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }
}

/// Map a failed insert, turning unique-index violations into conflicts.
///
/// Two concurrent registrations can both pass the service's lookups; the
/// unique indexes on `username` and `email` reject the second row.
fn insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(detail = %detail, "Duplicate user rejected by unique index");
            AppError::conflict(conflicting_field(&detail))
        }
        _ => AppError::from(err),
    }
}

/// Which unique column a violation message refers to.
fn conflicting_field(detail: &str) -> &'static str {
    if detail.to_ascii_lowercase().contains("username") {
        "Username"
    } else {
        "Email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_field_from_postgres_detail() {
        assert_eq!(
            conflicting_field(
                r#"duplicate key value violates unique constraint "users_username_key""#
            ),
            "Username"
        );
        assert_eq!(
            conflicting_field(r#"duplicate key value violates unique constraint "users_email_key""#),
            "Email"
        );
    }

    #[test]
    fn test_other_insert_errors_stay_database_errors() {
        let err = insert_error(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status().as_u16(), 500);
    }

    #[test]
    fn test_new_user_debug_hides_hash() {
        let user = NewUser {
            username: "jane".to_string(),
            fullname: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            role: UserRole::Buyer,
        };

        let rendered = format!("{:?}", user);
        assert!(!rendered.contains("$argon2id$"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
