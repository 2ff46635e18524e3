//! User accounts, role assignment and credential checks.
//!
//! Passwords are hashed with argon2; the stored hash is never
//! serialized out of the entity.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::auth::Caller;
use crate::db::DbPool;
use crate::entities::role::{self, Entity as Role};
use crate::entities::user::{self, Entity as User};
use crate::entities::user_role::{self, Entity as UserRole};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 3))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1))]
    pub first_name: String,
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    /// When set, the password is re-hashed; otherwise it is untouched.
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::HashError(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(hash).map_err(|e| ServiceError::HashError(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Create an account with the given roles. Unknown role names are
    /// rejected.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create(&self, input: NewUser) -> Result<user::Model, ServiceError> {
        input.validate()?;

        let db = self.db_pool.as_ref();

        if self.get_by_username(&input.username).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Username {} already exists",
                input.username
            )));
        }

        let password_hash = hash_password(&input.password)?;

        let user = db
            .transaction::<_, user::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let user = user::ActiveModel {
                        username: Set(input.username.clone()),
                        password_hash: Set(password_hash),
                        first_name: Set(input.first_name.clone()),
                        last_name: Set(input.last_name.clone()),
                        email: Set(input.email.clone()),
                        enabled: Set(true),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    assign_roles(txn, user.id, &input.roles).await?;

                    Ok(user)
                })
            })
            .await
            .map_err(ServiceError::from)?;

        info!(user_id = user.id, "user created");

        self.event_sender
            .send(Event::UserCreated(user.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(user)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UserUpdate) -> Result<user::Model, ServiceError> {
        input.validate()?;

        let existing = self.get(id).await?;

        let mut active: user::ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.email = Set(input.email);
        if let Some(password) = input.password.as_deref() {
            active.password_hash = Set(hash_password(password)?);
        }
        let user = active.update(self.db_pool.as_ref()).await?;

        Ok(user)
    }

    /// Replace the user's role set. Unknown role names are rejected.
    #[instrument(skip(self))]
    pub async fn set_roles(&self, id: i64, roles: Vec<String>) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        self.get(id).await?;

        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                UserRole::delete_many()
                    .filter(user_role::Column::UserId.eq(id))
                    .exec(txn)
                    .await?;
                assign_roles(txn, id, &roles).await?;
                Ok(())
            })
        })
        .await
        .map_err(ServiceError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn set_enabled(&self, id: i64, enabled: bool) -> Result<user::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut active: user::ActiveModel = existing.into();
        active.enabled = Set(enabled);
        let user = active.update(self.db_pool.as_ref()).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();
        self.get(id).await?;

        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                UserRole::delete_many()
                    .filter(user_role::Column::UserId.eq(id))
                    .exec(txn)
                    .await?;
                User::delete_by_id(id).exec(txn).await?;
                Ok(())
            })
        })
        .await
        .map_err(ServiceError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<user::Model, ServiceError> {
        User::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db_pool.as_ref())
            .await?;
        Ok(user)
    }

    /// Role names granted to the user.
    #[instrument(skip(self))]
    pub async fn roles_of(&self, id: i64) -> Result<Vec<String>, ServiceError> {
        let user = self.get(id).await?;
        let roles = user
            .find_related(Role)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(roles.into_iter().map(|r| r.name).collect())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        let users = User::find()
            .order_by_asc(user::Column::Username)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(users)
    }

    /// Verify credentials and build the caller identity.
    ///
    /// Disabled accounts and bad passwords both answer `Forbidden`
    /// without distinguishing which check failed.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Caller, ServiceError> {
        let user = self
            .get_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::Forbidden("invalid credentials".into()))?;

        if !user.enabled || !verify_password(password, &user.password_hash)? {
            warn!(%username, "authentication rejected");
            return Err(ServiceError::Forbidden("invalid credentials".into()));
        }

        let roles = self.roles_of(user.id).await?;
        Ok(Caller::new(user.id, user.username, roles))
    }

    /// Ensure a named role exists, creating it when absent.
    #[instrument(skip(self))]
    pub async fn ensure_role(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<role::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        if let Some(existing) = Role::find()
            .filter(role::Column::Name.eq(name))
            .one(db)
            .await?
        {
            return Ok(existing);
        }

        let role = role::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.map(|s| s.to_string())),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(role)
    }
}

async fn assign_roles<C: sea_orm::ConnectionTrait>(
    db: &C,
    user_id: i64,
    roles: &[String],
) -> Result<(), ServiceError> {
    for name in roles {
        let role = Role::find()
            .filter(role::Column::Name.eq(name))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::ValidationError(format!("Unknown role {}", name)))?;
        user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role.id),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}
