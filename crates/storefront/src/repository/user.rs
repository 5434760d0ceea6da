use crate::{
    abstract_trait::user::repository::UserRepositoryTrait,
    domain::requests::user::{NewUser, UpdateProfileRequest},
    model::user::User as UserModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password, phone, address, created_at, updated_at";
const DUPLICATE_EMAIL: &str = "User already exists";

#[derive(Clone)]
pub struct UserRepository {
    db: ConnectionPool,
}

impl UserRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, UserModel>(&sql)
            .bind(email)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to look up user by email: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserModel>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to look up user {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn create_user(&self, input: &NewUser) -> Result<UserModel, RepositoryError> {
        info!("👤 Creating user: {}", input.email);

        let sql = format!(
            "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, UserModel>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to create user {}: {e:?}", input.email);
                RepositoryError::from_unique_violation(e, DUPLICATE_EMAIL)
            })
    }

    async fn update_profile(
        &self,
        id: Uuid,
        input: &UpdateProfileRequest,
    ) -> Result<Option<UserModel>, RepositoryError> {
        info!("✏️ Updating profile: {id}");

        let sql = format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, UserModel>(&sql)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.email.as_deref())
            .bind(input.phone.as_deref())
            .bind(input.address.as_deref())
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to update profile {id}: {e:?}");
                RepositoryError::from_unique_violation(e, DUPLICATE_EMAIL)
            })
    }
}
