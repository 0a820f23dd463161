use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::info;

use crate::database::entities::users;
use crate::errors::{CoreError, CoreResult};
use crate::services::validation::{ValidationService, DUPLICATE_USERNAME};

/// Provisioning for the accounts bearer tokens refer to. Tokens themselves
/// are minted elsewhere.
#[derive(Clone)]
pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_user(&self, username: &str) -> CoreResult<users::Model> {
        let username = ValidationService::username(username)?;

        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(username.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(CoreError::field("username", DUPLICATE_USERNAME));
        }

        let user = users::ActiveModel::new(username).insert(&self.db).await?;
        info!(user_id = user.id, username = %user.username, "Created user");
        Ok(user)
    }
}
