use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::{AuthenticatedUser, Claims, IdentityResolver};
use crate::database::entities::users;
use crate::errors::{AuthError, AuthResult};

/// Resolves the token's `user_id` against the users table. Deactivated
/// accounts do not authenticate.
#[derive(Clone)]
pub struct DatabaseIdentityResolver {
    db: DatabaseConnection,
}

impl DatabaseIdentityResolver {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityResolver for DatabaseIdentityResolver {
    async fn resolve(&self, claims: &Claims) -> AuthResult<AuthenticatedUser> {
        let user = users::Entity::find_by_id(claims.user_id)
            .one(&self.db)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
        })
    }
}
