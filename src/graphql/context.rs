use std::sync::Arc;

use async_graphql::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::auth::{AuthenticatedUser, Identity};
use crate::graphql::errors::core_error_to_graphql_error;
use crate::services::{IngredientService, RecipeService};

static ANONYMOUS: Identity = Identity::Anonymous;

#[derive(Clone)]
pub struct GraphQLContext {
    pub ingredient_service: Arc<IngredientService>,
    pub recipe_service: Arc<RecipeService>,
}

impl GraphQLContext {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            ingredient_service: Arc::new(IngredientService::new(db.clone())),
            recipe_service: Arc::new(RecipeService::new(db)),
        }
    }
}

/// Caller identity attached to the request by the auth middleware.
/// Requests executed without one are anonymous.
pub fn identity<'a>(ctx: &Context<'a>) -> &'a Identity {
    ctx.data_opt::<Identity>().unwrap_or(&ANONYMOUS)
}

pub fn require_user<'a>(ctx: &Context<'a>) -> Result<&'a AuthenticatedUser> {
    identity(ctx)
        .require_authenticated()
        .map_err(core_error_to_graphql_error)
}
