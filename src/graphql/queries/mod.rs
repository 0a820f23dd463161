use async_graphql::*;

use crate::graphql::context::{require_user, GraphQLContext};
use crate::graphql::errors::core_error_to_graphql_error;
use crate::graphql::types::{Ingredient, IngredientPage, Recipe};
use crate::services::PageRequest;

pub const GREETING: &str = "Hello World from GraphQL";

pub struct Query;

#[Object]
impl Query {
    /// Unauthenticated liveness check
    async fn hello(&self) -> String {
        GREETING.to_string()
    }

    async fn recipe(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Recipe>> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        let recipe = context
            .recipe_service
            .get(id)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(recipe.map(Recipe::from))
    }

    /// Newest first
    async fn recipes(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i32,
        #[graphql(default = 10)] page_size: i32,
    ) -> Result<Vec<Recipe>> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        let request = PageRequest::new(page, page_size).map_err(core_error_to_graphql_error)?;
        let page = context
            .recipe_service
            .list(request)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(page.items.into_iter().map(Recipe::from).collect())
    }

    async fn ingredient(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Ingredient>> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        let ingredient = context
            .ingredient_service
            .get(id)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(ingredient.map(Ingredient::from))
    }

    /// Ingredients by name, optionally filtered by a case-insensitive
    /// substring of the name
    async fn ingredients(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
        #[graphql(default = 1)] page: i32,
        #[graphql(default = 10)] page_size: i32,
    ) -> Result<IngredientPage> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        let request = PageRequest::new(page, page_size).map_err(core_error_to_graphql_error)?;
        let page = context
            .ingredient_service
            .list(search.as_deref(), request)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(IngredientPage::from(page))
    }
}
