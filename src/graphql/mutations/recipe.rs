use async_graphql::*;

use crate::graphql::context::{require_user, GraphQLContext};
use crate::graphql::errors::core_error_to_graphql_error;
use crate::graphql::types::{
    AddIngredientToRecipePayload, CreateRecipePayload, RemoveIngredientFromRecipePayload,
};

#[derive(Default)]
pub struct RecipeMutation;

#[Object]
impl RecipeMutation {
    /// Ingredient ids that do not exist are skipped
    async fn create_recipe(
        &self,
        ctx: &Context<'_>,
        title: String,
        description: Option<String>,
        ingredient_ids: Option<Vec<i32>>,
    ) -> Result<CreateRecipePayload> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        let snapshot = context
            .recipe_service
            .create(
                &title,
                description.as_deref(),
                ingredient_ids.as_deref().unwrap_or_default(),
            )
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(CreateRecipePayload {
            recipe: Json(snapshot),
        })
    }

    async fn add_ingredient_to_recipe(
        &self,
        ctx: &Context<'_>,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> Result<AddIngredientToRecipePayload> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        context
            .recipe_service
            .add_ingredient(recipe_id, ingredient_id)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(AddIngredientToRecipePayload { ok: true })
    }

    async fn remove_ingredient_from_recipe(
        &self,
        ctx: &Context<'_>,
        recipe_id: i32,
        ingredient_id: i32,
    ) -> Result<RemoveIngredientFromRecipePayload> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        context
            .recipe_service
            .remove_ingredient(recipe_id, ingredient_id)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(RemoveIngredientFromRecipePayload { ok: true })
    }
}
