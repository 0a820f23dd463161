use async_graphql::*;

use crate::graphql::context::{require_user, GraphQLContext};
use crate::graphql::errors::core_error_to_graphql_error;
use crate::graphql::types::{
    CreateIngredientPayload, DeleteIngredientPayload, Ingredient, UpdateIngredientPayload,
};

#[derive(Default)]
pub struct IngredientMutation;

#[Object]
impl IngredientMutation {
    async fn create_ingredient(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: Option<String>,
    ) -> Result<CreateIngredientPayload> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        let ingredient = context
            .ingredient_service
            .create(&name, description.as_deref())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(CreateIngredientPayload {
            ingredient: Ingredient::from(ingredient),
        })
    }

    /// Only the arguments supplied are changed
    async fn update_ingredient(
        &self,
        ctx: &Context<'_>,
        id: i32,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<UpdateIngredientPayload> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        let ingredient = context
            .ingredient_service
            .update(id, name.as_deref(), description.as_deref())
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(UpdateIngredientPayload {
            ingredient: Ingredient::from(ingredient),
        })
    }

    /// Also removes the ingredient from every recipe using it
    async fn delete_ingredient(&self, ctx: &Context<'_>, id: i32) -> Result<DeleteIngredientPayload> {
        require_user(ctx)?;
        let context = ctx.data::<GraphQLContext>()?;

        context
            .ingredient_service
            .delete(id)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(DeleteIngredientPayload { ok: true })
    }
}
