use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::database::entities::recipes;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::core_error_to_graphql_error;
use crate::graphql::types::Ingredient;
use crate::services::RecipeSnapshot;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<recipes::Model> for Recipe {
    fn from(model: recipes::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[ComplexObject]
impl Recipe {
    /// Ingredients ordered by name
    async fn ingredients(&self, ctx: &Context<'_>) -> Result<Vec<Ingredient>> {
        let context = ctx.data::<GraphQLContext>()?;
        let ingredients = context
            .recipe_service
            .ingredients(self.id)
            .await
            .map_err(core_error_to_graphql_error)?;

        Ok(ingredients.into_iter().map(Ingredient::from).collect())
    }

    async fn ingredient_count(&self, ctx: &Context<'_>) -> Result<u64> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .recipe_service
            .ingredient_count(self.id)
            .await
            .map_err(core_error_to_graphql_error)
    }
}

/// `recipe` is a plain JSON object: `{id, title, description, ingredient_ids}`.
#[derive(SimpleObject)]
pub struct CreateRecipePayload {
    pub recipe: Json<RecipeSnapshot>,
}

#[derive(SimpleObject)]
pub struct AddIngredientToRecipePayload {
    pub ok: bool,
}

#[derive(SimpleObject)]
pub struct RemoveIngredientFromRecipePayload {
    pub ok: bool,
}
