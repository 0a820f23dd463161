mod ingredient;
mod recipe;

use async_graphql::*;

/// Mutation root combining the per-entity mutations
#[derive(Default, MergedObject)]
pub struct Mutation(
    pub ingredient::IngredientMutation,
    pub recipe::RecipeMutation,
);
