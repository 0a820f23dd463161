use async_graphql::*;

use crate::database::entities::ingredients;
use crate::services::Page;

#[derive(SimpleObject, Clone, Debug)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl From<ingredients::Model> for Ingredient {
    fn from(model: ingredients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// One page of ingredients. `page` is the page actually returned after
/// clamping the requested one.
#[derive(SimpleObject)]
pub struct IngredientPage {
    pub items: Vec<Ingredient>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub num_pages: u64,
}

impl From<Page<ingredients::Model>> for IngredientPage {
    fn from(page: Page<ingredients::Model>) -> Self {
        let page = page.map(Ingredient::from);
        Self {
            items: page.items,
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            num_pages: page.num_pages,
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateIngredientPayload {
    pub ingredient: Ingredient,
}

#[derive(SimpleObject)]
pub struct UpdateIngredientPayload {
    pub ingredient: Ingredient,
}

#[derive(SimpleObject)]
pub struct DeleteIngredientPayload {
    pub ok: bool,
}
