use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm::JoinType;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::database::entities::{ingredients, recipe_ingredients, recipes};
use crate::errors::{CoreError, CoreResult};
use crate::services::pagination::{fetch_page, Page, PageRequest};
use crate::services::validation::ValidationService;

/// Ids per statement, below SQLite's oldest bound-variable limit (999).
const ID_BATCH_SIZE: usize = 500;

/// Plain data view of a freshly created recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSnapshot {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub ingredient_ids: Vec<i32>,
}

#[derive(Clone)]
pub struct RecipeService {
    db: DatabaseConnection,
}

impl RecipeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> CoreResult<Option<recipes::Model>> {
        Ok(recipes::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Newest recipes first.
    pub async fn list(&self, request: PageRequest) -> CoreResult<Page<recipes::Model>> {
        let query = recipes::Entity::find()
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id);

        Ok(fetch_page(&self.db, query, request).await?)
    }

    pub async fn ingredients(&self, recipe_id: i32) -> CoreResult<Vec<ingredients::Model>> {
        let ingredients = ingredients::Entity::find()
            .join(
                JoinType::InnerJoin,
                ingredients::Relation::RecipeIngredients.def(),
            )
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .order_by_asc(ingredients::Column::Name)
            .all(&self.db)
            .await?;

        Ok(ingredients)
    }

    pub async fn ingredient_count(&self, recipe_id: i32) -> CoreResult<u64> {
        let count = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    /// Create a recipe and attach whichever of `ingredient_ids` exist.
    /// Unknown ids are dropped rather than rejected.
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        ingredient_ids: &[i32],
    ) -> CoreResult<RecipeSnapshot> {
        let validated = ValidationService::recipe(title, description, ingredient_ids)?;

        let txn = self.db.begin().await?;

        let recipe = recipes::ActiveModel::new(validated.title, validated.description)
            .insert(&txn)
            .await?;

        let mut resolved: Vec<i32> = Vec::new();
        for batch in validated.ingredient_ids.chunks(ID_BATCH_SIZE) {
            let found: Vec<i32> = ingredients::Entity::find()
                .select_only()
                .column(ingredients::Column::Id)
                .filter(ingredients::Column::Id.is_in(batch.to_vec()))
                .into_tuple()
                .all(&txn)
                .await?;
            resolved.extend(found);
        }
        resolved.sort_unstable();

        // Two bound values per row
        for batch in resolved.chunks(ID_BATCH_SIZE / 2) {
            recipe_ingredients::Entity::insert_many(batch.iter().map(|ingredient_id| {
                recipe_ingredients::ActiveModel {
                    recipe_id: Set(recipe.id),
                    ingredient_id: Set(*ingredient_id),
                }
            }))
            .exec_without_returning(&txn)
            .await?;
        }

        txn.commit().await?;

        let ignored = validated.ingredient_ids.len() - resolved.len();
        info!(
            recipe_id = recipe.id,
            ingredients = resolved.len(),
            ignored_ingredient_ids = ignored,
            "Created recipe"
        );

        Ok(RecipeSnapshot {
            id: recipe.id,
            title: recipe.title,
            description: recipe.description,
            ingredient_ids: resolved,
        })
    }

    /// Attach an ingredient; attaching it again is a no-op.
    pub async fn add_ingredient(&self, recipe_id: i32, ingredient_id: i32) -> CoreResult<()> {
        let txn = self.db.begin().await?;
        ensure_pair_exists(&txn, recipe_id, ingredient_id).await?;

        let inserted = recipe_ingredients::Entity::insert(recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(ingredient_id),
        })
        .on_conflict(
            OnConflict::columns([
                recipe_ingredients::Column::RecipeId,
                recipe_ingredients::Column::IngredientId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;

        debug!(recipe_id, ingredient_id, inserted, "Added ingredient to recipe");
        Ok(())
    }

    /// Detach an ingredient; detaching one that is not attached is a no-op.
    pub async fn remove_ingredient(&self, recipe_id: i32, ingredient_id: i32) -> CoreResult<()> {
        let txn = self.db.begin().await?;
        ensure_pair_exists(&txn, recipe_id, ingredient_id).await?;

        let removed = recipe_ingredients::Entity::delete_many()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .filter(recipe_ingredients::Column::IngredientId.eq(ingredient_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        debug!(
            recipe_id,
            ingredient_id,
            removed = removed.rows_affected,
            "Removed ingredient from recipe"
        );
        Ok(())
    }
}

async fn ensure_pair_exists<C: ConnectionTrait>(
    db: &C,
    recipe_id: i32,
    ingredient_id: i32,
) -> CoreResult<()> {
    recipes::Entity::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::not_found("Recipe", recipe_id))?;

    ingredients::Entity::find_by_id(ingredient_id)
        .one(db)
        .await?
        .ok_or_else(|| CoreError::not_found("Ingredient", ingredient_id))?;

    Ok(())
}
