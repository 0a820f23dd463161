use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::info;

use crate::database::entities::{ingredients, recipe_ingredients};
use crate::errors::{CoreError, CoreResult};
use crate::services::pagination::{fetch_page, Page, PageRequest};
use crate::services::validation::{ValidationService, DUPLICATE_INGREDIENT_NAME};

#[derive(Clone)]
pub struct IngredientService {
    db: DatabaseConnection,
}

impl IngredientService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> CoreResult<Option<ingredients::Model>> {
        Ok(ingredients::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Ingredients ordered by name, optionally narrowed to names containing
    /// `search`. SQLite `LIKE` folds ASCII case only; other characters match
    /// exactly. An empty search string means no filter.
    pub async fn list(
        &self,
        search: Option<&str>,
        request: PageRequest,
    ) -> CoreResult<Page<ingredients::Model>> {
        let mut query = ingredients::Entity::find();

        if let Some(term) = search.filter(|term| !term.is_empty()) {
            let pattern = format!("%{}%", escape_like(term));
            query = query.filter(
                ingredients::Column::Name.like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        let query = query
            .order_by_asc(ingredients::Column::Name)
            .order_by_asc(ingredients::Column::Id);

        Ok(fetch_page(&self.db, query, request).await?)
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> CoreResult<ingredients::Model> {
        let validated = ValidationService::ingredient(name, description)?;

        let txn = self.db.begin().await?;
        ensure_unique_name(&txn, &validated.name, None).await?;

        let ingredient = ingredients::ActiveModel::new(validated.name, validated.description)
            .insert(&txn)
            .await
            .map_err(map_unique_name)?;

        txn.commit().await?;

        info!(ingredient_id = ingredient.id, name = %ingredient.name, "Created ingredient");
        Ok(ingredient)
    }

    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        description: Option<&str>,
    ) -> CoreResult<ingredients::Model> {
        let changes = ValidationService::ingredient_changes(name, description)?;

        let txn = self.db.begin().await?;
        let existing = ingredients::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CoreError::not_found("Ingredient", id))?;

        if changes.is_empty() {
            return Ok(existing);
        }

        if let Some(name) = &changes.name {
            ensure_unique_name(&txn, name, Some(id)).await?;
        }

        let mut active: ingredients::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }

        let updated = active.update(&txn).await.map_err(map_unique_name)?;
        txn.commit().await?;

        info!(ingredient_id = updated.id, "Updated ingredient");
        Ok(updated)
    }

    /// Delete an ingredient and detach it from every recipe.
    pub async fn delete(&self, id: i32) -> CoreResult<()> {
        let txn = self.db.begin().await?;

        let ingredient = ingredients::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CoreError::not_found("Ingredient", id))?;

        let detached = recipe_ingredients::Entity::delete_many()
            .filter(recipe_ingredients::Column::IngredientId.eq(ingredient.id))
            .exec(&txn)
            .await?;

        ingredients::Entity::delete_by_id(ingredient.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(
            ingredient_id = id,
            recipes_detached = detached.rows_affected,
            "Deleted ingredient"
        );
        Ok(())
    }
}

async fn ensure_unique_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude_id: Option<i32>,
) -> CoreResult<()> {
    let mut query = ingredients::Entity::find().filter(ingredients::Column::Name.eq(name));
    if let Some(id) = exclude_id {
        query = query.filter(ingredients::Column::Id.ne(id));
    }

    if query.count(db).await? > 0 {
        return Err(CoreError::field("name", DUPLICATE_INGREDIENT_NAME));
    }

    Ok(())
}

/// A concurrent insert can still trip the unique index after the pre-check.
fn map_unique_name(err: DbErr) -> CoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            CoreError::field("name", DUPLICATE_INGREDIENT_NAME)
        }
        _ => err.into(),
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
