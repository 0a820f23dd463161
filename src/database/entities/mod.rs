pub mod ingredients;
pub mod recipe_ingredients;
pub mod recipes;
pub mod users;
