pub mod ingredient_service;
pub mod pagination;
pub mod recipe_service;
pub mod user_service;
pub mod validation;

pub use ingredient_service::IngredientService;
pub use pagination::{Page, PageRequest};
pub use recipe_service::{RecipeService, RecipeSnapshot};
pub use user_service::UserService;
pub use validation::ValidationService;
