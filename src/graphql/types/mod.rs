pub mod ingredient;
pub mod recipe;

pub use ingredient::*;
pub use recipe::*;
