mod difficulty;
mod draft;
mod recipe;

pub use difficulty::Difficulty;
pub use draft::RecipeDraft;
pub use recipe::Recipe;
