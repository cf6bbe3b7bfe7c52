//! Content registry: buildable-block recipes.
//!
//! Recipes are pure data: a UI section tag, an output block, ordered input
//! costs, and visibility flags. Registration happens once at startup;
//! duplicate outputs are a programming error and fail fast.
//!
//! # Invariants
//! - Each output block has at most one recipe.
//! - Item stacks always carry a count of at least one.
//! - Enumeration order inside a section is registration order.

mod recipe;
mod tables;

pub use recipe::{
    BlockId, ContentError, ContentView, Item, ItemStack, Recipe, RecipeRegistry, Section,
};
pub use tables::default_recipes;

pub fn crate_info() -> &'static str {
    "tileworks-content v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("content"));
    }
}
