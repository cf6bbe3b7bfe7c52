use serde::Serialize;
use std::collections::BTreeMap;

/// An input material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Item {
    Iron,
    Steel,
    Titanium,
    SurgeAlloy,
    Silicon,
}

/// A quantity of one item. Counts are always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemStack {
    pub item: Item,
    pub amount: u32,
}

impl ItemStack {
    pub fn new(item: Item, amount: u32) -> Self {
        assert!(amount >= 1, "item stacks carry at least one item");
        Self { item, amount }
    }
}

/// UI grouping tag for recipes. Sections group the build menu; they do not
/// own recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Defense,
    Distribution,
    Weapon,
    Crafting,
    Production,
    Power,
    Liquid,
    Units,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Defense,
        Section::Distribution,
        Section::Weapon,
        Section::Crafting,
        Section::Production,
        Section::Power,
        Section::Liquid,
        Section::Units,
    ];
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::Defense => "defense",
            Section::Distribution => "distribution",
            Section::Weapon => "weapon",
            Section::Crafting => "crafting",
            Section::Production => "production",
            Section::Power => "power",
            Section::Liquid => "liquid",
            Section::Units => "units",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.to_string() == s)
            .ok_or_else(|| format!("unknown section '{s}'"))
    }
}

/// Identity of an output block. The registry is data-only; block behavior
/// lives with the world descriptors, keyed by the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BlockId(pub &'static str);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// A declarative build cost for one output block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub section: Section,
    pub output: BlockId,
    pub inputs: Vec<ItemStack>,
    /// Hidden on non-desktop platforms.
    pub desktop_only: bool,
    /// Hidden unless debug mode is enabled.
    pub debug_only: bool,
}

impl Recipe {
    pub fn new(section: Section, output: BlockId, inputs: Vec<ItemStack>) -> Self {
        Self {
            section,
            output,
            inputs,
            desktop_only: false,
            debug_only: false,
        }
    }

    /// Mark this recipe desktop-only.
    pub fn desktop(mut self) -> Self {
        self.desktop_only = true;
        self
    }

    /// Mark this recipe debug-only.
    pub fn debug(mut self) -> Self {
        self.debug_only = true;
        self
    }

    /// Whether the recipe shows up under the given view.
    pub fn visible(&self, view: ContentView) -> bool {
        (!self.desktop_only || view.desktop) && (!self.debug_only || view.debug)
    }
}

/// Platform/debug visibility for recipe enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentView {
    pub desktop: bool,
    pub debug: bool,
}

impl ContentView {
    pub const DESKTOP: ContentView = ContentView {
        desktop: true,
        debug: false,
    };
    pub const MOBILE: ContentView = ContentView {
        desktop: false,
        debug: false,
    };

    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }
}

/// Errors from content registration.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("duplicate recipe for output block '{0}'")]
    DuplicateRecipe(BlockId),
}

/// Process-wide mapping from output block to recipe.
///
/// Flat and immutable after startup. Sections are a grouping attribute;
/// enumeration within a section preserves registration order.
#[derive(Debug, Default)]
pub struct RecipeRegistry {
    by_output: BTreeMap<BlockId, Recipe>,
    order: Vec<BlockId>,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recipe. Registering two recipes for the same output block
    /// is a programming error surfaced at startup.
    pub fn register(&mut self, recipe: Recipe) -> Result<(), ContentError> {
        let output = recipe.output;
        if self.by_output.contains_key(&output) {
            return Err(ContentError::DuplicateRecipe(output));
        }
        self.by_output.insert(output, recipe);
        self.order.push(output);
        Ok(())
    }

    /// Lookup by output block.
    pub fn by_output(&self, output: BlockId) -> Option<&Recipe> {
        self.by_output.get(&output)
    }

    /// All recipes of one section visible under `view`, in registration order.
    pub fn section(&self, section: Section, view: ContentView) -> Vec<&Recipe> {
        self.order
            .iter()
            .filter_map(|id| self.by_output.get(id))
            .filter(|r| r.section == section && r.visible(view))
            .collect()
    }

    /// All recipes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.order.iter().filter_map(|id| self.by_output.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(item: Item, amount: u32) -> ItemStack {
        ItemStack::new(item, amount)
    }

    #[test]
    fn lookup_by_output_block() {
        let mut reg = RecipeRegistry::new();
        reg.register(Recipe::new(
            Section::Defense,
            BlockId("iron-wall"),
            vec![stack(Item::Iron, 12)],
        ))
        .unwrap();
        reg.register(Recipe::new(
            Section::Weapon,
            BlockId("duo"),
            vec![stack(Item::Iron, 7)],
        ))
        .unwrap();

        let wall = reg.by_output(BlockId("iron-wall")).unwrap();
        assert_eq!(wall.section, Section::Defense);
        assert_eq!(wall.inputs, vec![stack(Item::Iron, 12)]);

        assert!(reg.by_output(BlockId("unregistered")).is_none());
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut reg = RecipeRegistry::new();
        reg.register(Recipe::new(
            Section::Defense,
            BlockId("iron-wall"),
            vec![stack(Item::Iron, 12)],
        ))
        .unwrap();
        let err = reg
            .register(Recipe::new(
                Section::Defense,
                BlockId("iron-wall"),
                vec![stack(Item::Iron, 48)],
            ))
            .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateRecipe(id) if id == BlockId("iron-wall")));
    }

    #[test]
    fn debug_recipe_hidden_outside_debug_view() {
        let mut reg = RecipeRegistry::new();
        reg.register(
            Recipe::new(
                Section::Units,
                BlockId("item-source"),
                vec![stack(Item::Steel, 10)],
            )
            .debug(),
        )
        .unwrap();

        assert!(reg.section(Section::Units, ContentView::DESKTOP).is_empty());
        let debug = reg.section(Section::Units, ContentView::DESKTOP.with_debug());
        assert_eq!(debug.len(), 1);
        assert_eq!(debug[0].output, BlockId("item-source"));
    }

    #[test]
    fn desktop_recipe_hidden_on_mobile() {
        let mut reg = RecipeRegistry::new();
        reg.register(
            Recipe::new(
                Section::Crafting,
                BlockId("weapon-factory"),
                vec![stack(Item::Steel, 60)],
            )
            .desktop(),
        )
        .unwrap();

        assert!(reg.section(Section::Crafting, ContentView::MOBILE).is_empty());
        assert_eq!(reg.section(Section::Crafting, ContentView::DESKTOP).len(), 1);
    }

    #[test]
    fn section_enumeration_preserves_registration_order() {
        let mut reg = RecipeRegistry::new();
        for name in ["conveyor", "router", "junction"] {
            reg.register(Recipe::new(
                Section::Distribution,
                BlockId(name),
                vec![stack(Item::Iron, 1)],
            ))
            .unwrap();
        }
        let names: Vec<&str> = reg
            .section(Section::Distribution, ContentView::MOBILE)
            .iter()
            .map(|r| r.output.0)
            .collect();
        assert_eq!(names, vec!["conveyor", "router", "junction"]);
    }

    #[test]
    #[should_panic(expected = "at least one")]
    fn zero_count_stack_panics() {
        let _ = ItemStack::new(Item::Iron, 0);
    }
}
