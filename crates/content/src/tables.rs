use crate::recipe::{BlockId, ContentError, Item, ItemStack, Recipe, RecipeRegistry, Section};

fn recipe(section: Section, output: &'static str, inputs: &[(Item, u32)]) -> Recipe {
    Recipe::new(
        section,
        BlockId(output),
        inputs
            .iter()
            .map(|&(item, amount)| ItemStack::new(item, amount))
            .collect(),
    )
}

/// The stock recipe table.
///
/// Data-only: every entry names an output block by id and its build cost.
/// Returns an error if the table itself contains a duplicate output.
pub fn default_recipes() -> Result<RecipeRegistry, ContentError> {
    use Item::*;
    use Section::*;

    let mut reg = RecipeRegistry::new();

    reg.register(recipe(Defense, "iron-wall", &[(Iron, 12)]))?;
    reg.register(recipe(Defense, "steel-wall", &[(Steel, 12)]))?;
    reg.register(recipe(Defense, "titanium-wall", &[(Titanium, 12)]))?;
    reg.register(recipe(Defense, "dirium-wall", &[(SurgeAlloy, 12)]))?;
    reg.register(recipe(Defense, "steel-wall-large", &[(Steel, 12 * 4)]))?;
    reg.register(recipe(Defense, "titanium-wall-large", &[(Titanium, 12 * 4)]))?;
    // The large variant is its own block; sharing the small wall's id would
    // be a duplicate registration.
    reg.register(recipe(Defense, "dirium-wall-large", &[(SurgeAlloy, 12 * 4)]))?;
    reg.register(recipe(Defense, "door", &[(Steel, 3), (Iron, 3 * 4)]))?;
    reg.register(recipe(Defense, "door-large", &[(Steel, 3 * 4), (Iron, 3 * 4 * 4)]))?;
    reg.register(recipe(Defense, "titanium-shield-wall", &[(Titanium, 16)]))?;

    reg.register(recipe(Distribution, "conveyor", &[(Iron, 1)]))?;
    reg.register(recipe(Distribution, "steel-conveyor", &[(Steel, 1)]))?;
    reg.register(recipe(Distribution, "pulse-conveyor", &[(SurgeAlloy, 1)]))?;
    reg.register(recipe(Distribution, "router", &[(Iron, 2)]))?;
    reg.register(recipe(Distribution, "multiplexer", &[(Iron, 8)]))?;
    reg.register(recipe(Distribution, "junction", &[(Iron, 2)]))?;
    reg.register(recipe(Distribution, "sorter", &[(Steel, 2)]))?;
    reg.register(recipe(Distribution, "splitter", &[(Steel, 1)]))?;
    reg.register(recipe(Distribution, "overflow-gate", &[(Steel, 1)]))?;
    reg.register(recipe(Distribution, "vault", &[(Steel, 50)]))?;
    reg.register(recipe(Distribution, "core", &[(Steel, 50)]))?;
    reg.register(recipe(Distribution, "unloader", &[(Steel, 5)]))?;
    reg.register(recipe(Distribution, "sorted-unloader", &[(Steel, 5)]))?;
    reg.register(recipe(Distribution, "bridge-conveyor", &[(Steel, 5)]))?;
    reg.register(recipe(Distribution, "laser-conveyor", &[(Steel, 5)]))?;
    reg.register(recipe(Distribution, "teleporter", &[(Steel, 30), (SurgeAlloy, 40)]))?;

    reg.register(recipe(Weapon, "duo", &[(Iron, 7)]))?;
    reg.register(recipe(Weapon, "scatter", &[(Iron, 8)]))?;
    reg.register(recipe(Weapon, "scorch", &[(Iron, 12), (Steel, 9)]))?;
    reg.register(recipe(Weapon, "wave", &[(Iron, 15), (Steel, 10)]))?;
    reg.register(recipe(Weapon, "lancer", &[(Steel, 12), (Titanium, 12)]))?;
    reg.register(recipe(Weapon, "crux", &[(Steel, 25), (Titanium, 15)]))?;
    reg.register(recipe(Weapon, "arc", &[(Steel, 20), (Titanium, 25), (SurgeAlloy, 15)]))?;
    reg.register(recipe(Weapon, "swarmer", &[(Steel, 80), (Titanium, 70), (SurgeAlloy, 60)]))?;
    reg.register(recipe(Weapon, "ripple", &[(Steel, 80), (Titanium, 70), (SurgeAlloy, 60)]))?;
    reg.register(recipe(Weapon, "fuse", &[(Steel, 70), (Titanium, 50), (SurgeAlloy, 55)]))?;
    reg.register(recipe(Weapon, "spectre", &[(Steel, 70), (Titanium, 50), (SurgeAlloy, 55)]))?;
    reg.register(recipe(Weapon, "meltdown", &[(Steel, 70), (Titanium, 50), (SurgeAlloy, 55)]))?;

    reg.register(recipe(Crafting, "smelter", &[(Iron, 40)]))?;
    reg.register(recipe(Crafting, "alloy-smelter", &[(Titanium, 50), (Steel, 50)]))?;
    reg.register(recipe(Crafting, "power-smelter", &[(Steel, 30), (Iron, 30)]))?;
    reg.register(recipe(Crafting, "power-alloy-smelter", &[(Steel, 30), (Iron, 30)]))?;
    reg.register(recipe(Crafting, "separator", &[(Steel, 30), (Iron, 30)]))?;
    reg.register(recipe(Crafting, "centrifuge", &[(Steel, 30), (Iron, 30)]))?;
    reg.register(recipe(Crafting, "silicon-smelter", &[(Steel, 30), (Iron, 30)]))?;
    reg.register(recipe(Crafting, "oil-refinery", &[(Steel, 15), (Iron, 15)]))?;
    reg.register(recipe(Crafting, "biomatter-compressor", &[(Steel, 15), (Iron, 15)]))?;
    reg.register(recipe(Crafting, "plastic-former", &[(Steel, 30), (Titanium, 15)]))?;
    reg.register(recipe(Crafting, "cryofluid-mixer", &[(Steel, 30), (Titanium, 15)]))?;
    reg.register(recipe(Crafting, "pulverizer", &[(Steel, 10), (Iron, 10)]))?;
    reg.register(recipe(Crafting, "stone-former", &[(Steel, 10), (Iron, 10)]))?;
    reg.register(recipe(Crafting, "melter", &[(Steel, 30), (Titanium, 15)]))?;
    reg.register(recipe(Crafting, "incinerator", &[(Steel, 60), (Iron, 60)]))?;
    reg.register(recipe(Crafting, "weapon-factory", &[(Steel, 60), (Iron, 60)]).desktop())?;

    reg.register(recipe(Production, "iron-drill", &[(Iron, 25)]))?;
    reg.register(recipe(Production, "reinforced-drill", &[(Iron, 25)]))?;
    reg.register(recipe(Production, "steel-drill", &[(Iron, 25)]))?;
    reg.register(recipe(Production, "titanium-drill", &[(Iron, 25)]))?;
    reg.register(recipe(Production, "laser-drill", &[(Titanium, 40), (SurgeAlloy, 40)]))?;
    reg.register(recipe(Production, "nuclear-drill", &[(Titanium, 40), (SurgeAlloy, 40)]))?;
    reg.register(recipe(Production, "plasma-drill", &[(Titanium, 40), (SurgeAlloy, 40)]))?;
    reg.register(recipe(Production, "cultivator", &[(Titanium, 40), (SurgeAlloy, 40)]))?;
    reg.register(recipe(Production, "water-extractor", &[(Titanium, 40), (SurgeAlloy, 40)]))?;
    reg.register(recipe(Production, "oil-extractor", &[(Titanium, 40), (SurgeAlloy, 40)]))?;

    reg.register(recipe(Power, "power-node", &[(Steel, 3), (Iron, 3)]))?;
    reg.register(recipe(Power, "power-node-large", &[(Steel, 3), (Iron, 3)]))?;
    reg.register(recipe(Power, "battery", &[(Steel, 5), (Iron, 5)]))?;
    reg.register(recipe(Power, "battery-large", &[(Steel, 5), (Iron, 5)]))?;
    reg.register(recipe(Power, "combustion-generator", &[(Iron, 30)]))?;
    reg.register(recipe(Power, "liquid-combustion-generator", &[(Iron, 30)]))?;
    reg.register(recipe(Power, "thermal-generator", &[(Steel, 30)]))?;
    reg.register(recipe(Power, "rt-generator", &[(Titanium, 20), (Steel, 20)]))?;
    reg.register(recipe(Power, "solar-panel", &[(Iron, 30), (Silicon, 20)]))?;
    reg.register(recipe(Power, "solar-panel-large", &[(Iron, 30), (Silicon, 20)]))?;
    reg.register(recipe(
        Power,
        "nuclear-reactor",
        &[(Titanium, 40), (SurgeAlloy, 40), (Steel, 50)],
    ))?;
    reg.register(recipe(
        Power,
        "fusion-reactor",
        &[(Titanium, 40), (SurgeAlloy, 40), (Steel, 50)],
    ))?;
    reg.register(recipe(Power, "shield-generator", &[(Titanium, 30), (SurgeAlloy, 30)]))?;
    reg.register(recipe(Power, "repair-turret", &[(Iron, 30)]))?;
    reg.register(recipe(Power, "mega-repair-turret", &[(Iron, 20), (Steel, 30)]))?;

    reg.register(recipe(Liquid, "conduit", &[(Steel, 1)]))?;
    reg.register(recipe(Liquid, "pulse-conduit", &[(Titanium, 1), (Steel, 1)]))?;
    reg.register(recipe(Liquid, "liquid-router", &[(Steel, 2)]))?;
    reg.register(recipe(Liquid, "liquid-tank", &[(Steel, 2)]))?;
    reg.register(recipe(Liquid, "liquid-junction", &[(Steel, 2)]))?;
    reg.register(recipe(Liquid, "bridge-conduit", &[(Titanium, 2), (Steel, 2)]))?;
    reg.register(recipe(Liquid, "laser-conduit", &[(Titanium, 2), (Steel, 2)]))?;
    reg.register(recipe(Liquid, "pump", &[(Steel, 10)]))?;
    reg.register(recipe(Liquid, "flux-pump", &[(Steel, 10), (SurgeAlloy, 5)]))?;

    reg.register(recipe(Units, "repair-point", &[(Steel, 10)]))?;
    reg.register(recipe(Units, "resupply-point", &[(Steel, 10)]))?;

    reg.register(recipe(Units, "item-source", &[(Steel, 10)]).debug())?;
    reg.register(recipe(Units, "item-void", &[(Steel, 10)]).debug())?;
    reg.register(recipe(Units, "liquid-source", &[(Steel, 10)]).debug())?;
    reg.register(recipe(Units, "power-void", &[(Steel, 10)]).debug())?;
    reg.register(recipe(Units, "power-infinite", &[(Steel, 10), (SurgeAlloy, 5)]).debug())?;

    tracing::debug!(recipes = reg.len(), "default recipe table loaded");
    Ok(reg)
}
