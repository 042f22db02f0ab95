#![allow(dead_code)]

use std::path::{Path, PathBuf};

use potluck::config::{Config, DisplayConfig, ObservabilityConfig, StoreConfig};
use potluck::store::JsonPlanStore;
use potluck_shared::plan::{Dish, Ingredient, Meal, Plan, Service};
use temp_dir::TempDir;

/// Saturday barbecue shared by two friends.
pub fn barbecue_plan() -> Plan {
    Plan::new("bbq", "Barbecue")
        .person("alice", "Alice")
        .person("bob", "Bob")
        .meal(
            Meal::new("sat", "Samedi").service(
                Service::new("main", "Plat")
                    .dish(
                        Dish::new("skewers", "Brochettes")
                            .claimed_by("alice")
                            .price(1850)
                            .ingredient(Ingredient::new("s-onions", "Oignons").quantity("3"))
                            .ingredient(Ingredient::new("s-chicken", "Poulet").quantity("800 g")),
                    )
                    .dish(
                        Dish::new("salad", "Salade")
                            .claimed_by("bob")
                            .ingredient(Ingredient::new("l-onion", "oignon").quantity("1"))
                            .ingredient(Ingredient::new("l-oil", "Huile d'olive").quantity("5 cl")),
                    )
                    .dish(
                        Dish::new("bread", "Pain")
                            .claimed_by("bob")
                            .quantity("2 baguettes")
                            .note("bien cuites"),
                    ),
            ),
        )
}

/// Writes `plan` into a fresh temp dir and opens a store on it.
pub async fn store_with(plan: Plan) -> anyhow::Result<(TempDir, PathBuf, JsonPlanStore)> {
    let dir = TempDir::new()?;
    let path = dir.child("plan.json");
    let store = JsonPlanStore::create(&path, plan).await?;

    Ok((dir, path, store))
}

pub fn config_for(path: &Path) -> Config {
    Config {
        store: StoreConfig {
            path: path.to_string_lossy().into_owned(),
            retries: 1,
        },
        display: DisplayConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}
