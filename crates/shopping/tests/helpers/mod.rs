#![allow(dead_code)]

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use potluck_shared::plan::{Dish, Ingredient, Meal, Plan, Service};
use potluck_shopping::{LeafRef, LeafStore};
use tokio::sync::Mutex;

/// In-memory plan store that can be told to fail or stall on given leaves.
#[derive(Default)]
pub struct MemoryStore {
    pub plan: Mutex<Plan>,
    pub failing: Mutex<HashSet<LeafRef>>,
    pub delay: Option<Duration>,
    pub calls: Mutex<Vec<LeafRef>>,
}

impl MemoryStore {
    pub fn new(plan: Plan) -> Self {
        Self {
            plan: Mutex::new(plan),
            ..Default::default()
        }
    }

    pub fn with_delay(plan: Plan, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(plan)
        }
    }

    pub async fn fail_on(&self, leaf: LeafRef) {
        self.failing.lock().await.insert(leaf);
    }

    pub async fn heal(&self) {
        self.failing.lock().await.clear();
    }

    pub async fn snapshot(&self) -> Plan {
        self.plan.lock().await.clone()
    }
}

#[async_trait]
impl LeafStore for MemoryStore {
    async fn update_leaf_checked(
        &self,
        leaf: &LeafRef,
        checked: bool,
    ) -> potluck_shared::Result<()> {
        self.calls.lock().await.push(leaf.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().await.contains(leaf) {
            potluck_shared::bail!("storage unavailable for {leaf}");
        }

        let mut plan = self.plan.lock().await;
        match leaf {
            LeafRef::Dish { dish_id } => {
                let Some(dish) = plan.dish_mut(dish_id) else {
                    potluck_shared::not_found!("dish {dish_id}");
                };
                dish.checked = checked;
            }
            LeafRef::Ingredient {
                dish_id,
                ingredient_id,
            } => {
                let Some(ingredient) = plan.ingredient_mut(dish_id, ingredient_id) else {
                    potluck_shared::not_found!("ingredient {ingredient_id}");
                };
                ingredient.checked = checked;
            }
        }

        Ok(())
    }
}

/// Two meals, three people, overlapping ingredients.
pub fn potluck_plan() -> Plan {
    Plan::new("anniv", "Anniversaire de Léa")
        .person("alice", "Alice")
        .person("bob", "Bob")
        .person("chloe", "Chloé")
        .meal(
            Meal::new("sat", "Samedi soir")
                .service(
                    Service::new("starters", "Entrées")
                        .dish(
                            Dish::new("quiche", "Quiche")
                                .claimed_by("alice")
                                .ingredient(Ingredient::new("q-flour", "Farine").quantity("200g"))
                                .ingredient(Ingredient::new("q-eggs", "Oeufs").quantity("3"))
                                .ingredient(Ingredient::new("q-cream", "Crème fraîche").quantity("20 cl")),
                        )
                        .dish(Dish::new("chips", "Chips").claimed_by("bob").quantity("2 paquets"))
                        .dish(Dish::new("olives", "Olives")),
                )
                .service(
                    Service::new("desserts", "Desserts").dish(
                        Dish::new("tarte", "Tarte aux citrons")
                            .claimed_by("alice")
                            .price(1200)
                            .ingredient(Ingredient::new("t-flour", "farine").quantity("0.3kg"))
                            .ingredient(Ingredient::new("t-butter", "Beurre").quantity("125 g"))
                            .ingredient(Ingredient::new("t-lemons", "Citrons").quantity("2"))
                            .ingredient(Ingredient::new("t-egg", "oeuf").quantity("1 pièce")),
                    ),
                ),
        )
        .meal(
            Meal::new("sun", "Dimanche midi").service(
                Service::new("drinks", "Boissons")
                    .dish(Dish::new("wine", "Vin rouge").claimed_by("alice").quantity("au choix"))
                    .dish(Dish::new("lemonade", "Citron").claimed_by("chloe").quantity("1 pièce"))
                    .dish(Dish::new("water", "Eau pétillante").claimed_by("bob").quantity("1,5 l")),
            ),
        )
}
