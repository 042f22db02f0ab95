use potluck_shared::plan::{Composition, Plan, Scope};

/// The persisted record a leaf's checked flag lives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeafRef {
    Ingredient {
        dish_id: String,
        ingredient_id: String,
    },
    /// A dish that was not broken down into ingredients.
    Dish { dish_id: String },
}

impl std::fmt::Display for LeafRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeafRef::Ingredient {
                dish_id,
                ingredient_id,
            } => write!(f, "{dish_id}/{ingredient_id}"),
            LeafRef::Dish { dish_id } => write!(f, "{dish_id}"),
        }
    }
}

/// A single thing to buy: one ingredient, or one whole dish.
///
/// Leaves are derived from a plan snapshot on every aggregation and carry
/// copies of what they need, never references back into the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub source: LeafRef,
    pub name: String,
    pub quantity: Option<String>,
    pub checked: bool,
    pub meal_title: String,
    pub service_title: String,
    pub dish_name: String,
    pub note: Option<String>,
}

/// Walks meals, services and dishes in display order and emits the leaves
/// of every dish in `scope`.
///
/// A decomposed dish yields one leaf per ingredient and never appears itself.
pub fn flatten(plan: &Plan, scope: &Scope) -> Vec<Leaf> {
    let mut leaves = Vec::new();

    for (meal, service, dish) in plan.dishes() {
        if !scope.includes(dish) {
            continue;
        }

        match &dish.composition {
            Composition::Ingredients(ingredients) => {
                leaves.extend(ingredients.iter().map(|ingredient| Leaf {
                    source: LeafRef::Ingredient {
                        dish_id: dish.id.to_owned(),
                        ingredient_id: ingredient.id.to_owned(),
                    },
                    name: ingredient.name.to_owned(),
                    quantity: ingredient.quantity.to_owned(),
                    checked: ingredient.checked,
                    meal_title: meal.title.to_owned(),
                    service_title: service.title.to_owned(),
                    dish_name: dish.name.to_owned(),
                    note: None,
                }));
            }
            Composition::Whole => leaves.push(Leaf {
                source: LeafRef::Dish {
                    dish_id: dish.id.to_owned(),
                },
                name: dish.name.to_owned(),
                quantity: dish.quantity.to_owned(),
                checked: dish.checked,
                meal_title: meal.title.to_owned(),
                service_title: service.title.to_owned(),
                dish_name: dish.name.to_owned(),
                note: dish.note.to_owned(),
            }),
        }
    }

    leaves
}
