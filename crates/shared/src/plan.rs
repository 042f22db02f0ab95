//! Snapshot of an event plan: meals, their services, and the dishes people
//! have claimed in each service.
//!
//! The snapshot is owned by the host. Records reference their owners by
//! identifier only (a dish knows its meal and service ids, an ingredient knows
//! its dish id), so nothing here forms a cycle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub dishes: Vec<Dish>,
}

/// A food item claimed within a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Price in cents.
    #[serde(default)]
    pub price: Option<u32>,
    /// Only meaningful for [`Composition::Whole`] dishes.
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub person_id: Option<String>,
    pub meal_id: String,
    pub service_id: String,
    #[serde(default, rename = "ingredients")]
    pub composition: Composition,
}

/// Whether a dish was broken down into ingredients.
///
/// Stored as a plain list of ingredients, an empty list meaning [`Composition::Whole`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Ingredient>", into = "Vec<Ingredient>")]
pub enum Composition {
    #[default]
    Whole,
    Ingredients(Vec<Ingredient>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub dish_id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

/// Which claims a shopping list is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Person(String),
    /// Every dish claimed by someone.
    Everyone,
}

impl Scope {
    pub fn person(id: impl Into<String>) -> Self {
        Self::Person(id.into())
    }

    pub fn includes(&self, dish: &Dish) -> bool {
        match (self, dish.person_id.as_deref()) {
            (_, None) => false,
            (Scope::Everyone, Some(_)) => true,
            (Scope::Person(id), Some(owner)) => id == owner,
        }
    }
}

impl From<Vec<Ingredient>> for Composition {
    fn from(value: Vec<Ingredient>) -> Self {
        if value.is_empty() {
            Composition::Whole
        } else {
            Composition::Ingredients(value)
        }
    }
}

impl From<Composition> for Vec<Ingredient> {
    fn from(value: Composition) -> Self {
        match value {
            Composition::Whole => Vec::new(),
            Composition::Ingredients(ingredients) => ingredients,
        }
    }
}

impl Plan {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn person(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.people.push(Person {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn meal(mut self, meal: Meal) -> Self {
        self.meals.push(meal);
        self
    }

    pub fn find_person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Every dish in display order, alongside its meal and service.
    pub fn dishes(&self) -> impl Iterator<Item = (&Meal, &Service, &Dish)> {
        self.meals.iter().flat_map(|meal| {
            meal.services.iter().flat_map(move |service| {
                service.dishes.iter().map(move |dish| (meal, service, dish))
            })
        })
    }

    pub fn dish_mut(&mut self, id: &str) -> Option<&mut Dish> {
        self.meals
            .iter_mut()
            .flat_map(|m| m.services.iter_mut())
            .flat_map(|s| s.dishes.iter_mut())
            .find(|d| d.id == id)
    }

    pub fn ingredient_mut(&mut self, dish_id: &str, id: &str) -> Option<&mut Ingredient> {
        match &mut self.dish_mut(dish_id)?.composition {
            Composition::Whole => None,
            Composition::Ingredients(ingredients) => ingredients.iter_mut().find(|i| i.id == id),
        }
    }

    /// Sum of the prices of the dishes in scope, in cents.
    pub fn claimed_total(&self, scope: &Scope) -> u64 {
        self.dishes()
            .filter(|(_, _, dish)| scope.includes(dish))
            .filter_map(|(_, _, dish)| dish.price)
            .map(u64::from)
            .sum()
    }
}

impl Meal {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            services: Vec::new(),
        }
    }

    pub fn service(mut self, mut service: Service) -> Self {
        for dish in service.dishes.iter_mut() {
            dish.meal_id = self.id.to_owned();
        }
        self.services.push(service);
        self
    }
}

impl Service {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            dishes: Vec::new(),
        }
    }

    pub fn dish(mut self, mut dish: Dish) -> Self {
        dish.service_id = self.id.to_owned();
        self.dishes.push(dish);
        self
    }
}

impl Dish {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity: None,
            note: None,
            price: None,
            checked: false,
            person_id: None,
            meal_id: String::new(),
            service_id: String::new(),
            composition: Composition::Whole,
        }
    }

    pub fn quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn price(mut self, cents: u32) -> Self {
        self.price = Some(cents);
        self
    }

    pub fn claimed_by(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn ingredient(mut self, mut ingredient: Ingredient) -> Self {
        ingredient.dish_id = self.id.to_owned();
        match &mut self.composition {
            Composition::Whole => self.composition = Composition::Ingredients(vec![ingredient]),
            Composition::Ingredients(ingredients) => ingredients.push(ingredient),
        }
        self
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        match &self.composition {
            Composition::Whole => &[],
            Composition::Ingredients(ingredients) => ingredients,
        }
    }
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dish_id: String::new(),
            name: name.into(),
            quantity: None,
            checked: false,
        }
    }

    pub fn quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Plan {
        Plan::new("bbq", "Summer BBQ")
            .person("alice", "Alice")
            .person("bob", "Bob")
            .meal(
                Meal::new("m1", "Samedi midi").service(
                    Service::new("s1", "Dessert")
                        .dish(
                            Dish::new("d1", "Tarte")
                                .claimed_by("alice")
                                .price(850)
                                .ingredient(Ingredient::new("i1", "Farine").quantity("200g"))
                                .ingredient(Ingredient::new("i2", "Beurre")),
                        )
                        .dish(Dish::new("d2", "Glace").claimed_by("bob").price(400))
                        .dish(Dish::new("d3", "Fraises").price(300)),
                ),
            )
    }

    #[test]
    fn test_builders_link_owner_ids() {
        let plan = sample();
        let (_, _, tarte) = plan.dishes().next().unwrap();

        assert_eq!(tarte.meal_id, "m1");
        assert_eq!(tarte.service_id, "s1");
        assert!(tarte.ingredients().iter().all(|i| i.dish_id == "d1"));
    }

    #[test]
    fn test_scope_excludes_unassigned_dishes() {
        let plan = sample();
        let fraises = plan.dishes().map(|(_, _, d)| d).find(|d| d.id == "d3").unwrap();

        assert!(!Scope::Everyone.includes(fraises));
        assert!(!Scope::person("alice").includes(fraises));
    }

    #[test]
    fn test_claimed_total() {
        let plan = sample();

        assert_eq!(plan.claimed_total(&Scope::Everyone), 1250);
        assert_eq!(plan.claimed_total(&Scope::person("alice")), 850);
        assert_eq!(plan.claimed_total(&Scope::person("carol")), 0);
    }

    #[test]
    fn test_claimed_total_beyond_u32() {
        let plan = Plan::new("gala", "Gala").meal(
            Meal::new("m1", "Soir").service(
                Service::new("s1", "Vins")
                    .dish(Dish::new("d1", "Champagne").claimed_by("alice").price(u32::MAX))
                    .dish(Dish::new("d2", "Cognac").claimed_by("alice").price(u32::MAX)),
            ),
        );

        assert_eq!(
            plan.claimed_total(&Scope::person("alice")),
            2 * u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_composition_serializes_as_plain_list() {
        let plan = sample();
        let json = serde_json::to_value(&plan).unwrap();
        let glace = &json["meals"][0]["services"][0]["dishes"][1];

        assert_eq!(glace["ingredients"], serde_json::json!([]));

        let back: Plan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_ingredient_mut_on_whole_dish() {
        let mut plan = sample();

        assert!(plan.ingredient_mut("d2", "i1").is_none());
        assert!(plan.ingredient_mut("d1", "i2").is_some());
    }
}
