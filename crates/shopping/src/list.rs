use std::collections::HashMap;

use potluck_shared::plan::{Plan, Scope};

use crate::aggregation::{MergedAmount, merge};
use crate::flatten::{Leaf, LeafRef, flatten};
use crate::format::{Locale, format_amount_in};
use crate::name::normalize;
use crate::quantity::{Quantity, parse_opt};

/// One line of the shopping list, merging every leaf with the same
/// normalized name.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    /// Normalized name, stable across renders.
    pub key: String,
    /// Name as written on the first contributing leaf.
    pub name: String,
    pub amount: MergedAmount,
    /// True only when every source is checked.
    pub checked: bool,
    pub sources: Vec<Leaf>,
}

/// Where a row comes from, for display under the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance<'a> {
    Single {
        meal_title: &'a str,
        service_title: &'a str,
        dish_name: &'a str,
    },
    Multiple(usize),
}

impl Provenance<'_> {
    pub fn caption(&self) -> String {
        match self {
            Provenance::Single {
                meal_title,
                service_title,
                ..
            } => format!("{meal_title} · {service_title}"),
            Provenance::Multiple(count) => format!("{count} sources"),
        }
    }
}

impl AggregatedRow {
    pub fn provenance(&self) -> Provenance<'_> {
        match self.sources.as_slice() {
            [leaf] => Provenance::Single {
                meal_title: &leaf.meal_title,
                service_title: &leaf.service_title,
                dish_name: &leaf.dish_name,
            },
            sources => Provenance::Multiple(sources.len()),
        }
    }

    pub fn formatted_amount(&self, locale: Locale) -> String {
        format_amount_in(&self.amount, locale)
    }

    pub fn leaf_refs(&self) -> impl Iterator<Item = &LeafRef> {
        self.sources.iter().map(|leaf| &leaf.source)
    }

    pub fn checked_count(&self) -> usize {
        self.sources.iter().filter(|leaf| leaf.checked).count()
    }

    /// Distinct dish notes of the sources, first seen first.
    pub fn notes(&self) -> Vec<&str> {
        let mut notes: Vec<&str> = Vec::new();
        for note in self.sources.iter().filter_map(|leaf| leaf.note.as_deref()) {
            if !notes.contains(&note) {
                notes.push(note);
            }
        }
        notes
    }
}

struct Bucket {
    key: String,
    name: String,
    sources: Vec<Leaf>,
    quantities: Vec<Quantity>,
}

/// Buckets leaves by normalized name, keeping the order in which each name
/// was first seen.
pub fn group(leaves: Vec<Leaf>) -> Vec<AggregatedRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Bucket> = Vec::new();
    let leaf_count = leaves.len();

    for leaf in leaves {
        let key = normalize(&leaf.name);
        let quantity = parse_opt(leaf.quantity.as_deref());

        let position = *index.entry(key.to_owned()).or_insert_with(|| {
            buckets.push(Bucket {
                key,
                name: leaf.name.to_owned(),
                sources: Vec::new(),
                quantities: Vec::new(),
            });
            buckets.len() - 1
        });

        let bucket = &mut buckets[position];
        bucket.quantities.push(quantity);
        bucket.sources.push(leaf);
    }

    let rows = buckets
        .into_iter()
        .map(|bucket| AggregatedRow {
            amount: merge(&bucket.quantities),
            checked: bucket.sources.iter().all(|leaf| leaf.checked),
            key: bucket.key,
            name: bucket.name,
            sources: bucket.sources,
        })
        .collect::<Vec<_>>();

    tracing::debug!(leaves = leaf_count, rows = rows.len(), "shopping list grouped");

    rows
}

/// Builds the shopping list rows of `scope` from the current plan snapshot.
pub fn flatten_and_aggregate(plan: &Plan, scope: &Scope) -> Vec<AggregatedRow> {
    group(flatten(plan, scope))
}

/// Aggregated rows plus list-level helpers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    pub rows: Vec<AggregatedRow>,
}

impl ShoppingList {
    pub fn build(plan: &Plan, scope: &Scope) -> Self {
        Self {
            rows: flatten_and_aggregate(plan, scope),
        }
    }

    /// Finds a row by any spelling of its name.
    pub fn find(&self, name: &str) -> Option<&AggregatedRow> {
        let key = normalize(name);
        self.rows.iter().find(|row| row.key == key)
    }

    /// Checked rows and total rows.
    pub fn progress(&self) -> (usize, usize) {
        let checked = self.rows.iter().filter(|row| row.checked).count();
        (checked, self.rows.len())
    }

    pub fn is_done(&self) -> bool {
        self.rows.iter().all(|row| row.checked)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
