use std::sync::Arc;

use potluck_shopping::{LeafStore, ShoppingList, ToggleResult, reset_list, toggle_row};

use crate::config::Config;
use crate::store::JsonPlanStore;

/// Checks or unchecks the row called `name` across all of its sources.
#[tracing::instrument(skip(config))]
pub async fn set_checked(
    config: Config,
    name: String,
    person: Option<String>,
    checked: bool,
) -> anyhow::Result<()> {
    let store = Arc::new(JsonPlanStore::open(&config.store.path).await?);
    let plan = store.snapshot().await;
    let scope = super::scope_for(&plan, person.as_deref())?;
    let list = ShoppingList::build(&plan, &scope);

    let Some(row) = list.find(&name) else {
        anyhow::bail!("{name} is not on the shopping list");
    };

    let result = toggle_row(&store, row, checked).await;
    let result = settle(&store, result, config.store.retries).await;

    let verb = if checked { "checked" } else { "unchecked" };
    println!("{}", summary(&format!("{verb} {}", row.name), &result));

    report(result)
}

/// Unchecks every checked row of the list.
#[tracing::instrument(skip(config))]
pub async fn reset(config: Config, person: Option<String>) -> anyhow::Result<()> {
    let store = Arc::new(JsonPlanStore::open(&config.store.path).await?);
    let plan = store.snapshot().await;
    let scope = super::scope_for(&plan, person.as_deref())?;
    let list = ShoppingList::build(&plan, &scope);

    let result = reset_list(&store, &list.rows).await;
    let result = settle(&store, result, config.store.retries).await;

    println!("{}", summary("reset", &result));

    report(result)
}

/// Retries the failed leaves up to `retries` more times.
pub async fn settle<S: LeafStore>(
    store: &Arc<S>,
    mut result: ToggleResult,
    retries: u8,
) -> ToggleResult {
    for attempt in 1..=retries {
        if result.is_complete() {
            break;
        }

        tracing::info!(attempt, failed = result.failed.len(), "retrying failed leaves");
        result = result.retry(store).await;
    }

    result
}

/// "checked Farine (1/2 sources)": updated sources over attempted ones.
fn summary(action: &str, result: &ToggleResult) -> String {
    let total = result.succeeded.len() + result.failed.len();
    format!("{action} ({}/{total} sources)", result.succeeded.len())
}

fn report(result: ToggleResult) -> anyhow::Result<()> {
    if result.is_complete() {
        return Ok(());
    }

    for failure in &result.failed {
        eprintln!("failed {}: {}", failure.leaf, failure.reason);
    }

    anyhow::bail!(
        "{} of {} updates failed",
        result.failed.len(),
        result.failed.len() + result.succeeded.len()
    )
}
