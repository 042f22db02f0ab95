use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::flatten::LeafRef;
use crate::list::AggregatedRow;

/// Host capability for persisting a leaf's checked flag.
///
/// Implementations update exactly the record `leaf` points at: the
/// ingredient's flag, or the whole dish's flag.
#[async_trait]
pub trait LeafStore: Send + Sync + 'static {
    async fn update_leaf_checked(&self, leaf: &LeafRef, checked: bool)
    -> potluck_shared::Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafFailure {
    pub leaf: LeafRef,
    pub reason: String,
}

/// Per-leaf outcome of a fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleResult {
    pub checked: bool,
    pub succeeded: Vec<LeafRef>,
    pub failed: Vec<LeafFailure>,
}

impl ToggleResult {
    /// Every leaf now holds the target state.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_refs(&self) -> impl Iterator<Item = &LeafRef> {
        self.failed.iter().map(|failure| &failure.leaf)
    }

    /// Re-issues the update for the failed leaves only and folds the outcome
    /// into this result.
    pub async fn retry<S: LeafStore>(self, store: &Arc<S>) -> ToggleResult {
        if self.is_complete() {
            return self;
        }

        let leaves = self.failed.into_iter().map(|failure| failure.leaf).collect();
        let mut retried = fan_out(store, leaves, self.checked).await;

        let mut succeeded = self.succeeded;
        succeeded.append(&mut retried.succeeded);

        ToggleResult {
            checked: self.checked,
            succeeded,
            failed: retried.failed,
        }
    }
}

/// Sets every source leaf of `row` to `checked`.
///
/// Updates run concurrently and all of them settle before this returns; a
/// failing leaf never stops the others. Each update runs on its own task, so
/// dropping the returned future leaves in-flight writes to complete.
#[tracing::instrument(skip(store, row), fields(row = %row.key, leaves = row.sources.len()))]
pub async fn toggle_row<S: LeafStore>(
    store: &Arc<S>,
    row: &AggregatedRow,
    checked: bool,
) -> ToggleResult {
    fan_out(store, row.leaf_refs().cloned().collect(), checked).await
}

/// Unchecks every checked leaf of `rows`, for starting a new shopping trip.
#[tracing::instrument(skip_all, fields(rows = rows.len()))]
pub async fn reset_list<S: LeafStore>(store: &Arc<S>, rows: &[AggregatedRow]) -> ToggleResult {
    let leaves = rows
        .iter()
        .flat_map(|row| row.sources.iter())
        .filter(|leaf| leaf.checked)
        .map(|leaf| leaf.source.to_owned())
        .collect();

    fan_out(store, leaves, false).await
}

async fn fan_out<S: LeafStore>(store: &Arc<S>, leaves: Vec<LeafRef>, checked: bool) -> ToggleResult {
    let handles = leaves.iter().cloned().map(|leaf| {
        let store = Arc::clone(store);
        tokio::spawn(async move { store.update_leaf_checked(&leaf, checked).await })
    });

    let outcomes = join_all(handles).await;

    let mut result = ToggleResult {
        checked,
        succeeded: Vec::new(),
        failed: Vec::new(),
    };

    for (leaf, outcome) in leaves.into_iter().zip(outcomes) {
        let reason = match outcome {
            Ok(Ok(())) => {
                result.succeeded.push(leaf);
                continue;
            }
            Ok(Err(err)) => err.to_string(),
            Err(err) => err.to_string(),
        };

        tracing::warn!(leaf = %leaf, checked, reason = %reason, "leaf update failed");
        result.failed.push(LeafFailure { leaf, reason });
    }

    tracing::info!(
        checked,
        succeeded = result.succeeded.len(),
        failed = result.failed.len(),
        "fan-out settled"
    );

    result
}
