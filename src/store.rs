use std::path::{Path, PathBuf};

use async_trait::async_trait;
use potluck_shared::plan::Plan;
use potluck_shopping::{LeafRef, LeafStore};
use tokio::sync::RwLock;

/// Plan snapshot kept in a JSON file.
///
/// Every leaf update rewrites the file. Writers are serialized by the lock,
/// so concurrent updates from one fan-out never lose each other's changes.
/// The in-memory plan only changes once the file write went through.
pub struct JsonPlanStore {
    path: PathBuf,
    plan: RwLock<Plan>,
}

impl JsonPlanStore {
    pub async fn open(path: impl AsRef<Path>) -> potluck_shared::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                potluck_shared::not_found!("plan file {}", path.display());
            }
            Err(err) => return Err(err.into()),
        };

        let plan = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %path.display(), "plan loaded");

        Ok(Self {
            path,
            plan: RwLock::new(plan),
        })
    }

    pub async fn create(path: impl AsRef<Path>, plan: Plan) -> potluck_shared::Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            plan: RwLock::new(plan),
        };
        store.persist(&*store.plan.read().await).await?;

        Ok(store)
    }

    pub async fn snapshot(&self) -> Plan {
        self.plan.read().await.clone()
    }

    async fn persist(&self, plan: &Plan) -> potluck_shared::Result<()> {
        let bytes = serde_json::to_vec_pretty(plan)?;
        let tmp = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl LeafStore for JsonPlanStore {
    async fn update_leaf_checked(
        &self,
        leaf: &LeafRef,
        checked: bool,
    ) -> potluck_shared::Result<()> {
        let mut current = self.plan.write().await;
        let mut plan = current.clone();

        match leaf {
            LeafRef::Dish { dish_id } => {
                let Some(dish) = plan.dish_mut(dish_id) else {
                    potluck_shared::not_found!("dish {dish_id}");
                };
                if !dish.ingredients().is_empty() {
                    potluck_shared::bail!("dish {dish_id} is tracked by its ingredients");
                }
                dish.checked = checked;
            }
            LeafRef::Ingredient {
                dish_id,
                ingredient_id,
            } => {
                let Some(ingredient) = plan.ingredient_mut(dish_id, ingredient_id) else {
                    potluck_shared::not_found!("ingredient {dish_id}/{ingredient_id}");
                };
                ingredient.checked = checked;
            }
        }

        self.persist(&plan).await?;
        *current = plan;
        tracing::debug!(leaf = %leaf, checked, "leaf updated");

        Ok(())
    }
}
