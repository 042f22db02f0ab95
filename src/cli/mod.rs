mod list;
mod toggle;

pub use list::{format_cents, list, render};
pub use toggle::{reset, set_checked};

use potluck_shared::plan::{Plan, Scope};

/// Resolves `--person` against the plan; no person means everyone.
pub fn scope_for(plan: &Plan, person: Option<&str>) -> anyhow::Result<Scope> {
    let Some(id) = person else {
        return Ok(Scope::Everyone);
    };

    if plan.find_person(id).is_none() {
        anyhow::bail!("person {id} is not part of {}", plan.title);
    }

    Ok(Scope::person(id))
}

/// Header label for a scope, e.g. "Alice" or "everyone".
pub fn scope_label(plan: &Plan, scope: &Scope) -> String {
    match scope {
        Scope::Person(id) => plan
            .find_person(id)
            .map(|person| person.name.to_owned())
            .unwrap_or_else(|| id.to_owned()),
        Scope::Everyone => "everyone".to_owned(),
    }
}
