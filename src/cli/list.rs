use std::fmt::Write;

use potluck_shared::plan::{Plan, Scope};
use potluck_shopping::{AggregatedRow, Locale, ShoppingList};

use crate::config::Config;
use crate::store::JsonPlanStore;

#[tracing::instrument(skip(config))]
pub async fn list(config: Config, person: Option<String>) -> anyhow::Result<()> {
    let store = JsonPlanStore::open(&config.store.path).await?;
    let plan = store.snapshot().await;
    let scope = super::scope_for(&plan, person.as_deref())?;

    print!("{}", render(&plan, &scope, config.display.locale));

    Ok(())
}

/// Renders the shopping list of `scope` as plain text:
///
/// ```text
/// Anniversaire de Léa · Alice (1/6)
/// [x] Farine: 500 g (2 sources)
/// [ ] Vin rouge: au choix (Dimanche midi · Boissons) note: bordeaux
/// Total: 12,00 €
/// ```
pub fn render(plan: &Plan, scope: &Scope, locale: Locale) -> String {
    let list = ShoppingList::build(plan, scope);
    let (checked, total) = list.progress();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} · {} ({checked}/{total})",
        plan.title,
        super::scope_label(plan, scope)
    );

    if list.is_empty() {
        out.push_str("Nothing to buy\n");
    }

    for row in &list.rows {
        out.push_str(&render_row(row, locale));
        out.push('\n');
    }

    let cents = plan.claimed_total(scope);
    if cents > 0 {
        let _ = writeln!(out, "Total: {}", format_cents(cents, locale));
    }

    out
}

fn render_row(row: &AggregatedRow, locale: Locale) -> String {
    let mark = if row.checked { 'x' } else { ' ' };
    let amount = row.formatted_amount(locale);
    let caption = row.provenance().caption();

    let mut line = if amount.is_empty() {
        format!("[{mark}] {} ({caption})", row.name)
    } else {
        format!("[{mark}] {}: {amount} ({caption})", row.name)
    };

    let notes = row.notes();
    if !notes.is_empty() {
        let _ = write!(line, " note: {}", notes.join(", "));
    }

    line
}

/// Price in cents as "12,00 €" (fr) or "12.00 €" (en).
pub fn format_cents(cents: u64, locale: Locale) -> String {
    format!(
        "{}{}{:02} €",
        cents / 100,
        locale.decimal_separator(),
        cents % 100
    )
}
