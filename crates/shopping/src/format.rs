use fraction::Fraction;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

use crate::aggregation::{Fragment, MergedAmount};
use crate::quantity::Unit;

const FRAGMENT_SEPARATOR: &str = " + ";

/// Decimal places kept when rendering a value.
const PRECISION: u128 = 1000;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display, AsRefStr, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn decimal_separator(self) -> char {
        match self {
            Locale::Fr => ',',
            Locale::En => '.',
        }
    }
}

/// Renders a merged amount for display, e.g. "500 g" or "3 + 200 g".
///
/// Returns an empty string when the amount carries no information.
pub fn format_amount(amount: &MergedAmount) -> String {
    format_amount_in(amount, Locale::default())
}

pub fn format_amount_in(amount: &MergedAmount, locale: Locale) -> String {
    amount
        .fragments()
        .iter()
        .map(|fragment| format_fragment(fragment, locale))
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR)
}

fn format_fragment(fragment: &Fragment, locale: Locale) -> String {
    match fragment {
        Fragment::Measure { value, unit: Unit::Count } => format_value(*value, locale),
        Fragment::Measure { value, unit } => {
            format!("{} {}", format_value(*value, locale), unit.as_ref())
        }
        Fragment::Label(text) => text.to_owned(),
    }
}

/// Renders a value with up to three decimals, trailing zeros trimmed.
pub fn format_value(value: Fraction, locale: Locale) -> String {
    let (Some(numer), Some(denom)) = (value.numer(), value.denom()) else {
        return String::new();
    };

    let numer = u128::from(*numer);
    let denom = u128::from(*denom);
    if denom == 0 {
        return String::new();
    }

    let scaled = (numer * PRECISION + denom / 2) / denom;
    let whole = scaled / PRECISION;
    let decimals = scaled % PRECISION;

    if decimals == 0 {
        return whole.to_string();
    }

    let decimals = format!("{decimals:03}");
    format!(
        "{whole}{}{}",
        locale.decimal_separator(),
        decimals.trim_end_matches('0')
    )
}
