use fraction::{CheckedDiv, CheckedMul, Fraction};
use strum::AsRefStr;

use crate::name::fold;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Unit {
    G,
    Kg,
    Ml,
    Cl,
    L,
    /// Bare number or piece count.
    #[strum(serialize = "")]
    Count,
}

/// Units only add up within the same family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Mass,
    Volume,
    Count,
}

/// Parsed form of a free-text quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Amount { value: Fraction, unit: Unit },
    /// Text that is not a number followed by a known unit, kept verbatim.
    Label(String),
    None,
}

impl Unit {
    /// Looks up a unit token from the culinary synonym table.
    ///
    /// Matching ignores case and accents. An empty token is a bare count.
    pub fn from_token(token: &str) -> Option<Unit> {
        let unit = match fold(token.trim()).as_str() {
            "" | "piece" | "pieces" | "pc" | "pcs" | "unite" | "unites" | "unit" | "units" => {
                Unit::Count
            }
            "g" | "gr" | "gramme" | "grammes" | "gram" | "grams" => Unit::G,
            "kg" | "kilo" | "kilos" | "kilogramme" | "kilogrammes" | "kilogram" | "kilograms" => {
                Unit::Kg
            }
            "ml" | "millilitre" | "millilitres" | "milliliter" | "milliliters" => Unit::Ml,
            "cl" | "centilitre" | "centilitres" | "centiliter" | "centiliters" => Unit::Cl,
            "l" | "litre" | "litres" | "liter" | "liters" => Unit::L,
            _ => return None,
        };

        Some(unit)
    }

    pub fn family(self) -> Family {
        match self {
            Unit::G | Unit::Kg => Family::Mass,
            Unit::Ml | Unit::Cl | Unit::L => Family::Volume,
            Unit::Count => Family::Count,
        }
    }

    /// Converts a value in this unit to its family's base unit (g, ml, count).
    ///
    /// `None` when the converted value does not fit.
    pub fn to_base(self, value: Fraction) -> Option<Fraction> {
        let factor: u64 = match self {
            Unit::G | Unit::Ml | Unit::Count => 1,
            Unit::Cl => 10,
            Unit::Kg | Unit::L => 1000,
        };

        value.checked_mul(&Fraction::new(factor, 1u64))
    }
}

impl Family {
    /// Picks the display unit for a total expressed in base units and
    /// returns the total converted to it.
    pub fn render(self, total: Fraction) -> (Fraction, Unit) {
        let thousand = Fraction::new(1000u64, 1u64);
        let (base, large) = match self {
            Family::Mass => (Unit::G, Unit::Kg),
            Family::Volume => (Unit::Ml, Unit::L),
            Family::Count => return (total, Unit::Count),
        };

        if total < thousand {
            return (total, base);
        }

        total
            .checked_div(&thousand)
            .map_or((total, base), |value| (value, large))
    }
}

/// Parses a quantity such as "200g", "0,5 l", "3" or "2 pièces".
///
/// Grammar: an unsigned decimal number (`.` or `,` as separator), optional
/// whitespace, then an optional unit token. Input that does not match the
/// whole grammar, or whose value overflows once converted to its base unit,
/// becomes a [`Quantity::Label`]; blank input is [`Quantity::None`]. Never
/// fails.
pub fn parse(text: &str) -> Quantity {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Quantity::None;
    }

    let Some((value, rest)) = split_number(trimmed) else {
        return Quantity::Label(trimmed.to_owned());
    };

    match Unit::from_token(rest) {
        Some(unit) if unit.to_base(value).is_some() => Quantity::Amount { value, unit },
        _ => Quantity::Label(trimmed.to_owned()),
    }
}

/// Parses an optional `Option<String>` quantity as stored on plan records.
pub fn parse_opt(text: Option<&str>) -> Quantity {
    text.map(parse).unwrap_or(Quantity::None)
}

/// Splits a leading decimal number off `text`, returning it as an exact
/// fraction together with the remainder.
fn split_number(text: &str) -> Option<(Fraction, &str)> {
    let int_len = text.bytes().take_while(u8::is_ascii_digit).count();
    if int_len == 0 {
        return None;
    }

    let (int_part, rest) = text.split_at(int_len);
    let (frac_part, rest) = match rest.strip_prefix(['.', ',']) {
        Some(after) => {
            let frac_len = after.bytes().take_while(u8::is_ascii_digit).count();
            if frac_len == 0 {
                return None;
            }
            after.split_at(frac_len)
        }
        None => ("", rest),
    };

    let mut numer: u64 = 0;
    let mut denom: u64 = 1;
    for digit in int_part.bytes() {
        numer = numer.checked_mul(10)?.checked_add(u64::from(digit - b'0'))?;
    }
    for digit in frac_part.bytes() {
        numer = numer.checked_mul(10)?.checked_add(u64::from(digit - b'0'))?;
        denom = denom.checked_mul(10)?;
    }

    Some((Fraction::new(numer, denom), rest))
}
