use fraction::{CheckedAdd, Fraction};

use crate::quantity::{Family, Quantity, Unit};

/// One displayable piece of a merged amount.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Measure { value: Fraction, unit: Unit },
    Label(String),
}

/// Combined quantity of every contributor to a shopping list row.
///
/// Amounts of the same unit family are summed into a single fragment.
/// Families never convert into each other: "200 g" and "2 pièces" stay two
/// fragments. Labels are kept verbatim after the numeric fragments.
///
/// A contribution whose addition would overflow is not summed: it stays a
/// fragment of its own, in the unit it was written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedAmount {
    fragments: Vec<Fragment>,
}

impl MergedAmount {
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// True when no contributor gave any quantity.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The numeric total when the amount is a single measure.
    pub fn measure(&self) -> Option<(Fraction, Unit)> {
        match self.fragments.as_slice() {
            [Fragment::Measure { value, unit }] => Some((*value, *unit)),
            _ => None,
        }
    }
}

/// Merges the parsed quantities of one row.
///
/// Numeric fragments come out in the order their family first appeared,
/// then the contributions that could not be summed, then distinct labels in
/// first-seen order.
pub fn merge<'a>(quantities: impl IntoIterator<Item = &'a Quantity>) -> MergedAmount {
    let mut totals: Vec<(Family, Fraction)> = Vec::new();
    let mut unsummed: Vec<Fragment> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for quantity in quantities {
        match quantity {
            Quantity::Amount { value, unit } => {
                let family = unit.family();
                let sum = unit.to_base(*value).and_then(|base| {
                    match totals.iter_mut().find(|(f, _)| *f == family) {
                        Some((_, total)) => {
                            *total = total.checked_add(&base)?;
                        }
                        None => totals.push((family, base)),
                    }
                    Some(())
                });

                if sum.is_none() {
                    unsummed.push(Fragment::Measure {
                        value: *value,
                        unit: *unit,
                    });
                }
            }
            Quantity::Label(text) => {
                if !labels.contains(text) {
                    labels.push(text.to_owned());
                }
            }
            Quantity::None => {}
        }
    }

    let fragments = totals
        .into_iter()
        .map(|(family, total)| {
            let (value, unit) = family.render(total);
            Fragment::Measure { value, unit }
        })
        .chain(unsummed)
        .chain(labels.into_iter().map(Fragment::Label))
        .collect();

    MergedAmount { fragments }
}
