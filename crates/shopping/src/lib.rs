pub mod aggregation;
pub mod flatten;
pub mod format;
pub mod list;
pub mod name;
pub mod quantity;
pub mod toggle;

// Re-export commonly used types
pub use aggregation::{Fragment, MergedAmount, merge};
pub use flatten::{Leaf, LeafRef, flatten};
pub use format::{Locale, format_amount, format_amount_in};
pub use list::{AggregatedRow, Provenance, ShoppingList, flatten_and_aggregate, group};
pub use name::normalize;
pub use quantity::{Family, Quantity, Unit, parse};
pub use toggle::{LeafFailure, LeafStore, ToggleResult, reset_list, toggle_row};
