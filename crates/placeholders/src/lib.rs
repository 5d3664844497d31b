//! Placeholder resolution for offer overlays.
//!
//! The descriptor of every page carries literal sample texts ("8,4 kWp",
//! "Tel: 0155555555", ...). [`binding_for_sample`] maps those samples onto a
//! closed set of [`PlaceholderKey`]s, and [`PlaceholderResolver`] derives
//! the display string of every key from the raw business data.

mod catalog;
mod energy;
pub mod format;
mod input;
mod key;
mod mapping;
mod partition;
mod resolver;
mod values;

pub use catalog::CatalogLookup;
pub use energy::{EnergyFlowQuantities, RawEnergyFlows};
pub use input::{OfferInput, number_value, text_value};
pub use key::{PlaceholderKey, UnknownPlaceholderKey};
pub use mapping::{SlotBinding, binding_for_sample};
pub use partition::partition_percentages;
pub use resolver::{PlaceholderResolver, ResolverOptions};
pub use values::DynamicValueSet;
