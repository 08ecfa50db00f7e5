#![forbid(unsafe_code)]

//! User-visible labels for hookwire widgets.
//!
//! - [`plural`]: count → plural category rules
//! - [`catalog`]: per-locale label tables with fallback and `{name}` interpolation

pub mod catalog;
pub mod plural;

pub use catalog::{LabelCatalog, LabelEntry, Labels, keys};
pub use plural::{PluralCategory, PluralForms, PluralRule};
