//! Reference data: category and unit choices
//!
//! Loaded from CSV files in the project's data directory. Category loading
//! never fails; it falls back to a built-in list. The per-category defaults
//! are returned as a value for callers to pass along.

mod builtin;
mod catalog;
mod units;

pub use builtin::{CATEGORY_HEADER, DEFAULT_CATEGORIES, UNIT_HEADER, default_categories_csv};
pub use catalog::{
    CategoryCatalog, CategoryDefault, CategoryDefaults, CategoryInfo, CategoryRow,
    FALLBACK_PRIORITY,
};
pub use units::{load_units, parse_units};
