pub mod catalog;
pub mod preferences;

pub use catalog::Catalog;
pub use preferences::{DishStat, PreferenceState};
