pub mod json_file;

pub use json_file::JsonFileStore;

use crate::error::AppResult;
use crate::models::PreferenceState;

/// Persistence boundary for the preference state
///
/// Saves are write-through: a mutating engine operation only returns once
/// `save` has completed, so a confirmed choice survives a crash right after
/// the call.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore {
    /// Loads the persisted state, `None` when nothing usable exists yet
    fn load(&self) -> AppResult<Option<PreferenceState>>;

    /// Overwrites the persisted state wholesale
    fn save(&self, state: &PreferenceState) -> AppResult<()>;
}
