use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

use crate::error::{AppError, AppResult};
use crate::models::{Catalog, DishStat, PreferenceState};
use crate::store::PreferenceStore;

/// Selections recorded before the engine switches from exploration to
/// preference-weighted picks
const WARM_PHASE_THRESHOLD: u64 = 10;

/// Default batch size during the exploration phase
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 5;

/// Fixed batch size once the engine is warm
const WARM_BATCH_SIZE: usize = 7;
const WARM_HIGH_FREQUENCY_PICKS: usize = 2;
const WARM_LOW_FREQUENCY_PICKS: usize = 5;

/// Two-phase dish recommender over an immutable catalog and the user's
/// preference counters
///
/// While fewer than ten selections have ever been recorded the engine
/// explores: dishes never surfaced come first, then dishes surfaced but never
/// chosen. From the tenth selection on it exploits, pairing the two
/// most-selected dishes with five under-shown ones.
///
/// Recommending is a command, not a query: every non-empty batch bumps the
/// returned dishes' recommendation counters and writes the state through the
/// store before returning.
pub struct Recommender<S: PreferenceStore> {
    catalog: Catalog,
    state: PreferenceState,
    store: S,
    rng: Box<dyn RngCore>,
}

impl<S: PreferenceStore> Recommender<S> {
    /// Creates an engine with an entropy-seeded sampling source
    pub fn new(catalog: Catalog, state: PreferenceState, store: S) -> Self {
        Self::with_rng(catalog, state, store, Box::new(StdRng::from_entropy()))
    }

    /// Creates an engine with a caller-supplied sampling source
    ///
    /// Tests pass a seeded [`StdRng`] to make sampled batches reproducible.
    pub fn with_rng(
        catalog: Catalog,
        state: PreferenceState,
        store: S,
        rng: Box<dyn RngCore>,
    ) -> Self {
        Self {
            catalog,
            state,
            store,
            rng,
        }
    }

    /// Current preference counters
    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    /// The menu catalog the engine recommends from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Recommends up to `count` dishes from `cuisine` (exact catalog name)
    ///
    /// `count` only bounds the exploration phase; a warm engine always
    /// targets a batch of seven. Returns an empty batch, with no side
    /// effects, when the cuisine has no dishes.
    pub fn recommend(&mut self, cuisine: &str, count: usize) -> AppResult<Vec<String>> {
        let Some(available) = self.catalog.dishes_for(cuisine) else {
            return Err(AppError::CuisineNotFound(cuisine.to_string()));
        };
        if available.is_empty() {
            return Ok(Vec::new());
        }
        let available = available.to_vec();

        let cold_start = self.state.total_selections < WARM_PHASE_THRESHOLD;
        let picks = if cold_start {
            cold_start_picks(&available, &self.state, count, self.rng.as_mut())
        } else {
            warm_picks(&available, &self.state, self.rng.as_mut())
        };

        for dish in &picks {
            self.state.note_recommended(dish);
        }
        if !picks.is_empty() {
            self.store.save(&self.state)?;
        }

        tracing::debug!(
            cuisine,
            cold_start,
            batch = picks.len(),
            "Recommendation batch issued"
        );
        Ok(picks)
    }

    /// Records the user's confirmed dish choice
    ///
    /// A dish the catalog does not know is ignored without error, so
    /// free-text input from the interactive layer cannot corrupt the state.
    pub fn record_selection(&mut self, dish: &str) -> AppResult<()> {
        if !self.catalog.dish_exists(dish, None) {
            tracing::debug!(dish, "Ignoring selection of unknown dish");
            return Ok(());
        }
        self.state.note_selected(dish);
        tracing::info!(
            dish,
            total_selections = self.state.total_selections,
            "Selection recorded"
        );
        self.store.save(&self.state)
    }

    /// Replaces the preference state with a fresh empty one
    pub fn reset_preferences(&mut self) -> AppResult<()> {
        self.state = PreferenceState::new();
        tracing::info!("Preference state reset");
        self.store.save(&self.state)
    }

    /// A sample of up to `count` cuisines to offer the user
    ///
    /// All cuisines, in catalog order, when the catalog holds no more than
    /// `count`; otherwise a uniform sample.
    pub fn random_cuisines(&mut self, count: usize) -> Vec<String> {
        let cuisines = self.catalog.cuisines();
        if cuisines.len() <= count {
            return cuisines.to_vec();
        }
        cuisines
            .choose_multiple(&mut self.rng, count)
            .cloned()
            .collect()
    }
}

/// Exploration-phase selection: tier the cuisine's dishes by history and
/// favor the ones the user has not seen yet
///
/// Tiers, in catalog order: never recommended, then recommended but never
/// chosen, then the rest. When the cuisine fits within `count` the full
/// concatenation is returned without sampling. Otherwise the fresh tier is
/// sampled with at least one slot held back for the later tiers, which fill
/// the remainder.
fn cold_start_picks(
    available: &[String],
    state: &PreferenceState,
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    let mut never_recommended: Vec<&String> = Vec::new();
    let mut recommended_not_selected: Vec<&String> = Vec::new();
    let mut others: Vec<&String> = Vec::new();

    for dish in available {
        let stat = state.stat(dish);
        if stat.recommendation_count == 0 {
            never_recommended.push(dish);
        } else if stat.selection_count == 0 {
            recommended_not_selected.push(dish);
        } else {
            others.push(dish);
        }
    }

    let total = never_recommended.len() + recommended_not_selected.len() + others.len();
    if total <= count {
        return never_recommended
            .into_iter()
            .chain(recommended_not_selected)
            .chain(others)
            .cloned()
            .collect();
    }

    let mut picks: Vec<String> = Vec::with_capacity(count);

    // Hold one slot back from the fresh tier so later tiers stay reachable
    let fresh_quota = never_recommended.len().min(count.saturating_sub(1));
    picks.extend(
        never_recommended
            .choose_multiple(rng, fresh_quota)
            .map(|d| (*d).clone()),
    );

    let remaining = count - picks.len();
    picks.extend(
        recommended_not_selected
            .choose_multiple(rng, remaining)
            .map(|d| (*d).clone()),
    );

    let remaining = count - picks.len();
    picks.extend(others.choose_multiple(rng, remaining).map(|d| (*d).clone()));

    picks
}

/// Warm-phase selection: two high-frequency picks plus five under-shown ones
///
/// Both sorts are stable, so catalog order breaks any remaining ties. The
/// trailing fill only matters when the low-frequency pool was shorter than
/// its quota yet unused dishes remain.
fn warm_picks(available: &[String], state: &PreferenceState, rng: &mut dyn RngCore) -> Vec<String> {
    let mut ranked: Vec<(&String, DishStat)> =
        available.iter().map(|d| (d, state.stat(d))).collect();

    // Most selected first; among equals, least recommended first
    ranked.sort_by(|a, b| {
        b.1.selection_count
            .cmp(&a.1.selection_count)
            .then(a.1.recommendation_count.cmp(&b.1.recommendation_count))
    });

    let mut picks: Vec<String> = ranked
        .iter()
        .take(WARM_HIGH_FREQUENCY_PICKS)
        .map(|(d, _)| (*d).clone())
        .collect();

    let mut remaining: Vec<(&String, DishStat)> = ranked
        .into_iter()
        .skip(WARM_HIGH_FREQUENCY_PICKS)
        .collect();

    // Least recommended first; among equals, most selected first
    remaining.sort_by(|a, b| {
        a.1.recommendation_count
            .cmp(&b.1.recommendation_count)
            .then(b.1.selection_count.cmp(&a.1.selection_count))
    });

    picks.extend(
        remaining
            .iter()
            .take(WARM_LOW_FREQUENCY_PICKS)
            .map(|(d, _)| (*d).clone()),
    );

    if picks.len() < WARM_BATCH_SIZE {
        let need = WARM_BATCH_SIZE - picks.len();
        let pool: Vec<&String> = available.iter().filter(|d| !picks.contains(*d)).collect();
        if pool.len() <= need {
            picks.extend(pool.into_iter().cloned());
        } else {
            picks.extend(pool.choose_multiple(rng, need).map(|d| (*d).clone()));
        }
    }

    picks.truncate(WARM_BATCH_SIZE);
    picks
}
