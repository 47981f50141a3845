use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Menu written on first run when no menu file exists yet
const DEFAULT_MENU: &str = "\
True
Chinese Cuisine,Dumplings
Chinese Cuisine,Tomato and Egg Noodles
Western Cuisine,Steak
Western Cuisine,Spaghetti
Japanese Cuisine,Sushi
";

/// Immutable menu catalog
///
/// Cuisines keep first-seen order with duplicates suppressed; dishes keep
/// file order within their cuisine and may repeat. Loaded once at startup
/// and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cuisines: Vec<String>,
    dishes_by_cuisine: HashMap<String, Vec<String>>,
    all_dishes: HashSet<String>,
}

impl Catalog {
    /// Parses catalog text: one `cuisine,dish` record per line
    ///
    /// Blank lines and bare `True`/`False` marker lines are skipped. Any
    /// other line without a comma is a format error.
    pub fn parse(text: &str) -> AppResult<Self> {
        let mut catalog = Catalog::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.eq_ignore_ascii_case("true") || line.eq_ignore_ascii_case("false") {
                continue;
            }

            let Some((cuisine, dish)) = line.split_once(',') else {
                return Err(AppError::MenuFormat {
                    line: index + 1,
                    content: line.to_string(),
                });
            };

            if !catalog.cuisines.iter().any(|c| c == cuisine) {
                catalog.cuisines.push(cuisine.to_string());
            }
            catalog
                .dishes_by_cuisine
                .entry(cuisine.to_string())
                .or_default()
                .push(dish.to_string());
            catalog.all_dishes.insert(dish.to_string());
        }

        Ok(catalog)
    }

    /// Loads the catalog from `path`, writing the default menu first when the
    /// file does not exist
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "Menu file missing, writing default menu");
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, DEFAULT_MENU)?;
        }

        let text = fs::read_to_string(path)?;
        let catalog = Self::parse(&text)?;
        tracing::info!(
            cuisines = catalog.cuisines.len(),
            dishes = catalog.all_dishes.len(),
            "Menu catalog loaded"
        );
        Ok(catalog)
    }

    /// All cuisines in first-seen order
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    /// Dishes of a cuisine in file order, `None` when the cuisine is unknown
    pub fn dishes_for(&self, cuisine: &str) -> Option<&[String]> {
        self.dishes_by_cuisine.get(cuisine).map(Vec::as_slice)
    }

    /// Case-insensitive cuisine membership test
    pub fn cuisine_exists(&self, name: &str) -> bool {
        self.canonical_cuisine(name).is_some()
    }

    /// Resolves a case-insensitive cuisine name to the catalog's spelling
    pub fn canonical_cuisine(&self, name: &str) -> Option<&str> {
        self.cuisines
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Exact dish membership test, within one cuisine or across the catalog
    pub fn dish_exists(&self, dish: &str, cuisine: Option<&str>) -> bool {
        match cuisine {
            Some(cuisine) => self
                .dishes_for(cuisine)
                .is_some_and(|dishes| dishes.iter().any(|d| d == dish)),
            None => self.all_dishes.contains(dish),
        }
    }

    /// Finds the first cuisine (in catalog order) containing a dish whose
    /// lowercased name equals `query`
    ///
    /// The query itself is not lowercased, so only a lowercase query can
    /// match a mixed-case menu entry. Kept for parity with the historical
    /// lookup; use [`Catalog::find_cuisine_for_dish_exact`] for strict
    /// matching.
    pub fn find_cuisine_for_dish(&self, query: &str) -> Option<&str> {
        self.cuisines.iter().map(String::as_str).find(|cuisine| {
            self.dishes_for(cuisine)
                .is_some_and(|dishes| dishes.iter().any(|d| d.to_lowercase() == query))
        })
    }

    /// Finds the first cuisine (in catalog order) containing `dish` exactly
    pub fn find_cuisine_for_dish_exact(&self, dish: &str) -> Option<&str> {
        self.cuisines.iter().map(String::as_str).find(|cuisine| {
            self.dishes_for(cuisine)
                .is_some_and(|dishes| dishes.iter().any(|d| d == dish))
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        cuisines: Vec<String>,
        dishes_by_cuisine: HashMap<String, Vec<String>>,
    ) -> Self {
        let all_dishes = dishes_by_cuisine
            .values()
            .flatten()
            .cloned()
            .collect();
        Self {
            cuisines,
            dishes_by_cuisine,
            all_dishes,
        }
    }
}
