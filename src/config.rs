use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the menu catalog file
    #[serde(default = "default_menu_path")]
    pub menu_path: PathBuf,

    /// Path to the persisted user preference file
    #[serde(default = "default_preference_path")]
    pub preference_path: PathBuf,
}

fn default_menu_path() -> PathBuf {
    PathBuf::from("menu.txt")
}

fn default_preference_path() -> PathBuf {
    PathBuf::from("user_preference.json")
}

impl Config {
    /// Load configuration from `MEALREC_`-prefixed environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("MEALREC_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
