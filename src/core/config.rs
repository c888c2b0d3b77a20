//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.
//! Hero content and timing are compiled in (see `core::hero::HeroScript`)
//! and are not configurable here.

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory with prebuilt static assets served under `/assets`
    /// Example: ./public
    pub assets_dir: Option<String>,

    /// Whether responses are compressed (brotli + gzip)
    /// Anything but "0", "false" or "off" enables it; default on
    pub compression: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("HEROPAGE_ASSETS_DIR").ok(),
            std::env::var("HEROPAGE_COMPRESSION").ok(),
        )
    }

    fn from_values(assets_dir: Option<String>, compression: Option<String>) -> Self {
        Self {
            assets_dir: assets_dir.filter(|dir| !dir.trim().is_empty()),
            compression: compression.as_deref().is_none_or(parse_flag),
        }
    }

    /// Check if a static assets directory is configured
    pub fn has_assets_dir(&self) -> bool {
        self.assets_dir.is_some()
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
