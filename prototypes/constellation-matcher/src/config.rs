use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::warn;
use serde::Deserialize;
use starlines::{GridLayout, PatternLibrary, Session};

/// Settings read from `constellation-matcher.json`, if there is one. Anything left out keeps its default.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// flexi_logger spec, ex. `"info"` or `"info, starlines=trace"`
    pub log_level: String,
    pub layout: GridLayout,
    /// JSON file to read patterns from instead of the built-in constellations
    pub library_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            layout: GridLayout::default(),
            library_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.layout.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("couldn't read {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("bad config in {}", path.display()))
    }

    /// Loads the config if the file exists, falling back to defaults if it doesn't or if it's broken.
    ///
    /// This runs before logging is set up, so a broken file is handed back for the caller to report later.
    pub fn load_or_default(path: &Path) -> (Self, Option<anyhow::Error>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// The patterns to play with. A library file that can't be loaded falls back to the built-in constellations.
    pub fn library(&self) -> PatternLibrary {
        let path = match &self.library_path {
            Some(path) => path,
            None => return PatternLibrary::constellations(),
        };
        match PatternLibrary::from_path(path) {
            Ok(library) => library,
            Err(err) => {
                let err = anyhow::Error::new(err)
                    .context(format!("couldn't load {}", path.display()));
                warn!("{:#}; using the built-in constellations", err);
                PatternLibrary::constellations()
            }
        }
    }

    /// A game on the configured grid. Patterns that don't fit the grid are swapped for the built-in constellations, and if those don't fit either the game has no patterns.
    pub fn session(&self) -> Session {
        let err = match Session::new(self.layout, self.library()) {
            Ok(session) => return session,
            Err(err) => err,
        };
        warn!("{}; using the built-in constellations", err);
        let err = match Session::new(self.layout, PatternLibrary::constellations()) {
            Ok(session) => return session,
            Err(err) => err,
        };
        warn!("{}; playing without patterns", err);
        PatternLibrary::new(Vec::new())
            .and_then(|empty| Session::new(self.layout, empty))
            .unwrap_or_else(|err| {
                warn!("{}; using the default grid", err);
                Session::default()
            })
    }
}
