//! Configuration file loading

use crate::constants;
use crate::genetic::MutationBounds;
use crate::searcher::GaConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_population")]
    pub population_size: usize,
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_generations: Option<usize>,
    #[serde(default)]
    pub mutation_bounds: MutationBounds,
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

fn default_target() -> String {
    constants::DEFAULT_TARGET.to_string()
}
fn default_population() -> usize {
    constants::DEFAULT_POPULATION_SIZE
}
fn default_alphabet() -> String {
    constants::DEFAULT_ALPHABET.to_string()
}
fn default_progress_interval() -> usize {
    constants::DEFAULT_PROGRESS_INTERVAL
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            target: default_target(),
            population_size: default_population(),
            alphabet: default_alphabet(),
            seed: None,
            max_generations: None,
            mutation_bounds: MutationBounds::default(),
            progress_interval: default_progress_interval(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputSection {
    /// Directory for history JSON; nothing is written when unset
    #[serde(default)]
    pub history_dir: Option<String>,
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is missing
    /// or malformed
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("Failed to parse {}: {}", path, e);
                Config::default()
            }),
            Err(_) => {
                log::warn!("No config file at {}, using defaults", path);
                Config::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn ga_config(&self) -> GaConfig {
        GaConfig {
            target: self.search.target.clone(),
            population_size: self.search.population_size,
            alphabet: self.search.alphabet.clone(),
            mutation_bounds: self.search.mutation_bounds,
            max_generations: self.search.max_generations,
            progress_interval: self.search.progress_interval,
        }
    }
}
