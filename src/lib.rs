//! Hello Genetic - Library
//!
//! Evolves fixed-length strings toward a target with an elitist
//! crossover/mutation loop: each generation breeds one child and lets it
//! replace the worst member of the population when it is strictly fitter.

pub mod alphabet;
pub mod config;
pub mod constants;
pub mod error;
pub mod fitness;
pub mod genetic;
pub mod searcher;

pub use error::SearchError;
pub use searcher::{GaConfig, GeneticSearcher, SearchOutcome};
