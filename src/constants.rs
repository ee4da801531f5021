//! Defaults for the string-evolution search.

/// Target string evolved by the CLI when none is given
pub const DEFAULT_TARGET: &str = "Hello World!";

/// Characters used to seed the initial population:
/// lowercase, uppercase and `"!, "`
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!, ";

/// Number of candidates kept alive during a run
pub const DEFAULT_POPULATION_SIZE: usize = 20;

/// Seed used by the CLI when neither config nor flags provide one
pub const DEFAULT_SEED: u64 = 42;

/// Generations between progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Mutation nudges an ordinal by one of these deltas, chosen uniformly
pub const MUTATION_DELTAS: [i64; 3] = [-1, 0, 1];
