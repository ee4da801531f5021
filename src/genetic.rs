//! Genetic operators for string genomes.
//!
//! - Two-point crossover: a slice of the second parent overwrites the first
//! - Point mutation: one character's ordinal is nudged by -1, 0 or +1
//! - Uniform random selection with replacement (self-mating allowed)

use crate::alphabet::Alphabet;
use crate::constants::MUTATION_DELTAS;
use crate::error::SearchError;
use crate::fitness::{Candidate, Genome};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a mutated ordinal is treated when it leaves the alphabet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MutationBounds {
    /// Ordinals drift freely. A nudge that lands on a value that is not a
    /// Unicode scalar (below zero or inside the surrogate block) is dropped.
    #[default]
    Unclamped,
    /// Ordinals are clamped to the alphabet's `[min, max]` ordinal range
    Clamped,
}

/// Overwrite `child[start..end]` with the same range from `donor`.
///
/// Both indices are drawn in `0..len` and ordered, so the copied slice may be
/// empty and never reaches the last position: the final character always
/// comes from `child`.
pub fn crossover<R: Rng>(child: &mut Genome, donor: &Genome, rng: &mut R) {
    let len = child.len().min(donor.len());
    if len == 0 {
        return;
    }

    let mut start = rng.gen_range(0..len);
    let mut end = rng.gen_range(0..len);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    child.chars_mut()[start..end].copy_from_slice(&donor.chars()[start..end]);
}

/// Nudge a single random character by one ordinal step
pub fn mutate<R: Rng>(genome: &mut Genome, bounds: MutationBounds, alphabet: &Alphabet, rng: &mut R) {
    if genome.is_empty() {
        return;
    }

    let idx = rng.gen_range(0..genome.len());
    let delta = *MUTATION_DELTAS.choose(rng).unwrap_or(&0);
    let current = genome.chars()[idx];
    let nudged = current as i64 + delta;

    let next = match bounds {
        MutationBounds::Unclamped => u32::try_from(nudged).ok().and_then(char::from_u32),
        MutationBounds::Clamped => {
            let (min, max) = alphabet.ordinal_range();
            char::from_u32(nudged.clamp(min as i64, max as i64) as u32)
        }
    };

    genome.chars_mut()[idx] = next.unwrap_or(current);
}

/// Produce one child from two parents: crossover, point mutation, then
/// evaluation against `target`. Parents are left untouched.
pub fn reproduce<R: Rng>(
    parent_a: &Candidate,
    parent_b: &Candidate,
    target: &Genome,
    bounds: MutationBounds,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Result<Candidate, SearchError> {
    if parent_a.genome().len() != parent_b.genome().len() {
        return Err(SearchError::LengthMismatch {
            genome: parent_b.genome().len(),
            target: parent_a.genome().len(),
        });
    }

    let mut child = parent_a.genome().clone();
    crossover(&mut child, parent_b.genome(), rng);
    mutate(&mut child, bounds, alphabet, rng);

    Candidate::new(child, target)
}

/// Uniform random pick by index
pub fn pick_random<'a, R: Rng>(population: &'a [Candidate], rng: &mut R) -> &'a Candidate {
    let idx = rng.gen_range(0..population.len());
    &population[idx]
}
