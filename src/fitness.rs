//! Fitness evaluation for string genomes.
//!
//! A genome is scored by the squared ordinal distance to the target,
//! summed over every position. Lower is better and 0 means an exact match.

use crate::error::SearchError;
use std::fmt;

/// Fixed-length sequence of characters
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Genome(Vec<char>);

impl Genome {
    pub fn from_chars(chars: Vec<char>) -> Self {
        Self(chars)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub(crate) fn chars_mut(&mut self) -> &mut [char] {
        &mut self.0
    }
}

impl From<&str> for Genome {
    fn from(s: &str) -> Self {
        Self(s.chars().collect())
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Evaluated genome in the population.
///
/// Fields are private: a candidate is built once through [`Candidate::new`]
/// and replaced wholesale, never edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    genome: Genome,
    fitness: u64,
}

impl Candidate {
    pub fn new(genome: Genome, target: &Genome) -> Result<Self, SearchError> {
        let fitness = fitness(&genome, target)?;
        Ok(Self { genome, fitness })
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    pub fn is_perfect(&self) -> bool {
        self.fitness == 0
    }
}

/// Sum of squared ordinal differences between `genome` and `target`.
///
/// Both must have the same length; a mismatch is an error rather than a
/// comparison over the shorter prefix. The sum saturates at `u64::MAX`, so
/// any mismatch still scores above zero.
pub fn fitness(genome: &Genome, target: &Genome) -> Result<u64, SearchError> {
    if genome.len() != target.len() {
        return Err(SearchError::LengthMismatch {
            genome: genome.len(),
            target: target.len(),
        });
    }

    let terms = genome.chars().iter().zip(target.chars()).map(|(&g, &t)| {
        let diff = t as i64 - g as i64;
        (diff * diff) as u64
    });

    Ok(saturating_total(terms))
}

fn saturating_total(terms: impl Iterator<Item = u64>) -> u64 {
    terms.fold(0u64, |acc, term| acc.saturating_add(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_printable<R: Rng>(rng: &mut R, len: usize) -> Genome {
        Genome::from_chars((0..len).map(|_| rng.gen_range(32u8..127) as char).collect())
    }

    #[test]
    fn test_exact_match_is_zero() {
        let target = Genome::from("Hello World!");
        assert_eq!(fitness(&target.clone(), &target), Ok(0));
    }

    #[test]
    fn test_known_value() {
        // 'A'(65) vs 'C'(67) = 4, 'b'(98) vs 'a'(97) = 1
        let genome = Genome::from("Ab");
        let target = Genome::from("Ca");
        assert_eq!(fitness(&genome, &target), Ok(5));
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let genome = Genome::from("Hi");
        let target = Genome::from("Hi!");
        assert_eq!(
            fitness(&genome, &target),
            Err(SearchError::LengthMismatch { genome: 2, target: 3 })
        );
        assert!(Candidate::new(genome, &target).is_err());
    }

    #[test]
    fn test_fitness_properties_random_pairs() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let len = rng.gen_range(1..16);
            let a = random_printable(&mut rng, len);
            let b = random_printable(&mut rng, len);

            let ab = fitness(&a, &b).unwrap();
            let ba = fitness(&b, &a).unwrap();

            assert_eq!(ab, ba, "fitness not symmetric for {} / {}", a, b);
            assert_eq!(ab == 0, a == b, "zero iff equal violated for {} / {}", a, b);
        }
    }

    #[test]
    fn test_single_difference_is_nonzero() {
        let target = Genome::from("Hi!");
        let genome = Genome::from("Hj!");
        assert_eq!(fitness(&genome, &target), Ok(1));
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let max_term = 0x10FFFFu64 * 0x10FFFF;
        assert_eq!(saturating_total([u64::MAX, 1].into_iter()), u64::MAX);
        assert_eq!(saturating_total(std::iter::repeat(max_term).take(20_000_000)), u64::MAX);
        assert_eq!(saturating_total([4, 1].into_iter()), 5);
    }

    #[test]
    fn test_extreme_code_points() {
        let genome = Genome::from("\0\0");
        let target = Genome::from("\u{10FFFF}\u{10FFFF}");
        assert_eq!(fitness(&genome, &target), Ok(2 * 0x10FFFFu64 * 0x10FFFF));
    }

    #[test]
    fn test_candidate_carries_fitness() {
        let target = Genome::from("AB");
        let candidate = Candidate::new(Genome::from("AA"), &target).unwrap();
        assert_eq!(candidate.fitness(), 1);
        assert!(!candidate.is_perfect());
        assert_eq!(candidate.genome().to_string(), "AA");
    }
}
