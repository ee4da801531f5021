//! Character sets used to seed genomes and bound mutation.

use crate::error::SearchError;
use crate::fitness::Genome;
use rand::Rng;

/// Set of characters a run draws its initial genomes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `s`, dropping duplicates
    /// but keeping first-seen order.
    pub fn new(s: &str) -> Result<Self, SearchError> {
        let mut chars: Vec<char> = Vec::with_capacity(s.len());
        for c in s.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }

        if chars.is_empty() {
            return Err(SearchError::EmptyAlphabet);
        }

        Ok(Self { chars })
    }

    /// Characters in first-seen order; never empty
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Smallest and largest ordinal in the alphabet
    pub fn ordinal_range(&self) -> (u32, u32) {
        let min = self.chars.iter().map(|&c| c as u32).min().unwrap_or(0);
        let max = self.chars.iter().map(|&c| c as u32).max().unwrap_or(0);
        (min, max)
    }

    /// Whether `c` falls inside the alphabet's ordinal range
    pub fn spans(&self, c: char) -> bool {
        let (min, max) = self.ordinal_range();
        (min..=max).contains(&(c as u32))
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> char {
        self.chars[rng.gen_range(0..self.chars.len())]
    }

    /// Random genome of `len` characters drawn uniformly from the alphabet
    pub fn random_genome<R: Rng>(&self, len: usize, rng: &mut R) -> Genome {
        Genome::from_chars((0..len).map(|_| self.sample(rng)).collect())
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        // DEFAULT_ALPHABET is non-empty
        Self {
            chars: crate::constants::DEFAULT_ALPHABET.chars().collect(),
        }
    }
}
