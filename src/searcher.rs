//! Elitist string-evolution search.
//!
//! Each generation sorts the population, records the current best, breeds a
//! single child from two randomly drawn parents and lets it replace the worst
//! member only when it is strictly fitter. The run ends once the best member
//! matches the target exactly.

use crate::alphabet::Alphabet;
use crate::constants;
use crate::error::SearchError;
use crate::fitness::{Candidate, Genome};
use crate::genetic::{pick_random, reproduce, MutationBounds};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Configuration for the string search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    pub target: String,
    pub population_size: usize,
    pub alphabet: String,
    pub mutation_bounds: MutationBounds,
    /// Safety cap. The reference loop has none and runs until convergence.
    pub max_generations: Option<usize>,
    /// Generations between progress log lines (0 disables them)
    pub progress_interval: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            target: constants::DEFAULT_TARGET.to_string(),
            population_size: constants::DEFAULT_POPULATION_SIZE,
            alphabet: constants::DEFAULT_ALPHABET.to_string(),
            mutation_bounds: MutationBounds::default(),
            max_generations: None,
            progress_interval: constants::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Fixed-size set of candidates, best first after [`Population::sort`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    /// Random population of `size` genomes drawn from `alphabet`
    pub fn random<R: Rng>(
        target: &Genome,
        size: usize,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Result<Self, SearchError> {
        if size == 0 {
            return Err(SearchError::EmptyPopulation);
        }

        let candidates = (0..size)
            .map(|_| Candidate::new(alphabet.random_genome(target.len(), rng), target))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { candidates })
    }

    /// Population from explicit candidates; all genomes must share one length
    pub fn from_candidates(candidates: Vec<Candidate>) -> Result<Self, SearchError> {
        let first_len = match candidates.first() {
            Some(c) => c.genome().len(),
            None => return Err(SearchError::EmptyPopulation),
        };

        if let Some(bad) = candidates.iter().find(|c| c.genome().len() != first_len) {
            return Err(SearchError::LengthMismatch {
                genome: bad.genome().len(),
                target: first_len,
            });
        }

        Ok(Self { candidates })
    }

    /// Stable sort by fitness, ascending
    pub fn sort(&mut self) {
        self.candidates.sort_by_key(|c| c.fitness());
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Head of the population. Only the best member right after
    /// [`Population::sort`]; use [`Population::fittest`] otherwise.
    pub fn best(&self) -> &Candidate {
        &self.candidates[0]
    }

    /// Tail of the population, the worst member after a sort
    pub fn worst(&self) -> &Candidate {
        &self.candidates[self.candidates.len() - 1]
    }

    /// Lowest-fitness member regardless of order; ties go to the earliest
    pub fn fittest(&self) -> &Candidate {
        self.candidates
            .iter()
            .min_by_key(|c| c.fitness())
            .unwrap_or(&self.candidates[0])
    }

    /// Replace the worst member with `child` if the child is strictly
    /// fitter. Returns whether it was inserted.
    ///
    /// Expects the population to be sorted; the child lands in the last
    /// slot and is not moved until the next sort.
    pub fn offer(&mut self, child: Candidate) -> bool {
        debug_assert!(
            self.candidates.windows(2).all(|w| w[0].fitness() <= w[1].fitness()),
            "offer called on an unsorted population"
        );
        if child.fitness() < self.worst().fitness() {
            let last = self.candidates.len() - 1;
            self.candidates[last] = child;
            true
        } else {
            false
        }
    }
}

/// Best candidate of one generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub generation: usize,
    pub fitness: u64,
    pub genome: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    Running,
    Converged,
}

/// What happened during one call to [`GeneticSearcher::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub generation: usize,
    pub best_fitness: u64,
    /// `None` when the step was skipped because the run had already converged
    pub child_fitness: Option<u64>,
    pub accepted: bool,
    pub state: SearchState,
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Converged,
    /// Generation cap reached first
    Exhausted,
    Interrupted,
}

/// Result of [`GeneticSearcher::run`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub status: RunStatus,
    pub generation: usize,
    pub best_genome: String,
    pub best_fitness: u64,
}

/// Run one generation over explicitly passed state.
///
/// Returns the report for this generation; the caller owns the counter and
/// advances it when the returned state is still `Running`.
pub fn evolve_generation<R: Rng>(
    population: &mut Population,
    history: &mut Vec<HistoryEntry>,
    generation: usize,
    target: &Genome,
    bounds: MutationBounds,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Result<StepReport, SearchError> {
    population.sort();

    let best = population.best();
    history.push(HistoryEntry {
        generation,
        fitness: best.fitness(),
        genome: best.genome().to_string(),
    });

    let parent_a = pick_random(population.as_slice(), rng);
    let parent_b = pick_random(population.as_slice(), rng);
    let child = reproduce(parent_a, parent_b, target, bounds, alphabet, rng)?;
    let child_fitness = child.fitness();

    let accepted = population.offer(child);
    if accepted {
        log::trace!("gen {}: child fitness {} replaced worst", generation, child_fitness);
    }

    // termination reads the sorted head, not a child just placed in the tail
    let best_fitness = population.best().fitness();
    let state = if best_fitness == 0 {
        SearchState::Converged
    } else {
        SearchState::Running
    };

    Ok(StepReport {
        generation,
        best_fitness,
        child_fitness: Some(child_fitness),
        accepted,
        state,
    })
}

/// The string-evolution searcher
pub struct GeneticSearcher {
    pub config: GaConfig,
    target: Genome,
    alphabet: Alphabet,
    population: Population,
    generation: usize,
    history: Vec<HistoryEntry>,
    state: SearchState,
    total_evaluated: u64,
    seed: u64,
    rng: StdRng,
}

impl GeneticSearcher {
    /// Create a searcher with a random initial population.
    /// If seed is None a fresh one is drawn; it is logged and kept so the run
    /// can be reproduced.
    pub fn new(config: GaConfig, seed: Option<u64>) -> Result<Self, SearchError> {
        let target = Genome::from(config.target.as_str());
        if target.is_empty() {
            return Err(SearchError::EmptyTarget);
        }
        if config.population_size == 0 {
            return Err(SearchError::EmptyPopulation);
        }

        let alphabet = Alphabet::new(&config.alphabet)?;
        if config.mutation_bounds == MutationBounds::Clamped {
            if let Some(&ch) = target.chars().iter().find(|&&c| !alphabet.spans(c)) {
                return Err(SearchError::TargetOutsideAlphabet { ch });
            }
        }

        let seed = seed.unwrap_or_else(rand::random);
        log::info!("Using seed: {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let population = Population::random(&target, config.population_size, &alphabet, &mut rng)?;
        let total_evaluated = config.population_size as u64;

        Ok(Self {
            config,
            target,
            alphabet,
            population,
            generation: 0,
            history: Vec::new(),
            state: SearchState::Running,
            total_evaluated,
            seed,
            rng,
        })
    }

    /// Run one generation. A converged searcher is left unchanged.
    pub fn step(&mut self) -> Result<StepReport, SearchError> {
        if self.state == SearchState::Converged {
            return Ok(StepReport {
                generation: self.generation,
                best_fitness: self.population.best().fitness(),
                child_fitness: None,
                accepted: false,
                state: SearchState::Converged,
            });
        }

        let report = evolve_generation(
            &mut self.population,
            &mut self.history,
            self.generation,
            &self.target,
            self.config.mutation_bounds,
            &self.alphabet,
            &mut self.rng,
        )?;
        self.total_evaluated += 1;
        self.state = report.state;

        if self.state == SearchState::Running {
            self.generation += 1;
        }

        Ok(report)
    }

    /// Step until convergence or the generation cap
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        self.run_until(None)
    }

    /// Like [`run`](Self::run), also stopping once `interrupt` is set
    pub fn run_until(&mut self, interrupt: Option<&AtomicBool>) -> Result<SearchOutcome, SearchError> {
        let interval = self.config.progress_interval;

        loop {
            if self.state == SearchState::Converged {
                log::info!(
                    "Converged at generation {} on {:?}",
                    self.generation,
                    self.best().genome().to_string()
                );
                return Ok(self.outcome(RunStatus::Converged));
            }

            if let Some(max) = self.config.max_generations {
                if self.generation >= max {
                    log::warn!("Generation cap {} reached without converging", max);
                    return Ok(self.outcome(RunStatus::Exhausted));
                }
            }

            if interrupt.map(|flag| flag.load(Ordering::SeqCst)).unwrap_or(false) {
                log::warn!("Interrupted at generation {}", self.generation);
                return Ok(self.outcome(RunStatus::Interrupted));
            }

            let report = self.step()?;

            if interval > 0 && report.generation % interval == 0 {
                log::info!("Gen {:8} | {}", report.generation, format_candidate_line(self.best()));
            }
        }
    }

    fn outcome(&self, status: RunStatus) -> SearchOutcome {
        let best = self.population.fittest();
        SearchOutcome {
            status,
            generation: self.generation,
            best_genome: best.genome().to_string(),
            best_fitness: best.fitness(),
        }
    }

    /// Current best candidate, whatever order the population is in
    pub fn best(&self) -> &Candidate {
        self.population.fittest()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Best fitness of every recorded generation, for charting
    pub fn fitness_series(&self) -> Vec<u64> {
        self.history.iter().map(|h| h.fitness).collect()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn target(&self) -> &Genome {
        &self.target
    }

    pub fn total_evaluated(&self) -> u64 {
        self.total_evaluated
    }

    /// Save the history to a timestamped JSON file in `dir`
    pub fn save_history(&self, dir: &str) -> Result<String, Box<dyn std::error::Error>> {
        use std::io::Write;

        std::fs::create_dir_all(dir)?;
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}/history_{}.json", dir, timestamp);

        #[derive(Serialize)]
        struct SavedHistory<'a> {
            target: &'a str,
            seed: u64,
            generation: usize,
            state: SearchState,
            total_evaluated: u64,
            history: &'a [HistoryEntry],
        }

        let saved = SavedHistory {
            target: &self.config.target,
            seed: self.seed,
            generation: self.generation,
            state: self.state,
            total_evaluated: self.total_evaluated,
            history: &self.history,
        };

        let json = serde_json::to_string_pretty(&saved)?;
        let mut file = std::fs::File::create(&filename)?;
        file.write_all(json.as_bytes())?;

        Ok(filename)
    }
}

/// Compact single-line summary
pub fn format_candidate_line(candidate: &Candidate) -> String {
    format!("fit:{:>8} | {:?}", candidate.fitness(), candidate.genome().to_string())
}

/// Final report for a finished run
pub fn format_outcome_report(outcome: &SearchOutcome) -> String {
    let mut report = String::new();

    let status = match outcome.status {
        RunStatus::Converged => "CONVERGED",
        RunStatus::Exhausted => "GENERATION CAP REACHED",
        RunStatus::Interrupted => "INTERRUPTED",
    };

    report.push_str(&format!("Status:     {}\n", status));
    report.push_str(&format!("Generation: {}\n", outcome.generation));
    report.push_str(&format!("Best:       {:?}\n", outcome.best_genome));
    report.push_str(&format!("Fitness:    {}\n", outcome.best_fitness));

    report
}
