//! Hello Genetic
//!
//! Evolves a random population of strings until one of them spells the
//! target exactly.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use hello_genetic::config::Config;
use hello_genetic::constants;
use hello_genetic::genetic::MutationBounds;
use hello_genetic::searcher::{
    format_candidate_line, format_outcome_report, GeneticSearcher, RunStatus, SearchState,
};
use hello_genetic::{SearchError, SearchOutcome};

#[derive(Parser, Debug)]
#[command(name = "hello-genetic")]
#[command(about = "Evolve a string toward a target with an elitist genetic search")]
struct Args {
    /// Path to config file
    #[arg(short = 'c', long, default_value = "hello_genetic.toml")]
    config: String,

    /// Target string (overrides config)
    #[arg(short = 't', long)]
    target: Option<String>,

    /// Population size (overrides config)
    #[arg(short = 'p', long)]
    population: Option<usize>,

    /// RNG seed (overrides config)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Maximum generations (overrides config)
    #[arg(short = 'g', long)]
    max_generations: Option<usize>,

    /// Characters for the initial population (overrides config)
    #[arg(long)]
    alphabet: Option<String>,

    /// Whether mutated characters are clamped to the alphabet's ordinal range (overrides config)
    #[arg(short = 'm', long, value_enum)]
    mutation_bounds: Option<MutationBounds>,

    /// Directory to write the per-generation history to (overrides config)
    #[arg(short = 'o', long)]
    output_dir: Option<String>,

    /// Print every generation
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    // Load config, CLI args override
    let config = Config::load(&args.config);
    let mut ga_config = config.ga_config();

    if let Some(target) = args.target {
        ga_config.target = target;
    }
    if let Some(population) = args.population {
        ga_config.population_size = population;
    }
    if let Some(alphabet) = args.alphabet {
        ga_config.alphabet = alphabet;
    }
    if args.max_generations.is_some() {
        ga_config.max_generations = args.max_generations;
    }
    if let Some(bounds) = args.mutation_bounds {
        ga_config.mutation_bounds = bounds;
    }
    let seed = args.seed.or(config.search.seed).unwrap_or(constants::DEFAULT_SEED);
    let output_dir = args.output_dir.or(config.output.history_dir);

    println!("═══════════════════════════════════════════════════════════════");
    println!("  HELLO GENETIC");
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Target:          {:?}", ga_config.target);
    println!("  Population size: {}", ga_config.population_size);
    println!("  Mutation bounds: {:?}", ga_config.mutation_bounds);
    match ga_config.max_generations {
        Some(max) => println!("  Max generations: {}", max),
        None => println!("  Max generations: unlimited"),
    }
    println!("  Seed:            {}", seed);
    println!();

    let mut searcher = match GeneticSearcher::new(ga_config, Some(seed)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let interrupt_flag = Arc::new(AtomicBool::new(false));
    setup_interrupt_handler(interrupt_flag.clone());

    let start = Instant::now();
    let result = if args.verbose {
        run_verbose(&mut searcher, &interrupt_flag)
    } else {
        searcher.run_until(Some(&interrupt_flag))
    };

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  FINAL REPORT");
    println!("═══════════════════════════════════════════════════════════════");
    print!("{}", format_outcome_report(&outcome));
    println!("Elapsed:    {:.2?}", start.elapsed());

    if let Some(dir) = output_dir {
        match searcher.save_history(&dir) {
            Ok(path) => println!("History:    {}", path),
            Err(e) => eprintln!("Warning: Failed to save history: {}", e),
        }
    }

    if outcome.status != RunStatus::Converged {
        std::process::exit(1);
    }
}

/// Step manually so every generation's best can be printed
fn run_verbose(
    searcher: &mut GeneticSearcher,
    interrupt_flag: &AtomicBool,
) -> Result<SearchOutcome, SearchError> {
    let max = searcher.config.max_generations;

    while searcher.state() == SearchState::Running {
        if interrupt_flag.load(Ordering::SeqCst) || max.is_some_and(|m| searcher.generation() >= m) {
            break;
        }
        let report = searcher.step()?;
        println!(
            "Gen {:8} | child:{:>8} {} | {}",
            report.generation,
            report.child_fitness.unwrap_or_default(),
            if report.accepted { "+" } else { " " },
            format_candidate_line(searcher.best())
        );
    }

    searcher.run_until(Some(interrupt_flag))
}

fn setup_interrupt_handler(interrupt_flag: Arc<AtomicBool>) {
    let interrupt_count = Arc::new(AtomicUsize::new(0));
    let ic = interrupt_count.clone();

    let result = ctrlc::set_handler(move || {
        let count = ic.fetch_add(1, Ordering::SeqCst);
        interrupt_flag.store(true, Ordering::SeqCst);
        if count == 0 {
            eprintln!("\nInterrupt received, stopping after current generation...");
        } else {
            eprintln!("\nForce quit.");
            std::process::exit(1);
        }
    });

    if let Err(e) = result {
        log::warn!("Failed to set Ctrl-C handler: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_bounds_flag_both_ways() {
        let args = Args::try_parse_from(["hello-genetic", "--mutation-bounds", "unclamped"]).unwrap();
        assert_eq!(args.mutation_bounds, Some(MutationBounds::Unclamped));

        let args = Args::try_parse_from(["hello-genetic", "-m", "clamped"]).unwrap();
        assert_eq!(args.mutation_bounds, Some(MutationBounds::Clamped));

        let args = Args::try_parse_from(["hello-genetic"]).unwrap();
        assert_eq!(args.mutation_bounds, None);

        assert!(Args::try_parse_from(["hello-genetic", "--mutation-bounds", "wrap"]).is_err());
    }

    #[test]
    fn test_flag_overrides_clamped_config() {
        let config = Config::parse("[search]\nmutation_bounds = \"clamped\"\n").unwrap();
        let args = Args::try_parse_from(["hello-genetic", "--mutation-bounds", "unclamped"]).unwrap();

        let mut ga_config = config.ga_config();
        assert_eq!(ga_config.mutation_bounds, MutationBounds::Clamped);
        if let Some(bounds) = args.mutation_bounds {
            ga_config.mutation_bounds = bounds;
        }
        assert_eq!(ga_config.mutation_bounds, MutationBounds::Unclamped);
    }
}
