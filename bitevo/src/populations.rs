//! A population is a fixed-size collection of distinct chromosomes
//! paired with their fitness scores. It is evolved one whole
//! generation at a time: fitness-proportionate selection picks
//! parents, crossover and mutation produce their offspring, and the
//! offspring replace the previous generation entirely.

mod config;
mod errors;
pub mod logging;
mod selection;

use crate::genomics::{Chromosome, GeneticConfig};
pub use config::{IdenticalOffspringPolicy, PopulationConfig};
pub use errors::{EvolutionError, PopulationConfigError};
use logging::GenerationHistory;

use ahash::RandomState;
use rand::prelude::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// A population of chromosomes under selective pressure.
///
/// Members are kept as an explicit, stable, ordered sequence of
/// `(chromosome, fitness)` pairs, rebuilt once per generation, so
/// selection order never depends on any container's iteration
/// semantics. Members are distinct by construction: duplicate
/// offspring collapse onto the existing member.
///
/// The population owns its random source. [`Population::new`] seeds
/// it from entropy; [`Population::with_seed`] makes a run
/// reproducible, and several independently seeded populations can
/// coexist in one process.
#[derive(Clone, Debug)]
pub struct Population {
    members: Vec<(Chromosome, f32)>,
    generation: usize,
    population_config: PopulationConfig,
    genetic_config: GeneticConfig,
    rng: StdRng,
}

impl Population {
    /// Creates a randomized initial population, drawing random
    /// chromosomes (duplicates collapse) until the configured number
    /// of distinct members is reached, each scored on insertion.
    ///
    /// # Errors
    /// Returns an error if the configured size is odd, below 2, or
    /// larger than the number of distinct chromosomes the segments
    /// can encode.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{
    ///     GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig,
    ///     SegmentTable, TraitPair,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// # let table = SegmentTable::new(
    /// #     3,
    /// #     (0..8).map(|v| TraitPair::new(2.0 * v as f32, 0.5 * v as f32)).collect(),
    /// # ).unwrap();
    /// # let genetic_config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    /// let population_config = PopulationConfig {
    ///     size: NonZeroUsize::new(16).unwrap(),
    ///     identical_offspring: IdenticalOffspringPolicy::Abort,
    /// };
    ///
    /// // With `genetic_config` a valid `GeneticConfig`...
    /// let population = Population::new(population_config, genetic_config).unwrap();
    /// assert_eq!(population.size(), 16);
    /// assert_eq!(population.generation(), 0);
    /// ```
    pub fn new(
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
    ) -> Result<Population, PopulationConfigError> {
        Self::with_rng(population_config, genetic_config, StdRng::from_entropy())
    }

    /// Creates a randomized initial population whose whole run is
    /// reproducible from `seed`.
    ///
    /// # Errors
    /// Same as [`Population::new`].
    ///
    /// # Examples
    /// ```
    /// use bitevo::{
    ///     GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig,
    ///     SegmentTable, TraitPair,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// # let table = SegmentTable::new(
    /// #     3,
    /// #     (0..8).map(|v| TraitPair::new(2.0 * v as f32, 0.5 * v as f32)).collect(),
    /// # ).unwrap();
    /// # let genetic_config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    /// let population_config = PopulationConfig {
    ///     size: NonZeroUsize::new(16).unwrap(),
    ///     identical_offspring: IdenticalOffspringPolicy::Abort,
    /// };
    ///
    /// let first = Population::with_seed(
    ///     population_config.clone(),
    ///     genetic_config.clone(),
    ///     42,
    /// )
    /// .unwrap();
    /// let second = Population::with_seed(population_config, genetic_config, 42).unwrap();
    ///
    /// let equal = first
    ///     .members()
    ///     .zip(second.members())
    ///     .all(|(a, b)| a == b);
    /// assert!(equal);
    /// ```
    pub fn with_seed(
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
        seed: u64,
    ) -> Result<Population, PopulationConfigError> {
        Self::with_rng(
            population_config,
            genetic_config,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
        mut rng: StdRng,
    ) -> Result<Population, PopulationConfigError> {
        let size = population_config.size.get();
        if size < 2 {
            return Err(PopulationConfigError::SizeTooSmall(size));
        }
        if size % 2 != 0 {
            return Err(PopulationConfigError::SizeNotEven(size));
        }
        let capacity = 1usize
            .checked_shl(genetic_config.chromosome_length() as u32)
            .unwrap_or(usize::MAX);
        if size > capacity {
            return Err(PopulationConfigError::SizeExceedsSearchSpace { size, capacity });
        }

        let mut members = Vec::with_capacity(size);
        let mut seen = HashSet::with_capacity_and_hasher(size, RandomState::new());
        while members.len() < size {
            let chromosome = Chromosome::random(&genetic_config, &mut rng);
            if seen.insert(chromosome.clone()) {
                let fitness = genetic_config.evaluate(&chromosome);
                members.push((chromosome, fitness));
            }
        }

        Ok(Population {
            members,
            generation: 0,
            population_config,
            genetic_config,
            rng,
        })
    }

    /// Evolves the population one generation: repeatedly selects two
    /// distinct parents by roulette wheel, produces two offspring by
    /// crossover and mutation, and inserts them into the next
    /// generation (duplicates collapse) until it reaches the
    /// configured size. The previous generation is then discarded
    /// wholesale.
    ///
    /// # Errors
    /// Returns [`EvolutionError::IdenticalOffspring`] if a mating
    /// produces two identical children and the population's policy
    /// is [`IdenticalOffspringPolicy::Abort`]. Under
    /// [`IdenticalOffspringPolicy::Retry`] this function never
    /// fails.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{
    ///     GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig,
    ///     SegmentTable, TraitPair,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// # let table = SegmentTable::new(
    /// #     3,
    /// #     (0..8).map(|v| TraitPair::new(2.0 * v as f32, 0.5 * v as f32)).collect(),
    /// # ).unwrap();
    /// # let genetic_config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    /// let population_config = PopulationConfig {
    ///     size: NonZeroUsize::new(16).unwrap(),
    ///     identical_offspring: IdenticalOffspringPolicy::Retry,
    /// };
    /// let mut population =
    ///     Population::with_seed(population_config, genetic_config, 42).unwrap();
    ///
    /// population.evolve().unwrap();
    /// assert_eq!(population.generation(), 1);
    /// assert_eq!(population.size(), 16);
    /// ```
    pub fn evolve(&mut self) -> Result<(), EvolutionError> {
        let size = self.population_config.size.get();
        let mut members = Vec::with_capacity(size);
        let mut seen = HashSet::with_capacity_and_hasher(size, RandomState::new());

        while members.len() < size {
            let (parent1, parent2) = self.distinct_parents();
            let (child1, child2) = self.mate(&parent1, &parent2)?;
            for child in [child1, child2] {
                if members.len() == size {
                    break;
                }
                if seen.insert(child.clone()) {
                    let fitness = self.genetic_config.evaluate(&child);
                    members.push((child, fitness));
                }
            }
        }

        self.members = members;
        self.generation += 1;
        Ok(())
    }

    /// Runs the generation loop: `generations` times, snapshots the
    /// current population into the history, then evolves. The
    /// returned history holds exactly `generations` snapshots; no
    /// convergence detection is performed.
    ///
    /// # Errors
    /// Propagates the first [`EvolutionError`]; the partial history
    /// is dropped. Populations with the
    /// [`IdenticalOffspringPolicy::Retry`] policy never fail.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{
    ///     GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig,
    ///     SegmentTable, TraitPair,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// # let table = SegmentTable::new(
    /// #     3,
    /// #     (0..8).map(|v| TraitPair::new(2.0 * v as f32, 0.5 * v as f32)).collect(),
    /// # ).unwrap();
    /// # let genetic_config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    /// let population_config = PopulationConfig {
    ///     size: NonZeroUsize::new(16).unwrap(),
    ///     identical_offspring: IdenticalOffspringPolicy::Retry,
    /// };
    /// let mut population =
    ///     Population::with_seed(population_config, genetic_config, 42).unwrap();
    ///
    /// let history = population.run(10).unwrap();
    /// assert_eq!(history.len(), 10);
    /// assert!(history.iter().all(|log| log.members.len() == 16));
    /// ```
    pub fn run(&mut self, generations: usize) -> Result<GenerationHistory, EvolutionError> {
        let mut history = GenerationHistory::new();
        for _ in 0..generations {
            history.record(self);
            self.evolve()?;
        }
        Ok(history)
    }

    /// Draws one member by roulette wheel: each member's fitness is
    /// its slice of the wheel, so the chance of being drawn is
    /// proportional to fitness. Selection is with replacement.
    ///
    /// If every member's fitness is zero the wheel has no weight
    /// anywhere, and the first member in enumeration order is
    /// returned deterministically.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{
    ///     GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig,
    ///     SegmentTable, TraitPair,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// # let table = SegmentTable::new(
    /// #     3,
    /// #     (0..8).map(|v| TraitPair::new(2.0 * v as f32, 0.5 * v as f32)).collect(),
    /// # ).unwrap();
    /// # let genetic_config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    /// let population_config = PopulationConfig {
    ///     size: NonZeroUsize::new(16).unwrap(),
    ///     identical_offspring: IdenticalOffspringPolicy::Abort,
    /// };
    /// let mut population =
    ///     Population::with_seed(population_config, genetic_config, 42).unwrap();
    ///
    /// let parent = population.select();
    /// assert_eq!(parent.len(), 6);
    /// ```
    pub fn select(&mut self) -> Chromosome {
        let index = selection::roulette_spin(&self.members, &mut self.rng);
        self.members[index].0.clone()
    }

    /// Draws two distinct parents for one mating: the first by
    /// roulette wheel, the second re-drawn until it differs from the
    /// first. When fewer than two members carry positive fitness the
    /// wheel is deterministic and re-drawing could never terminate,
    /// so the mate is drawn uniformly from the remaining members
    /// instead.
    fn distinct_parents(&mut self) -> (Chromosome, Chromosome) {
        let positive = self
            .members
            .iter()
            .filter(|(_, fitness)| *fitness > 0.0)
            .count();
        let first = selection::roulette_spin(&self.members, &mut self.rng);
        let second = if positive >= 2 {
            loop {
                let second = selection::roulette_spin(&self.members, &mut self.rng);
                if second != first {
                    break second;
                }
            }
        } else {
            let mut second = self.rng.gen_range(0..self.members.len() - 1);
            if second >= first {
                second += 1;
            }
            second
        };
        (
            self.members[first].0.clone(),
            self.members[second].0.clone(),
        )
    }

    /// Produces two offspring from one mating: a single-point
    /// crossover of the parents, then independent per-symbol
    /// mutation of each child. The mutated sequences are the ones
    /// returned. Identical children are handled per the population's
    /// [`IdenticalOffspringPolicy`].
    fn mate(
        &mut self,
        parent1: &Chromosome,
        parent2: &Chromosome,
    ) -> Result<(Chromosome, Chromosome), EvolutionError> {
        let mutation_rate = self.genetic_config.mutation_rate();
        loop {
            let (child1, child2) = Chromosome::crossover(parent1, parent2, &mut self.rng);
            let child1 = child1.mutated(mutation_rate, &mut self.rng);
            let child2 = child2.mutated(mutation_rate, &mut self.rng);
            if child1 != child2 {
                return Ok((child1, child2));
            }
            match self.population_config.identical_offspring {
                IdenticalOffspringPolicy::Abort => {
                    return Err(EvolutionError::IdenticalOffspring {
                        generation: self.generation,
                    })
                }
                IdenticalOffspringPolicy::Retry => continue,
            }
        }
    }

    /// Iterates over the current generation's members in their
    /// stable enumeration order.
    pub fn members(&self) -> impl Iterator<Item = (&Chromosome, f32)> {
        self.members
            .iter()
            .map(|(chromosome, fitness)| (chromosome, *fitness))
    }

    /// Number of distinct members; constant across all generations.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Number of completed generation transitions.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Sum of all members' fitness scores.
    pub fn total_fitness(&self) -> f32 {
        self.members.iter().map(|(_, fitness)| fitness).sum()
    }

    /// Returns the currently best-performing member.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{
    ///     GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig,
    ///     SegmentTable, TraitPair,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// # let table = SegmentTable::new(
    /// #     3,
    /// #     (0..8).map(|v| TraitPair::new(2.0 * v as f32, 0.5 * v as f32)).collect(),
    /// # ).unwrap();
    /// # let genetic_config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    /// let population_config = PopulationConfig {
    ///     size: NonZeroUsize::new(16).unwrap(),
    ///     identical_offspring: IdenticalOffspringPolicy::Abort,
    /// };
    /// let population = Population::new(population_config, genetic_config).unwrap();
    ///
    /// let (_, best) = population.champion();
    /// assert!(population.members().all(|(_, fitness)| fitness <= best));
    /// ```
    pub fn champion(&self) -> (&Chromosome, f32) {
        let (chromosome, fitness) = self
            .members
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.partial_cmp(b)
                    .unwrap_or_else(|| panic!("invalid fitness detected (NaN)"))
            })
            .expect("empty population has no champion");
        (chromosome, *fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::{SegmentTable, TraitPair};
    use std::num::NonZeroUsize;

    fn motor_table() -> SegmentTable {
        SegmentTable::new(
            3,
            vec![
                TraitPair::new(2.0, 3.0),
                TraitPair::new(4.0, 3.5),
                TraitPair::new(6.0, 4.0),
                TraitPair::new(7.0, 5.0),
                TraitPair::new(8.0, 4.5),
                TraitPair::new(10.0, 5.0),
                TraitPair::new(12.0, 6.0),
                TraitPair::new(14.0, 7.5),
            ],
        )
        .unwrap()
    }

    fn battery_table() -> SegmentTable {
        SegmentTable::new(
            3,
            vec![
                TraitPair::new(3.0, 5.0),
                TraitPair::new(6.0, 6.5),
                TraitPair::new(9.0, 7.0),
                TraitPair::new(10.0, 7.0),
                TraitPair::new(12.0, 7.5),
                TraitPair::new(15.0, 8.0),
                TraitPair::new(18.0, 10.0),
                TraitPair::new(21.0, 12.5),
            ],
        )
        .unwrap()
    }

    fn powertrain_population(seed: u64) -> Population {
        let genetic_config =
            GeneticConfig::new(vec![motor_table(), battery_table()], 0.02).unwrap();
        let population_config = PopulationConfig {
            size: NonZeroUsize::new(16).unwrap(),
            identical_offspring: IdenticalOffspringPolicy::Retry,
        };
        Population::with_seed(population_config, genetic_config, seed).unwrap()
    }

    fn assert_members_distinct(population: &Population) {
        let mut seen = HashSet::with_hasher(RandomState::new());
        for (chromosome, _) in population.members() {
            assert!(seen.insert(chromosome.clone()), "duplicate {}", chromosome);
        }
    }

    #[test]
    fn initial_population_has_exactly_the_configured_distinct_size() {
        for seed in 0..10 {
            let population = powertrain_population(seed);
            assert_eq!(population.size(), 16);
            assert_members_distinct(&population);
            assert!(population.members().all(|(_, fitness)| fitness >= 0.0));
        }
    }

    #[test]
    fn evolve_preserves_size_and_distinctness() {
        let mut population = powertrain_population(42);
        for generation in 1..=5 {
            population.evolve().unwrap();
            assert_eq!(population.generation(), generation);
            assert_eq!(population.size(), 16);
            assert_members_distinct(&population);
            assert!(population.members().all(|(_, fitness)| fitness >= 0.0));
        }
    }

    #[test]
    fn run_records_one_snapshot_per_generation() {
        let mut population = powertrain_population(42);
        let history = population.run(10).unwrap();
        assert_eq!(history.len(), 10);
        for (i, log) in history.iter().enumerate() {
            assert_eq!(log.generation_number, i);
            assert_eq!(log.members.len(), 16);
            assert!(log.members.iter().all(|(_, fitness)| *fitness >= 0.0));
            assert!(log.fitness.minimum >= 0.0);
        }
        assert_eq!(population.generation(), 10);
    }

    #[test]
    fn run_of_zero_generations_records_nothing() {
        let mut population = powertrain_population(42);
        let history = population.run(0).unwrap();
        assert!(history.is_empty());
        assert_eq!(population.generation(), 0);
    }

    #[test]
    fn all_zero_fitness_population_still_evolves() {
        // Every trait zeroed: total fitness stays 0 and selection
        // runs entirely on its degenerate fallbacks.
        let zero = SegmentTable::new(2, vec![TraitPair::new(0.0, 0.0); 4]).unwrap();
        let genetic_config = GeneticConfig::new(vec![zero.clone(), zero], 0.5).unwrap();
        let population_config = PopulationConfig {
            size: NonZeroUsize::new(4).unwrap(),
            identical_offspring: IdenticalOffspringPolicy::Retry,
        };
        let mut population =
            Population::with_seed(population_config, genetic_config, 42).unwrap();

        assert_eq!(population.total_fitness(), 0.0);
        for _ in 0..5 {
            population.evolve().unwrap();
            assert_eq!(population.size(), 4);
            assert_members_distinct(&population);
        }
    }

    #[test]
    fn odd_population_size_is_rejected() {
        let genetic_config =
            GeneticConfig::new(vec![motor_table(), battery_table()], 0.02).unwrap();
        let population_config = PopulationConfig {
            size: NonZeroUsize::new(15).unwrap(),
            identical_offspring: IdenticalOffspringPolicy::Abort,
        };
        assert_eq!(
            Population::new(population_config, genetic_config).unwrap_err(),
            PopulationConfigError::SizeNotEven(15)
        );
    }

    #[test]
    fn population_of_one_is_rejected() {
        let genetic_config =
            GeneticConfig::new(vec![motor_table(), battery_table()], 0.02).unwrap();
        let population_config = PopulationConfig {
            size: NonZeroUsize::new(1).unwrap(),
            identical_offspring: IdenticalOffspringPolicy::Abort,
        };
        assert_eq!(
            Population::new(population_config, genetic_config).unwrap_err(),
            PopulationConfigError::SizeTooSmall(1)
        );
    }

    #[test]
    fn population_larger_than_search_space_is_rejected() {
        // 6 symbols encode 64 distinct chromosomes.
        let genetic_config =
            GeneticConfig::new(vec![motor_table(), battery_table()], 0.02).unwrap();
        let population_config = PopulationConfig {
            size: NonZeroUsize::new(128).unwrap(),
            identical_offspring: IdenticalOffspringPolicy::Abort,
        };
        assert_eq!(
            Population::new(population_config, genetic_config).unwrap_err(),
            PopulationConfigError::SizeExceedsSearchSpace {
                size: 128,
                capacity: 64
            }
        );
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let history1 = powertrain_population(42).run(5).unwrap();
        let history2 = powertrain_population(42).run(5).unwrap();
        for (log1, log2) in history1.iter().zip(history2.iter()) {
            assert_eq!(log1.members, log2.members);
        }
    }

    #[test]
    fn champion_has_the_maximum_fitness() {
        let population = powertrain_population(42);
        let (_, best) = population.champion();
        assert!(population.members().all(|(_, fitness)| fitness <= best));
        assert!(population
            .members()
            .any(|(_, fitness)| fitness == best));
    }

    #[test]
    fn history_snapshots_serialize() {
        let mut population = powertrain_population(42);
        let history = population.run(3).unwrap();
        let json = serde_json::to_string(&history).unwrap();
        let restored: GenerationHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), 3);
        assert_eq!(
            restored.get(0).unwrap().members,
            history.get(0).unwrap().members
        );
    }
}
