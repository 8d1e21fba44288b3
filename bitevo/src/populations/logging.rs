//! Generation history recording.
//!
//! The history is the engine's sole artifact for presentation
//! collaborators: an append-only, ordered sequence of population
//! snapshots, one per generation, read-only to all consumers.

use super::Population;
use crate::genomics::Chromosome;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A snapshot of one generation: its number, its full member list
/// in enumeration order, and summary fitness statistics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationLog {
    pub generation_number: usize,
    pub members: Vec<(Chromosome, f32)>,
    pub fitness: Stats,
}

impl fmt::Display for GenerationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generation {}: {} members, fitness {:?}",
            self.generation_number,
            self.members.len(),
            self.fitness
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    ///
    /// # Panics
    /// Panics if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use bitevo::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f32>) -> Stats {
        let mut data: Vec<f32> = data.collect();
        assert!(!data.is_empty(), "statistics over an empty sequence");
        data.sort_unstable_by(|a, b| a.partial_cmp(b).expect("uncomparable sample (NaN)"));
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Stats {
            maximum: *data.last().unwrap(),
            minimum: data[0],
            mean: data.iter().sum::<f32>() / data.len() as f32,
            median,
        }
    }
}

/// The history of a run: one [`GenerationLog`] per generation,
/// in the order the generations were produced.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationHistory {
    logs: Vec<GenerationLog>,
}

impl GenerationHistory {
    /// Returns an empty history.
    pub fn new() -> GenerationHistory {
        GenerationHistory { logs: vec![] }
    }

    /// Appends a snapshot of the population's current generation.
    ///
    /// # Examples
    /// ```
    /// use bitevo::logging::GenerationHistory;
    /// use bitevo::{
    ///     GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig,
    ///     SegmentTable, TraitPair,
    /// };
    /// use std::num::NonZeroUsize;
    ///
    /// let table = SegmentTable::new(
    ///     3,
    ///     (0..8).map(|v| TraitPair::new(2.0 * v as f32, 0.5 * v as f32)).collect(),
    /// )
    /// .unwrap();
    /// let genetic_config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    /// let population_config = PopulationConfig {
    ///     size: NonZeroUsize::new(8).unwrap(),
    ///     identical_offspring: IdenticalOffspringPolicy::Retry,
    /// };
    /// let mut population =
    ///     Population::with_seed(population_config, genetic_config, 42).unwrap();
    ///
    /// let mut history = GenerationHistory::new();
    /// history.record(&population);
    /// population.evolve().unwrap();
    /// history.record(&population);
    ///
    /// assert_eq!(history.len(), 2);
    /// assert_eq!(history.get(1).unwrap().generation_number, 1);
    /// ```
    pub fn record(&mut self, population: &Population) {
        self.logs.push(GenerationLog {
            generation_number: population.generation(),
            members: population
                .members()
                .map(|(chromosome, fitness)| (chromosome.clone(), fitness))
                .collect(),
            fitness: Stats::from(population.members().map(|(_, fitness)| fitness)),
        });
    }

    /// Iterates over all recorded snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GenerationLog> {
        self.logs.iter()
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Returns the snapshot at `index`, if recorded.
    pub fn get(&self, index: usize) -> Option<&GenerationLog> {
        self.logs.get(index)
    }

    /// Returns the most recent snapshot, if any.
    pub fn last(&self) -> Option<&GenerationLog> {
        self.logs.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_over_odd_sample_count() {
        let stats = Stats::from([3.0, 1.0, 2.0].iter().copied());
        assert_eq!(stats.maximum, 3.0);
        assert_eq!(stats.minimum, 1.0);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn stats_over_even_sample_count() {
        let stats = Stats::from([4.0, 1.0, 3.0, 2.0].iter().copied());
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
    }
}
