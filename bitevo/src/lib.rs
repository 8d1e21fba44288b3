//! A minimal generational genetic algorithm over fixed-length
//! bitstring chromosomes.
//!
//! A chromosome is split into contiguous gene segments, and each
//! segment's encoding table maps every value it can take to a pair
//! of trait magnitudes: one beneficial, one costly. Fitness is the
//! sum of benefits minus the sum of costs, clamped at zero.
//! Generations are produced by fitness-proportionate (roulette
//! wheel) selection, single-point crossover and per-symbol
//! mutation, with every generation's snapshot recorded for external
//! reporting.
//!
//! The engine is deliberately small: single-threaded, fully
//! sequential, fixed generation count, no convergence detection.
//! All configuration is explicit, so several independent,
//! reproducibly seeded runs can coexist in one process.
//!
//! # Example usage: evolving a motor + battery powertrain design
//! ```
//! use bitevo::{
//!     GeneticConfig, IdenticalOffspringPolicy, Population, PopulationConfig,
//!     SegmentTable, TraitPair,
//! };
//! use std::num::NonZeroUsize;
//!
//! // Motors are characterised by power and weight.
//! let motors = SegmentTable::new(
//!     3,
//!     vec![
//!         TraitPair::new(2.0, 3.0),
//!         TraitPair::new(4.0, 3.5),
//!         TraitPair::new(6.0, 4.0),
//!         TraitPair::new(7.0, 5.0),
//!         TraitPair::new(8.0, 4.5),
//!         TraitPair::new(10.0, 5.0),
//!         TraitPair::new(12.0, 6.0),
//!         TraitPair::new(14.0, 7.5),
//!     ],
//! )
//! .unwrap();
//!
//! // Batteries are characterised by range and weight.
//! let batteries = SegmentTable::new(
//!     3,
//!     vec![
//!         TraitPair::new(3.0, 5.0),
//!         TraitPair::new(6.0, 6.5),
//!         TraitPair::new(9.0, 7.0),
//!         TraitPair::new(10.0, 7.0),
//!         TraitPair::new(12.0, 7.5),
//!         TraitPair::new(15.0, 8.0),
//!         TraitPair::new(18.0, 10.0),
//!         TraitPair::new(21.0, 12.5),
//!     ],
//! )
//! .unwrap();
//!
//! let genetic_config = GeneticConfig::new(vec![motors, batteries], 0.02).unwrap();
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(16).unwrap(),
//!     identical_offspring: IdenticalOffspringPolicy::Retry,
//! };
//!
//! let mut population =
//!     Population::with_seed(population_config, genetic_config, 42).unwrap();
//! let history = population.run(10).unwrap();
//!
//! assert_eq!(history.len(), 10);
//! for log in history.iter() {
//!     assert_eq!(log.members.len(), 16);
//!     assert!(log.members.iter().all(|(_, fitness)| *fitness >= 0.0));
//! }
//!
//! let (champion, fitness) = population.champion();
//! println!("best design after 10 generations: {} ({})", champion, fitness);
//! ```

mod genomics;
mod populations;

pub use genomics::*;
pub use populations::*;
