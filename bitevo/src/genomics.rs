//! Chromosomes are the focus of evolution: fixed-length bitstrings
//! logically divided into contiguous gene segments, each of which
//! encodes one design trait through its segment's encoding table.
//! Chromosomes are immutable once constructed; the genetic operators
//! always produce new ones.

mod config;
mod errors;

pub use config::{GeneticConfig, SegmentTable, TraitPair};
pub use errors::{ConfigError, ParseChromosomeError};

use rand::prelude::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A fixed-length ordered sequence of binary symbols encoding one
/// candidate design.
///
/// Chromosomes parse from and display as `0`/`1` literals:
///
/// # Examples
/// ```
/// use bitevo::Chromosome;
///
/// let chromosome: Chromosome = "010110".parse().unwrap();
/// assert_eq!(chromosome.len(), 6);
/// assert_eq!(chromosome.to_string(), "010110");
///
/// assert!("01x110".parse::<Chromosome>().is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Chromosome {
    bits: Vec<bool>,
}

impl Chromosome {
    /// Assembles a random chromosome by sampling one value per
    /// configured segment, uniformly over each segment's domain.
    ///
    /// # Examples
    /// ```
    /// use bitevo::{Chromosome, GeneticConfig, SegmentTable, TraitPair};
    /// use rand::prelude::*;
    ///
    /// let table = SegmentTable::new(
    ///     2,
    ///     (0..4).map(|v| TraitPair::new(v as f32, 0.0)).collect(),
    /// )
    /// .unwrap();
    /// let config = GeneticConfig::new(vec![table.clone(), table], 0.02).unwrap();
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let chromosome = Chromosome::random(&config, &mut rng);
    /// assert_eq!(chromosome.len(), config.chromosome_length());
    /// ```
    pub fn random<R: Rng>(config: &GeneticConfig, rng: &mut R) -> Chromosome {
        let mut bits = Vec::with_capacity(config.chromosome_length());
        for table in config.segments() {
            let symbol_count = table.symbol_count();
            let segment_value = rng.gen_range(0..1usize << symbol_count);
            for i in (0..symbol_count).rev() {
                bits.push(segment_value >> i & 1 == 1);
            }
        }
        Chromosome { bits }
    }

    /// Number of symbols in the chromosome.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Iterates over the chromosome's symbols, `true` standing for `1`.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Reads the value of the `symbol_count`-symbol segment starting
    /// at `start`, first symbol most significant.
    ///
    /// # Panics
    /// Panics if the segment range falls outside the chromosome.
    ///
    /// # Examples
    /// ```
    /// use bitevo::Chromosome;
    ///
    /// let chromosome: Chromosome = "011011".parse().unwrap();
    /// assert_eq!(chromosome.segment_value(0, 3), 0b011);
    /// assert_eq!(chromosome.segment_value(3, 3), 0b011);
    /// ```
    pub fn segment_value(&self, start: usize, symbol_count: usize) -> usize {
        self.bits[start..start + symbol_count]
            .iter()
            .fold(0, |value, bit| value << 1 | *bit as usize)
    }

    /// Recombines two parents at a single cut point drawn uniformly
    /// from the interior positions `1..length - 1`, so both children
    /// always carry material from both parents. The first child takes
    /// the first parent's prefix, the second child the second
    /// parent's.
    ///
    /// Crossover of two distinct parents always yields two distinct
    /// children.
    ///
    /// # Panics
    /// Panics if the parents' lengths differ.
    ///
    /// # Examples
    /// ```
    /// use bitevo::Chromosome;
    /// use rand::prelude::*;
    ///
    /// let parent1: Chromosome = "000000".parse().unwrap();
    /// let parent2: Chromosome = "111111".parse().unwrap();
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let (child1, child2) = Chromosome::crossover(&parent1, &parent2, &mut rng);
    ///
    /// // The cut is strictly interior: each child starts as one
    /// // parent and ends as the other.
    /// assert!(child1.to_string().starts_with('0') && child1.to_string().ends_with('1'));
    /// assert!(child2.to_string().starts_with('1') && child2.to_string().ends_with('0'));
    /// ```
    pub fn crossover<R: Rng>(
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        assert_eq!(
            parent1.len(),
            parent2.len(),
            "crossover between chromosomes of different lengths"
        );
        let cut = rng.gen_range(1..parent1.len());
        let splice = |head: &Chromosome, tail: &Chromosome| Chromosome {
            bits: head.bits[..cut]
                .iter()
                .chain(&tail.bits[cut..])
                .copied()
                .collect(),
        };
        (splice(parent1, parent2), splice(parent2, parent1))
    }

    /// Returns a copy of the chromosome with each symbol
    /// independently flipped with probability `mutation_rate`.
    ///
    /// # Examples
    /// ```
    /// use bitevo::Chromosome;
    /// use rand::prelude::*;
    ///
    /// let chromosome: Chromosome = "010110".parse().unwrap();
    /// let mut rng = StdRng::seed_from_u64(7);
    ///
    /// // Rate 0 never flips, rate 1 complements every symbol.
    /// assert_eq!(chromosome.mutated(0.0, &mut rng), chromosome);
    /// assert_eq!(chromosome.mutated(1.0, &mut rng).to_string(), "101001");
    /// ```
    pub fn mutated<R: Rng>(&self, mutation_rate: f32, rng: &mut R) -> Chromosome {
        Chromosome {
            bits: self
                .bits
                .iter()
                .map(|bit| {
                    if rng.gen::<f32>() < mutation_rate {
                        !*bit
                    } else {
                        *bit
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Chromosome {
    type Err = ParseChromosomeError;

    fn from_str(s: &str) -> Result<Chromosome, ParseChromosomeError> {
        s.chars()
            .enumerate()
            .map(|(position, symbol)| match symbol {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseChromosomeError { position, symbol }),
            })
            .collect::<Result<Vec<bool>, _>>()
            .map(|bits| Chromosome { bits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Motor table of the powertrain demo: power vs. weight per 3-symbol variant.
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

    /// Battery table of the powertrain demo: range vs. weight per 3-symbol variant.
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

    fn powertrain_config() -> GeneticConfig {
        GeneticConfig::new(vec![motor_table(), battery_table()], 0.02).unwrap()
    }

    fn chromosome(literal: &str) -> Chromosome {
        literal.parse().unwrap()
    }

    #[test]
    fn literal_round_trip() {
        for literal in ["000000", "111111", "010110"] {
            assert_eq!(chromosome(literal).to_string(), literal);
        }
    }

    #[test]
    fn parse_rejects_invalid_symbols() {
        assert_eq!(
            "01a110".parse::<Chromosome>(),
            Err(ParseChromosomeError {
                position: 2,
                symbol: 'a'
            })
        );
    }

    #[test]
    fn segment_values_read_big_endian() {
        let c = chromosome("100011");
        assert_eq!(c.segment_value(0, 3), 0b100);
        assert_eq!(c.segment_value(3, 3), 0b011);
        assert_eq!(c.segment_value(0, 6), 0b100011);
    }

    #[test]
    fn random_chromosomes_have_configured_length() {
        let config = powertrain_config();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(Chromosome::random(&config, &mut rng).len(), 6);
        }
    }

    #[test]
    fn fitness_matches_known_designs() {
        let config = powertrain_config();
        // max(0, 3 + 2 - (3 + 5)) and max(0, 21 + 14 - (7.5 + 12.5)).
        assert_eq!(config.evaluate(&chromosome("000000")), 0.0);
        assert_eq!(config.evaluate(&chromosome("111111")), 15.0);
        // 2 + 21 - (3 + 12.5): weakest motor, strongest battery.
        assert_eq!(config.evaluate(&chromosome("000111")), 7.5);
    }

    #[test]
    fn fitness_is_never_negative() {
        let config = powertrain_config();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let c = Chromosome::random(&config, &mut rng);
            assert!(config.evaluate(&c) >= 0.0, "negative fitness for {}", c);
        }
    }

    #[test]
    fn all_zero_traits_score_exactly_zero() {
        let zero = SegmentTable::new(2, vec![TraitPair::new(0.0, 0.0); 4]).unwrap();
        let config = GeneticConfig::new(vec![zero.clone(), zero], 0.0).unwrap();
        assert_eq!(config.evaluate(&chromosome("1010")), 0.0);
    }

    #[test]
    fn crossover_cut_is_strictly_interior() {
        let parent1 = chromosome("000000");
        let parent2 = chromosome("111111");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let (child1, child2) = Chromosome::crossover(&parent1, &parent2, &mut rng);
            assert_eq!(child1.len(), 6);
            assert_eq!(child2.len(), 6);
            // An interior cut leaves the first symbol from one parent
            // and the last from the other in both children.
            let c1 = child1.to_string();
            let c2 = child2.to_string();
            assert!(c1.starts_with('0') && c1.ends_with('1'), "bad cut: {}", c1);
            assert!(c2.starts_with('1') && c2.ends_with('0'), "bad cut: {}", c2);
        }
    }

    #[test]
    fn crossover_children_swap_complementary_halves() {
        let parent1 = chromosome("001101");
        let parent2 = chromosome("110010");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let (child1, child2) = Chromosome::crossover(&parent1, &parent2, &mut rng);
            for i in 0..6 {
                let (b1, b2) = (
                    child1.bits().nth(i).unwrap(),
                    child2.bits().nth(i).unwrap(),
                );
                let (p1, p2) = (
                    parent1.bits().nth(i).unwrap(),
                    parent2.bits().nth(i).unwrap(),
                );
                // Whatever child 1 takes from parent 1, child 2
                // takes from parent 2 at the same position.
                assert!((b1 == p1 && b2 == p2) || (b1 == p2 && b2 == p1));
            }
        }
    }

    #[test]
    fn distinct_parents_always_yield_distinct_children() {
        let parent1 = chromosome("001101");
        let parent2 = chromosome("110010");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let (child1, child2) = Chromosome::crossover(&parent1, &parent2, &mut rng);
            assert_ne!(child1, child2);
        }
    }

    #[test]
    fn mutation_rate_zero_is_identity() {
        let c = chromosome("010110");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(c.mutated(0.0, &mut rng), c);
        }
    }

    #[test]
    fn mutation_rate_one_complements_every_symbol() {
        let c = chromosome("010110");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(c.mutated(1.0, &mut rng), chromosome("101001"));
        }
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let err = SegmentTable::new(3, vec![TraitPair::new(1.0, 1.0); 7]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::IncompleteSegmentTable {
                symbol_count: 3,
                expected: 8,
                found: 7
            }
        );
    }

    #[test]
    fn zero_length_segment_is_rejected() {
        assert_eq!(
            SegmentTable::new(0, vec![TraitPair::new(1.0, 1.0)]).unwrap_err(),
            ConfigError::ZeroLengthSegment
        );
    }

    #[test]
    fn negative_trait_is_rejected() {
        let err = SegmentTable::new(
            1,
            vec![TraitPair::new(1.0, 1.0), TraitPair::new(2.0, -0.5)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTrait {
                segment_value: 1,
                value: -0.5
            }
        );
    }

    #[test]
    fn out_of_range_mutation_rate_is_rejected() {
        for rate in [-0.1, 1.5, f32::NAN, f32::INFINITY] {
            let err = GeneticConfig::new(vec![motor_table()], rate).unwrap_err();
            assert!(matches!(err, ConfigError::MutationRateOutOfRange(_)));
        }
    }

    #[test]
    fn degenerate_chromosome_shapes_are_rejected() {
        assert_eq!(
            GeneticConfig::new(vec![], 0.02).unwrap_err(),
            ConfigError::NoSegments
        );
        let single = SegmentTable::new(
            1,
            vec![TraitPair::new(1.0, 0.0), TraitPair::new(2.0, 0.0)],
        )
        .unwrap();
        assert_eq!(
            GeneticConfig::new(vec![single], 0.02).unwrap_err(),
            ConfigError::ChromosomeTooShort(1)
        );
    }
}
